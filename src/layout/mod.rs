mod grid;
mod legend;
mod printer;
mod room;
mod text;
pub(crate) mod types;
pub use grid::{GridModel, grid_to_image_coordinate, grid_to_pixel_scale, room_grid_coordinate};
pub use text::{floor_title, ordinal};
pub use types::*;
use legend::*;
use printer::*;
use room::*;

use crate::config::LayoutConfig;
use crate::ir::{FloorSpec, FloorTitle};
use crate::theme::Theme;
use log::{debug, warn};
use std::collections::HashMap;

/// Lays out a floor in two passes: the legend's room types are collected
/// first because the canvas height depends on the legend row count.
pub fn compute_layout(
    spec: &FloorSpec,
    title: Option<&FloorTitle>,
    theme: &Theme,
    config: &LayoutConfig,
) -> FloorLayout {
    let grid = GridModel::new(spec);
    if grid.is_degenerate() {
        warn!(
            grid_size = spec.grid_size,
            grid_cols = spec.grid_cols,
            grid_rows = spec.grid_rows;
            "Degenerate grid, rendering an empty canvas"
        );
    }

    let kinds = legend_types(&spec.rooms);
    let rows = legend_rows(kinds.len(), config);
    let legend_band = legend_band(rows, config);
    let extra = config.title_band + legend_band;
    let total_height = grid.height + extra;
    let output_width = config.output_width;
    let output_height =
        grid.scaled_length(grid.height, output_width) + grid.scaled_length(extra, output_width);

    let rooms = layout_rooms(spec, &grid, theme, config);
    let printers = if config.include_printers {
        spec.printers
            .iter()
            .map(|printer| layout_printer(printer, &rooms, config))
            .collect()
    } else {
        Vec::new()
    };

    let title = title
        .filter(|title| title.floor > 0 && !title.building.is_empty())
        .map(|title| layout_title(title, grid.width, grid.height, config));
    let legend = layout_legend(&kinds, grid.width, grid.height, config);

    debug!(
        rooms = rooms.len(),
        printers = printers.len(),
        legend_rows = rows,
        output_height;
        "Computed floor layout"
    );

    FloorLayout {
        width: grid.width,
        diagram_height: grid.height,
        title_band: config.title_band,
        legend_band,
        legend_rows: rows,
        total_height,
        output_width,
        output_height,
        grid_scale: grid.output_scale(output_width),
        label_font_weight: config.label_font_weight,
        rooms,
        printers,
        title,
        legend,
    }
}

/// One layout per room id. A repeated id replaces the earlier room's
/// geometry but keeps its drawing position.
fn layout_rooms(
    spec: &FloorSpec,
    grid: &GridModel,
    theme: &Theme,
    config: &LayoutConfig,
) -> Vec<RoomLayout> {
    let mut rooms: Vec<RoomLayout> = Vec::with_capacity(spec.rooms.len());
    let mut index: HashMap<&str, usize> = HashMap::new();
    for room in &spec.rooms {
        let layout = layout_room(room, grid, theme, config);
        match index.get(room.id.as_str()) {
            Some(&slot) => {
                warn!(room = room.id.as_str(); "Duplicate room id, later definition wins");
                rooms[slot] = layout;
            }
            None => {
                index.insert(room.id.as_str(), rooms.len());
                rooms.push(layout);
            }
        }
    }
    rooms
}
