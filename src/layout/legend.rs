use crate::config::LayoutConfig;
use crate::ir::{FloorTitle, Room, RoomType};
use crate::theme::room_style;

use super::text::floor_title;
use super::{LegendItem, Rect, TitleLayout};

/// Distinct known room types present on the floor, in legend order.
pub(super) fn legend_types(rooms: &[Room]) -> Vec<RoomType> {
    RoomType::LEGEND_ORDER
        .iter()
        .filter(|kind| rooms.iter().any(|room| &room.kind == *kind))
        .cloned()
        .collect()
}

pub(super) fn legend_rows(count: usize, config: &LayoutConfig) -> usize {
    count.div_ceil(config.legend_columns.max(1))
}

/// Height of the legend band below the title band.
pub(super) fn legend_band(rows: usize, config: &LayoutConfig) -> f64 {
    rows as f64 * config.legend_row_height + config.legend_padding
}

pub(super) fn layout_title(
    title: &FloorTitle,
    width: f64,
    diagram_height: f64,
    config: &LayoutConfig,
) -> TitleLayout {
    TitleLayout {
        x: width / 2.0,
        y: diagram_height + config.title_offset,
        text: floor_title(&title.building, title.floor),
        font_size: config.title_font_size,
    }
}

/// Grid of colored squares with names, `legend_columns` per row.
pub(super) fn layout_legend(
    kinds: &[RoomType],
    width: f64,
    diagram_height: f64,
    config: &LayoutConfig,
) -> Vec<LegendItem> {
    let columns = config.legend_columns.max(1);
    let column_width = width / columns as f64;
    let start_y = diagram_height + config.title_band + config.legend_padding;
    let square = config.legend_square;
    let group_width = square + config.legend_text_gap + config.legend_text_reserve;

    kinds
        .iter()
        .enumerate()
        .filter_map(|(idx, kind)| {
            let style = room_style(kind)?;
            let row = idx / columns;
            let col = idx % columns;
            let column_center = col as f64 * column_width + column_width / 2.0;
            let square_x = column_center - group_width / 2.0;
            let y = start_y + row as f64 * config.legend_row_height;
            Some(LegendItem {
                kind: kind.clone(),
                name: style.display_name.to_string(),
                color: style.fill.to_string(),
                square: Rect::new(square_x, y - square / 2.0, square, square),
                text_x: square_x + square + config.legend_text_gap,
                text_y: y,
                font_size: config.legend_font_size,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::FloorSpec;

    fn spec_with(kinds: &[&str]) -> FloorSpec {
        let mut spec = FloorSpec::new();
        for (idx, kind) in kinds.iter().enumerate() {
            spec.push_room(
                &format!("r{idx}"),
                RoomType::from_token(kind),
                (idx as f64, 0.0, 1.0, 1.0),
                None,
            );
        }
        spec
    }

    #[test]
    fn legend_types_are_distinct_and_ordered() {
        let spec = spec_with(&["corridor", "office", "lab", "office", "atrium", "lounge"]);
        assert_eq!(
            legend_types(&spec.rooms),
            vec![
                RoomType::Lab,
                RoomType::Office,
                RoomType::Lounge,
                RoomType::Corridor
            ]
        );
    }

    #[test]
    fn legend_band_grows_per_row() {
        let config = LayoutConfig::default();
        assert_eq!(legend_rows(0, &config), 0);
        assert_eq!(legend_rows(3, &config), 1);
        assert_eq!(legend_rows(7, &config), 3);
        assert_eq!(legend_band(3, &config), 235.0);
        assert_eq!(legend_band(0, &config), 40.0);
    }

    #[test]
    fn legend_grid_positions() {
        let config = LayoutConfig::default();
        let kinds = vec![RoomType::Lab, RoomType::Classroom, RoomType::Office, RoomType::Library];
        let items = layout_legend(&kinds, 2400.0, 1400.0, &config);
        assert_eq!(items.len(), 4);
        // Column width 800, centre 400, group 220 wide.
        assert_eq!(items[0].square, Rect::new(290.0, 1515.0, 50.0, 50.0));
        assert_eq!(items[0].text_x, 360.0);
        assert_eq!(items[0].text_y, 1540.0);
        assert_eq!(items[0].name, "Computer Lab");
        assert_eq!(items[2].square.x, 1890.0);
        assert_eq!(items[3].square.x, 290.0);
        assert_eq!(items[3].text_y, 1605.0);
    }

    #[test]
    fn title_sits_in_band_center() {
        let title = FloorTitle {
            building: "Library & Research Center".to_string(),
            floor: 12,
        };
        let layout = layout_title(&title, 2400.0, 1400.0, &LayoutConfig::default());
        assert_eq!((layout.x, layout.y), (1200.0, 1450.0));
        assert_eq!(layout.text, "Library & Research Center - 12th Floor");
    }
}
