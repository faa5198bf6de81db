use crate::error::Result;
use crate::layout::{FloorLayout, LabelLine, RoomLayout};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f64,
    pub diagram_height: f64,
    pub total_height: f64,
    pub output_width: f64,
    pub output_height: f64,
    pub grid_scale: f64,
    pub legend_rows: usize,
    pub title: Option<String>,
    pub rooms: Vec<RoomDump>,
    pub printers: Vec<PrinterDump>,
    pub legend: Vec<LegendDump>,
}

#[derive(Debug, Serialize)]
pub struct RoomDump {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub label_mode: Option<String>,
    pub font_size: Option<f64>,
    pub planned_lines: usize,
    pub lines: Vec<LineDump>,
}

#[derive(Debug, Serialize)]
pub struct LineDump {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PrinterDump {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub caption: String,
    pub placed: bool,
}

#[derive(Debug, Serialize)]
pub struct LegendDump {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
}

impl LayoutDump {
    pub fn from_layout(layout: &FloorLayout) -> Self {
        let printers = layout
            .printers
            .iter()
            .map(|printer| PrinterDump {
                id: printer.id.clone(),
                x: printer.x,
                y: printer.y,
                caption: printer.caption.clone(),
                placed: printer.placed,
            })
            .collect();

        let legend = layout
            .legend
            .iter()
            .map(|item| LegendDump {
                kind: item.kind.to_string(),
                name: item.name.clone(),
                color: item.color.clone(),
                x: item.square.x,
                y: item.text_y,
            })
            .collect();

        LayoutDump {
            width: layout.width,
            diagram_height: layout.diagram_height,
            total_height: layout.total_height,
            output_width: layout.output_width,
            output_height: layout.output_height,
            grid_scale: layout.grid_scale,
            legend_rows: layout.legend_rows,
            title: layout.title.as_ref().map(|title| title.text.clone()),
            rooms: layout.rooms.iter().map(room_dump).collect(),
            printers,
            legend,
        }
    }
}

fn room_dump(room: &RoomLayout) -> RoomDump {
    let lines = room
        .label
        .as_ref()
        .map(|label| label.lines.iter().map(line_dump).collect())
        .unwrap_or_default();
    RoomDump {
        id: room.id.clone(),
        kind: room.kind.to_string(),
        x: room.rect.x,
        y: room.rect.y,
        width: room.rect.width,
        height: room.rect.height,
        fill: room.fill.clone(),
        label_mode: room.label.as_ref().map(|label| label.mode.as_str().to_string()),
        font_size: room.label.as_ref().map(|label| label.font_size),
        planned_lines: room.label.as_ref().map_or(0, |label| label.planned_lines),
        lines,
    }
}

fn line_dump(line: &LabelLine) -> LineDump {
    LineDump {
        x: line.x,
        y: line.y,
        text: line.text.clone(),
    }
}

pub fn write_layout_dump(path: &Path, layout: &FloorLayout) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump).map_err(std::io::Error::from)?;
    Ok(())
}
