use crate::ir::RoomType;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    Single,
    Wrapped,
    Rotated,
}

impl LabelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelMode::Single => "single",
            LabelMode::Wrapped => "wrapped",
            LabelMode::Rotated => "rotated",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelLine {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct RoomLabel {
    pub mode: LabelMode,
    pub font_size: f64,
    pub color: String,
    /// Lines chosen by the wrapping heuristics, before overflow clipping.
    pub planned_lines: usize,
    pub lines: Vec<LabelLine>,
}

#[derive(Debug, Clone)]
pub struct RoomLayout {
    pub id: String,
    pub kind: RoomType,
    pub rect: Rect,
    pub fill: String,
    pub label: Option<RoomLabel>,
}

#[derive(Debug, Clone)]
pub struct PrinterLayout {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub caption: String,
    pub size: f64,
    pub font_size: f64,
    pub caption_offset: f64,
    /// False when the owning room was missing and the icon fell back to the origin.
    pub placed: bool,
}

#[derive(Debug, Clone)]
pub struct TitleLayout {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: f64,
}

#[derive(Debug, Clone)]
pub struct LegendItem {
    pub kind: RoomType,
    pub name: String,
    pub color: String,
    pub square: Rect,
    pub text_x: f64,
    pub text_y: f64,
    pub font_size: f64,
}

#[derive(Debug, Clone)]
pub struct FloorLayout {
    /// Diagram width in viewBox units (`grid_cols * grid_size`).
    pub width: f64,
    /// Diagram height in viewBox units (`grid_rows * grid_size`).
    pub diagram_height: f64,
    pub title_band: f64,
    pub legend_band: f64,
    pub legend_rows: usize,
    /// Full viewBox height including title and legend bands.
    pub total_height: f64,
    pub output_width: f64,
    pub output_height: f64,
    pub grid_scale: f64,
    pub label_font_weight: u32,
    pub rooms: Vec<RoomLayout>,
    pub printers: Vec<PrinterLayout>,
    pub title: Option<TitleLayout>,
    pub legend: Vec<LegendItem>,
}
