use crate::ir::RoomType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    pub border_color: String,
    pub border_width: f64,
    /// Label color on light fills (corridor, lounge) and for title/legend text.
    pub dark_text_color: String,
    /// Label color on every other fill.
    pub light_text_color: String,
    pub unknown_fill: String,
    pub legend_stroke: String,
    pub printer_body: String,
    pub printer_tray: String,
    pub printer_slot: String,
    pub printer_outline: String,
}

impl Theme {
    pub fn campus() -> Self {
        Self {
            font_family: "Roboto,Segoe UI,Arial,sans-serif".to_string(),
            background: "#f5f5f5".to_string(),
            border_color: "#222".to_string(),
            border_width: 8.0,
            dark_text_color: "#1a1a1a".to_string(),
            light_text_color: "white".to_string(),
            unknown_fill: "#FFFFFF".to_string(),
            legend_stroke: "#333".to_string(),
            printer_body: "#2C3E50".to_string(),
            printer_tray: "#7F8C8D".to_string(),
            printer_slot: "white".to_string(),
            printer_outline: "#FFF".to_string(),
        }
    }

    pub fn room_fill<'a>(&'a self, kind: &RoomType) -> &'a str {
        room_style(kind).map_or(self.unknown_fill.as_str(), |style| style.fill)
    }

    pub fn room_text_color<'a>(&'a self, kind: &RoomType) -> &'a str {
        match room_style(kind) {
            Some(style) if style.light_fill => self.dark_text_color.as_str(),
            _ => self.light_text_color.as_str(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::campus()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomStyle {
    pub fill: &'static str,
    pub display_name: &'static str,
    pub light_fill: bool,
}

/// Static style for a known room type, `None` for unknown tags.
pub fn room_style(kind: &RoomType) -> Option<RoomStyle> {
    let (fill, display_name, light_fill) = match kind {
        RoomType::Lab => ("#FF9800", "Computer Lab", false),
        RoomType::Classroom => ("#2196F3", "Lecture Hall", false),
        RoomType::Office => ("#F44336", "Faculty Office", false),
        RoomType::Library => ("#9C27B0", "Library", false),
        RoomType::Corridor => ("#E0E0E0", "Corridor", true),
        RoomType::Restroom => ("#4CAF50", "Restroom", false),
        RoomType::Stairs => ("#9E9E9E", "Stairs", false),
        RoomType::Elevator => ("#607D8B", "Elevator", false),
        RoomType::Storage => ("#757575", "Storage", false),
        RoomType::Lounge => ("#00BCD4", "Lounge", true),
        RoomType::Other(_) => return None,
    };
    Some(RoomStyle {
        fill,
        display_name,
        light_fill,
    })
}
