use serde::{Deserialize, Serialize};
use std::fmt;

/// Room category tag. Drives fill color, text color and legend membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomType {
    Lab,
    Classroom,
    Office,
    Library,
    #[default]
    Corridor,
    Restroom,
    Stairs,
    Elevator,
    Storage,
    Lounge,
    Other(String),
}

impl RoomType {
    /// Canonical legend order.
    pub const LEGEND_ORDER: [RoomType; 10] = [
        RoomType::Lab,
        RoomType::Classroom,
        RoomType::Office,
        RoomType::Library,
        RoomType::Lounge,
        RoomType::Restroom,
        RoomType::Stairs,
        RoomType::Elevator,
        RoomType::Storage,
        RoomType::Corridor,
    ];

    pub fn from_token(token: &str) -> Self {
        match token {
            "lab" => Self::Lab,
            "classroom" => Self::Classroom,
            "office" => Self::Office,
            "library" => Self::Library,
            "corridor" => Self::Corridor,
            "restroom" => Self::Restroom,
            "stairs" => Self::Stairs,
            "elevator" => Self::Elevator,
            "storage" => Self::Storage,
            "lounge" => Self::Lounge,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Lab => "lab",
            Self::Classroom => "classroom",
            Self::Office => "office",
            Self::Library => "library",
            Self::Corridor => "corridor",
            Self::Restroom => "restroom",
            Self::Stairs => "stairs",
            Self::Elevator => "elevator",
            Self::Storage => "storage",
            Self::Lounge => "lounge",
            Self::Other(tag) => tag.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Position in [`RoomType::LEGEND_ORDER`], `None` for unknown tags.
    pub fn legend_rank(&self) -> Option<usize> {
        Self::LEGEND_ORDER.iter().position(|kind| kind == self)
    }
}

impl From<String> for RoomType {
    fn from(value: String) -> Self {
        Self::from_token(&value)
    }
}

impl From<RoomType> for String {
    fn from(value: RoomType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub grid_x: f64,
    pub grid_y: f64,
    pub grid_w: f64,
    pub grid_h: f64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: RoomType,
}

impl Room {
    /// The display label, treating an empty string as absent.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.is_empty())
    }
}

fn default_fraction() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Printer {
    pub id: String,
    pub room: String,
    #[serde(default = "default_fraction")]
    pub grid_rx: f64,
    #[serde(default = "default_fraction")]
    pub grid_ry: f64,
    #[serde(default)]
    pub label: Option<String>,
}

impl Printer {
    pub fn caption(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

fn default_grid_size() -> f64 {
    100.0
}

fn default_grid_cols() -> f64 {
    24.0
}

fn default_grid_rows() -> f64 {
    14.0
}

/// A floor authored in grid units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorSpec {
    #[serde(default = "default_grid_size")]
    pub grid_size: f64,
    #[serde(default = "default_grid_cols")]
    pub grid_cols: f64,
    #[serde(default = "default_grid_rows")]
    pub grid_rows: f64,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub printers: Vec<Printer>,
}

impl FloorSpec {
    pub fn new() -> Self {
        Self {
            grid_size: default_grid_size(),
            grid_cols: default_grid_cols(),
            grid_rows: default_grid_rows(),
            rooms: Vec::new(),
            printers: Vec::new(),
        }
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn push_room(
        &mut self,
        id: &str,
        kind: RoomType,
        grid: (f64, f64, f64, f64),
        label: Option<&str>,
    ) {
        let (grid_x, grid_y, grid_w, grid_h) = grid;
        self.rooms.push(Room {
            id: id.to_string(),
            grid_x,
            grid_y,
            grid_w,
            grid_h,
            label: label.map(str::to_string),
            kind,
        });
    }
}

impl Default for FloorSpec {
    fn default() -> Self {
        Self::new()
    }
}

/// Building and floor shown in the title band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorTitle {
    pub building: String,
    pub floor: u32,
}
