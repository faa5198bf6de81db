use crate::ir::{FloorSpec, Room};

use super::Rect;

/// Pixel geometry of a floor's grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridModel {
    pub cell: f64,
    pub width: f64,
    pub height: f64,
}

impl GridModel {
    pub fn new(spec: &FloorSpec) -> Self {
        Self {
            cell: spec.grid_size,
            width: spec.grid_cols * spec.grid_size,
            height: spec.grid_rows * spec.grid_size,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn to_pixels(&self, grid_x: f64, grid_y: f64, grid_w: f64, grid_h: f64) -> Rect {
        Rect::new(
            grid_x * self.cell,
            grid_y * self.cell,
            grid_w * self.cell,
            grid_h * self.cell,
        )
    }

    pub fn room_rect(&self, room: &Room) -> Rect {
        self.to_pixels(room.grid_x, room.grid_y, room.grid_w, room.grid_h)
    }

    /// Output pixels per viewBox unit; 0 when the grid has no width.
    pub fn output_scale(&self, output_width: f64) -> f64 {
        if self.width > 0.0 {
            output_width / self.width
        } else {
            0.0
        }
    }

    /// Scales a viewBox length to output pixels, truncated toward zero.
    pub fn scaled_length(&self, length: f64, output_width: f64) -> f64 {
        if self.width > 0.0 {
            (output_width * (length / self.width)).trunc()
        } else {
            0.0
        }
    }
}

/// Output pixels per viewBox unit, `output_width / (grid_cols * grid_size)`.
pub fn grid_to_pixel_scale(spec: &FloorSpec, output_width: f64) -> f64 {
    GridModel::new(spec).output_scale(output_width)
}

/// Grid coordinate of a fractional position inside a room.
pub fn room_grid_coordinate(room: &Room, rx: f64, ry: f64) -> (f64, f64) {
    (room.grid_x + room.grid_w * rx, room.grid_y + room.grid_h * ry)
}

/// Converts a position to whole image pixels at `scale`, truncating.
pub fn grid_to_image_coordinate(grid_x: f64, grid_y: f64, scale: f64) -> (i64, i64) {
    ((grid_x * scale).trunc() as i64, (grid_y * scale).trunc() as i64)
}
