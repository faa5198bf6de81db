//! Boundary checks for floor specs.
//!
//! Rendering tolerates everything reported here: printers fall back to the
//! origin and unknown types render white.

use std::collections::HashSet;
use std::fmt;

use crate::ir::FloorSpec;

/// A problem found in a floor spec
#[derive(Debug, Clone, PartialEq)]
pub struct SpecWarning {
    pub category: SpecCategory,
    pub message: String,
}

impl fmt::Display for SpecWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecCategory {
    Grid,
    Bounds,
    Duplicate,
    RoomType,
    Printer,
}

impl fmt::Display for SpecCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecCategory::Grid => write!(f, "grid"),
            SpecCategory::Bounds => write!(f, "bounds"),
            SpecCategory::Duplicate => write!(f, "duplicate"),
            SpecCategory::RoomType => write!(f, "room-type"),
            SpecCategory::Printer => write!(f, "printer"),
        }
    }
}

/// Run all checks on a parsed spec.
pub fn check(spec: &FloorSpec) -> Vec<SpecWarning> {
    let mut warnings = Vec::new();
    check_grid(spec, &mut warnings);
    check_rooms(spec, &mut warnings);
    check_printers(spec, &mut warnings);
    warnings
}

fn push(warnings: &mut Vec<SpecWarning>, category: SpecCategory, message: String) {
    warnings.push(SpecWarning { category, message });
}

fn check_grid(spec: &FloorSpec, warnings: &mut Vec<SpecWarning>) {
    for (name, value) in [
        ("grid_size", spec.grid_size),
        ("grid_cols", spec.grid_cols),
        ("grid_rows", spec.grid_rows),
    ] {
        if value.is_nan() || value <= 0.0 {
            push(
                warnings,
                SpecCategory::Grid,
                format!("{name} must be positive, got {value}"),
            );
        }
    }
}

fn check_rooms(spec: &FloorSpec, warnings: &mut Vec<SpecWarning>) {
    let mut seen = HashSet::new();
    for room in &spec.rooms {
        if !seen.insert(room.id.as_str()) {
            push(
                warnings,
                SpecCategory::Duplicate,
                format!("room \"{}\" is defined more than once", room.id),
            );
        }

        if !room.kind.is_known() {
            push(
                warnings,
                SpecCategory::RoomType,
                format!("room \"{}\" has unknown type \"{}\"", room.id, room.kind),
            );
        }

        let right = room.grid_x + room.grid_w;
        let bottom = room.grid_y + room.grid_h;
        if room.grid_x < 0.0
            || room.grid_y < 0.0
            || right > spec.grid_cols
            || bottom > spec.grid_rows
        {
            push(
                warnings,
                SpecCategory::Bounds,
                format!(
                    "room \"{}\" spans ({}, {})..({}, {}) outside the {}x{} grid",
                    room.id,
                    room.grid_x,
                    room.grid_y,
                    right,
                    bottom,
                    spec.grid_cols,
                    spec.grid_rows
                ),
            );
        }
    }
}

fn check_printers(spec: &FloorSpec, warnings: &mut Vec<SpecWarning>) {
    for printer in &spec.printers {
        if spec.room(&printer.room).is_none() {
            push(
                warnings,
                SpecCategory::Printer,
                format!(
                    "printer \"{}\" references missing room \"{}\"",
                    printer.id, printer.room
                ),
            );
        }
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(printer.grid_rx) || !in_unit(printer.grid_ry) {
            push(
                warnings,
                SpecCategory::Printer,
                format!(
                    "printer \"{}\" position ({}, {}) is outside its room",
                    printer.id, printer.grid_rx, printer.grid_ry
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Printer, RoomType};

    fn printer(id: &str, room: &str, rx: f64, ry: f64) -> Printer {
        Printer {
            id: id.to_string(),
            room: room.to_string(),
            grid_rx: rx,
            grid_ry: ry,
            label: None,
        }
    }

    #[test]
    fn clean_spec_has_no_warnings() {
        let mut spec = FloorSpec::new();
        spec.push_room("a", RoomType::Lab, (0.0, 0.0, 24.0, 14.0), None);
        spec.printers.push(printer("p", "a", 1.0, 0.0));
        assert!(check(&spec).is_empty());
    }

    #[test]
    fn flags_grid_and_bounds() {
        let mut spec = FloorSpec::new();
        spec.grid_rows = 0.0;
        spec.push_room("a", RoomType::Lab, (20.0, 0.0, 5.0, 1.0), None);
        let warnings = check(&spec);
        let categories: Vec<_> = warnings.iter().map(|w| w.category).collect();
        assert_eq!(categories, vec![SpecCategory::Grid, SpecCategory::Bounds]);
        assert!(warnings[0].message.contains("grid_rows"));
    }

    #[test]
    fn flags_duplicates_and_unknown_types() {
        let mut spec = FloorSpec::new();
        spec.push_room("a", RoomType::Lab, (0.0, 0.0, 1.0, 1.0), None);
        spec.push_room("a", RoomType::Other("atrium".to_string()), (1.0, 0.0, 1.0, 1.0), None);
        let warnings = check(&spec);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].category, SpecCategory::Duplicate);
        assert_eq!(
            warnings[1].to_string(),
            "[room-type] room \"a\" has unknown type \"atrium\""
        );
    }

    #[test]
    fn flags_printer_problems() {
        let mut spec = FloorSpec::new();
        spec.push_room("a", RoomType::Office, (0.0, 0.0, 2.0, 2.0), None);
        spec.printers.push(printer("p1", "missing", 0.5, 0.5));
        spec.printers.push(printer("p2", "a", 1.5, -0.1));
        let warnings = check(&spec);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.category == SpecCategory::Printer));
        assert!(warnings[0].message.contains("missing room"));
        assert!(warnings[1].message.contains("p2"));
    }
}
