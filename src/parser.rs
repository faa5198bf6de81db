use crate::error::{FloorError, Result};
use crate::ir::FloorSpec;
use crate::mapping::RoomMapping;
use log::{debug, trace};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Parses a floor spec. Strict JSON first, then JSON5 for hand-edited
/// templates with comments or trailing commas.
pub fn parse_floor_spec(input: &str) -> Result<FloorSpec> {
    let spec: FloorSpec = parse_lenient(input).map_err(FloorError::Spec)?;
    debug!(
        rooms = spec.rooms.len(),
        printers = spec.printers.len();
        "Parsed floor spec"
    );
    Ok(spec)
}

pub fn load_floor_spec(path: &Path) -> Result<FloorSpec> {
    let input = std::fs::read_to_string(path)?;
    parse_floor_spec(&input)
}

/// Parses a flat `{ "room-id or label": "display label" }` object.
pub fn parse_room_mapping(input: &str) -> Result<RoomMapping> {
    parse_lenient(input).map_err(FloorError::Mapping)
}

pub fn load_room_mapping(path: &Path) -> Result<RoomMapping> {
    let input = std::fs::read_to_string(path)?;
    parse_room_mapping(&input)
}

fn parse_lenient<T: DeserializeOwned>(input: &str) -> std::result::Result<T, String> {
    match serde_json::from_str::<T>(input) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            trace!(error:% = json_err; "Strict JSON failed, retrying as JSON5");
            json5::from_str::<T>(input).map_err(|_| json_err.to_string())
        }
    }
}
