//! Pre-render fixes applied to a floor template before layout: duplicate
//! restroom removal and relabeling rooms with their registered names.

use crate::ir::{FloorSpec, Room, RoomType};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Template room id or template label to display label.
pub type RoomMapping = BTreeMap<String, String>;

static MENS_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)restroom-m").unwrap());
static WOMENS_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)restroom-w").unwrap());
static MENS_LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Men('s)?$").unwrap());
static WOMENS_LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Women('s)?$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RestroomSide {
    Mens,
    Womens,
}

fn restroom_side(room: &Room) -> Option<RestroomSide> {
    if room.kind != RoomType::Restroom {
        return None;
    }
    let label = room.label().unwrap_or_default();
    if MENS_ID_RE.is_match(&room.id) || MENS_LABEL_RE.is_match(label) {
        Some(RestroomSide::Mens)
    } else if WOMENS_ID_RE.is_match(&room.id) || WOMENS_LABEL_RE.is_match(label) {
        Some(RestroomSide::Womens)
    } else {
        None
    }
}

/// Keeps the first men's and first women's restroom and drops later ones.
/// Returns the number of rooms removed.
pub fn dedupe_restrooms(rooms: &mut Vec<Room>) -> usize {
    let before = rooms.len();
    let mut seen_mens = false;
    let mut seen_womens = false;
    rooms.retain(|room| match restroom_side(room) {
        Some(RestroomSide::Mens) => !std::mem::replace(&mut seen_mens, true),
        Some(RestroomSide::Womens) => !std::mem::replace(&mut seen_womens, true),
        None => true,
    });
    let removed = before - rooms.len();
    if removed > 0 {
        debug!(removed; "Dropped duplicate restrooms");
    }
    removed
}

/// Relabels rooms by id, then by current label. Unmatched rooms keep their label.
pub fn apply_room_mapping(rooms: &mut [Room], mapping: &RoomMapping) -> usize {
    let mut relabeled = 0;
    for room in rooms.iter_mut() {
        let mapped = mapping
            .get(&room.id)
            .or_else(|| room.label().and_then(|label| mapping.get(label)));
        if let Some(label) = mapped {
            room.label = Some(label.clone());
            relabeled += 1;
        }
    }
    relabeled
}

/// Runs restroom de-duplication followed by relabeling.
pub fn prepare_floor(spec: &mut FloorSpec, mapping: &RoomMapping) {
    let removed = dedupe_restrooms(&mut spec.rooms);
    let relabeled = apply_room_mapping(&mut spec.rooms, mapping);
    info!(removed, relabeled; "Prepared floor template");
}

/// Deterministic base name for a rendered floor, e.g. `SCIENCE_F3`.
pub fn diagram_file_stem(building_code: &str, floor: u32) -> String {
    format!("{building_code}_F{floor}")
}
