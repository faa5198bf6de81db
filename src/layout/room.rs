use log::trace;

use crate::config::LayoutConfig;
use crate::ir::Room;
use crate::theme::Theme;

use super::grid::GridModel;
use super::text::{estimate_width, plan_lines, should_rotate};
use super::{LabelLine, LabelMode, Rect, RoomLabel, RoomLayout};

pub(super) fn layout_room(
    room: &Room,
    grid: &GridModel,
    theme: &Theme,
    config: &LayoutConfig,
) -> RoomLayout {
    let rect = grid.room_rect(room);
    let label = room
        .label()
        .map(|text| layout_label(text, rect, theme.room_text_color(&room.kind), config));
    if let Some(label) = &label {
        trace!(
            room = room.id.as_str(),
            mode = label.mode.as_str(),
            lines = label.lines.len(),
            font_size = label.font_size;
            "Placed room label"
        );
    }
    RoomLayout {
        id: room.id.clone(),
        kind: room.kind.clone(),
        rect,
        fill: theme.room_fill(&room.kind).to_string(),
        label,
    }
}

/// Picks rotated, wrapped or single-line placement for a non-empty label.
pub(super) fn layout_label(text: &str, rect: Rect, color: &str, config: &LayoutConfig) -> RoomLabel {
    let words: Vec<&str> = text.split_whitespace().collect();
    let available = rect.width - config.wrap_margin * 2.0;

    if should_rotate(text, rect.width, rect.height, config) {
        return rotated_label(text, rect, color, config);
    }
    if estimate_width(text, config) > available && words.len() > 1 {
        let relaxed = rect.width - config.text_margin * 2.0;
        let planned = plan_lines(&words, available, relaxed, config);
        if planned.len() > 1 {
            return wrapped_label(planned, rect, color, config);
        }
    }
    single_line_label(text, rect, color, config)
}

fn rotated_label(text: &str, rect: Rect, color: &str, config: &LayoutConfig) -> RoomLabel {
    let (cx, cy) = rect.center();
    RoomLabel {
        mode: LabelMode::Rotated,
        font_size: config.base_font_size,
        color: color.to_string(),
        planned_lines: 1,
        lines: vec![LabelLine {
            x: cx,
            y: cy,
            text: text.to_string(),
        }],
    }
}

fn wrapped_label(planned: Vec<String>, rect: Rect, color: &str, config: &LayoutConfig) -> RoomLabel {
    let count = planned.len().max(1) as f64;
    let margin = config.text_margin;
    let available_height = rect.height - margin * 2.0;

    let mut font_size = config.base_font_size;
    let mut line_height = config.line_height;
    let block = (count - 1.0) * line_height;
    if block + font_size > available_height {
        font_size = ((available_height - block) / count)
            .trunc()
            .max(config.min_wrapped_font_size);
        line_height = font_size + 5.0;
    }

    // Centred between the margins, then offset by half a line.
    let (cx, _) = rect.center();
    let block = (count - 1.0) * line_height;
    let mut start_y = rect.y + margin + font_size / 2.0;
    if block < available_height {
        start_y += (available_height - block) / 2.0;
    }
    let bottom = rect.y + rect.height - margin;

    let mut lines = Vec::with_capacity(planned.len());
    for (idx, text) in planned.iter().enumerate() {
        let y = start_y + idx as f64 * line_height;
        if y + font_size / 2.0 > bottom {
            break;
        }
        lines.push(LabelLine {
            x: cx,
            y,
            text: text.clone(),
        });
    }

    RoomLabel {
        mode: LabelMode::Wrapped,
        font_size,
        color: color.to_string(),
        planned_lines: planned.len(),
        lines,
    }
}

fn single_line_label(text: &str, rect: Rect, color: &str, config: &LayoutConfig) -> RoomLabel {
    let margin = config.text_margin;
    let max_width = rect.width - margin * 2.0;
    let max_height = rect.height - margin * 2.0;
    let chars = text.chars().count().max(1) as f64;
    let glyph = chars * config.glyph_width_factor;
    let base = config.base_font_size;

    let font_size = if rect.width < config.small_room || rect.height < config.small_room {
        base.min((max_width / glyph).trunc())
            .min((max_height * 0.8).trunc())
            .max(config.min_single_font_size)
    } else {
        let fitted = if chars * (base * config.glyph_width_factor) > max_width {
            (max_width / glyph).trunc()
        } else {
            base
        };
        if fitted > max_height {
            (max_height * 0.8).trunc()
        } else {
            fitted
        }
    };

    let (cx, cy) = rect.center();
    let mut y = cy;
    if y - font_size / 2.0 < rect.y + margin {
        y = rect.y + margin + font_size / 2.0;
    }
    if y + font_size / 2.0 > rect.y + rect.height - margin {
        y = rect.y + rect.height - margin - font_size / 2.0;
    }

    RoomLabel {
        mode: LabelMode::Single,
        font_size,
        color: color.to_string(),
        planned_lines: 1,
        lines: vec![LabelLine {
            x: cx,
            y,
            text: text.to_string(),
        }],
    }
}
