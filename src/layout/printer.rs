use log::warn;

use crate::config::LayoutConfig;
use crate::ir::Printer;

use super::{PrinterLayout, RoomLayout};

/// Places a printer at its room-relative fraction. A printer whose room is
/// missing lands on the origin.
pub(super) fn layout_printer(
    printer: &Printer,
    rooms: &[RoomLayout],
    config: &LayoutConfig,
) -> PrinterLayout {
    let room = rooms.iter().find(|room| room.id == printer.room);
    let (x, y) = match room {
        Some(room) => (
            room.rect.x + printer.grid_rx * room.rect.width,
            room.rect.y + printer.grid_ry * room.rect.height,
        ),
        None => {
            warn!(
                printer = printer.id.as_str(),
                room = printer.room.as_str();
                "Printer references a missing room, placing at origin"
            );
            (0.0, 0.0)
        }
    };
    PrinterLayout {
        id: printer.id.clone(),
        x,
        y,
        caption: printer.caption().to_string(),
        size: config.printer_size,
        font_size: config.printer_font_size,
        caption_offset: config.printer_caption_offset,
        placed: room.is_some(),
    }
}
