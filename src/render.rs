use crate::error::Result;
use crate::layout::{FloorLayout, LabelMode, LegendItem, PrinterLayout, RoomLayout, TitleLayout};
use crate::theme::Theme;
use std::path::Path;

#[cfg(feature = "png")]
use crate::config::RenderConfig;
#[cfg(feature = "png")]
use crate::error::FloorError;
#[cfg(feature = "png")]
use log::debug;

pub fn render_svg(layout: &FloorLayout, theme: &Theme) -> String {
    let width = num(layout.width);
    let total_height = num(layout.total_height);
    let mut svg = String::new();

    svg.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {width} {total_height}\" width=\"{}\" height=\"{}\" style=\"display:block; max-width:100%; height:auto;\">\n",
        num(layout.output_width),
        num(layout.output_height)
    ));
    svg.push_str("<defs><style>text { -webkit-font-smoothing: antialiased; -moz-osx-font-smoothing: grayscale; }</style></defs>\n");

    svg.push_str("<!-- Background -->\n");
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{total_height}\" fill=\"{}\"/>\n",
        theme.background
    ));

    svg.push_str("<!-- Rooms -->\n");
    for room in &layout.rooms {
        room_svg(&mut svg, room, layout.label_font_weight, theme);
    }

    svg.push_str("<!-- Printers -->\n");
    for printer in &layout.printers {
        printer_svg(&mut svg, printer, theme);
    }

    svg.push_str("<!-- Building outline -->\n");
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
        num(layout.diagram_height),
        theme.border_color,
        num(theme.border_width)
    ));

    svg.push_str("<!-- Title and Legend -->\n");
    if let Some(title) = &layout.title {
        title_svg(&mut svg, title, theme);
    }
    for item in &layout.legend {
        legend_item_svg(&mut svg, item, theme);
    }

    svg.push_str("</svg>\n");
    svg
}

fn room_svg(svg: &mut String, room: &RoomLayout, weight: u32, theme: &Theme) {
    let rect = room.rect;
    svg.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"none\"/>\n",
        num(rect.x),
        num(rect.y),
        num(rect.width),
        num(rect.height),
        room.fill
    ));

    let Some(label) = &room.label else {
        return;
    };
    let grouped = label.mode == LabelMode::Wrapped;
    if grouped {
        svg.push_str("<g>");
    }
    for line in &label.lines {
        let transform = if label.mode == LabelMode::Rotated {
            format!(" transform=\"rotate(-90 {} {})\"", num(line.x), num(line.y))
        } else {
            String::new()
        };
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{weight}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\"{transform}>{}</text>",
            num(line.x),
            num(line.y),
            theme.font_family,
            num(label.font_size),
            label.color,
            escape_xml(&line.text)
        ));
    }
    if grouped {
        svg.push_str("</g>");
    }
    svg.push('\n');
}

fn printer_svg(svg: &mut String, printer: &PrinterLayout, theme: &Theme) {
    let (x, y) = (printer.x, printer.y);
    let half = printer.size / 2.0;
    svg.push_str(&format!("<!-- Printer {} -->\n", escape_xml(&printer.id)));
    svg.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"3\" rx=\"5\"/>\n",
        num(x - half),
        num(y - half),
        num(printer.size),
        num(printer.size),
        theme.printer_body,
        theme.printer_outline
    ));
    svg.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"40\" height=\"8\" fill=\"{}\" rx=\"2\"/>\n",
        num(x - 20.0),
        num(y - 30.0),
        theme.printer_tray
    ));
    svg.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"30\" height=\"18\" fill=\"{}\" rx=\"2\"/>\n",
        num(x - 15.0),
        num(y - 10.0),
        theme.printer_slot
    ));
    for offset in [-5.0, 2.0] {
        svg.push_str(&format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>\n",
            num(x - 10.0),
            num(y + offset),
            num(x + 10.0),
            num(y + offset),
            theme.printer_body
        ));
    }
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"700\" fill=\"{}\" text-anchor=\"middle\">{}</text>\n",
        num(x),
        num(y + printer.caption_offset),
        theme.font_family,
        num(printer.font_size),
        theme.dark_text_color,
        escape_xml(&printer.caption)
    ));
}

fn title_svg(svg: &mut String, title: &TitleLayout, theme: &Theme) {
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"700\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>\n",
        num(title.x),
        num(title.y),
        theme.font_family,
        num(title.font_size),
        theme.dark_text_color,
        escape_xml(&title.text)
    ));
}

fn legend_item_svg(svg: &mut String, item: &LegendItem, theme: &Theme) {
    let square = item.square;
    svg.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"3\"/>\n",
        num(square.x),
        num(square.y),
        num(square.width),
        num(square.height),
        item.color,
        theme.legend_stroke
    ));
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"700\" fill=\"{}\" text-anchor=\"start\" dominant-baseline=\"middle\">{}</text>\n",
        num(item.text_x),
        num(item.text_y),
        theme.font_family,
        num(item.font_size),
        theme.dark_text_color,
        escape_xml(&item.name)
    ));
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

/// SVG to PNG converter. Fonts are loaded once, so one instance should be
/// reused across a batch.
#[cfg(feature = "png")]
pub struct PngRasterizer {
    options: usvg::Options<'static>,
}

#[cfg(feature = "png")]
impl PngRasterizer {
    pub fn new(config: &RenderConfig) -> Self {
        let mut options = usvg::Options {
            font_family: config.font_family.clone(),
            ..usvg::Options::default()
        };
        if config.load_system_fonts {
            options.fontdb_mut().load_system_fonts();
        }
        Self { options }
    }

    /// Renders `svg` at `width` pixels wide, keeping the aspect ratio of the
    /// document's declared size.
    pub fn rasterize(&self, svg: &str, width: u32) -> Result<Vec<u8>> {
        let tree = usvg::Tree::from_str(svg, &self.options)?;
        let size = tree.size();
        let scale = if size.width() > 0.0 {
            width as f32 / size.width()
        } else {
            1.0
        };
        let height = (size.height() * scale).round().max(1.0) as u32;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width.max(1), height)
            .ok_or(FloorError::Pixmap { width, height })?;

        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );
        debug!(width, height; "Rasterized SVG");
        pixmap
            .encode_png()
            .map_err(|err| FloorError::Png(err.to_string()))
    }

    pub fn write_png(&self, svg: &str, width: u32, output: &Path) -> Result<()> {
        let png = self.rasterize(svg, width)?;
        std::fs::write(output, png)?;
        Ok(())
    }
}
