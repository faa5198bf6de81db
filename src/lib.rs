#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod lint;
pub mod mapping;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::Config;
pub use error::{FloorError, Result};
pub use ir::{FloorSpec, FloorTitle, Printer, Room, RoomType};

/// Parses a floor spec and renders it to an SVG document with `config`.
/// Restroom de-duplication runs; no room relabeling is applied.
pub fn render_floor_svg(input: &str, config: &Config, title: Option<FloorTitle>) -> Result<String> {
    let mut spec = parser::parse_floor_spec(input)?;
    mapping::prepare_floor(&mut spec, &mapping::RoomMapping::new());
    let layout = layout::compute_layout(&spec, title.as_ref(), &config.theme, &config.layout);
    Ok(render::render_svg(&layout, &config.theme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_from_json() {
        let input = r#"{"grid_cols": 4, "grid_rows": 2, "rooms": [
            {"id": "r1", "grid_x": 0, "grid_y": 0, "grid_w": 4, "grid_h": 2, "type": "library", "label": "Reading Room"}
        ]}"#;
        let svg = render_floor_svg(input, &Config::default(), None).unwrap();
        assert!(svg.contains("viewBox=\"0 0 400 405\""));
        assert!(svg.contains(">Reading Room</text>"));
        assert!(svg.contains(">Library</text>"));
    }

    #[test]
    fn malformed_input_is_a_spec_error() {
        let err = render_floor_svg("{\"rooms\": 3}", &Config::default(), None).unwrap_err();
        assert!(matches!(err, FloorError::Spec(_)));
    }
}
