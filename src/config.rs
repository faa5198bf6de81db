use crate::error::FloorError;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_BUILDINGS: [(&str, &str); 3] = [
    ("MAINACADE", "Main Academic Building"),
    ("SCIENCE", "Science & Technology Building"),
    ("LIBRARY", "Library & Research Center"),
];

/// Layout constants. The text-fitting thresholds are tuned against the fixed
/// per-character width estimate, so the defaults should move together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub output_width: f64,
    pub include_printers: bool,
    /// Estimated width of one character at `base_font_size`.
    pub char_width: f64,
    pub base_font_size: f64,
    pub label_font_weight: u32,
    pub line_height: f64,
    /// Font floor once a wrapped block has to shrink.
    pub min_wrapped_font_size: f64,
    /// Font floor for single-line labels in small rooms.
    pub min_single_font_size: f64,
    /// Glyph width as a fraction of the font size, for single-line shrinking.
    pub glyph_width_factor: f64,
    pub text_margin: f64,
    /// Horizontal room reserved on each side before a label wraps.
    pub wrap_margin: f64,
    /// Total horizontal slack a single word needs to stay unrotated.
    pub rotate_margin: f64,
    pub small_room: f64,
    pub title_band: f64,
    pub title_offset: f64,
    pub title_font_size: f64,
    pub legend_columns: usize,
    pub legend_row_height: f64,
    pub legend_padding: f64,
    pub legend_square: f64,
    pub legend_text_gap: f64,
    pub legend_text_reserve: f64,
    pub legend_font_size: f64,
    pub printer_size: f64,
    pub printer_font_size: f64,
    pub printer_caption_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            output_width: 2400.0,
            include_printers: true,
            char_width: 20.0,
            base_font_size: 40.0,
            label_font_weight: 600,
            line_height: 45.0,
            min_wrapped_font_size: 24.0,
            min_single_font_size: 20.0,
            glyph_width_factor: 0.6,
            text_margin: 20.0,
            wrap_margin: 40.0,
            rotate_margin: 40.0,
            small_room: 150.0,
            title_band: 100.0,
            title_offset: 50.0,
            title_font_size: 48.0,
            legend_columns: 3,
            legend_row_height: 65.0,
            legend_padding: 40.0,
            legend_square: 50.0,
            legend_text_gap: 20.0,
            legend_text_reserve: 150.0,
            legend_font_size: 40.0,
            printer_size: 50.0,
            printer_font_size: 24.0,
            printer_caption_offset: 45.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Font used by the rasterizer when a requested family is missing.
    pub font_family: String,
    pub load_system_fonts: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            load_system_fonts: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    /// Building code to display name.
    pub buildings: BTreeMap<String, String>,
}

impl Config {
    /// Display name for a building code; unknown codes display as themselves.
    pub fn building_name(&self, code: &str) -> String {
        self.buildings
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::campus(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
            buildings: DEFAULT_BUILDINGS
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    background: Option<String>,
    border_color: Option<String>,
    border_width: Option<f64>,
    dark_text_color: Option<String>,
    light_text_color: Option<String>,
    unknown_fill: Option<String>,
    legend_stroke: Option<String>,
    printer_body: Option<String>,
    printer_tray: Option<String>,
    printer_slot: Option<String>,
    printer_outline: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    output_width: Option<f64>,
    include_printers: Option<bool>,
    char_width: Option<f64>,
    base_font_size: Option<f64>,
    line_height: Option<f64>,
    title_band: Option<f64>,
    legend_columns: Option<usize>,
    legend_row_height: Option<f64>,
    theme_variables: Option<ThemeVariables>,
    raster_font_family: Option<String>,
    load_system_fonts: Option<bool>,
    #[serde(default)]
    buildings: BTreeMap<String, String>,
}

pub fn load_config(path: Option<&Path>) -> Result<Config, FloorError> {
    let config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents, config)
}

/// Overlays a JSON config document onto `config`.
pub fn parse_config(contents: &str, mut config: Config) -> Result<Config, FloorError> {
    let parsed: ConfigFile =
        serde_json::from_str(contents).map_err(|err| FloorError::Config(err.to_string()))?;

    let layout = &mut config.layout;
    if let Some(v) = parsed.output_width {
        layout.output_width = v;
    }
    if let Some(v) = parsed.include_printers {
        layout.include_printers = v;
    }
    if let Some(v) = parsed.char_width {
        layout.char_width = v;
    }
    if let Some(v) = parsed.base_font_size {
        layout.base_font_size = v;
    }
    if let Some(v) = parsed.line_height {
        layout.line_height = v;
    }
    if let Some(v) = parsed.title_band {
        layout.title_band = v;
    }
    if let Some(v) = parsed.legend_columns {
        layout.legend_columns = v.max(1);
    }
    if let Some(v) = parsed.legend_row_height {
        layout.legend_row_height = v;
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.background {
            theme.background = v;
        }
        if let Some(v) = vars.border_color {
            theme.border_color = v;
        }
        if let Some(v) = vars.border_width {
            theme.border_width = v;
        }
        if let Some(v) = vars.dark_text_color {
            theme.dark_text_color = v;
        }
        if let Some(v) = vars.light_text_color {
            theme.light_text_color = v;
        }
        if let Some(v) = vars.unknown_fill {
            theme.unknown_fill = v;
        }
        if let Some(v) = vars.legend_stroke {
            theme.legend_stroke = v;
        }
        if let Some(v) = vars.printer_body {
            theme.printer_body = v;
        }
        if let Some(v) = vars.printer_tray {
            theme.printer_tray = v;
        }
        if let Some(v) = vars.printer_slot {
            theme.printer_slot = v;
        }
        if let Some(v) = vars.printer_outline {
            theme.printer_outline = v;
        }
    }

    if let Some(v) = parsed.raster_font_family {
        config.render.font_family = v;
    }
    if let Some(v) = parsed.load_system_fonts {
        config.render.load_system_fonts = v;
    }

    config.buildings.extend(parsed.buildings);
    Ok(config)
}
