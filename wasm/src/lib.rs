use floorplan_renderer::{Config, FloorTitle, render_floor_svg};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FloorRenderOptions {
    building: Option<String>,
    floor: Option<u32>,
    output_width: Option<f64>,
    include_printers: Option<bool>,
    font_family: Option<String>,
}

fn build_render_options(options: &FloorRenderOptions) -> (Config, Option<FloorTitle>) {
    let mut config = Config::default();
    if let Some(width) = options.output_width {
        config.layout.output_width = width;
    }
    if let Some(include) = options.include_printers {
        config.layout.include_printers = include;
    }
    if let Some(font_family) = &options.font_family {
        config.theme.font_family = font_family.clone();
    }

    let title = options
        .building
        .as_deref()
        .zip(options.floor)
        .map(|(code, floor)| FloorTitle {
            building: config.building_name(code),
            floor,
        });
    (config, title)
}

#[wasm_bindgen]
pub fn render_floor_plan_svg(spec_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<FloorRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        FloorRenderOptions::default()
    };

    let (config, title) = build_render_options(&options);
    render_floor_svg(spec_json, &config, title).map_err(|error| JsValue::from_str(&error.to_string()))
}
