use crate::config::{Config, RenderConfig, load_config};
use crate::error::FloorError;
use crate::ir::{FloorSpec, FloorTitle};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::lint;
use crate::mapping::{RoomMapping, diagram_file_stem, prepare_floor};
use crate::parser::{load_room_mapping, parse_floor_spec};
use crate::render::{render_svg, write_output_svg};
use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "floorplan",
    version,
    about = "Render grid-based building floor plans to SVG and PNG"
)]
pub struct Args {
    /// Floor spec (.json), '-' for stdin, or a directory for batch mode
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file or directory. Defaults to stdout for a single SVG.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (layout constants, themeVariables, building names)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Output image width in pixels
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Building code shown in the title, e.g. SCIENCE
    #[arg(long, requires = "floor")]
    pub building: Option<String>,

    /// Floor number shown in the title
    #[arg(long, requires = "building")]
    pub floor: Option<u32>,

    /// JSON object mapping template room ids or labels to display labels
    #[arg(long = "room-map")]
    pub room_map: Option<PathBuf>,

    /// Leave printer icons out of the diagram
    #[arg(long = "no-printers")]
    pub no_printers: bool,

    /// Write the computed layout as JSON
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,

    /// Fail when the floor spec has check warnings
    #[arg(long)]
    pub strict: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Both,
}

impl OutputFormat {
    fn wants_svg(self) -> bool {
        matches!(self, OutputFormat::Svg | OutputFormat::Both)
    }

    fn wants_png(self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Both)
    }
}

/// Batch file names such as `SCIENCE_F3` carry their own title.
static FLOOR_STEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9]+)_F(\d+)$").unwrap());

pub fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.layout.output_width = width;
    }
    if args.no_printers {
        config.layout.include_printers = false;
    }

    let mapping = match args.room_map.as_deref() {
        Some(path) => load_room_mapping(path)
            .with_context(|| format!("failed to read room map {}", path.display()))?,
        None => RoomMapping::new(),
    };

    if let Some(dir) = args.input.as_deref().filter(|path| path.is_dir()) {
        return run_batch(args, dir, &config, &mapping);
    }

    let input = read_input(args.input.as_deref())?;
    let title = args
        .building
        .as_deref()
        .zip(args.floor)
        .map(|(code, floor)| FloorTitle {
            building: config.building_name(code),
            floor,
        });
    let svg = render_floor(
        &input,
        &mapping,
        title.as_ref(),
        &config,
        args.strict,
        args.dump_layout.as_deref(),
    )?;

    let stem = output_stem(args);
    let width = png_width(&config);
    match args.output_format {
        OutputFormat::Svg => {
            let output = args
                .output
                .as_deref()
                .map(|path| output_path(path, &stem, "svg"));
            write_output_svg(&svg, output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = output_path(ensure_output(args.output.as_deref(), "png")?, &stem, "png");
            PngSink::new(&config.render).write(&svg, width, &output)?;
            info!(path:% = output.display(); "Wrote PNG");
        }
        OutputFormat::Both => {
            let base = ensure_output(args.output.as_deref(), "svg+png")?;
            let svg_path = output_path(base, &stem, "svg").with_extension("svg");
            let png_path = svg_path.with_extension("png");
            write_output_svg(&svg, Some(&svg_path))?;
            PngSink::new(&config.render).write(&svg, width, &png_path)?;
            info!(svg:% = svg_path.display(), png:% = png_path.display(); "Wrote SVG and PNG");
        }
    }
    Ok(())
}

/// Parse, fix up, check, lay out and serialize one floor.
fn render_floor(
    input: &str,
    mapping: &RoomMapping,
    title: Option<&FloorTitle>,
    config: &Config,
    strict: bool,
    dump: Option<&Path>,
) -> Result<String> {
    let mut spec = parse_floor_spec(input)?;
    prepare_floor(&mut spec, mapping);
    check_spec(&spec, strict)?;

    let layout = compute_layout(&spec, title, &config.theme, &config.layout);
    if let Some(path) = dump {
        write_layout_dump(path, &layout)
            .with_context(|| format!("failed to write layout dump {}", path.display()))?;
    }
    Ok(render_svg(&layout, &config.theme))
}

fn check_spec(spec: &FloorSpec, strict: bool) -> std::result::Result<(), FloorError> {
    let warnings = lint::check(spec);
    for warning in &warnings {
        warn!(category:% = warning.category; "{}", warning.message);
    }
    match warnings.first() {
        Some(first) if strict => Err(FloorError::Check {
            count: warnings.len(),
            first: first.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Renders every `*.json` spec in `dir`, then rasterizes any `*.svg` there
/// that has no PNG next to it. Failures are counted, not fatal per file.
fn run_batch(args: &Args, dir: &Path, config: &Config, mapping: &RoomMapping) -> Result<()> {
    let out_dir = args.output.clone().unwrap_or_else(|| dir.to_path_buf());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    if args.dump_layout.is_some() {
        warn!("--dump-layout is ignored for directory input");
    }

    let png = args
        .output_format
        .wants_png()
        .then(|| PngSink::new(&config.render));
    let width = png_width(config);
    let skip: Vec<PathBuf> = [args.config.as_deref(), args.room_map.as_deref()]
        .into_iter()
        .flatten()
        .filter_map(|path| path.canonicalize().ok())
        .collect();

    let mut rendered = 0usize;
    let mut failed = 0usize;
    for path in list_files(dir, "json")? {
        if path.canonicalize().is_ok_and(|path| skip.contains(&path)) {
            continue;
        }
        match render_batch_spec(&path, &out_dir, args, config, mapping, png.as_ref(), width) {
            Ok(()) => rendered += 1,
            Err(err) => {
                error!(file:% = path.display(); "{err:#}");
                failed += 1;
            }
        }
    }

    let mut rasterized = 0usize;
    let mut skipped = 0usize;
    if let Some(png) = &png {
        for svg_path in list_files(dir, "svg")? {
            let png_path = svg_path.with_extension("png");
            if png_path.exists() {
                debug!(file:% = png_path.display(); "PNG exists, skipping");
                skipped += 1;
                continue;
            }
            let result = std::fs::read_to_string(&svg_path)
                .with_context(|| format!("failed to read {}", svg_path.display()))
                .and_then(|svg| png.write(&svg, width, &png_path));
            match result {
                Ok(()) => rasterized += 1,
                Err(err) => {
                    error!(file:% = svg_path.display(); "{err:#}");
                    failed += 1;
                }
            }
        }
    }

    info!(rendered, rasterized, skipped, failed; "Batch finished");
    if failed > 0 {
        bail!("{failed} file(s) failed in {}", dir.display());
    }
    Ok(())
}

fn render_batch_spec(
    path: &Path,
    out_dir: &Path,
    args: &Args,
    config: &Config,
    mapping: &RoomMapping,
    png: Option<&PngSink>,
    width: u32,
) -> Result<()> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("floor");
    let title = title_from_stem(stem, config);
    let svg = render_floor(&input, mapping, title.as_ref(), config, args.strict, None)?;

    if args.output_format.wants_svg() {
        write_output_svg(&svg, Some(&out_dir.join(format!("{stem}.svg"))))?;
    }
    if let Some(png) = png {
        png.write(&svg, width, &out_dir.join(format!("{stem}.png")))?;
    }
    debug!(file:% = path.display(); "Rendered floor");
    Ok(())
}

fn title_from_stem(stem: &str, config: &Config) -> Option<FloorTitle> {
    let caps = FLOOR_STEM_RE.captures(stem)?;
    let floor = caps[2].parse().ok()?;
    Some(FloorTitle {
        building: config.building_name(&caps[1]),
        floor,
    })
}

fn list_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output<'a>(output: Option<&'a Path>, ext: &str) -> Result<&'a Path> {
    output.ok_or_else(|| anyhow::anyhow!("Output path required for {} output", ext))
}

/// Base name used when the output is a directory.
fn output_stem(args: &Args) -> String {
    if let (Some(code), Some(floor)) = (args.building.as_deref(), args.floor) {
        return diagram_file_stem(code, floor);
    }
    args.input
        .as_deref()
        .filter(|path| *path != Path::new("-"))
        .and_then(|path| path.file_stem())
        .and_then(|stem| stem.to_str())
        .unwrap_or("floor")
        .to_string()
}

fn output_path(base: &Path, stem: &str, ext: &str) -> PathBuf {
    if base.is_dir() {
        base.join(format!("{stem}.{ext}"))
    } else {
        base.to_path_buf()
    }
}

fn png_width(config: &Config) -> u32 {
    config.layout.output_width.round().max(1.0) as u32
}

#[cfg(feature = "png")]
struct PngSink(crate::render::PngRasterizer);

#[cfg(feature = "png")]
impl PngSink {
    fn new(config: &RenderConfig) -> Self {
        Self(crate::render::PngRasterizer::new(config))
    }

    fn write(&self, svg: &str, width: u32, path: &Path) -> Result<()> {
        self.0
            .write_png(svg, width, path)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(not(feature = "png"))]
struct PngSink;

#[cfg(not(feature = "png"))]
impl PngSink {
    fn new(_config: &RenderConfig) -> Self {
        Self
    }

    fn write(&self, _svg: &str, _width: u32, _path: &Path) -> Result<()> {
        bail!("PNG output requires the `png` feature")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const FLOOR: &str = r#"{
        "rooms": [
            {"id": "lab-1", "grid_x": 0, "grid_y": 0, "grid_w": 3, "grid_h": 3, "label": "Computer Lab", "type": "lab"},
            {"id": "restroom-m", "grid_x": 3, "grid_y": 0, "grid_w": 1, "grid_h": 1, "label": "Men", "type": "restroom"},
            {"id": "restroom-m-2", "grid_x": 4, "grid_y": 0, "grid_w": 1, "grid_h": 1, "label": "Men's", "type": "restroom"}
        ],
        "printers": [{"id": "P1", "room": "lab-1"}]
    }"#;

    const ORPHAN_PRINTER: &str = r#"{
        "rooms": [{"id": "a", "grid_x": 0, "grid_y": 0, "grid_w": 2, "grid_h": 2, "type": "office"}],
        "printers": [{"id": "P9", "room": "gone"}]
    }"#;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["floorplan"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn path_str(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn building_requires_floor() {
        assert!(Args::try_parse_from(["floorplan", "--building", "SCIENCE"]).is_err());
        assert!(Args::try_parse_from(["floorplan", "--floor", "2"]).is_err());
        let parsed = args(&["--building", "SCIENCE", "--floor", "2"]);
        assert_eq!(parsed.floor, Some(2));
        assert_eq!(parsed.output_format, OutputFormat::Svg);
        assert_eq!(parsed.log_level, "warn");
    }

    #[test]
    fn renders_titled_svg_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("template.json");
        fs::write(&input, FLOOR).unwrap();
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();

        run(&args(&[
            "-i",
            path_str(&input),
            "-o",
            path_str(&out),
            "--building",
            "SCIENCE",
            "--floor",
            "2",
        ]))
        .unwrap();

        let svg = fs::read_to_string(out.join("SCIENCE_F2.svg")).unwrap();
        assert!(svg.contains("Science &amp; Technology Building - 2nd Floor"));
        assert!(svg.contains("<!-- Printer P1 -->"));
        assert_eq!(svg.matches(">Men</text>").count(), 1);
        assert!(!svg.contains("Men&apos;s"));
    }

    #[test]
    fn room_map_and_no_printers() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("floor.json");
        fs::write(&input, FLOOR).unwrap();
        let map = dir.path().join("map.json");
        fs::write(&map, r#"{"lab-1": "Robotics Lab"}"#).unwrap();
        let output = dir.path().join("floor.svg");

        run(&args(&[
            "-i",
            path_str(&input),
            "-o",
            path_str(&output),
            "--room-map",
            path_str(&map),
            "--no-printers",
        ]))
        .unwrap();

        let svg = fs::read_to_string(&output).unwrap();
        assert!(svg.contains(">Robotics Lab</text>"));
        assert!(!svg.contains("Printer P1"));
    }

    #[test]
    fn strict_mode_rejects_orphan_printer() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("floor.json");
        fs::write(&input, ORPHAN_PRINTER).unwrap();
        let output = dir.path().join("floor.svg");

        let err = run(&args(&[
            "-i",
            path_str(&input),
            "-o",
            path_str(&output),
            "--strict",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("missing room"));
        assert!(!output.exists());

        run(&args(&["-i", path_str(&input), "-o", path_str(&output)])).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn writes_layout_dump() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("floor.json");
        fs::write(&input, FLOOR).unwrap();
        let dump = dir.path().join("layout.json");

        run(&args(&[
            "-i",
            path_str(&input),
            "-o",
            path_str(&dir.path().join("floor.svg")),
            "--dump-layout",
            path_str(&dump),
        ]))
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&dump).unwrap()).unwrap();
        assert_eq!(value["rooms"].as_array().unwrap().len(), 2);
        assert_eq!(value["printers"][0]["placed"], true);
    }

    #[test]
    fn png_output_needs_a_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("floor.json");
        fs::write(&input, FLOOR).unwrap();
        let err = run(&args(&["-i", path_str(&input), "-e", "png"])).unwrap_err();
        assert!(err.to_string().contains("Output path required"));
    }

    #[test]
    fn batch_renders_specs_and_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("SCIENCE_F1.json"), FLOOR).unwrap();
        fs::write(dir.path().join("broken.json"), "{ rooms: [").unwrap();
        let out = dir.path().join("rendered");

        let err = run(&args(&[
            "-i",
            path_str(dir.path()),
            "-o",
            path_str(&out),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("1 file(s) failed"));

        let svg = fs::read_to_string(out.join("SCIENCE_F1.svg")).unwrap();
        assert!(svg.contains("Science &amp; Technology Building - 1st Floor"));
        assert!(!out.join("broken.svg").exists());
    }

    #[test]
    fn batch_skips_room_map_in_input_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("floor.json"), FLOOR).unwrap();
        let map = dir.path().join("names.json");
        fs::write(&map, r#"{"Computer Lab": "Media Lab"}"#).unwrap();

        run(&args(&["-i", path_str(dir.path()), "--room-map", path_str(&map)])).unwrap();

        let svg = fs::read_to_string(dir.path().join("floor.svg")).unwrap();
        assert!(svg.contains(">Media Lab</text>"));
        assert!(!dir.path().join("names.svg").exists());
    }

    #[test]
    fn stems_carry_titles() {
        let config = Config::default();
        assert_eq!(
            title_from_stem("LIBRARY_F12", &config),
            Some(FloorTitle {
                building: "Library & Research Center".to_string(),
                floor: 12,
            })
        );
        assert_eq!(
            title_from_stem("ANNEX_F0", &config).map(|t| t.building),
            Some("ANNEX".to_string())
        );
        assert_eq!(title_from_stem("ground-floor", &config), None);
    }

    #[cfg(feature = "png")]
    #[test]
    fn batch_rasterizes_svgs_without_png() {
        let dir = tempfile::tempdir().unwrap();
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><rect width="100" height="50" fill="red"/></svg>"#;
        fs::write(dir.path().join("a.svg"), svg).unwrap();
        fs::write(dir.path().join("b.svg"), svg).unwrap();
        fs::write(dir.path().join("b.png"), b"existing").unwrap();

        run(&args(&["-i", path_str(dir.path()), "-e", "png", "-w", "200"])).unwrap();

        let png = fs::read(dir.path().join("a.png")).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        assert_eq!(fs::read(dir.path().join("b.png")).unwrap(), b"existing");
    }
}
