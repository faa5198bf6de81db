use std::path::{Path, PathBuf};

use floorplan_renderer::config::Config;
use floorplan_renderer::ir::{FloorSpec, FloorTitle};
use floorplan_renderer::layout::{FloorLayout, LabelMode, compute_layout};
use floorplan_renderer::lint::{self, SpecCategory};
use floorplan_renderer::mapping::{RoomMapping, prepare_floor};
use floorplan_renderer::parser::{load_floor_spec, load_room_mapping};
use floorplan_renderer::render::render_svg;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(name: &str, mapping: Option<&str>) -> FloorSpec {
    let mut spec = load_floor_spec(&fixture(name)).expect("fixture parse failed");
    let mapping = match mapping {
        Some(map) => load_room_mapping(&fixture(map)).expect("mapping parse failed"),
        None => RoomMapping::new(),
    };
    prepare_floor(&mut spec, &mapping);
    spec
}

fn render(spec: &FloorSpec, title: Option<&FloorTitle>) -> (FloorLayout, String) {
    let config = Config::default();
    let layout = compute_layout(spec, title, &config.theme, &config.layout);
    let svg = render_svg(&layout, &config.theme);
    (layout, svg)
}

fn title(code: &str, floor: u32) -> FloorTitle {
    FloorTitle {
        building: Config::default().building_name(code),
        floor,
    }
}

#[test]
fn seven_type_floor_sizes_canvas_for_three_legend_rows() {
    let spec = load("science_f3.json", None);
    let (layout, svg) = render(&spec, Some(&title("SCIENCE", 3)));

    assert_eq!(layout.legend_rows, 3);
    assert_eq!(layout.total_height, 1735.0);
    assert_eq!(layout.output_height, 1735.0);
    assert!(svg.contains("viewBox=\"0 0 2400 1735\""));
    assert!(svg.contains(">Science &amp; Technology Building - 3rd Floor</text>"));
}

#[test]
fn legend_lists_present_types_in_canonical_order() {
    let spec = load("science_f3.json", None);
    let (layout, svg) = render(&spec, None);

    let names: Vec<&str> = layout.legend.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Computer Lab",
            "Lecture Hall",
            "Faculty Office",
            "Library",
            "Lounge",
            "Restroom",
            "Corridor"
        ]
    );

    let legend = &svg[svg.find("Title and Legend").unwrap()..];
    let positions: Vec<usize> = names
        .iter()
        .map(|name| legend.find(&format!(">{name}</text>")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn printer_with_missing_room_is_drawn_at_origin() {
    let spec = load("science_f3.json", None);
    let (layout, svg) = render(&spec, None);

    let placed = &layout.printers[0];
    assert_eq!((placed.x, placed.y), (240.0, 60.0));
    assert!(placed.placed);

    let orphan = &layout.printers[1];
    assert_eq!((orphan.x, orphan.y), (0.0, 0.0));
    assert!(!orphan.placed);
    assert_eq!(orphan.caption, "PRN-399");
    assert!(svg.contains("<rect x=\"-25\" y=\"-25\" width=\"50\" height=\"50\""));

    let warnings = lint::check(&spec);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].category, SpecCategory::Printer);
}

#[test]
fn label_modes_follow_room_shape() {
    let spec = load("science_f3.json", None);
    let (layout, _) = render(&spec, None);
    let room = |id: &str| layout.rooms.iter().find(|room| room.id == id).unwrap();

    let lab = room("lab-301").label.as_ref().unwrap();
    assert_eq!(lab.mode, LabelMode::Single);
    assert_eq!(lab.lines.len(), 1);
    assert_eq!((lab.lines[0].x, lab.lines[0].y), (150.0, 150.0));

    let office = room("office-302").label.as_ref().unwrap();
    assert_eq!(office.mode, LabelMode::Wrapped);
    assert_eq!(office.planned_lines, 2);
    let texts: Vec<&str> = office.lines.iter().map(|line| line.text.as_str()).collect();
    assert_eq!(texts, ["Administrative"]);
    assert_eq!((office.lines[0].x, office.lines[0].y), (375.0, 72.5));

    assert!(room("hall-3").label.is_none());
}

#[test]
fn rendering_is_idempotent() {
    let spec = load("science_f3.json", None);
    let title = title("SCIENCE", 3);
    let (_, first) = render(&spec, Some(&title));
    let (_, second) = render(&spec, Some(&title));
    assert_eq!(first, second);
}

#[test]
fn template_is_deduplicated_relabeled_and_rendered() {
    let spec = load("mainacade_template.json", Some("mainacade_rooms.json"));
    assert_eq!(spec.rooms.len(), 6);
    assert!(spec.room("restroom-m2").is_none());
    assert!(spec.room("restroom-w2").is_none());

    let (layout, svg) = render(&spec, Some(&title("MAINACADE", 1)));
    assert!(svg.contains("viewBox=\"0 0 1200 1070\""));
    assert!(svg.contains("width=\"2400\" height=\"2140\""));
    assert!(svg.contains(">Main Academic Building - 1st Floor</text>"));
    assert!(svg.contains(">Dean&apos;s Office</text>"));
    for line in ["Physics", "Lecture", "Hall"] {
        assert!(svg.contains(&format!(">{line}</text>")), "missing {line}");
    }

    let atrium = layout.rooms.iter().find(|room| room.id == "atrium").unwrap();
    assert_eq!(atrium.fill, "#FFFFFF");
    assert_eq!(layout.legend.len(), 4);
    assert!(layout.legend.iter().all(|item| item.kind.is_known()));
}
