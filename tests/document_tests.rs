//! End-to-end checks on complete documents.

use regex_lite::Regex;
use svgsketch::{
    AxisOptions, Bounds, Canvas, Coord, CoordinateMapper, Document, DocumentConfig, GroupOptions,
    Margins, PathCommands, RenderError, Scale, Style, Tag, hires,
};

fn document(width: u32, height: u32) -> Document<Vec<u8>> {
    let config = DocumentConfig::new()
        .with_size(width, height)
        .with_white_background(false);
    Document::new(Vec::new(), config).unwrap()
}

fn finish(mut doc: Document<Vec<u8>>) -> String {
    String::from_utf8(doc.finalize().unwrap()).unwrap()
}

/// Numbers of every `d` attribute, in order.
fn path_numbers(svg: &str) -> Vec<Vec<f64>> {
    let d_re = Regex::new(r#" d="([^"]*)""#).unwrap();
    let num_re = Regex::new(r"-?\d+\.\d+").unwrap();
    d_re.captures_iter(svg)
        .map(|caps| {
            num_re
                .find_iter(&caps[1])
                .map(|m| m.as_str().parse().unwrap())
                .collect()
        })
        .collect()
}

#[test]
fn unit_scale_golden_path() {
    let canvas = Canvas::new(100, 100);
    let scale = Scale::try_new(canvas, Bounds::default(), Margins::uniform(0.0)).unwrap();
    let mapper = CoordinateMapper::with_scale(canvas, scale);
    let d = PathCommands::new()
        .tag(Tag::MoveTo)
        .coords((0.0, 0.0))
        .tag(Tag::LineTo)
        .coords((10.0, 0.0))
        .tag(Tag::LineTo)
        .coords((10.0, 10.0))
        .tag(Tag::Close)
        .build(&mapper)
        .unwrap();
    insta::assert_snapshot!(d, @"M 0.00 100.00 L 1000.00 100.00 L 1000.00 -900.00 Z");
}

#[test]
fn document_layout() {
    let mut doc = Document::new(Vec::new(), DocumentConfig::new().with_size(300, 200)).unwrap();
    doc.set_scale(Bounds::default(), Margins::uniform(20.0)).unwrap();
    doc.circle(0.5, 0.5, 5, &Style::new()).unwrap();
    let svg = finish(doc);

    let order = [
        "<?xml version=\"1.0\"?>",
        "<!DOCTYPE svg PUBLIC",
        "height=\"200\" width=\"300\">",
        "<path style=\"fill:white;\"",
        "<g style=\"fill-opacity:1;fill:none;stroke:black;stroke-width:1;font-size:10pt;font-family:Arial, sans-serif;\">",
        "<defs><clipPath id=\"marginmask\">",
        "<circle cx=\"150.00\" cy=\"100.00\" r=\"5.00\"/>",
        "</g>\n</svg>\n",
    ];
    let mut cursor = 0;
    for needle in order {
        let found = svg[cursor..]
            .find(needle)
            .unwrap_or_else(|| panic!("missing or out of order: {needle}\n{svg}"));
        cursor += found + needle.len();
    }
    assert_eq!(cursor, svg.len());
}

#[test]
fn three_nested_groups_then_finalize() {
    let mut doc = document(100, 100);
    doc.open_group(Style::new().set("stroke", "red")).unwrap();
    doc.open_group(GroupOptions::new().with_transform("translate(5,5)")).unwrap();
    doc.open_group(GroupOptions::new()).unwrap();
    assert_eq!(doc.depth(), 3);
    let svg = finish(doc);
    // three user groups plus the base group
    assert_eq!(svg.matches("<g").count(), 4);
    assert_eq!(svg.matches("</g>").count(), 4);
    insta::assert_snapshot!(svg.lines().rev().take(5).collect::<Vec<_>>().join("|"), @"</svg>|</g>|</g>|</g>|</g>");
}

#[test]
fn closing_more_groups_than_opened_is_harmless() {
    let mut doc = document(100, 100);
    doc.open_group(GroupOptions::new()).unwrap();
    assert!(doc.close_group().unwrap());
    for _ in 0..5 {
        assert!(!doc.close_group().unwrap());
    }
    assert_eq!(finish(doc).matches("</g>").count(), 2);
}

#[test]
fn drawing_after_finalize_fails() {
    let mut doc = document(100, 100);
    doc.finalize().unwrap();
    assert!(matches!(doc.circle(1, 1, 1, &Style::new()), Err(RenderError::Closed)));
    assert!(matches!(doc.open_group(GroupOptions::new()), Err(RenderError::Closed)));
    assert!(matches!(doc.x_axis(&AxisOptions::new()), Err(RenderError::Map(_))));
}

#[test]
fn arc_flags_follow_the_span() {
    let flag_re = Regex::new(r" a \S+ \S+ 0 ([01]),([01]) ").unwrap();
    let flags = |a1: f64, a2: f64| {
        let mut doc = document(200, 200);
        doc.arc(100, 100, 50, a1, a2, &Style::new()).unwrap();
        let svg = finish(doc);
        let caps = flag_re.captures(&svg).unwrap();
        format!("{},{}", &caps[1], &caps[2])
    };
    assert_eq!(flags(0.0, 90.0), "0,0");
    assert_eq!(flags(90.0, 0.0), "0,0");
    assert_eq!(flags(0.0, 270.0), "1,0");
    assert_eq!(flags(270.0, 0.0), "1,0");
    assert_eq!(flags(0.0, 180.0), "0,0");
}

#[test]
fn sector_closes_through_both_radii() {
    let mut doc = document(200, 200);
    doc.sector(100, 100, 20, 40, 0.0, 360.0, &Style::new().set("fill", "gray")).unwrap();
    let svg = finish(doc);
    let flag_re = Regex::new(r" a \S+ \S+ 0 ([01],[01]) ").unwrap();
    let flags: Vec<&str> = flag_re.captures_iter(&svg).map(|c| c.get(1).unwrap().as_str()).collect();
    assert_eq!(flags, ["1,0", "1,1"]);
    assert!(svg.contains(" Z\"/>"));
}

#[test]
fn wind_barb_47_has_four_ticks_and_a_half() {
    let mut doc = document(200, 200);
    doc.wind_barb(100, 100, 47.0, 225.0, 50.0, &Style::new()).unwrap();
    let svg = finish(doc);
    assert!(svg.contains("<g transform=\"translate(100.00,100.00) rotate(135.00)\">"));

    let paths = path_numbers(&svg);
    // staff, then four ticks, then one half tick
    assert_eq!(paths.len(), 6);
    assert_eq!(paths[0], [0.0, 0.0, -50.0, 0.0]);
    let tails: Vec<f64> = paths[1..].iter().map(|p| p[3]).collect();
    assert_eq!(tails, [-25.0, -25.0, -25.0, -25.0, -12.5]);
    assert!(!svg.contains("<circle"));
}

#[test]
fn calm_wind_draws_only_a_circle() {
    let mut doc = document(200, 200);
    doc.wind_barb(100, 100, 2.0, 0.0, 50.0, &Style::new()).unwrap();
    let svg = finish(doc);
    assert!(svg.contains("<circle cx=\"0.00\" cy=\"0.00\" r=\"6.00\" style=\"fill:none;\"/>"));
    assert!(path_numbers(&svg).is_empty());
}

#[test]
fn axis_labels_use_the_label_format() {
    let mut doc = document(400, 400);
    doc.set_scale(Bounds::new(0.0, 1.0, -1.0, 1.0), Margins::default()).unwrap();
    let x_ticks = doc.x_axis(&AxisOptions::new()).unwrap();
    let y_ticks = doc.y_axis(&AxisOptions::new().with_step(0.5)).unwrap();
    assert_eq!(x_ticks.len(), 11);
    assert_eq!(y_ticks, [-1.0, -0.5, 0.0, 0.5, 1.0]);

    let svg = finish(doc);
    let label_re = Regex::new(r"<text[^>]*>([^<]*)</text>").unwrap();
    let labels: Vec<&str> = label_re
        .captures_iter(&svg)
        .map(|c| c.get(1).unwrap().as_str())
        .collect();
    assert_eq!(labels.len(), 16);
    assert_eq!(labels[0], "  0.0");
    assert_eq!(labels[10], "  1.0");
    assert_eq!(&labels[11..], [" -1.0", " -0.5", "  0.0", "  0.5", "  1.0"]);
}

#[test]
fn fixed_point_offsets_bypass_the_scale() {
    let mut doc = document(100, 100);
    doc.set_scale(Bounds::new(0.0, 2.0, 0.0, 2.0), Margins::uniform(0.0)).unwrap();
    let commands = PathCommands::new()
        .move_to(1.0, 1.0)
        .move_by(hires(12.34), hires(-5.0))
        .line_by(Coord::Device(3.0), 0.5);
    let d = doc.path_data(&commands).unwrap();
    insta::assert_snapshot!(d, @"M 50.00 50.00 m 12.34 -5.00 l 3.00 -25.00");
}

#[test]
fn create_writes_a_file() {
    let path = std::env::temp_dir().join(format!("svgsketch-{}.svg", std::process::id()));
    let mut doc = Document::create(&path, DocumentConfig::new().with_size(64, 32)).unwrap();
    assert_eq!(doc.file_path(), Some(path.as_path()));
    doc.line(0, 0, 64, 32, &Style::new()).unwrap();
    doc.finalize().unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(written.contains("height=\"32\" width=\"64\">"));
    assert!(written.contains("<line x1=\"0.00\" y1=\"0.00\" x2=\"64.00\" y2=\"32.00\"/>"));
    assert!(written.ends_with("</svg>\n"));
}
