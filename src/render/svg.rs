//! SVG text generation.
//!
//! Elements are written straight to the sink as soon as they are issued; the
//! document never holds a tree. Each element kind is a small struct of
//! already-mapped device values implementing [`WriteSvg`], and [`Element`]
//! dispatches over all of them.

use std::io::{self, Write};

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::style::Style;
use crate::types::Canvas;

/// Format a device value with two decimals. Negative zero prints as `0.00`.
pub fn fmt_coord(value: f64) -> String {
    let s = format!("{:.2}", value);
    if s == "-0.00" { "0.00".to_string() } else { s }
}

/// Escape text content.
///
/// `<` and `>` are always escaped. A `&` that already starts an entity such
/// as `&amp;`, `&#176;` or `&deg;` is passed through so callers can use
/// entities directly; a bare `&` becomes `&amp;`.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let bytes = s.as_bytes();
    for (i, ch) in s.char_indices() {
        match ch {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' if !is_entity_at(bytes, i) => result.push_str("&amp;"),
            _ => result.push(ch),
        }
    }
    result
}

/// Escape an attribute value: text rules plus the double quote.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Check if position i in bytes starts an entity: `&[#]?[a-zA-Z0-9]+;`
fn is_entity_at(bytes: &[u8], i: usize) -> bool {
    if bytes.get(i) != Some(&b'&') {
        return false;
    }

    let mut j = i + 1;
    if bytes.get(j) == Some(&b'#') {
        j += 1;
    }

    let start = j;
    while let Some(&c) = bytes.get(j) {
        if c == b';' {
            return j > start;
        } else if c.is_ascii_alphanumeric() {
            j += 1;
        } else {
            return false;
        }
    }

    false
}

/// Write the XML prologue and the opening `<svg>` element.
pub fn write_header(out: &mut dyn Write, canvas: Canvas) -> io::Result<()> {
    writeln!(out, r#"<?xml version="1.0"?>"#)?;
    writeln!(out, r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN""#)?;
    writeln!(out, r#""http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">"#)?;
    writeln!(out, "<svg")?;
    writeln!(out, r#"xmlns:svg="http://www.w3.org/2000/svg""#)?;
    writeln!(out, r#"xmlns:xlink="http://www.w3.org/1999/xlink""#)?;
    writeln!(out, r#"xmlns="http://www.w3.org/2000/svg""#)?;
    writeln!(out, r#"version="1.0""#)?;
    writeln!(out, r#"height="{}" width="{}">"#, canvas.height, canvas.width)
}

pub fn write_footer(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "</svg>")
}

fn style_attr(style: &Style) -> String {
    if style.is_empty() {
        String::new()
    } else {
        format!(r#" style="{}""#, escape_attr(&style.to_string()))
    }
}

/// Something that serializes itself as SVG markup.
#[enum_dispatch]
pub trait WriteSvg {
    fn write_svg(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// `<path>` with prebuilt path data.
#[derive(Clone, Debug, PartialEq)]
pub struct PathElement {
    pub d: String,
    pub style: Style,
}

impl WriteSvg for PathElement {
    fn write_svg(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, r#"<path{} d="{}"/>"#, style_attr(&self.style), escape_attr(&self.d))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleElement {
    pub center: DVec2,
    pub radius: f64,
    pub style: Style,
}

impl WriteSvg for CircleElement {
    fn write_svg(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}"{}/>"#,
            fmt_coord(self.center.x),
            fmt_coord(self.center.y),
            fmt_coord(self.radius),
            style_attr(&self.style)
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineElement {
    pub from: DVec2,
    pub to: DVec2,
    pub style: Style,
}

impl WriteSvg for LineElement {
    fn write_svg(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            fmt_coord(self.from.x),
            fmt_coord(self.from.y),
            fmt_coord(self.to.x),
            fmt_coord(self.to.y),
            style_attr(&self.style)
        )
    }
}

/// Text anchored at a device point, rotated counter-clockwise by `angle`
/// degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub at: DVec2,
    pub angle: f64,
    pub text: String,
    pub style: Style,
}

impl WriteSvg for TextElement {
    fn write_svg(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            r#"<text transform="translate({},{}) rotate({})"{}>{}</text>"#,
            fmt_coord(self.at.x),
            fmt_coord(self.at.y),
            fmt_coord(-self.angle),
            style_attr(&self.style),
            escape_text(&self.text)
        )
    }
}

/// Embedded image; `attributes` become plain XML attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageElement {
    pub at: DVec2,
    pub href: String,
    pub attributes: Style,
}

impl WriteSvg for ImageElement {
    fn write_svg(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            r#"<image x="{}" y="{}" xlink:href="{}"{}/>"#,
            fmt_coord(self.at.x),
            fmt_coord(self.at.y),
            escape_attr(&self.href),
            self.attributes.to_attributes()
        )
    }
}

/// Opening `<g>` tag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupStart {
    pub style: Style,
    pub transform: Option<String>,
    pub clip_path: Option<String>,
}

impl WriteSvg for GroupStart {
    fn write_svg(&self, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "<g{}", style_attr(&self.style))?;
        if let Some(transform) = &self.transform {
            write!(out, r#" transform="{}""#, escape_attr(transform))?;
        }
        if let Some(clip) = &self.clip_path {
            write!(out, r#" clip-path="{}""#, escape_attr(clip))?;
        }
        writeln!(out, ">")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroupEnd;

impl WriteSvg for GroupEnd {
    fn write_svg(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "</g>")
    }
}

/// Rectangular clip path inside its own `<defs>` block.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipRect {
    pub id: String,
    pub origin: DVec2,
    pub size: DVec2,
}

impl WriteSvg for ClipRect {
    fn write_svg(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, r#"<defs><clipPath id="{}">"#, escape_attr(&self.id))?;
        writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}"/>"#,
            fmt_coord(self.origin.x),
            fmt_coord(self.origin.y),
            fmt_coord(self.size.x),
            fmt_coord(self.size.y)
        )?;
        writeln!(out, "</clipPath></defs>")
    }
}

/// Any element the document can emit.
#[enum_dispatch(WriteSvg)]
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Path(PathElement),
    Circle(CircleElement),
    Line(LineElement),
    Text(TextElement),
    Image(ImageElement),
    GroupStart(GroupStart),
    GroupEnd(GroupEnd),
    ClipRect(ClipRect),
}
