//! The streaming SVG document.
//!
//! A [`Document`] owns its output sink, the coordinate mapper and the group
//! stack. Every drawing call maps its coordinates, serializes one element and
//! writes it before returning; nothing is buffered between calls.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use glam::dvec2;

use crate::errors::{ConfigError, PathError, RenderError, Result};
use crate::style::Style;
use crate::types::{Axis, Canvas, Coord};

use super::context::{GroupOptions, GroupStack};
use super::defaults;
use super::path_builder::{Coords, PathCommands, Tag};
use super::scale::{Bounds, CoordinateMapper, Margins, Scale};
use super::svg::{
    self, CircleElement, ClipRect, Element, GroupEnd, ImageElement, LineElement, PathElement,
    TextElement, WriteSvg,
};

/// Construction-time settings.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Paint a full-canvas white rectangle before anything else.
    pub white_background: bool,
    /// Program launched by [`Document::display`].
    pub viewer: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        DocumentConfig {
            width: defaults::CANVAS_WIDTH,
            height: defaults::CANVAS_HEIGHT,
            white_background: true,
            viewer: defaults::VIEWER.to_string(),
        }
    }
}

impl DocumentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_white_background(mut self, white_background: bool) -> Self {
        self.white_background = white_background;
        self
    }

    pub fn with_viewer(mut self, viewer: impl Into<String>) -> Self {
        self.viewer = viewer.into();
        self
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }
}

/// An SVG document being written.
///
/// ```
/// use svgsketch::{Bounds, Document, DocumentConfig, Margins, Style};
///
/// let mut doc = Document::new(Vec::new(), DocumentConfig::new().with_size(200, 200))?;
/// doc.set_scale(Bounds::default(), Margins::uniform(20.0))?;
/// doc.circle(0.5, 0.5, 0.25, &Style::new().set("fill", "yellow"))?;
/// let bytes = doc.finalize()?;
///
/// let svg = String::from_utf8(bytes).unwrap();
/// assert!(svg.contains(r#"<circle cx="100.00" cy="100.00" r="40.00" style="fill:yellow;"/>"#));
/// assert!(svg.ends_with("</g>\n</svg>\n"));
/// # Ok::<(), svgsketch::RenderError>(())
/// ```
pub struct Document<W: Write> {
    /// `None` once the document is finalized.
    sink: Option<W>,
    config: DocumentConfig,
    mapper: CoordinateMapper,
    groups: GroupStack,
    /// Number of margin clip paths written so far.
    clip_masks: usize,
    /// Output file, when created through [`Document::create`].
    file: Option<PathBuf>,
}

impl Document<BufWriter<File>> {
    /// Create (or truncate) `path` and start a document in it.
    pub fn create(path: impl AsRef<Path>, config: DocumentConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut doc = Document::new(BufWriter::new(file), config)?;
        doc.file = Some(path.to_path_buf());
        Ok(doc)
    }
}

impl<W: Write> Document<W> {
    /// Start a document: header, optional background, base group.
    pub fn new(sink: W, config: DocumentConfig) -> Result<Self> {
        let canvas = config.canvas();
        if canvas.width == 0 || canvas.height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: canvas.width,
                height: canvas.height,
            }
            .into());
        }

        let mut doc = Document {
            sink: Some(sink),
            mapper: CoordinateMapper::new(canvas),
            config,
            groups: GroupStack::new(),
            clip_masks: 0,
            file: None,
        };

        let sink = doc.sink_mut()?;
        svg::write_header(sink, canvas)?;

        if doc.config.white_background {
            let (w, h) = (canvas.width as i32, canvas.height as i32);
            doc.rect(0, 0, w, h, &Style::new().set("fill", "white"))?;
        }

        let base = defaults::BASE_GROUP_STYLE
            .iter()
            .fold(Style::new(), |style, (key, value)| style.set(key, *value));
        doc.open_group(base)?;

        crate::log::debug!(
            width = canvas.width,
            height = canvas.height,
            background = doc.config.white_background,
            "document started"
        );
        Ok(doc)
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn canvas(&self) -> Canvas {
        self.mapper.canvas()
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Output file path, if the document writes to a file it created.
    pub fn file_path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn is_finalized(&self) -> bool {
        self.sink.is_none()
    }

    fn sink_mut(&mut self) -> Result<&mut W> {
        self.sink.as_mut().ok_or(RenderError::Closed)
    }

    /// Drop the sink after a write failure; the document cannot be completed.
    fn abort(&mut self, err: io::Error) -> RenderError {
        crate::log::warn!(error = %err, "sink write failed, document aborted");
        self.sink = None;
        self.groups = GroupStack::new();
        RenderError::Io(err)
    }

    /// Write one element.
    ///
    /// A write error aborts the document: the sink is dropped and every later
    /// call, [`Document::finalize`] included, fails with [`RenderError::Closed`].
    pub fn emit(&mut self, element: impl Into<Element>) -> Result<()> {
        let element: Element = element.into();
        let sink = self.sink_mut()?;
        if let Err(err) = element.write_svg(sink) {
            return Err(self.abort(err));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Scale
    // ------------------------------------------------------------------

    /// Install a linear scale and write the matching margin clip path.
    pub fn set_scale(&mut self, bounds: Bounds, margins: Margins) -> Result<()> {
        self.sink_mut()?;
        let canvas = self.canvas();
        let scale = Scale::try_new(canvas, bounds, margins)?;

        let id = mask_id(self.clip_masks + 1);
        self.emit(ClipRect {
            id: id.clone(),
            origin: dvec2(margins.left, margins.top),
            size: dvec2(
                canvas.width as f64 - margins.left - margins.right,
                canvas.height as f64 - margins.top - margins.bottom,
            ),
        })?;
        self.clip_masks += 1;
        self.mapper.set_scale(scale);

        crate::log::debug!(
            x_scale = scale.factor(Axis::X),
            y_scale = scale.factor(Axis::Y),
            clip = %id,
            "scale installed"
        );
        Ok(())
    }

    pub fn scale(&self) -> Option<&Scale> {
        self.mapper.scale()
    }

    /// `url(#…)` reference to the clip path of the current scale.
    pub fn margin_mask_ref(&self) -> Option<String> {
        if self.clip_masks == 0 {
            None
        } else {
            Some(format!("url(#{})", mask_id(self.clip_masks)))
        }
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    /// Open a group. Always writes a `<g>`, even with no attributes.
    pub fn open_group(&mut self, options: impl Into<GroupOptions>) -> Result<()> {
        let options = options.into();
        self.emit(options.start_tag())?;
        self.groups.push(options);
        crate::log::debug!(depth = self.groups.depth(), "group opened");
        Ok(())
    }

    /// Close the innermost user group.
    ///
    /// Returns `false` (and writes nothing) when no user group is open.
    pub fn close_group(&mut self) -> Result<bool> {
        self.sink_mut()?;
        if self.groups.pop().is_none() {
            crate::log::debug!("close_group ignored: no user group open");
            return Ok(false);
        }
        self.emit(GroupEnd)?;
        crate::log::debug!(depth = self.groups.depth(), "group closed");
        Ok(true)
    }

    /// Number of open user groups.
    pub fn depth(&self) -> usize {
        self.groups.depth()
    }

    /// Close every group and the root element, flush, and hand back the sink.
    pub fn finalize(&mut self) -> Result<W> {
        crate::log::debug!(groups = self.groups.len(), "closing open groups");
        while self.groups.pop_base().is_some() {
            self.emit(GroupEnd)?;
        }

        let mut sink = self.sink.take().ok_or(RenderError::Closed)?;
        svg::write_footer(&mut sink)?;
        sink.flush()?;

        crate::log::info!(path = ?self.file.as_deref(), "SVG written");
        Ok(sink)
    }

    /// Open the output file in the configured viewer without waiting for it.
    pub fn display(&self) {
        let Some(path) = &self.file else {
            crate::log::warn!("display: document has no output file");
            return;
        };
        let spawned = Command::new(&self.config.viewer)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(_child) => {
                crate::log::debug!(viewer = %self.config.viewer, "viewer started");
            }
            Err(_e) => {
                crate::log::warn!(viewer = %self.config.viewer, error = %_e, "failed to start viewer");
            }
        }
    }

    // ------------------------------------------------------------------
    // Paths
    // ------------------------------------------------------------------

    /// Serialize commands against the current mapping without writing.
    pub fn path_data(&self, commands: &PathCommands) -> Result<String> {
        Ok(commands.build(&self.mapper)?)
    }

    pub fn path(&mut self, commands: &PathCommands, style: &Style) -> Result<()> {
        let d = self.path_data(commands)?;
        self.path_d(d, style)
    }

    /// Write a path from prebuilt path data.
    pub fn path_d(&mut self, d: impl Into<String>, style: &Style) -> Result<()> {
        self.emit(PathElement { d: d.into(), style: style.clone() })
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    /// Rectangle from a corner and a signed width and height.
    pub fn rect(
        &mut self,
        x: impl Into<Coord>,
        y: impl Into<Coord>,
        width: impl Into<Coord>,
        height: impl Into<Coord>,
        style: &Style,
    ) -> Result<()> {
        let width = width.into();
        let commands = PathCommands::new()
            .move_to(x, y)
            .line_by(width, Coord::ZERO)
            .line_by(Coord::ZERO, height)
            .line_by(-width, Coord::ZERO)
            .close();
        self.path(&commands, style)
    }

    /// Rectangle from two opposite corners.
    pub fn rect_corners(
        &mut self,
        x1: impl Into<Coord>,
        y1: impl Into<Coord>,
        x2: impl Into<Coord>,
        y2: impl Into<Coord>,
        style: &Style,
    ) -> Result<()> {
        let (x1, y1, x2, y2) = (x1.into(), y1.into(), x2.into(), y2.into());
        let commands = PathCommands::new()
            .move_to(x1, y1)
            .line_to(x2, y1)
            .line_to(x2, y2)
            .line_to(x1, y2)
            .close();
        self.path(&commands, style)
    }

    /// Closed polygon through the given points.
    pub fn polygon(&mut self, points: impl Into<Coords>, style: &Style) -> Result<()> {
        let commands = outline(points.into())?.close();
        self.path(&commands, style)
    }

    /// Open polyline through the given points.
    pub fn polyline(&mut self, points: impl Into<Coords>, style: &Style) -> Result<()> {
        let commands = outline(points.into())?;
        self.path(&commands, style)
    }

    /// Circle with a radius size-mapped along x.
    pub fn circle(
        &mut self,
        cx: impl Into<Coord>,
        cy: impl Into<Coord>,
        r: impl Into<Coord>,
        style: &Style,
    ) -> Result<()> {
        let center = self.mapper.position(cx.into(), cy.into())?;
        let radius = self.mapper.map_size(Axis::X, r.into())?;
        self.emit(CircleElement { center, radius, style: style.clone() })
    }

    pub fn line(
        &mut self,
        x1: impl Into<Coord>,
        y1: impl Into<Coord>,
        x2: impl Into<Coord>,
        y2: impl Into<Coord>,
        style: &Style,
    ) -> Result<()> {
        let from = self.mapper.position(x1.into(), y1.into())?;
        let to = self.mapper.position(x2.into(), y2.into())?;
        self.emit(LineElement { from, to, style: style.clone() })
    }

    /// Text at a point, rotated counter-clockwise by `angle` degrees.
    pub fn text(
        &mut self,
        x: impl Into<Coord>,
        y: impl Into<Coord>,
        angle: f64,
        text: &str,
        style: &Style,
    ) -> Result<()> {
        let at = self.mapper.position(x.into(), y.into())?;
        self.emit(TextElement { at, angle, text: text.to_string(), style: style.clone() })
    }

    /// Embedded image; `attributes` (width, height, ...) are written as XML
    /// attributes rather than a style.
    pub fn image(
        &mut self,
        x: impl Into<Coord>,
        y: impl Into<Coord>,
        href: &str,
        attributes: &Style,
    ) -> Result<()> {
        let at = self.mapper.position(x.into(), y.into())?;
        self.emit(ImageElement {
            at,
            href: href.to_string(),
            attributes: attributes.clone(),
        })
    }
}

fn mask_id(n: usize) -> String {
    if n <= 1 {
        defaults::MARGIN_MASK_ID.to_string()
    } else {
        format!("{}-{}", defaults::MARGIN_MASK_ID, n)
    }
}

/// `M p0 L p1 ...` through a flat point list.
fn outline(points: Coords) -> std::result::Result<PathCommands, PathError> {
    let values = points.flatten();
    if values.len() < 2 {
        return Err(PathError::MissingCoordinates { tag: Tag::MoveTo.to_string() });
    }
    let mut commands = PathCommands::new().tag(Tag::MoveTo).coords(values[..2].to_vec());
    if values.len() > 2 {
        commands = commands.tag(Tag::LineTo).coords(values[2..].to_vec());
    }
    Ok(commands)
}
