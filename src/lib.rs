//! Programmatic SVG authoring.
//!
//! Shapes are described in a user coordinate space and written straight to a
//! sink as a structured SVG document. The pieces are:
//!
//! - [`Coord`]: a tagged number saying how it reaches device space (scaled
//!   user value, device pixel, fixed-point hundredths, verbatim, or a
//!   fraction of the canvas);
//! - [`CoordinateMapper`]: position and size mapping for an optional
//!   [`Scale`];
//! - [`PathCommands`]: path data built from command tags and coordinates;
//! - [`Document`]: the output sink, a stack of nested groups, primitives,
//!   composite shapes (arcs, sectors, arrows, wind barbs) and axes.
//!
//! ```no_run
//! use svgsketch::{AxisOptions, Bounds, Document, DocumentConfig, Margins, Style};
//!
//! let mut doc = Document::create("plot.svg", DocumentConfig::new().with_size(600, 600))?;
//! doc.set_scale(Bounds::new(0.0, 10.0, 0.0, 1.0), Margins::default())?;
//! doc.x_axis(&AxisOptions::new())?;
//! doc.y_axis(&AxisOptions::new().with_step(0.2))?;
//! doc.polyline(vec![(0.0, 0.0), (5.0, 0.8), (10.0, 0.3)], &Style::new().set("stroke", "red"))?;
//! doc.finalize()?;
//! # Ok::<(), svgsketch::RenderError>(())
//! ```

pub mod errors;
pub mod log;
pub mod render;
pub mod style;
pub mod types;

pub use errors::{ConfigError, MapError, PathError, RenderError, Result};
pub use render::{
    AxisOptions, Bounds, CoordinateMapper, Coords, Document, DocumentConfig, GroupOptions,
    LabelFormat, Margins, PathCommands, Scale, Tag,
};
pub use style::{Rgb, Style, StyleValue};
pub use types::{Axis, Canvas, Coord, hires};
