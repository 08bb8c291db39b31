//! SVG rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `scale`: Bounds, margins and the user-to-device coordinate mapper
//! - `path_builder`: Path command sequences and their serialization
//! - `context`: Group options and the open-group stack
//! - `svg`: Element serialization and escaping
//! - `document`: The streaming document and its primitives
//! - `geometry`: Arc, arrow and wind barb geometry
//! - `shapes`: Composite shapes on top of the primitives
//! - `axis`: Axis lines, ticks and labels

pub mod axis;
pub mod context;
pub mod defaults;
pub mod document;
pub mod geometry;
pub mod path_builder;
pub mod scale;
pub mod shapes;
pub mod svg;

// Re-export commonly used items
pub use axis::{AxisOptions, LabelFormat, tick_positions};
pub use context::{GroupOptions, GroupStack};
pub use document::{Document, DocumentConfig};
pub use geometry::{BarbCounts, BarbPart};
pub use path_builder::{Coords, PathCommands, PathItem, Tag};
pub use scale::{Bounds, CoordinateMapper, Margins, Scale};
pub use svg::{Element, WriteSvg};
