//! Error types with diagnostic codes using miette
//!
//! One enum per concern: configuration, coordinate mapping, path data and
//! document rendering. [`RenderError`] wraps the other three so drawing
//! methods can use `?` throughout.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::Axis;

/// Convenience alias used by every drawing method.
pub type Result<T, E = RenderError> = std::result::Result<T, E>;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Invalid canvas or scale configuration, reported when it is set.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    #[diagnostic(code(svgsketch::config::empty_canvas))]
    EmptyCanvas { width: u32, height: u32 },

    #[error("{axis} bounds are inverted or empty: min {min} must be below max {max}")]
    #[diagnostic(
        code(svgsketch::config::inverted_bounds),
        help("swap the bounds, or widen the range so min < max")
    )]
    InvertedBounds { axis: Axis, min: f64, max: f64 },

    #[error("{axis} bounds must be finite, got [{min}, {max}]")]
    #[diagnostic(code(svgsketch::config::non_finite_bounds))]
    NonFiniteBounds { axis: Axis, min: f64, max: f64 },

    #[error("{side} margin must be a finite non-negative number, got {value}")]
    #[diagnostic(code(svgsketch::config::invalid_margin))]
    InvalidMargin { side: &'static str, value: f64 },

    #[error("{axis} margins total {total} but the canvas is only {extent} wide")]
    #[diagnostic(
        code(svgsketch::config::margins_exceed_canvas),
        help("margins must leave a non-empty plotting area")
    )]
    MarginsExceedCanvas { axis: Axis, total: f64, extent: u32 },
}

// ============================================================================
// Mapping Errors
// ============================================================================

/// A coordinate could not be converted to device space.
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq)]
pub enum MapError {
    #[error("scaled coordinate used before a scale was configured")]
    #[diagnostic(
        code(svgsketch::map::no_scale),
        help("call `Document::set_scale` first, or pass device coordinates (integers, `Coord::Device`)")
    )]
    NoScale,

    #[error("{axis} coordinate is not a finite number: {value}")]
    #[diagnostic(code(svgsketch::map::non_finite))]
    NonFinite { axis: Axis, value: f64 },

    #[error("{axis} device value {value} is too large for a fixed-point coordinate")]
    #[diagnostic(
        code(svgsketch::map::out_of_range),
        help("fixed-point coordinates hold hundredths of a pixel in an i64")
    )]
    OutOfRange { axis: Axis, value: f64 },
}

// ============================================================================
// Path Errors
// ============================================================================

/// Malformed path command input.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("coordinates must come in x/y pairs, got {count} values")]
    #[diagnostic(code(svgsketch::path::odd_coordinate_count))]
    OddCoordinateCount { count: usize },

    #[error("`{tag}` command has no coordinates")]
    #[diagnostic(code(svgsketch::path::missing_coordinates))]
    MissingCoordinates { tag: String },

    #[error("path data starts with coordinates instead of a command")]
    #[diagnostic(
        code(svgsketch::path::leading_coordinates),
        help("begin the sequence with a move command such as `M`")
    )]
    LeadingCoordinates,

    #[error("unknown path command letter `{letter}`")]
    #[diagnostic(code(svgsketch::path::unknown_tag), help("supported letters: M m L l A a Z"))]
    UnknownTag { letter: char },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Map(#[from] MapError),
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors raised while writing a document.
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("failed to write SVG output")]
    #[diagnostic(code(svgsketch::render::io))]
    Io(#[from] std::io::Error),

    #[error("document is already finalized")]
    #[diagnostic(code(svgsketch::render::closed))]
    Closed,

    #[error("{shape} needs two distinct end points")]
    #[diagnostic(code(svgsketch::render::degenerate_vector))]
    DegenerateVector { shape: &'static str },

    #[error("{name} must be a finite number, got {value}")]
    #[diagnostic(code(svgsketch::render::non_finite_parameter))]
    NonFiniteParameter { name: &'static str, value: f64 },

    #[error("wind speed {speed} is outside the drawable range (at most {max})")]
    #[diagnostic(
        code(svgsketch::render::speed_out_of_range),
        help("wind speeds must be finite; larger speeds would need an unbounded number of flags")
    )]
    SpeedOutOfRange { speed: f64, max: f64 },

    #[error("axis tick step must be a positive finite number, got {step}")]
    #[diagnostic(code(svgsketch::render::invalid_step))]
    InvalidStep { step: f64 },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),
}
