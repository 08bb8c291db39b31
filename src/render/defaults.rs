//! Default sizes and settings (device units are pixels)

/// Canvas width when none is configured.
pub const CANVAS_WIDTH: u32 = 512;
/// Canvas height when none is configured.
pub const CANVAS_HEIGHT: u32 = 512;
/// Each of the four scale margins.
pub const MARGIN: f64 = 50.0;

/// Program launched by `Document::display`.
pub const VIEWER: &str = "eog";

/// Presentation attributes of the base group, in output order.
pub const BASE_GROUP_STYLE: [(&str, &str); 6] = [
    ("fill-opacity", "1"),
    ("fill", "none"),
    ("stroke", "black"),
    ("stroke-width", "1"),
    ("font-size", "10pt"),
    ("font-family", "Arial, sans-serif"),
];

/// Id of the first margin clip path; later ones get a numeric suffix.
pub const MARGIN_MASK_ID: &str = "marginmask";

/// Fixed-point coordinates store hundredths of a device unit.
pub const HIRES_FACTOR: f64 = 100.0;

/// Axis tick mark length in pixels.
pub const TICK_LENGTH: f64 = 10.0;
/// Axis label padding in pixels (usually the font size).
pub const LABEL_PAD: f64 = 10.0;
/// Auto tick step as a fraction of the axis span.
pub const TICK_STEP_FRACTION: f64 = 0.1;
/// Relative slack on the last auto tick, absorbs floating-point drift.
pub const TICK_END_TOLERANCE: f64 = 1e-5;
/// Upper bound on auto ticks per axis.
pub const MAX_TICKS: usize = 10_000;
/// Stroke width applied to axis labels.
pub const LABEL_STROKE_WIDTH: &str = ".3pt";

/// Arrowhead wing direction relative to the shaft: cos/sin of ±143.13°.
pub const ARROW_WING_COS: f64 = -0.8;
pub const ARROW_WING_SIN: f64 = 0.6;

/// Wind barb thresholds, rounding speed to the nearest 5 units.
pub const BARB_FLAG_SPEED: f64 = 50.0;
pub const BARB_TICK_SPEED: f64 = 10.0;
pub const BARB_HALF_SPEED: f64 = 5.0;
/// Fastest wind a barb is drawn for (twenty flags).
pub const BARB_MAX_SPEED: f64 = 1_000.0;
/// Spacing between barb elements as a fraction of staff length.
pub const BARB_SPACING: f64 = 0.13;
/// Barb length as a fraction of staff length.
pub const BARB_LENGTH: f64 = 0.5;
