//! Coordinate primitives: the tagged [`Coord`] value, [`Axis`] and [`Canvas`].
//!
//! Every number handed to a drawing call says how it should reach device
//! space. The tag is chosen once, by the caller, and the mapper matches on it;
//! there is no inspection of runtime types.

use std::fmt;
use std::ops::Neg;

use crate::errors::MapError;
use crate::render::defaults::HIRES_FACTOR;

/// One of the two device axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// A coordinate or size in one of the supported semantic kinds.
///
/// Plain Rust literals convert the way a plotting script reads:
/// floats are user-space values (`Scaled`), integers are device pixels
/// (`Bare`).
///
/// ```
/// use svgsketch::Coord;
///
/// assert_eq!(Coord::from(0.5), Coord::Scaled(0.5));
/// assert_eq!(Coord::from(12), Coord::Bare(12.0));
/// assert_eq!(-Coord::HiRes(250), Coord::HiRes(-250));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coord {
    /// User-space value, subject to the active scale and margins.
    Scaled(f64),
    /// Device units; bypasses the scale entirely.
    Device(f64),
    /// Device units stored in hundredths.
    HiRes(i64),
    /// Used verbatim.
    Bare(f64),
    /// Fraction of the canvas extent along the axis (x: width, y: height).
    Canvas(f64),
}

impl Coord {
    pub const ZERO: Coord = Coord::Bare(0.0);

    /// Encode a device-space value as a fixed-point coordinate.
    ///
    /// The value is rounded to the nearest hundredth so that values such as
    /// `300.23` survive the trip exactly. NaN becomes zero and values beyond
    /// the `i64` range saturate; use [`Coord::try_hires`] for computed input.
    pub fn hires(device: f64) -> Coord {
        Coord::HiRes((device * HIRES_FACTOR).round() as i64)
    }

    /// Checked [`Coord::hires`]: rejects NaN, infinities and values whose
    /// hundredths do not fit in an `i64`.
    ///
    /// ```
    /// use svgsketch::{Axis, Coord, MapError};
    ///
    /// assert_eq!(Coord::try_hires(Axis::X, 1.5), Ok(Coord::HiRes(150)));
    /// assert!(matches!(Coord::try_hires(Axis::Y, f64::NAN), Err(MapError::NonFinite { .. })));
    /// assert!(matches!(Coord::try_hires(Axis::X, 1e300), Err(MapError::OutOfRange { .. })));
    /// ```
    pub fn try_hires(axis: Axis, device: f64) -> Result<Coord, MapError> {
        if !device.is_finite() {
            return Err(MapError::NonFinite { axis, value: device });
        }
        let hundredths = (device * HIRES_FACTOR).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if hundredths.abs() >= i64::MAX as f64 {
            return Err(MapError::OutOfRange { axis, value: device });
        }
        Ok(Coord::HiRes(hundredths as i64))
    }

    /// The raw payload as a float, before any mapping.
    pub fn raw(self) -> f64 {
        match self {
            Coord::Scaled(v) | Coord::Device(v) | Coord::Bare(v) | Coord::Canvas(v) => v,
            Coord::HiRes(n) => n as f64,
        }
    }

    /// Whether mapping this value depends on the active scale.
    pub fn needs_scale(self) -> bool {
        matches!(self, Coord::Scaled(_))
    }
}

/// Shorthand for [`Coord::hires`].
pub fn hires(device: f64) -> Coord {
    Coord::hires(device)
}

impl Neg for Coord {
    type Output = Coord;
    fn neg(self) -> Coord {
        match self {
            Coord::Scaled(v) => Coord::Scaled(-v),
            Coord::Device(v) => Coord::Device(-v),
            Coord::HiRes(n) => Coord::HiRes(-n),
            Coord::Bare(v) => Coord::Bare(-v),
            Coord::Canvas(v) => Coord::Canvas(-v),
        }
    }
}

impl From<f64> for Coord {
    fn from(v: f64) -> Self {
        Coord::Scaled(v)
    }
}

impl From<i32> for Coord {
    fn from(v: i32) -> Self {
        Coord::Bare(v as f64)
    }
}

/// Device canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas { width, height }
    }

    /// Extent along an axis.
    pub fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}
