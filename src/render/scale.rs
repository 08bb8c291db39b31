//! User-space to device-space mapping.
//!
//! A [`Scale`] ties a user bounding box to the canvas area left inside four
//! margins. [`CoordinateMapper`] converts tagged [`Coord`] values in two
//! flavors:
//!
//! - **position**: scale plus margin offset, with y flipped so user y grows
//!   upward while device y grows downward;
//! - **size**: scale factor only, for radii and relative deltas (y negated to
//!   keep the flip consistent).

use glam::{DVec2, dvec2};

use crate::errors::{ConfigError, MapError};
use crate::types::{Axis, Canvas, Coord};

use super::defaults;

/// User-space bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Bounds { x_min, x_max, y_min, y_max }
    }

    pub fn min(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x_min,
            Axis::Y => self.y_min,
        }
    }

    pub fn max(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x_max,
            Axis::Y => self.y_max,
        }
    }

    pub fn span(&self, axis: Axis) -> f64 {
        self.max(axis) - self.min(axis)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for axis in [Axis::X, Axis::Y] {
            let (min, max) = (self.min(axis), self.max(axis));
            if !min.is_finite() || !max.is_finite() {
                return Err(ConfigError::NonFiniteBounds { axis, min, max });
            }
            if min >= max {
                return Err(ConfigError::InvertedBounds { axis, min, max });
            }
        }
        Ok(())
    }
}

/// The unit square.
impl Default for Bounds {
    fn default() -> Self {
        Bounds::new(0.0, 1.0, 0.0, 1.0)
    }
}

/// Device-space margins around the plotting area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Margins { left, right, top, bottom }
    }

    pub fn uniform(margin: f64) -> Self {
        Margins::new(margin, margin, margin, margin)
    }

    fn validate(&self, canvas: Canvas) -> Result<(), ConfigError> {
        let sides = [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ];
        for (side, value) in sides {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidMargin { side, value });
            }
        }

        let horizontal = self.left + self.right;
        if horizontal >= canvas.width as f64 {
            return Err(ConfigError::MarginsExceedCanvas {
                axis: Axis::X,
                total: horizontal,
                extent: canvas.width,
            });
        }
        let vertical = self.top + self.bottom;
        if vertical >= canvas.height as f64 {
            return Err(ConfigError::MarginsExceedCanvas {
                axis: Axis::Y,
                total: vertical,
                extent: canvas.height,
            });
        }
        Ok(())
    }
}

impl Default for Margins {
    fn default() -> Self {
        Margins::uniform(defaults::MARGIN)
    }
}

/// A validated linear scale for one canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    bounds: Bounds,
    margins: Margins,
    x_scale: f64,
    y_scale: f64,
}

impl Scale {
    /// Validate the configuration and derive the per-axis scale factors.
    pub fn try_new(canvas: Canvas, bounds: Bounds, margins: Margins) -> Result<Self, ConfigError> {
        bounds.validate()?;
        margins.validate(canvas)?;

        let x_scale = (canvas.width as f64 - margins.left - margins.right) / bounds.span(Axis::X);
        let y_scale = (canvas.height as f64 - margins.bottom - margins.top) / bounds.span(Axis::Y);

        // Tiny spans can overflow even though every input was finite.
        for (axis, factor) in [(Axis::X, x_scale), (Axis::Y, y_scale)] {
            if !factor.is_finite() {
                return Err(ConfigError::NonFiniteBounds {
                    axis,
                    min: bounds.min(axis),
                    max: bounds.max(axis),
                });
            }
        }

        Ok(Scale { bounds, margins, x_scale, y_scale })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Device units per user unit along an axis.
    pub fn factor(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x_scale,
            Axis::Y => self.y_scale,
        }
    }
}

/// Converts tagged coordinates to device numbers for one canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    canvas: Canvas,
    scale: Option<Scale>,
}

impl CoordinateMapper {
    pub fn new(canvas: Canvas) -> Self {
        CoordinateMapper { canvas, scale: None }
    }

    pub fn with_scale(canvas: Canvas, scale: Scale) -> Self {
        CoordinateMapper { canvas, scale: Some(scale) }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn scale(&self) -> Option<&Scale> {
        self.scale.as_ref()
    }

    pub fn set_scale(&mut self, scale: Scale) {
        self.scale = Some(scale);
    }

    /// The active scale, or the precondition error for scaled input.
    pub fn require_scale(&self) -> Result<&Scale, MapError> {
        self.scale.as_ref().ok_or(MapError::NoScale)
    }

    /// Map an absolute location.
    pub fn map_position(&self, axis: Axis, coord: Coord) -> Result<f64, MapError> {
        let value = checked(axis, coord)?;
        Ok(match coord {
            Coord::Scaled(v) => {
                let scale = self.require_scale()?;
                let margins = scale.margins();
                let offset = (v - scale.bounds().min(axis)) * scale.factor(axis);
                match axis {
                    Axis::X => margins.left + offset,
                    Axis::Y => self.canvas.height as f64 - (margins.bottom + offset),
                }
            }
            Coord::Canvas(f) => f * self.canvas.extent(axis) as f64,
            Coord::Device(_) | Coord::HiRes(_) | Coord::Bare(_) => value,
        })
    }

    /// Map a magnitude or relative displacement.
    pub fn map_size(&self, axis: Axis, coord: Coord) -> Result<f64, MapError> {
        let value = checked(axis, coord)?;
        Ok(match coord {
            Coord::Scaled(v) => {
                let factor = self.require_scale()?.factor(axis);
                match axis {
                    Axis::X => v * factor,
                    Axis::Y => -v * factor,
                }
            }
            Coord::Canvas(f) => f * self.canvas.extent(axis) as f64,
            Coord::Device(_) | Coord::HiRes(_) | Coord::Bare(_) => value,
        })
    }

    /// Map an (x, y) location.
    pub fn position(&self, x: Coord, y: Coord) -> Result<DVec2, MapError> {
        Ok(dvec2(self.map_position(Axis::X, x)?, self.map_position(Axis::Y, y)?))
    }

    /// Map an (x, y) displacement.
    pub fn size(&self, x: Coord, y: Coord) -> Result<DVec2, MapError> {
        Ok(dvec2(self.map_size(Axis::X, x)?, self.map_size(Axis::Y, y)?))
    }
}

/// Decode the payload, rejecting NaN and infinities.
fn checked(axis: Axis, coord: Coord) -> Result<f64, MapError> {
    let value = match coord {
        Coord::HiRes(n) => n as f64 / defaults::HIRES_FACTOR,
        other => other.raw(),
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MapError::NonFinite { axis, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn unit_mapper(width: u32, height: u32, margin: f64) -> CoordinateMapper {
        let canvas = Canvas::new(width, height);
        let scale = Scale::try_new(canvas, Bounds::default(), Margins::uniform(margin)).unwrap();
        CoordinateMapper::with_scale(canvas, scale)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn default_scale_matches_classic_layout() {
        // 600x600 canvas, unit square, 50px margins -> 500px per unit
        let mapper = unit_mapper(600, 600, 50.0);
        let scale = mapper.scale().unwrap();
        assert_close(scale.factor(Axis::X), 500.0);
        assert_close(scale.factor(Axis::Y), 500.0);

        assert_close(mapper.map_position(Axis::X, Coord::Scaled(0.0)).unwrap(), 50.0);
        assert_close(mapper.map_position(Axis::X, Coord::Scaled(1.0)).unwrap(), 550.0);
        assert_close(mapper.map_position(Axis::Y, Coord::Scaled(0.0)).unwrap(), 550.0);
        assert_close(mapper.map_position(Axis::Y, Coord::Scaled(1.0)).unwrap(), 50.0);
    }

    #[test]
    fn size_mapping_has_no_offset_and_flips_y() {
        let mapper = unit_mapper(600, 600, 50.0);
        assert_close(mapper.map_size(Axis::X, Coord::Scaled(0.1)).unwrap(), 50.0);
        assert_close(mapper.map_size(Axis::Y, Coord::Scaled(0.1)).unwrap(), -50.0);
        assert_close(mapper.map_size(Axis::X, Coord::Scaled(0.0)).unwrap(), 0.0);
    }

    #[test]
    fn asymmetric_margins() {
        let canvas = Canvas::new(400, 300);
        let bounds = Bounds::new(-1.0, 1.0, 10.0, 20.0);
        let margins = Margins::new(40.0, 10.0, 20.0, 30.0);
        let mapper = CoordinateMapper::with_scale(canvas, Scale::try_new(canvas, bounds, margins).unwrap());

        // x: (400 - 50) / 2 = 175 per unit; y: (300 - 50) / 10 = 25 per unit
        assert_close(mapper.map_position(Axis::X, Coord::Scaled(-1.0)).unwrap(), 40.0);
        assert_close(mapper.map_position(Axis::X, Coord::Scaled(1.0)).unwrap(), 390.0);
        assert_close(mapper.map_position(Axis::Y, Coord::Scaled(10.0)).unwrap(), 270.0);
        assert_close(mapper.map_position(Axis::Y, Coord::Scaled(20.0)).unwrap(), 20.0);
    }

    #[test]
    fn passthrough_kinds_ignore_scale() {
        let mapper = unit_mapper(600, 600, 50.0);
        for axis in [Axis::X, Axis::Y] {
            assert_close(mapper.map_position(axis, Coord::Device(123.5)).unwrap(), 123.5);
            assert_close(mapper.map_size(axis, Coord::Device(-4.0)).unwrap(), -4.0);
            assert_close(mapper.map_position(axis, Coord::Bare(7.0)).unwrap(), 7.0);
            assert_close(mapper.map_size(axis, Coord::Bare(7.0)).unwrap(), 7.0);
            assert_close(mapper.map_position(axis, Coord::HiRes(30023)).unwrap(), 300.23);
            assert_close(mapper.map_size(axis, Coord::HiRes(-50)).unwrap(), -0.5);
        }
    }

    #[test]
    fn canvas_fractions_follow_the_axis_extent() {
        let mapper = CoordinateMapper::new(Canvas::new(800, 200));
        assert_close(mapper.map_position(Axis::X, Coord::Canvas(0.5)).unwrap(), 400.0);
        assert_close(mapper.map_position(Axis::Y, Coord::Canvas(0.5)).unwrap(), 100.0);
        assert_close(mapper.map_size(Axis::Y, Coord::Canvas(0.25)).unwrap(), 50.0);
    }

    #[test]
    fn scaled_input_without_scale_is_rejected() {
        let mapper = CoordinateMapper::new(Canvas::new(100, 100));
        assert_eq!(mapper.map_position(Axis::X, Coord::Scaled(0.5)), Err(MapError::NoScale));
        assert_eq!(mapper.map_size(Axis::Y, Coord::Scaled(0.5)), Err(MapError::NoScale));
        // Device values still work
        assert_eq!(mapper.map_position(Axis::X, Coord::Bare(3.0)), Ok(3.0));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mapper = unit_mapper(100, 100, 0.0);
        assert!(matches!(
            mapper.map_position(Axis::X, Coord::Scaled(f64::NAN)),
            Err(MapError::NonFinite { axis: Axis::X, .. })
        ));
        assert!(matches!(
            mapper.map_size(Axis::Y, Coord::Device(f64::INFINITY)),
            Err(MapError::NonFinite { axis: Axis::Y, .. })
        ));
    }

    #[test]
    fn inverted_bounds_fail_fast() {
        let canvas = Canvas::new(100, 100);
        let err = Scale::try_new(canvas, Bounds::new(1.0, 0.0, 0.0, 1.0), Margins::uniform(0.0)).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedBounds { axis: Axis::X, .. }));

        let err = Scale::try_new(canvas, Bounds::new(0.0, 1.0, 2.0, 2.0), Margins::uniform(0.0)).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedBounds { axis: Axis::Y, .. }));
    }

    #[test]
    fn non_finite_bounds_fail_fast() {
        let canvas = Canvas::new(100, 100);
        let err = Scale::try_new(canvas, Bounds::new(0.0, f64::INFINITY, 0.0, 1.0), Margins::uniform(0.0))
            .unwrap_err();
        assert!(matches!(err, ConfigError::NonFiniteBounds { axis: Axis::X, .. }));
    }

    #[test]
    fn margins_must_leave_room() {
        let canvas = Canvas::new(100, 80);
        let err = Scale::try_new(canvas, Bounds::default(), Margins::new(50.0, 50.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, ConfigError::MarginsExceedCanvas { axis: Axis::X, .. }));

        let err = Scale::try_new(canvas, Bounds::default(), Margins::new(0.0, 0.0, 40.0, 41.0)).unwrap_err();
        assert!(matches!(err, ConfigError::MarginsExceedCanvas { axis: Axis::Y, .. }));

        let err = Scale::try_new(canvas, Bounds::default(), Margins::new(-1.0, 0.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMargin { side: "left", .. }));
    }

    #[test]
    fn point_helpers() {
        let mapper = unit_mapper(100, 100, 0.0);
        assert_eq!(mapper.position(Coord::Scaled(0.5), Coord::Scaled(0.25)).unwrap(), dvec2(50.0, 75.0));
        assert_eq!(mapper.size(Coord::Scaled(0.5), Coord::Scaled(0.25)).unwrap(), dvec2(50.0, -25.0));
    }
}
