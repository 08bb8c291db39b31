//! Axis rendering: axis lines, tick marks, grid lines and numeric labels.
//!
//! Axes are drawn in user space and need an active scale. Tick marks point
//! into the plot (up from an x axis, right from a y axis); with `grid` they
//! extend all the way to the opposite bound.

use std::fmt;
use std::io::Write;

use crate::errors::{MapError, RenderError, Result};
use crate::style::Style;
use crate::types::{Axis, Coord};

use super::defaults;
use super::document::Document;
use super::path_builder::PathCommands;

/// printf-style number format for tick labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelFormat {
    /// `%{width}.{precision}f`
    Fixed { width: usize, precision: usize },
    /// `%{width}.{precision}e`, exponent signed and at least two digits.
    Scientific { width: usize, precision: usize },
}

impl Default for LabelFormat {
    /// `%5.1f`
    fn default() -> Self {
        LabelFormat::Fixed { width: 5, precision: 1 }
    }
}

impl LabelFormat {
    /// Format a value, right-aligned to the field width.
    ///
    /// ```
    /// use svgsketch::LabelFormat;
    ///
    /// assert_eq!(LabelFormat::default().format(2.0), "  2.0");
    /// let sci = LabelFormat::Scientific { width: 10, precision: 2 };
    /// assert_eq!(sci.format(12345.0), "  1.23e+04");
    /// ```
    pub fn format(&self, value: f64) -> String {
        match *self {
            LabelFormat::Fixed { width, precision } => {
                format!("{:>width$.precision$}", value)
            }
            LabelFormat::Scientific { width, precision } => {
                format!("{:>width$}", scientific(value, precision))
            }
        }
    }
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelFormat::Fixed { width, precision } => write!(f, "%{}.{}f", width, precision),
            LabelFormat::Scientific { width, precision } => write!(f, "%{}.{}e", width, precision),
        }
    }
}

/// C-style exponent notation: `1.50e+03`, `-2.0e-07`.
fn scientific(value: f64, precision: usize) -> String {
    let s = format!("{:.precision$e}", value);
    let Some((mantissa, exponent)) = s.split_once('e') else {
        // inf and NaN have no exponent
        return s;
    };
    match exponent.parse::<i32>() {
        Ok(exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
        }
        Err(_) => s,
    }
}

/// Settings for one axis. Unset values default from the active scale.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisOptions {
    /// Where the axis crosses the other axis; defaults to its minimum.
    pub at: Option<f64>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    /// Auto tick spacing; defaults to a tenth of the span.
    pub step: Option<f64>,
    /// Tick length, size-mapped (integers are pixels).
    pub tick_length: Coord,
    /// Extend ticks to the opposite bound and draw a line there.
    pub grid: bool,
    /// Explicit tick positions, replacing the auto ticks. An empty list
    /// falls back to the auto ticks.
    pub ticks: Option<Vec<f64>>,
    /// Label distance from the axis in pixels (usually the font size).
    pub pad: f64,
    /// Label format; `None` draws no labels.
    pub format: Option<LabelFormat>,
}

impl Default for AxisOptions {
    fn default() -> Self {
        AxisOptions {
            at: None,
            start: None,
            end: None,
            step: None,
            tick_length: Coord::Bare(defaults::TICK_LENGTH),
            grid: false,
            ticks: None,
            pad: defaults::LABEL_PAD,
            format: Some(LabelFormat::default()),
        }
    }
}

impl AxisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_at(mut self, at: f64) -> Self {
        self.at = Some(at);
        self
    }

    pub fn with_range(mut self, start: f64, end: f64) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_tick_length(mut self, tick_length: impl Into<Coord>) -> Self {
        self.tick_length = tick_length.into();
        self
    }

    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_ticks(mut self, ticks: Vec<f64>) -> Self {
        self.ticks = Some(ticks);
        self
    }

    pub fn with_pad(mut self, pad: f64) -> Self {
        self.pad = pad;
        self
    }

    pub fn with_format(mut self, format: LabelFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn without_labels(mut self) -> Self {
        self.format = None;
        self
    }
}

/// Tick values from `start` stepping by `step` up to `end`.
///
/// The end is included when floating-point drift lands just past it.
pub fn tick_positions(axis: Axis, start: f64, end: f64, step: f64) -> Result<Vec<f64>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(RenderError::InvalidStep { step });
    }
    for value in [start, end] {
        if !value.is_finite() {
            return Err(MapError::NonFinite { axis, value }.into());
        }
    }
    if (end - start) / step > defaults::MAX_TICKS as f64 {
        return Err(RenderError::InvalidStep { step });
    }

    let limit = end + defaults::TICK_END_TOLERANCE * end.abs().max(step.abs());
    let mut ticks = Vec::new();
    let mut i = 0usize;
    loop {
        let t = start + i as f64 * step;
        if t >= limit {
            break;
        }
        ticks.push(t);
        i += 1;
    }
    Ok(ticks)
}

/// Label style shared by both axes.
fn label_style(anchor: &str) -> Style {
    Style::new()
        .set("stroke_width", defaults::LABEL_STROKE_WIDTH)
        .set("text_anchor", anchor)
}

impl<W: Write> Document<W> {
    /// Horizontal axis with upward ticks. Returns the tick values drawn.
    pub fn x_axis(&mut self, options: &AxisOptions) -> Result<Vec<f64>> {
        let scale = *self.mapper().require_scale()?;
        let bounds = scale.bounds();
        let y = options.at.unwrap_or(bounds.y_min);
        let start = options.start.unwrap_or(bounds.x_min);
        let end = options.end.unwrap_or(bounds.x_max);

        let len = if options.grid {
            let y_max = bounds.y_max;
            self.line(start, y_max, end, y_max, &Style::new())?;
            self.mapper().map_position(Axis::Y, Coord::Scaled(y))?
                - self.mapper().map_position(Axis::Y, Coord::Scaled(y_max))?
        } else {
            tick_pixels(self, Axis::Y, options.tick_length)?
        };
        self.line(start, y, end, y, &Style::new())?;

        let ticks = resolve_ticks(options, Axis::X, start, end, bounds.span(Axis::X))?;
        for &x in &ticks {
            let tick = PathCommands::new()
                .move_to(x, y)
                .line_by(Coord::ZERO, Coord::Device(-len));
            self.path(&tick, &Style::new())?;
            if let Some(format) = &options.format {
                let at = self.mapper().position(Coord::Scaled(x), Coord::Scaled(y))?;
                self.text(
                    Coord::Device(at.x),
                    Coord::Device(at.y + 1.5 * options.pad),
                    0.0,
                    &format.format(x),
                    &label_style("middle"),
                )?;
            }
        }

        crate::log::debug!(count = ticks.len(), grid = options.grid, "x axis drawn");
        Ok(ticks)
    }

    /// Vertical axis with ticks pointing right. Returns the tick values drawn.
    pub fn y_axis(&mut self, options: &AxisOptions) -> Result<Vec<f64>> {
        let scale = *self.mapper().require_scale()?;
        let bounds = scale.bounds();
        let x = options.at.unwrap_or(bounds.x_min);
        let start = options.start.unwrap_or(bounds.y_min);
        let end = options.end.unwrap_or(bounds.y_max);

        self.line(x, start, x, end, &Style::new())?;
        let len = if options.grid {
            let x_max = bounds.x_max;
            self.line(x_max, start, x_max, end, &Style::new())?;
            self.mapper().map_position(Axis::X, Coord::Scaled(x_max))?
                - self.mapper().map_position(Axis::X, Coord::Scaled(x))?
        } else {
            tick_pixels(self, Axis::X, options.tick_length)?
        };

        let ticks = resolve_ticks(options, Axis::Y, start, end, bounds.span(Axis::Y))?;
        for &y in &ticks {
            let tick = PathCommands::new()
                .move_to(x, y)
                .line_by(Coord::Device(len), Coord::ZERO);
            self.path(&tick, &Style::new())?;
            if let Some(format) = &options.format {
                let at = self.mapper().position(Coord::Scaled(x), Coord::Scaled(y))?;
                self.text(
                    Coord::Device(at.x - 0.5 * options.pad),
                    Coord::Device(at.y + 0.5 * options.pad),
                    0.0,
                    &format.format(y),
                    &label_style("end"),
                )?;
            }
        }

        crate::log::debug!(count = ticks.len(), grid = options.grid, "y axis drawn");
        Ok(ticks)
    }
}

/// Tick length in pixels, positive toward the plot interior.
fn tick_pixels<W: Write>(doc: &Document<W>, axis: Axis, length: Coord) -> Result<f64> {
    let pixels = doc.mapper().map_size(axis, length)?;
    // Scaled y sizes come back negated by the y flip.
    if axis == Axis::Y && length.needs_scale() {
        Ok(-pixels)
    } else {
        Ok(pixels)
    }
}

fn resolve_ticks(options: &AxisOptions, axis: Axis, start: f64, end: f64, span: f64) -> Result<Vec<f64>> {
    match &options.ticks {
        Some(ticks) if !ticks.is_empty() => Ok(ticks.clone()),
        _ => {
            let step = options.step.unwrap_or(span * defaults::TICK_STEP_FRACTION);
            tick_positions(axis, start, end, step)
        }
    }
}
