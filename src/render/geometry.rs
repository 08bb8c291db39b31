//! Geometry functions: arc spans, arrowheads and wind barb layout
//!
//! Everything here works in device space (y down) and is free of I/O, so the
//! shape emitters stay thin.

use glam::{DVec2, dvec2};

use super::defaults;

/// Order two angles (degrees) so the first is not larger.
pub fn ordered_angles(a1: f64, a2: f64) -> (f64, f64) {
    if a2 < a1 { (a2, a1) } else { (a1, a2) }
}

/// SVG large-arc flag for a counter-clockwise span from `a1` to `a2`.
pub fn large_arc(a1: f64, a2: f64) -> bool {
    let (a1, a2) = ordered_angles(a1, a2);
    a2 - a1 > 180.0
}

/// Offset from a center to the point at `angle` degrees on a circle of
/// `radius`, in device space (counter-clockwise on screen).
pub fn polar(radius: f64, angle: f64) -> DVec2 {
    let (sin, cos) = angle.to_radians().sin_cos();
    dvec2(radius * cos, -radius * sin)
}

/// A circular arc relative to its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSpan {
    /// Offset from the center to the first end point.
    pub start: DVec2,
    /// Displacement from the first end point to the second.
    pub delta: DVec2,
    pub large_arc: bool,
}

impl ArcSpan {
    /// Arc of `radius` between two angles, taken in ascending order.
    pub fn new(radius: f64, a1: f64, a2: f64) -> Self {
        let (a1, a2) = ordered_angles(a1, a2);
        let start = polar(radius, a1);
        let end = polar(radius, a2);
        ArcSpan {
            start,
            delta: end - start,
            large_arc: large_arc(a1, a2),
        }
    }

    pub fn end(&self) -> DVec2 {
        self.start + self.delta
    }
}

/// Unit vectors of the two arrowhead wings for a shaft pointing along `dir`.
///
/// Each wing points back along the shaft, rotated by about 143 degrees to
/// either side. Returns `None` for a zero-length direction.
pub fn arrow_wings(dir: DVec2) -> Option<(DVec2, DVec2)> {
    let unit = dir.try_normalize()?;
    let a = dvec2(defaults::ARROW_WING_COS, defaults::ARROW_WING_SIN).rotate(unit);
    let b = dvec2(defaults::ARROW_WING_COS, -defaults::ARROW_WING_SIN).rotate(unit);
    Some((a, b))
}

/// Device points of a line arrow: shaft end and the head triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowLayout {
    pub shaft_end: DVec2,
    pub head: [DVec2; 3],
}

/// Lay out an arrow from `tail` to `tip` with a head of `head_size` pixels.
///
/// The shaft stops at the middle of the head's back edge so a thick stroke
/// does not poke through the tip.
pub fn arrow_layout(tail: DVec2, tip: DVec2, head_size: f64) -> Option<ArrowLayout> {
    let (a, b) = arrow_wings(tip - tail)?;
    Some(ArrowLayout {
        shaft_end: tip + 0.5 * head_size * (a + b),
        head: [tip, tip + head_size * a, tip + head_size * b],
    })
}

/// Outline of a fat arrow from `tail` to `tip`, as five device points.
///
/// `half_width` is both the half width of the body and the length of the
/// head. Returns `None` for coincident end points.
pub fn fat_arrow_outline(tail: DVec2, tip: DVec2, half_width: f64) -> Option<[DVec2; 5]> {
    let d = (tip - tail).try_normalize()? * half_width;
    let n = dvec2(d.y, -d.x);
    Some([tail + n, tip + n - d, tip, tip - n - d, tail - n])
}

/// How a wind speed splits into barb elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BarbCounts {
    /// Filled triangles, 50 units each.
    pub flags: u32,
    /// Full ticks, 10 units each.
    pub ticks: u32,
    /// Half ticks, 5 units each.
    pub halves: u32,
}

impl BarbCounts {
    /// Decompose a speed, rounding to the nearest 5 units.
    ///
    /// Returns `None` for a non-finite speed or one above
    /// [`defaults::BARB_MAX_SPEED`]. Speeds below 2.5 (negative included)
    /// decompose into nothing.
    pub fn from_speed(speed: f64) -> Option<Self> {
        if !speed.is_finite() || speed > defaults::BARB_MAX_SPEED {
            return None;
        }
        let slack = defaults::BARB_HALF_SPEED / 2.0;
        // each unit takes the rounded share of what the larger units left
        let take = |rest: &mut f64, unit: f64| {
            let n = ((*rest + slack) / unit).floor().max(0.0);
            *rest -= n * unit;
            n as u32
        };
        let mut rest = speed;
        let flags = take(&mut rest, defaults::BARB_FLAG_SPEED);
        let ticks = take(&mut rest, defaults::BARB_TICK_SPEED);
        let halves = take(&mut rest, defaults::BARB_HALF_SPEED);
        Some(BarbCounts { flags, ticks, halves })
    }

    /// Below the smallest element: drawn as a calm circle.
    pub fn is_calm(&self) -> bool {
        self.flags == 0 && self.ticks == 0 && self.halves == 0
    }
}

/// One stroke or fill of a wind barb, in the barb's local frame: the staff
/// runs from the origin along negative x and barbs hang toward negative y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BarbPart {
    Staff([DVec2; 2]),
    Calm { radius: f64 },
    Flag([DVec2; 3]),
    Tick([DVec2; 2]),
    HalfTick([DVec2; 2]),
}

/// Lay out a wind barb for `speed` with a staff of `staff` pixels.
///
/// Elements start at the far end of the staff and step inward. A lone
/// half tick is set in by one step so it is not mistaken for a full tick.
/// Returns `None` when the speed cannot be decomposed.
pub fn barb_parts(speed: f64, staff: f64) -> Option<Vec<BarbPart>> {
    let counts = BarbCounts::from_speed(speed)?;
    let d = defaults::BARB_SPACING * staff;
    let f = defaults::BARB_LENGTH * staff;

    let mut parts = Vec::new();
    if counts.is_calm() {
        parts.push(BarbPart::Calm { radius: d.abs().floor() });
        return Some(parts);
    }
    parts.push(BarbPart::Staff([DVec2::ZERO, dvec2(-staff, 0.0)]));

    let mut w = if counts.flags == 0 && counts.ticks > 0 { -staff } else { -staff + d };
    for _ in 0..counts.flags {
        parts.push(BarbPart::Flag([dvec2(w, 0.0), dvec2(w - d, -f), dvec2(w - d, 0.0)]));
        w += d;
    }
    for _ in 0..counts.ticks {
        parts.push(BarbPart::Tick([dvec2(w, 0.0), dvec2(w - d, -f)]));
        w += d;
    }
    for _ in 0..counts.halves {
        parts.push(BarbPart::HalfTick([dvec2(w, 0.0), dvec2(w - 0.5 * d, -0.5 * f)]));
        w += d;
    }
    Some(parts)
}
