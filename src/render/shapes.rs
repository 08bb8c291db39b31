//! Composite shapes built from the primitives.
//!
//! Centers and end points are mapped as positions. Radii and head sizes are
//! size-mapped along x, so a float is in user units and an integer in
//! pixels. Offsets computed here are already in device space and are passed
//! on as fixed-point coordinates.

use std::io::Write;

use glam::DVec2;

use crate::errors::{MapError, RenderError, Result};
use crate::style::Style;
use crate::types::{Axis, Coord, hires};

use super::context::GroupOptions;
use super::defaults;
use super::document::Document;
use super::geometry::{ArcSpan, BarbPart, arrow_layout, barb_parts, fat_arrow_outline, polar};
use super::path_builder::PathCommands;
use super::svg::fmt_coord;

/// A device point as a fixed-point pair.
fn fixed(p: DVec2) -> Result<(Coord, Coord), MapError> {
    Ok((Coord::try_hires(Axis::X, p.x)?, Coord::try_hires(Axis::Y, p.y)?))
}

/// A device radius as a fixed-point pair of equal radii.
fn fixed_radii(r: f64) -> Result<(Coord, Coord), MapError> {
    let r = Coord::try_hires(Axis::X, r)?;
    Ok((r, r))
}

/// A run of device points as a flat fixed-point list.
fn fixed_points(points: &[DVec2]) -> Result<Vec<Coord>, MapError> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for &p in points {
        let (x, y) = fixed(p)?;
        out.push(x);
        out.push(y);
    }
    Ok(out)
}

/// Reject NaN and infinite scalar parameters such as angles.
fn finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RenderError::NonFiniteParameter { name, value })
    }
}

impl<W: Write> Document<W> {
    /// Circular arc around `(x, y)` from angle `a1` to `a2` (degrees,
    /// counter-clockwise from the positive x axis).
    pub fn arc(
        &mut self,
        x: impl Into<Coord>,
        y: impl Into<Coord>,
        r: impl Into<Coord>,
        a1: f64,
        a2: f64,
        style: &Style,
    ) -> Result<()> {
        let (a1, a2) = (finite("start angle", a1)?, finite("end angle", a2)?);
        let r = self.mapper().map_size(Axis::X, r.into())?;
        let span = ArcSpan::new(r, a1, a2);
        let (sx, sy) = fixed(span.start)?;
        let commands = PathCommands::new()
            .move_to(x, y)
            .move_by(sx, sy)
            .arc_by(fixed_radii(r)?, span.large_arc, false, fixed(span.delta)?);
        self.path(&commands, style)
    }

    /// Annular sector between radii `r1` (inner) and `r2` (outer).
    pub fn sector(
        &mut self,
        x: impl Into<Coord>,
        y: impl Into<Coord>,
        r1: impl Into<Coord>,
        r2: impl Into<Coord>,
        a1: f64,
        a2: f64,
        style: &Style,
    ) -> Result<()> {
        let (a1, a2) = (finite("start angle", a1)?, finite("end angle", a2)?);
        let r1 = self.mapper().map_size(Axis::X, r1.into())?;
        let r2 = self.mapper().map_size(Axis::X, r2.into())?;
        let outer = ArcSpan::new(r2, a1, a2);
        let inner = ArcSpan::new(r1, a1, a2);
        let (sx, sy) = fixed(outer.start)?;
        let (lx, ly) = fixed(inner.end() - outer.end())?;
        let commands = PathCommands::new()
            .move_to(x, y)
            .move_by(sx, sy)
            .arc_by(fixed_radii(r2)?, outer.large_arc, false, fixed(outer.delta)?)
            .line_by(lx, ly)
            .arc_by(fixed_radii(r1)?, inner.large_arc, true, fixed(-inner.delta)?)
            .close();
        self.path(&commands, style)
    }

    /// Radial segment from radius `r1` to `r2` at angle `a`.
    pub fn radial(
        &mut self,
        x: impl Into<Coord>,
        y: impl Into<Coord>,
        r1: impl Into<Coord>,
        r2: impl Into<Coord>,
        a: f64,
        style: &Style,
    ) -> Result<()> {
        let a = finite("angle", a)?;
        let r1 = self.mapper().map_size(Axis::X, r1.into())?;
        let r2 = self.mapper().map_size(Axis::X, r2.into())?;
        let outer = polar(r2, a);
        let inner = polar(r1, a);
        let (sx, sy) = fixed(outer)?;
        let (lx, ly) = fixed(inner - outer)?;
        let commands = PathCommands::new().move_to(x, y).move_by(sx, sy).line_by(lx, ly);
        self.path(&commands, style)
    }

    /// Square marker centered on `(x, y)` with a half side in pixels.
    pub fn square(
        &mut self,
        x: impl Into<Coord>,
        y: impl Into<Coord>,
        half_side: f64,
        style: &Style,
    ) -> Result<()> {
        let center = self.mapper().position(x.into(), y.into())?;
        let half_side = finite("half side", half_side)?;
        let (x1, y1) = fixed(center - half_side)?;
        let (x2, y2) = fixed(center + half_side)?;
        self.open_group(style.clone())?;
        self.rect_corners(x1, y1, x2, y2, &Style::new())?;
        self.close_group()?;
        Ok(())
    }

    /// Line with a filled head at `(x2, y2)`.
    ///
    /// The whole arrow is wrapped in a group carrying `style`; the head uses
    /// the group's stroke color as its fill.
    pub fn arrow(
        &mut self,
        x1: impl Into<Coord>,
        y1: impl Into<Coord>,
        x2: impl Into<Coord>,
        y2: impl Into<Coord>,
        head_size: impl Into<Coord>,
        style: &Style,
    ) -> Result<()> {
        let (x1, y1) = (x1.into(), y1.into());
        let tail = self.mapper().position(x1, y1)?;
        let tip = self.mapper().position(x2.into(), y2.into())?;
        let head_size = self.mapper().map_size(Axis::X, head_size.into())?;
        let layout = arrow_layout(tail, tip, head_size)
            .ok_or(RenderError::DegenerateVector { shape: "arrow" })?;

        let (ex, ey) = fixed(layout.shaft_end)?;
        let head = fixed_points(&layout.head)?;

        self.open_group(style.clone())?;
        self.line(x1, y1, ex, ey, &Style::new())?;
        self.polygon(head, &Style::new().set("stroke", "none"))?;
        self.close_group()?;
        Ok(())
    }

    /// Filled block arrow; `half_width` is the half width of the body and the
    /// length of the head.
    pub fn fat_arrow(
        &mut self,
        x1: impl Into<Coord>,
        y1: impl Into<Coord>,
        x2: impl Into<Coord>,
        y2: impl Into<Coord>,
        half_width: impl Into<Coord>,
        style: &Style,
    ) -> Result<()> {
        let tail = self.mapper().position(x1.into(), y1.into())?;
        let tip = self.mapper().position(x2.into(), y2.into())?;
        let half_width = self.mapper().map_size(Axis::X, half_width.into())?;
        let outline = fat_arrow_outline(tail, tip, half_width)
            .ok_or(RenderError::DegenerateVector { shape: "fat arrow" })?;
        self.polygon(fixed_points(&outline)?, style)
    }

    /// Meteorological wind barb at `(x, y)`.
    ///
    /// `speed` is decomposed into 50/10/5 unit elements, `direction` is the
    /// direction the wind blows from in degrees and `staff` the staff length
    /// in pixels. Speeds below 2.5 draw a calm circle.
    pub fn wind_barb(
        &mut self,
        x: impl Into<Coord>,
        y: impl Into<Coord>,
        speed: f64,
        direction: f64,
        staff: f64,
        style: &Style,
    ) -> Result<()> {
        let direction = finite("direction", direction)?;
        let staff = finite("staff length", staff)?;
        let parts = barb_parts(speed, staff).ok_or(RenderError::SpeedOutOfRange {
            speed,
            max: defaults::BARB_MAX_SPEED,
        })?;

        enum Mark {
            Circle(f64),
            Stroke(Vec<Coord>),
            Fill(Vec<Coord>),
        }
        // convert up front so a bad value leaves no group open
        let mut marks = Vec::with_capacity(parts.len());
        for part in &parts {
            marks.push(match part {
                BarbPart::Calm { radius } => Mark::Circle(*radius),
                BarbPart::Staff(points) | BarbPart::Tick(points) | BarbPart::HalfTick(points) => {
                    Mark::Stroke(fixed_points(points)?)
                }
                BarbPart::Flag(points) => Mark::Fill(fixed_points(points)?),
            });
        }

        let at = self.mapper().position(x.into(), y.into())?;
        let transform = format!(
            "translate({},{}) rotate({})",
            fmt_coord(at.x),
            fmt_coord(at.y),
            fmt_coord(direction - 90.0)
        );
        self.open_group(GroupOptions::new().with_style(style.clone()).with_transform(transform))?;

        let plain = Style::new();
        for mark in marks {
            match mark {
                Mark::Circle(radius) => {
                    let origin = hires(0.0);
                    self.circle(origin, origin, Coord::Bare(radius), &Style::new().set("fill", "none"))?;
                }
                Mark::Stroke(points) => self.polyline(points, &plain)?,
                Mark::Fill(points) => self.polygon(points, &plain)?,
            }
        }

        self.close_group()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::document::DocumentConfig;
    use crate::render::scale::{Bounds, Margins};

    fn doc() -> Document<Vec<u8>> {
        let config = DocumentConfig::new().with_size(200, 200).with_white_background(false);
        Document::new(Vec::new(), config).unwrap()
    }

    /// Elements written after the base group, one per line.
    fn drawn(mut doc: Document<Vec<u8>>) -> Vec<String> {
        let text = String::from_utf8(doc.finalize().unwrap()).unwrap();
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let start = lines.iter().position(|l| l.starts_with("<g style=\"fill-opacity")).unwrap();
        // drop the base group's closing tag and </svg>
        lines[start + 1..lines.len() - 2].to_vec()
    }

    #[test]
    fn quarter_arc_in_pixels() {
        let mut doc = doc();
        doc.arc(100, 100, 50, 90.0, 0.0, &Style::new()).unwrap();
        assert_eq!(
            drawn(doc),
            ["<path d=\"M 100.00 100.00 m 50.00 0.00 a 50.00 50.00 0 0,0 -50.00 -50.00\"/>"]
        );
    }

    #[test]
    fn wide_arc_sets_large_flag() {
        let mut doc = doc();
        doc.arc(100, 100, 10, 0.0, 270.0, &Style::new()).unwrap();
        let lines = drawn(doc);
        assert!(lines[0].contains(" a 10.00 10.00 0 1,0 "), "{}", lines[0]);
    }

    #[test]
    fn sector_has_both_arcs() {
        let mut doc = doc();
        doc.sector(100, 100, 10, 20, 0.0, 90.0, &Style::new()).unwrap();
        assert_eq!(
            drawn(doc),
            ["<path d=\"M 100.00 100.00 m 20.00 0.00 a 20.00 20.00 0 0,0 -20.00 -20.00 \
              l 0.00 10.00 a 10.00 10.00 0 0,1 10.00 10.00 Z\"/>"]
        );
    }

    #[test]
    fn radial_segment() {
        let mut doc = doc();
        doc.radial(100, 100, 10, 30, 180.0, &Style::new()).unwrap();
        assert_eq!(
            drawn(doc),
            ["<path d=\"M 100.00 100.00 m -30.00 0.00 l 20.00 0.00\"/>"]
        );
    }

    #[test]
    fn user_unit_radius_is_scaled_on_x() {
        let mut doc = doc();
        doc.set_scale(Bounds::new(0.0, 10.0, 0.0, 1.0), Margins::uniform(0.0)).unwrap();
        doc.radial(5.0, 0.5, 0.0, 1.0, 0.0, &Style::new()).unwrap();
        let lines = drawn(doc);
        let last = lines.last().unwrap();
        assert_eq!(last, "<path d=\"M 100.00 100.00 m 20.00 0.00 l -20.00 0.00\"/>");
    }

    #[test]
    fn square_is_grouped() {
        let mut doc = doc();
        doc.square(50, 50, 5.0, &Style::new().set("fill", "blue")).unwrap();
        assert_eq!(
            drawn(doc),
            [
                "<g style=\"fill:blue;\">",
                "<path d=\"M 45.00 45.00 L 55.00 45.00 L 55.00 55.00 L 45.00 55.00 Z\"/>",
                "</g>",
            ]
        );
    }

    #[test]
    fn arrow_shaft_and_head() {
        let mut doc = doc();
        doc.arrow(0, 100, 100, 100, 10, &Style::new().set("stroke", "red")).unwrap();
        assert_eq!(
            drawn(doc),
            [
                "<g style=\"stroke:red;\">",
                "<line x1=\"0.00\" y1=\"100.00\" x2=\"92.00\" y2=\"100.00\"/>",
                "<path style=\"stroke:none;\" d=\"M 100.00 100.00 L 92.00 106.00 92.00 94.00 Z\"/>",
                "</g>",
            ]
        );
    }

    #[test]
    fn zero_length_arrows_are_rejected() {
        let mut doc = doc();
        let err = doc.arrow(10, 10, 10, 10, 5, &Style::new()).unwrap_err();
        assert!(matches!(err, RenderError::DegenerateVector { shape: "arrow" }));
        let err = doc.fat_arrow(10, 10, 10, 10, 5, &Style::new()).unwrap_err();
        assert!(matches!(err, RenderError::DegenerateVector { shape: "fat arrow" }));
        // nothing was opened or written
        assert_eq!(doc.depth(), 0);
        assert!(drawn(doc).is_empty());
    }

    #[test]
    fn fat_arrow_outline_points() {
        let mut doc = doc();
        doc.fat_arrow(0, 50, 100, 50, 10, &Style::new()).unwrap();
        assert_eq!(
            drawn(doc),
            ["<path d=\"M 0.00 40.00 L 90.00 40.00 100.00 50.00 90.00 60.00 0.00 60.00 Z\"/>"]
        );
    }

    #[test]
    fn calm_wind_is_a_circle() {
        let mut doc = doc();
        doc.wind_barb(100, 100, 2.0, 0.0, 40.0, &Style::new()).unwrap();
        assert_eq!(
            drawn(doc),
            [
                "<g transform=\"translate(100.00,100.00) rotate(-90.00)\">",
                "<circle cx=\"0.00\" cy=\"0.00\" r=\"5.00\" style=\"fill:none;\"/>",
                "</g>",
            ]
        );
    }

    #[test]
    fn barb_for_47_units() {
        let mut doc = doc();
        doc.wind_barb(100, 100, 47.0, 270.0, 100.0, &Style::new()).unwrap();
        let lines = drawn(doc);
        assert_eq!(lines[0], "<g transform=\"translate(100.00,100.00) rotate(180.00)\">");
        assert_eq!(lines[1], "<path d=\"M 0.00 0.00 L -100.00 0.00\"/>");
        // four ticks then one half tick, no flags
        let ticks = lines.iter().filter(|l| l.contains("-50.00\"/>")).count();
        let halves = lines.iter().filter(|l| l.contains("-25.00\"/>")).count();
        assert_eq!((ticks, halves), (4, 1));
        assert!(!lines.iter().any(|l| l.ends_with("Z\"/>")));
        assert_eq!(lines.len(), 1 + 1 + 5 + 1);
    }

    #[test]
    fn non_finite_angles_are_rejected() {
        let mut doc = doc();
        let err = doc.arc(50, 50, 10, f64::NAN, 90.0, &Style::new()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::NonFiniteParameter { name: "start angle", .. }
        ));
        let err = doc.sector(50, 50, 5, 10, 0.0, f64::INFINITY, &Style::new()).unwrap_err();
        assert!(matches!(err, RenderError::NonFiniteParameter { name: "end angle", .. }));
        let err = doc.radial(50, 50, 5, 10, f64::NAN, &Style::new()).unwrap_err();
        assert!(matches!(err, RenderError::NonFiniteParameter { name: "angle", .. }));
        assert!(drawn(doc).is_empty());
    }

    #[test]
    fn offsets_beyond_fixed_point_range_are_rejected() {
        let mut doc = doc();
        let err = doc
            .sector(100, 100, 10, Coord::Bare(1e300), 0.0, 90.0, &Style::new())
            .unwrap_err();
        assert!(matches!(err, RenderError::Map(MapError::OutOfRange { .. })));
        let err = doc.arc(100, 100, Coord::Bare(1e300), 0.0, 90.0, &Style::new()).unwrap_err();
        assert!(matches!(err, RenderError::Map(MapError::OutOfRange { .. })));
        let err = doc.square(10, 10, 1e300, &Style::new()).unwrap_err();
        assert!(matches!(err, RenderError::Map(MapError::OutOfRange { .. })));
        assert_eq!(doc.depth(), 0);
        assert!(drawn(doc).is_empty());
    }

    #[test]
    fn unreasonable_wind_barbs_are_rejected() {
        let mut doc = doc();
        for speed in [1e20, f64::INFINITY, f64::NAN] {
            let err = doc.wind_barb(100, 100, speed, 0.0, 50.0, &Style::new()).unwrap_err();
            assert!(matches!(err, RenderError::SpeedOutOfRange { .. }), "{speed}: {err:?}");
        }
        let err = doc.wind_barb(100, 100, 10.0, f64::NAN, 50.0, &Style::new()).unwrap_err();
        assert!(matches!(err, RenderError::NonFiniteParameter { name: "direction", .. }));
        let err = doc.wind_barb(100, 100, 10.0, 0.0, f64::INFINITY, &Style::new()).unwrap_err();
        assert!(matches!(err, RenderError::NonFiniteParameter { name: "staff length", .. }));
        let err = doc.wind_barb(100, 100, 60.0, 0.0, 1e17, &Style::new()).unwrap_err();
        assert!(matches!(err, RenderError::Map(MapError::OutOfRange { .. })));
        assert_eq!(doc.depth(), 0);
        assert!(drawn(doc).is_empty());
    }

    #[test]
    fn fastest_drawable_barb_is_all_flags() {
        let mut doc = doc();
        doc.wind_barb(100, 100, defaults::BARB_MAX_SPEED, 90.0, 40.0, &Style::new()).unwrap();
        let lines = drawn(doc);
        let flags = lines.iter().filter(|l| l.ends_with("Z\"/>")).count();
        assert_eq!(flags, 20);
    }
}
