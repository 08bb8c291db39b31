//! Path data builder.
//!
//! A [`PathCommands`] sequence is an ordered list of command tags and
//! coordinate trees. [`PathCommands::build`] serializes it into SVG path data
//! (`d` attribute) against a [`CoordinateMapper`].
//!
//! # Mapping mode
//!
//! Coordinates are buffered until the next tag (or the end of the sequence)
//! and then written as `x y` pairs with two decimals. The mapping applied to a
//! buffer depends on the tag that *preceded* it:
//!
//! - after `m` or `l` the pairs are relative deltas and use size mapping;
//! - after anything else they are absolute and use position mapping.
//!
//! This lets one builder serialize both absolute outlines and relative walks.
//!
//! # Example
//!
//! ```
//! use svgsketch::{Canvas, CoordinateMapper, PathCommands};
//!
//! let mapper = CoordinateMapper::new(Canvas::new(100, 100));
//! let d = PathCommands::new()
//!     .move_to(10, 10)
//!     .line_by(20, 0)
//!     .line_by(0, 20)
//!     .close()
//!     .build(&mapper)
//!     .unwrap();
//! assert_eq!(d, "M 10.00 10.00 l 20.00 0.00 l 0.00 20.00 Z");
//! ```

use std::fmt;

use crate::errors::PathError;
use crate::types::{Axis, Coord};

use super::scale::CoordinateMapper;
use super::svg::fmt_coord;

/// A path command letter, or a literal field emitted verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    MoveTo,
    MoveBy,
    LineTo,
    LineBy,
    ArcTo,
    ArcBy,
    Close,
    /// Free-form field such as the arc rotation `0` or flags `1,0`.
    Literal(String),
}

impl Tag {
    /// Parse a single command letter.
    pub fn from_letter(letter: char) -> Result<Tag, PathError> {
        match letter {
            'M' => Ok(Tag::MoveTo),
            'm' => Ok(Tag::MoveBy),
            'L' => Ok(Tag::LineTo),
            'l' => Ok(Tag::LineBy),
            'A' => Ok(Tag::ArcTo),
            'a' => Ok(Tag::ArcBy),
            'Z' => Ok(Tag::Close),
            _ => Err(PathError::UnknownTag { letter }),
        }
    }

    /// Coordinates after this tag are displacements.
    pub fn is_relative_step(&self) -> bool {
        matches!(self, Tag::MoveBy | Tag::LineBy)
    }

    /// Move and line commands must be followed by coordinates.
    fn needs_coordinates(&self) -> bool {
        matches!(self, Tag::MoveTo | Tag::MoveBy | Tag::LineTo | Tag::LineBy)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Tag::MoveTo => "M",
            Tag::MoveBy => "m",
            Tag::LineTo => "L",
            Tag::LineBy => "l",
            Tag::ArcTo => "A",
            Tag::ArcBy => "a",
            Tag::Close => "Z",
            Tag::Literal(s) => s,
        };
        f.write_str(letter)
    }
}

/// An arbitrarily nested tree of coordinates.
///
/// Trees flatten depth-first, left to right, so `[(x0, y0), (x1, y1)]`,
/// `[x0, y0, x1, y1]` and `([x0, y0], [x1, y1])` all describe the same two
/// points.
#[derive(Clone, Debug, PartialEq)]
pub enum Coords {
    One(Coord),
    Many(Vec<Coords>),
}

impl Coords {
    /// Append every leaf to `out` in order.
    pub fn flatten_into(&self, out: &mut Vec<Coord>) {
        match self {
            Coords::One(c) => out.push(*c),
            Coords::Many(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }

    pub fn flatten(&self) -> Vec<Coord> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }
}

impl From<Coord> for Coords {
    fn from(c: Coord) -> Self {
        Coords::One(c)
    }
}

impl From<f64> for Coords {
    fn from(v: f64) -> Self {
        Coords::One(Coord::from(v))
    }
}

impl From<i32> for Coords {
    fn from(v: i32) -> Self {
        Coords::One(Coord::from(v))
    }
}

impl<A: Into<Coords>, B: Into<Coords>> From<(A, B)> for Coords {
    fn from((a, b): (A, B)) -> Self {
        Coords::Many(vec![a.into(), b.into()])
    }
}

impl<T: Into<Coords>> From<Vec<T>> for Coords {
    fn from(items: Vec<T>) -> Self {
        Coords::Many(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Coords>, const N: usize> From<[T; N]> for Coords {
    fn from(items: [T; N]) -> Self {
        Coords::Many(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Coords> + Clone> From<&[T]> for Coords {
    fn from(items: &[T]) -> Self {
        Coords::Many(items.iter().cloned().map(Into::into).collect())
    }
}

/// One entry of a command sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum PathItem {
    Tag(Tag),
    Coords(Coords),
}

/// An ordered sequence of path tags and coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathCommands {
    items: Vec<PathItem>,
}

impl PathCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PathItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a tag.
    pub fn tag(mut self, tag: Tag) -> Self {
        self.items.push(PathItem::Tag(tag));
        self
    }

    /// Append a literal field, emitted as-is.
    pub fn literal(self, text: impl Into<String>) -> Self {
        self.tag(Tag::Literal(text.into()))
    }

    /// Append coordinates (any nesting).
    pub fn coords(mut self, coords: impl Into<Coords>) -> Self {
        self.items.push(PathItem::Coords(coords.into()));
        self
    }

    fn pair(self, x: impl Into<Coord>, y: impl Into<Coord>) -> Self {
        self.coords(Coords::Many(vec![Coords::One(x.into()), Coords::One(y.into())]))
    }

    pub fn move_to(self, x: impl Into<Coord>, y: impl Into<Coord>) -> Self {
        self.tag(Tag::MoveTo).pair(x, y)
    }

    pub fn move_by(self, dx: impl Into<Coord>, dy: impl Into<Coord>) -> Self {
        self.tag(Tag::MoveBy).pair(dx, dy)
    }

    pub fn line_to(self, x: impl Into<Coord>, y: impl Into<Coord>) -> Self {
        self.tag(Tag::LineTo).pair(x, y)
    }

    pub fn line_by(self, dx: impl Into<Coord>, dy: impl Into<Coord>) -> Self {
        self.tag(Tag::LineBy).pair(dx, dy)
    }

    /// Relative elliptical arc with no axis rotation.
    ///
    /// The radii and end-point delta should already be in device units
    /// (fixed-point or bare); they follow non-step tags and are position
    /// mapped, which leaves those kinds untouched.
    pub fn arc_by(
        self,
        radii: (Coord, Coord),
        large_arc: bool,
        sweep: bool,
        delta: (Coord, Coord),
    ) -> Self {
        self.tag(Tag::ArcBy)
            .pair(radii.0, radii.1)
            .literal("0")
            .literal(format!("{},{}", large_arc as u8, sweep as u8))
            .pair(delta.0, delta.1)
    }

    pub fn close(self) -> Self {
        self.tag(Tag::Close)
    }

    /// Concatenate another sequence after this one.
    pub fn extend(mut self, other: PathCommands) -> Self {
        self.items.extend(other.items);
        self
    }

    /// Serialize to path data.
    pub fn build(&self, mapper: &CoordinateMapper) -> Result<String, PathError> {
        let mut out: Vec<String> = Vec::new();
        let mut pending: Vec<Coord> = Vec::new();
        let mut prev: Option<&Tag> = None;

        for item in &self.items {
            match item {
                PathItem::Coords(coords) => {
                    if prev.is_none() {
                        return Err(PathError::LeadingCoordinates);
                    }
                    coords.flatten_into(&mut pending);
                }
                PathItem::Tag(tag) => {
                    flush(&mut out, &mut pending, prev, mapper)?;
                    out.push(tag.to_string());
                    prev = Some(tag);
                }
            }
        }
        flush(&mut out, &mut pending, prev, mapper)?;

        Ok(out.join(" "))
    }
}

/// Write buffered coordinates as mapped pairs and clear the buffer.
fn flush(
    out: &mut Vec<String>,
    pending: &mut Vec<Coord>,
    prev: Option<&Tag>,
    mapper: &CoordinateMapper,
) -> Result<(), PathError> {
    let Some(tag) = prev else {
        return Ok(());
    };
    if pending.is_empty() {
        if tag.needs_coordinates() {
            return Err(PathError::MissingCoordinates { tag: tag.to_string() });
        }
        return Ok(());
    }
    if pending.len() % 2 != 0 {
        return Err(PathError::OddCoordinateCount { count: pending.len() });
    }

    let relative = tag.is_relative_step();
    for pair in pending.chunks_exact(2) {
        let (x, y) = if relative {
            (mapper.map_size(Axis::X, pair[0])?, mapper.map_size(Axis::Y, pair[1])?)
        } else {
            (mapper.map_position(Axis::X, pair[0])?, mapper.map_position(Axis::Y, pair[1])?)
        };
        out.push(fmt_coord(x));
        out.push(fmt_coord(y));
    }
    pending.clear();
    Ok(())
}
