//! Presentation properties.
//!
//! [`Style`] is an open-vocabulary, insertion-ordered map of SVG presentation
//! properties. Any key is accepted; underscores are rewritten to hyphens so
//! `stroke_width` and `stroke-width` name the same property. Serialization
//! order is insertion order, so output is deterministic.

use std::fmt;

use indexmap::IndexMap;

use crate::render::svg::escape_attr;

/// A property value: free text or a number.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(s) => write!(f, "{}", s),
            StyleValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Number(n as f64)
    }
}

impl From<Rgb> for StyleValue {
    fn from(c: Rgb) -> Self {
        StyleValue::Text(c.to_string())
    }
}

/// Rewrite a property name to SVG's hyphenated form.
pub fn normalize_key(key: &str) -> String {
    key.replace('_', "-")
}

/// Ordered style properties, serialized as `key:value;` pairs.
///
/// ```
/// use svgsketch::Style;
///
/// let style = Style::new().set("stroke", "olive").set("stroke_width", 10);
/// assert_eq!(style.to_string(), "stroke:olive;stroke-width:10;");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    /// Declarations placed verbatim before the keyed properties.
    raw: String,
    props: IndexMap<String, StyleValue>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing declaration string such as `"fill:red;"`.
    pub fn raw(declarations: impl Into<String>) -> Self {
        Style {
            raw: declarations.into(),
            props: IndexMap::new(),
        }
    }

    /// Set a property, keeping the position of an existing key.
    pub fn set(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<StyleValue>) {
        self.props.insert(normalize_key(key), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.props.get(&normalize_key(key))
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty() && self.props.is_empty()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Properties of `self` followed by those of `other`; later keys win
    /// their value but keep their first position.
    pub fn merged(&self, other: &Style) -> Style {
        let mut out = self.clone();
        out.raw.push_str(&other.raw);
        for (key, value) in &other.props {
            out.props.insert(key.clone(), value.clone());
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render the properties as XML attributes (` key="value"` each) instead
    /// of a single declaration. The raw prefix is not used here.
    pub fn to_attributes(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.props {
            out.push_str(&format!(" {}=\"{}\"", key, escape_attr(&value.to_string())));
        }
        out
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)?;
        for (key, value) in &self.props {
            write!(f, "{}:{};", key, value)?;
        }
        Ok(())
    }
}

/// An `rgb(r,g,b)` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub fn gray(level: u8) -> Self {
        Rgb::new(level, level, level)
    }

    /// Channels given as fractions of full intensity, clamped to `[0, 1]`.
    pub fn from_fractions(r: f64, g: f64, b: f64) -> Self {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0) as u8;
        Rgb::new(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}
