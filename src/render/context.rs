//! Group context - tracks the open `<g>` elements of a document

use crate::style::Style;

use super::svg::GroupStart;

/// Attributes of one group.
///
/// ```
/// use svgsketch::{GroupOptions, Style};
///
/// let options = GroupOptions::new()
///     .with_style(Style::new().set("stroke", "red"))
///     .with_transform("rotate(30)");
/// assert_eq!(options.transform.as_deref(), Some("rotate(30)"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupOptions {
    pub style: Style,
    pub transform: Option<String>,
    /// Clip reference such as `url(#marginmask)`.
    pub clip_path: Option<String>,
}

impl GroupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    pub fn with_clip_path(mut self, clip_path: impl Into<String>) -> Self {
        self.clip_path = Some(clip_path.into());
        self
    }

    pub(crate) fn start_tag(&self) -> GroupStart {
        GroupStart {
            style: self.style.clone(),
            transform: self.transform.clone(),
            clip_path: self.clip_path.clone(),
        }
    }
}

impl From<Style> for GroupOptions {
    fn from(style: Style) -> Self {
        GroupOptions::new().with_style(style)
    }
}

/// LIFO stack of open groups.
///
/// The bottom entry is the base group written with the document header. It
/// is only popped by [`GroupStack::pop_base`] when the document is finalized.
#[derive(Clone, Debug, Default)]
pub struct GroupStack {
    groups: Vec<GroupOptions>,
}

impl GroupStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, options: GroupOptions) {
        self.groups.push(options);
    }

    /// Pop the innermost user group; `None` when only the base remains.
    pub fn pop(&mut self) -> Option<GroupOptions> {
        if self.groups.len() > 1 { self.groups.pop() } else { None }
    }

    /// Pop whatever is on top, the base group included.
    pub fn pop_base(&mut self) -> Option<GroupOptions> {
        self.groups.pop()
    }

    /// Number of open user groups (the base group is not counted).
    pub fn depth(&self) -> usize {
        self.groups.len().saturating_sub(1)
    }

    /// Total open groups, the base group included.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn innermost(&self) -> Option<&GroupOptions> {
        self.groups.last()
    }
}
