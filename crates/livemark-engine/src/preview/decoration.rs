use crate::parsing::rope::Span;

use super::widget::Widget;

/// Whether a replacement sits inside a line or takes over whole lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Inline,
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecorationKind {
    /// A style class over a range. Never hides text.
    Mark { class: &'static str },
    /// Hides the range and shows `widget` instead, or nothing when `None`.
    Replace {
        widget: Option<Widget>,
        placement: Placement,
    },
}

/// One instruction for the host surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub span: Span,
    pub kind: DecorationKind,
}

impl Decoration {
    pub fn mark(span: Span, class: &'static str) -> Self {
        Self {
            span,
            kind: DecorationKind::Mark { class },
        }
    }

    /// Hide a range without substituting anything.
    pub fn hide(span: Span) -> Self {
        Self {
            span,
            kind: DecorationKind::Replace {
                widget: None,
                placement: Placement::Inline,
            },
        }
    }

    pub fn replace(span: Span, widget: Widget) -> Self {
        Self {
            span,
            kind: DecorationKind::Replace {
                widget: Some(widget),
                placement: Placement::Inline,
            },
        }
    }

    pub fn block(span: Span, widget: Widget) -> Self {
        Self {
            span,
            kind: DecorationKind::Replace {
                widget: Some(widget),
                placement: Placement::Block,
            },
        }
    }

    /// True for replacements, with or without a widget.
    pub fn is_replace(&self) -> bool {
        matches!(self.kind, DecorationKind::Replace { .. })
    }

    pub fn widget(&self) -> Option<&Widget> {
        match &self.kind {
            DecorationKind::Replace { widget, .. } => widget.as_ref(),
            DecorationKind::Mark { .. } => None,
        }
    }

    pub fn class(&self) -> Option<&'static str> {
        match self.kind {
            DecorationKind::Mark { class } => Some(class),
            DecorationKind::Replace { .. } => None,
        }
    }
}

/// Decorations ordered by `(start, end)`, ties kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationSet {
    items: Vec<Decoration>,
}

impl DecorationSet {
    pub fn new(mut items: Vec<Decoration>) -> Self {
        items.sort_by_key(|d| (d.span.start, d.span.end));
        Self { items }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether exactly `span` is replaced, by a widget or a plain hide.
    pub fn hides(&self, span: Span) -> bool {
        self.items.iter().any(|d| d.span == span && d.is_replace())
    }

    /// The widget replacing exactly `span`, if any.
    pub fn widget_at(&self, span: Span) -> Option<&Widget> {
        self.items
            .iter()
            .filter(|d| d.span == span)
            .find_map(Decoration::widget)
    }

    /// Spans of every replacement, in order.
    pub fn replaced_spans(&self) -> Vec<Span> {
        self.items
            .iter()
            .filter(|d| d.is_replace())
            .map(|d| d.span)
            .collect()
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

pub const HEADING_CLASSES: [&str; 6] = [
    "lm-heading lm-heading-1",
    "lm-heading lm-heading-2",
    "lm-heading lm-heading-3",
    "lm-heading lm-heading-4",
    "lm-heading lm-heading-5",
    "lm-heading lm-heading-6",
];
