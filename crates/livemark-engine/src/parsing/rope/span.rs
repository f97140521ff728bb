use livemark_syntax::SyntaxNode;
use livemark_syntax::SyntaxToken;

/// A byte range `[start, end)` into the rope.
///
/// Every decoration, cached node and block construct carries spans rather
/// than copied text, so slicing the rope with a span reproduces the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Whether a cursor at `pos` is touching this span, boundaries included.
    ///
    /// This is the editing rule for every construct: a cursor sitting
    /// exactly on either edge counts as inside and keeps the source raw.
    #[must_use]
    pub fn touches(self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Whether the two half-open ranges share at least one byte.
    #[must_use]
    pub fn overlaps(self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely within this span.
    #[must_use]
    pub fn encloses(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the spans overlap without this one enclosing `other`: a
    /// partial overlap, or this span sitting inside `other`.
    #[must_use]
    pub fn crosses(self, other: Span) -> bool {
        self.overlaps(other) && !self.encloses(other)
    }

    /// Span of a syntax node.
    pub fn of_node(node: &SyntaxNode) -> Self {
        let range = node.text_range();
        Self::new(range.start().into(), range.end().into())
    }

    /// Span of a syntax token.
    pub fn of_token(token: &SyntaxToken) -> Self {
        let range = token.text_range();
        Self::new(range.start().into(), range.end().into())
    }
}
