use std::ops::RangeInclusive;

use crate::parsing::rope::span::Span;

/// Payload of a callout block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callout {
    pub callout_type: String,
    pub title: String,
    /// Body lines with one quote level stripped, joined with `\n`.
    pub body: String,
    pub folded: bool,
    pub foldable: bool,
}

/// The kind of a block construct, carrying what its widget needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// A fenced code block (``` or ~~~) that is not a diagram.
    FencedCode {
        language: Option<String>,
        code: String,
    },
    /// `$$` block math.
    Math { source: String },
    /// A fenced block in a diagram language.
    Diagram { language: String, source: String },
    /// A `> [!type]` callout.
    Callout(Callout),
}

/// A block-level construct found by the line scanners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockConstruct {
    /// From the start of the first line to the end of the last line,
    /// excluding the final line ending.
    pub span: Span,
    /// 1-based first line.
    pub start_line: usize,
    /// 1-based last line, inclusive.
    pub end_line: usize,
    pub kind: BlockKind,
}

impl BlockConstruct {
    pub fn lines(&self) -> RangeInclusive<usize> {
        self.start_line..=self.end_line
    }

    /// Fenced code and diagrams are opaque: nothing inside them is markdown.
    pub fn is_verbatim(&self) -> bool {
        matches!(
            self.kind,
            BlockKind::FencedCode { .. } | BlockKind::Diagram { .. }
        )
    }
}
