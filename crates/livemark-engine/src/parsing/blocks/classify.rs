use crate::parsing::rope::{lines::LineRef, span::Span};

use super::kinds::{BlockQuote, CodeFence, FenceSig};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block scanning: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// 1-based line number.
    pub number: usize,
    /// Full byte span of this line in the rope.
    pub line: Span,
    /// The line without its line ending.
    pub content_span: Span,
    pub content_text: String,
    /// Whether the line is blank (whitespace only).
    pub is_blank: bool,
    /// Number of blockquote `>` prefixes found.
    pub quote_depth: u8,
    /// Text after one quote level, when the line is quoted.
    pub quoted_text: Option<String>,
    /// If an unquoted line looks like a fence opener/closer.
    pub fence_sig: Option<FenceSig>,
}

/// Classifies individual lines for the block scanning phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`] containing local facts.
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        let content = lr.content();
        let (quote_depth, _) = BlockQuote::strip_prefixes(content);
        let quoted_text = BlockQuote::strip_one(content).map(|idx| content[idx..].to_string());

        LineClass {
            number: lr.number,
            line: lr.span,
            content_span: lr.content_span(),
            content_text: content.to_string(),
            is_blank: content.trim().is_empty(),
            quote_depth,
            quoted_text,
            fence_sig: if quote_depth == 0 {
                CodeFence::sig(content)
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::rope::lines_with_spans;
    use xi_rope::Rope;

    fn classify_all(text: &str) -> Vec<LineClass> {
        let rope = Rope::from(text);
        lines_with_spans(&rope)
            .map(|lr| MarkdownLineClassifier.classify(&lr))
            .collect()
    }

    #[test]
    fn classify_quote_and_fence() {
        let lines = classify_all("> [!note]\n```rust\n\n");
        assert_eq!(lines[0].quote_depth, 1);
        assert_eq!(lines[0].quoted_text.as_deref(), Some("[!note]"));
        assert!(lines[0].fence_sig.is_none());
        assert_eq!(lines[1].fence_sig.as_ref().map(|s| s.info.as_str()), Some("rust"));
        assert!(lines[2].is_blank);
    }

    #[test]
    fn quoted_fence_is_not_a_fence() {
        let lines = classify_all("> ```\n");
        assert!(lines[0].fence_sig.is_none());
    }
}
