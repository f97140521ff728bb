//! Line-oriented block scanners.
//!
//! Blocks are found in two phases, the same way for every construct:
//!
//! 1. [`MarkdownLineClassifier`] records local facts about each line (quote
//!    depth, fence signature, blankness).
//! 2. [`BlockBuilder`] runs one forward state machine over those facts and
//!    emits fenced code, diagrams, `$$` math and callouts with their spans
//!    and line ranges.

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use types::{BlockConstruct, BlockKind, Callout};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::rope::{Span, lines_with_spans};
    use livemark_config::PreviewConfig;
    use pretty_assertions::assert_eq;
    use xi_rope::Rope;

    fn scan(text: &str) -> Vec<BlockConstruct> {
        let preview = PreviewConfig::default();
        let rope = Rope::from(text);
        let mut builder = BlockBuilder::new(&preview);
        for lr in lines_with_spans(&rope) {
            builder.push(&MarkdownLineClassifier.classify(&lr));
        }
        builder.finish()
    }

    #[test]
    fn fenced_code_with_language() {
        let blocks = scan("intro\n```rust\nfn main() {}\n```\nafter\n");
        assert_eq!(
            blocks,
            vec![BlockConstruct {
                span: Span::new(6, 30),
                start_line: 2,
                end_line: 4,
                kind: BlockKind::FencedCode {
                    language: Some("rust".to_string()),
                    code: "fn main() {}".to_string(),
                },
            }]
        );
    }

    #[test]
    fn unterminated_fence_runs_to_end() {
        let blocks = scan("```\nline one\nline two\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines(), 1..=3);
        assert_eq!(blocks[0].span, Span::new(0, 21));
        assert_eq!(
            blocks[0].kind,
            BlockKind::FencedCode {
                language: None,
                code: "line one\nline two".to_string()
            }
        );
    }

    #[test]
    fn diagram_is_not_also_code() {
        let blocks = scan("```mermaid\ngraph TD\n  A-->B\n```\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0].kind,
            BlockKind::Diagram {
                language: "mermaid".to_string(),
                source: "graph TD\n  A-->B".to_string()
            }
        );
    }

    #[test]
    fn fence_hides_math_and_callouts() {
        let blocks = scan("~~~\n$$\n> [!note]\n~~~\n");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].is_verbatim());
    }

    #[test]
    fn single_and_multi_line_math() {
        let blocks = scan("$$x^2$$\n\n$$\na + b\n= c\n$$\n");
        let kinds: Vec<_> = blocks.iter().map(|b| (b.lines(), b.kind.clone())).collect();
        assert_eq!(
            kinds,
            vec![
                (
                    1..=1,
                    BlockKind::Math {
                        source: "x^2".to_string()
                    }
                ),
                (
                    3..=6,
                    BlockKind::Math {
                        source: "a + b\n= c".to_string()
                    }
                ),
            ]
        );
    }

    #[test]
    fn unterminated_math_is_rescanned() {
        let blocks = scan("$$\nnot closed\n```\ncode\n```\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines(), 3..=5);
        assert!(matches!(blocks[0].kind, BlockKind::FencedCode { .. }));
    }

    #[test]
    fn callout_spans_following_quote_lines() {
        let blocks = scan("> [!warning]- Careful\n> first\n>\n> > nested\nafter\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines(), 1..=4);
        assert_eq!(
            blocks[0].kind,
            BlockKind::Callout(Callout {
                callout_type: "warning".to_string(),
                title: "Careful".to_string(),
                body: "first\n\n> nested".to_string(),
                folded: true,
                foldable: true,
            })
        );
    }

    #[test]
    fn callout_header_must_open_the_quote() {
        let blocks = scan("> plain quote\n> [!note]\n");
        assert_eq!(blocks, vec![]);
    }

    #[test]
    fn adjacent_callouts_need_a_break() {
        let blocks = scan("> [!note] A\n\n> [!tip] B\n> body\n");
        let titles: Vec<_> = blocks
            .iter()
            .filter_map(|b| match &b.kind {
                BlockKind::Callout(c) => Some(c.title.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
    }
}
