//! Everything derived from document text alone: the syntax tree, block
//! constructs and inline math. Rebuilt on every text change, never on a
//! cursor move.

pub mod blocks;
pub mod inline;
pub mod rope;

use livemark_config::PreviewConfig;
use livemark_syntax::SyntaxNode;
use xi_rope::Rope;

use blocks::{BlockBuilder, BlockConstruct, MarkdownLineClassifier};
use inline::InlineMath;
use rope::lines_with_spans;

#[derive(Debug)]
pub struct ParsedDoc {
    pub tree: SyntaxNode,
    pub blocks: Vec<BlockConstruct>,
    pub inline_math: Vec<InlineMath>,
}

pub fn parse_document(rope: &Rope, preview: &PreviewConfig) -> ParsedDoc {
    let tree = livemark_syntax::parse(&rope.to_string());

    let classifier = MarkdownLineClassifier;
    let lines: Vec<_> = lines_with_spans(rope)
        .map(|lr| classifier.classify(&lr))
        .collect();

    let mut builder = BlockBuilder::new(preview);
    for lc in &lines {
        builder.push(lc);
    }
    let blocks = builder.finish();
    let inline_math = inline::scan_inline_math(&lines, &blocks);

    ParsedDoc {
        tree,
        blocks,
        inline_math,
    }
}
