//! # Grammar Rules
//!
//! Each function takes a `&mut Parser` and uses its methods to inspect
//! tokens (`p.current()`, `p.nth()`), consume them (`p.bump()`, `p.glue()`)
//! and build structure (`p.start()` → marker → `complete()`/`abandon()`).
//!
//! - [`block`] - Block-level elements (headings, quotes, list items, fences)
//! - [`inline`] - Inline elements, including the note-taking extensions
//!
//! Block rules are lenient: any input produces a tree that preserves every
//! byte. Inline rules are strict: a construct is either complete (both
//! delimiters present on the line) or not a construct at all.

mod block;
mod inline;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root document.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    while !p.at_end() {
        block::block(p);
    }

    m.complete(p, SyntaxKind::ROOT);
}
