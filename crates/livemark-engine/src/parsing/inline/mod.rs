//! Inline `$...$` math scanning.
//!
//! Math is not part of the markdown grammar, so it is found by a byte
//! scanner over each line once the block scanners have run: lines inside
//! fenced code and diagrams are skipped, and candidates overlapping `$$`
//! block math are rejected.

pub mod cursor;

use crate::parsing::blocks::{BlockConstruct, BlockKind, LineClass};
use crate::parsing::rope::span::Span;

pub use cursor::Cursor;

/// An inline math span, delimiters included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMath {
    pub span: Span,
    pub source: String,
}

/// Find inline math across classified lines.
pub fn scan_inline_math(lines: &[LineClass], blocks: &[BlockConstruct]) -> Vec<InlineMath> {
    let verbatim: Vec<_> = blocks.iter().filter(|b| b.is_verbatim()).collect();
    let block_math: Vec<Span> = blocks
        .iter()
        .filter(|b| matches!(b.kind, BlockKind::Math { .. }))
        .map(|b| b.span)
        .collect();

    lines
        .iter()
        .filter(|l| !verbatim.iter().any(|b| b.lines().contains(&l.number)))
        .flat_map(|l| scan_line(&l.content_text, l.content_span.start))
        .filter(|m| !block_math.iter().any(|s| s.overlaps(m.span)))
        .collect()
}

/// Scan one line of text starting at absolute offset `base`.
pub fn scan_line(text: &str, base: usize) -> Vec<InlineMath> {
    let mut out = vec![];
    let mut cur = Cursor::new(text, base);

    while !cur.eof() {
        match cur.peek() {
            Some(b'\\') => cur.bump_n(2),
            Some(b'$') if cur.starts_with(b"$$") => {
                cur.bump_run(b'$');
            }
            Some(b'$') => match try_parse_math(&cur) {
                Some(math) => {
                    cur.i = math.span.end - cur.base;
                    out.push(math);
                }
                None => {
                    cur.bump();
                }
            },
            _ => {
                cur.bump();
            }
        }
    }

    out
}

/// `$source$` at the cursor: non-empty, no whitespace just inside either
/// delimiter, escapes honoured, and the closer not followed by `$` or a
/// digit (so `$5 and $10` stays text).
fn try_parse_math(cur: &Cursor<'_>) -> Option<InlineMath> {
    let bytes = cur.s.as_bytes();
    let open = cur.i;
    if bytes.get(open + 1)?.is_ascii_whitespace() {
        return None;
    }

    let mut j = open + 1;
    while j < bytes.len() && bytes[j] != b'$' {
        j += if bytes[j] == b'\\' { 2 } else { 1 };
    }
    if j >= bytes.len() || bytes[j - 1].is_ascii_whitespace() {
        return None;
    }
    if bytes
        .get(j + 1)
        .is_some_and(|&b| b == b'$' || b.is_ascii_digit())
    {
        return None;
    }

    Some(InlineMath {
        span: Span::new(cur.base + open, cur.base + j + 1),
        source: cur.s[open + 1..j].to_string(),
    })
}
