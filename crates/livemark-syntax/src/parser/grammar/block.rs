//! Block-level grammar rules.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::inline;

/// Parse a block element.
pub fn block(p: &mut Parser<'_, '_>) {
    // Skip leading blank lines
    while p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }

    if p.at_end() {
        return;
    }

    if heading_level(p).is_some() {
        heading(p);
    } else if fence_at(p).is_some() {
        fenced_code(p);
    } else if p.at(SyntaxKind::GT) {
        blockquote(p);
    } else if is_thematic_break(p) {
        thematic_break(p);
    } else if list_marker(p).is_some() {
        list_item(p);
    } else {
        paragraph(p);
    }
}

/// Number of `#` marks when the line opens an ATX heading.
///
/// A heading needs 1-6 hashes followed by whitespace or the end of the line;
/// `#tag` at the start of a line is a tag, not a heading.
fn heading_level(p: &Parser<'_, '_>) -> Option<usize> {
    let n = p.run_len(0, SyntaxKind::HASH);
    let terminated = matches!(
        p.nth(n),
        SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
    );
    ((1..=6).contains(&n) && terminated).then_some(n)
}

/// `(indent_tokens, fence_marker, fence_len)` when the line opens a code fence.
///
/// Up to three spaces of indentation are allowed before the fence.
fn fence_at(p: &Parser<'_, '_>) -> Option<(usize, SyntaxKind, usize)> {
    let indent = usize::from(p.at(SyntaxKind::WHITESPACE) && p.nth_text(0).len() <= 3);
    let marker = p.nth(indent);
    if !matches!(marker, SyntaxKind::BACKTICK | SyntaxKind::TILDE) {
        return None;
    }
    let len = p.run_len(indent, marker);
    (len >= 3).then_some((indent, marker, len))
}

/// Check if current position is a thematic break (---, ***, etc.)
fn is_thematic_break(p: &Parser<'_, '_>) -> bool {
    let marker = p.current();
    if !matches!(marker, SyntaxKind::DASH | SyntaxKind::STAR) {
        return false;
    }

    let mut count = 0;
    let mut i = 0;
    while !matches!(p.nth(i), SyntaxKind::EOF | SyntaxKind::NEWLINE) {
        match p.nth(i) {
            k if k == marker => count += 1,
            SyntaxKind::WHITESPACE => {}
            _ => return false,
        }
        i += 1;
    }

    count >= 3
}

/// `(indent_tokens, marker_tokens)` when the line opens a list item.
///
/// Recognises `-`, `*`, `+` bullets and `1.` style ordered markers, each
/// followed by whitespace, optionally indented.
fn list_marker(p: &Parser<'_, '_>) -> Option<(usize, usize)> {
    let indent = usize::from(p.at(SyntaxKind::WHITESPACE));
    match p.nth(indent) {
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::PLUS
            if p.nth(indent + 1) == SyntaxKind::WHITESPACE =>
        {
            Some((indent, 1))
        }
        SyntaxKind::TEXT => {
            let digits = p.nth_text(indent);
            let ordered = digits.len() <= 9
                && digits.bytes().all(|b| b.is_ascii_digit())
                && p.nth(indent + 1) == SyntaxKind::PUNCT
                && p.nth_text(indent + 1) == "."
                && p.nth(indent + 2) == SyntaxKind::WHITESPACE;
            ordered.then_some((indent, 2))
        }
        _ => None,
    }
}

/// Parse an ATX heading.
fn heading(p: &mut Parser<'_, '_>) {
    let m = p.start();
    let level = heading_level(p).unwrap_or(1);

    p.glue(level, SyntaxKind::HEADER_MARK);
    p.eat(SyntaxKind::WHITESPACE);
    inline::inline_until_newline(p);
    p.eat(SyntaxKind::NEWLINE);

    m.complete(p, SyntaxKind::HEADING);
}

/// Parse a blockquote. Consecutive `>` lines belong to one quote.
fn blockquote(p: &mut Parser<'_, '_>) {
    let m = p.start();

    while p.at(SyntaxKind::GT) {
        // `>`, `> >` and `>>` all mark quote depth
        while p.at(SyntaxKind::GT) {
            p.glue(1, SyntaxKind::QUOTE_MARK);
            p.eat(SyntaxKind::WHITESPACE);
        }

        inline::inline_until_newline(p);

        if !p.eat(SyntaxKind::NEWLINE) {
            break;
        }
    }

    m.complete(p, SyntaxKind::BLOCK_QUOTE);
}

/// Parse a list item, including an optional task checkbox.
fn list_item(p: &mut Parser<'_, '_>) {
    let Some((indent, marker_len)) = list_marker(p) else {
        return paragraph(p);
    };
    let m = p.start();

    if indent > 0 {
        p.bump();
    }
    p.glue(marker_len, SyntaxKind::LIST_MARK);

    if is_task_after_marker(p) {
        p.bump(); // the single space
        let task = p.start();
        p.glue(3, SyntaxKind::TASK_MARK);
        task.complete(p, SyntaxKind::TASK);
    }
    p.eat(SyntaxKind::WHITESPACE);

    inline::inline_until_newline(p);
    p.eat(SyntaxKind::NEWLINE);

    m.complete(p, SyntaxKind::LIST_ITEM);
}

/// A checkbox is `[ ]`, `[x]` or `[X]` after exactly one space, followed by
/// whitespace or the end of the line.
fn is_task_after_marker(p: &Parser<'_, '_>) -> bool {
    if p.current() != SyntaxKind::WHITESPACE || p.nth_text(0) != " " {
        return false;
    }
    let state_ok = match p.nth(2) {
        SyntaxKind::WHITESPACE => p.nth_text(2) == " ",
        SyntaxKind::TEXT => matches!(p.nth_text(2), "x" | "X"),
        _ => false,
    };
    p.nth(1) == SyntaxKind::LBRACKET
        && state_ok
        && p.nth(3) == SyntaxKind::RBRACKET
        && matches!(
            p.nth(4),
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
        )
}

/// Parse a thematic break.
fn thematic_break(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump_line();
    p.eat(SyntaxKind::NEWLINE);
    m.complete(p, SyntaxKind::THEMATIC_BREAK);
}

/// Parse a fenced code block. An unterminated fence runs to end of input.
fn fenced_code(p: &mut Parser<'_, '_>) {
    let Some((indent, marker, fence_len)) = fence_at(p) else {
        return paragraph(p);
    };
    let m = p.start();

    if indent > 0 {
        p.bump();
    }
    p.glue(fence_len, SyntaxKind::CODE_MARK);

    let mut info_len = 0;
    while !matches!(p.nth(info_len), SyntaxKind::NEWLINE | SyntaxKind::EOF) {
        info_len += 1;
    }
    p.glue(info_len, SyntaxKind::CODE_INFO);

    if p.eat(SyntaxKind::NEWLINE) {
        while !p.at_end() {
            if let Some((close_indent, close_marker, close_len)) = fence_at(p)
                && close_marker == marker
                && close_len >= fence_len
                && closes_line(p, close_indent + close_len)
            {
                if close_indent > 0 {
                    p.bump();
                }
                p.glue(close_len, SyntaxKind::CODE_MARK);
                p.bump_line();
                p.eat(SyntaxKind::NEWLINE);
                break;
            }

            p.bump_line();
            if !p.eat(SyntaxKind::NEWLINE) {
                break;
            }
        }
    }

    m.complete(p, SyntaxKind::FENCED_CODE);
}

/// True when only whitespace follows token `n` on this line.
fn closes_line(p: &Parser<'_, '_>, n: usize) -> bool {
    let mut i = n;
    while p.nth(i) == SyntaxKind::WHITESPACE {
        i += 1;
    }
    matches!(p.nth(i), SyntaxKind::NEWLINE | SyntaxKind::EOF)
}

/// Parse a paragraph (default block).
fn paragraph(p: &mut Parser<'_, '_>) {
    let m = p.start();
    let end = paragraph_end(p);
    inline::inline_paragraph(p, end);
    p.eat(SyntaxKind::NEWLINE);
    m.complete(p, SyntaxKind::PARAGRAPH);
}

/// Absolute index of the line break (or end of input) closing the paragraph
/// that starts on the current line.
fn paragraph_end(p: &mut Parser<'_, '_>) -> usize {
    let mut n = 0;
    loop {
        while !matches!(p.nth(n), SyntaxKind::NEWLINE | SyntaxKind::EOF) {
            n += 1;
        }
        let next_line = p.pos() + n + 1;
        if p.nth(n) == SyntaxKind::EOF || !p.lookahead(next_line, continues_paragraph) {
            return p.pos() + n;
        }
        n += 1;
    }
}

/// True when the line at the parser's position continues a paragraph.
///
/// A blank line, the end of input, or a block-level construct ends it.
fn continues_paragraph(p: &Parser<'_, '_>) -> bool {
    !(p.at_end()
        || p.at(SyntaxKind::NEWLINE)
        || heading_level(p).is_some()
        || fence_at(p).is_some()
        || p.at(SyntaxKind::GT)
        || list_marker(p).is_some())
}
