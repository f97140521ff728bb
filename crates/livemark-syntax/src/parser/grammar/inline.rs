//! Inline grammar rules.
//!
//! Every construct scans ahead for its closing delimiter before it opens a
//! node. Failed scans fall through to [`inline_element`], which bumps the
//! opening token (or the whole delimiter run) as plain text.
//!
//! Nested content is parsed with an absolute upper bound, the token index of
//! the enclosing construct's closing delimiter, so inner constructs can never
//! swallow their parent's closer. The outermost bound is the end of the line
//! for headings, quotes and list items, and the end of the paragraph for
//! paragraphs, where emphasis and code spans may cross soft line breaks.
//! Wikilinks, embeds, link destinations and autolinks stay on one line.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse inline content until end of line.
pub fn inline_until_newline(p: &mut Parser<'_, '_>) {
    let mut n = 0;
    while !matches!(p.nth(n), SyntaxKind::NEWLINE | SyntaxKind::EOF) {
        n += 1;
    }
    inline_run(p, p.pos() + n);
}

/// Parse the inline content of a paragraph up to the absolute token index
/// `end`, the line break that closes it.
pub fn inline_paragraph(p: &mut Parser<'_, '_>, end: usize) {
    inline_run(p, end);
}

/// Parse inline content until the absolute token index `end`.
fn inline_run(p: &mut Parser<'_, '_>, end: usize) {
    while p.pos() < end && !p.at_end() {
        if p.at(SyntaxKind::NEWLINE) {
            p.bump();
        } else {
            inline_element(p, end);
        }
    }
}

fn inline_element(p: &mut Parser<'_, '_>, end: usize) {
    let kind = p.current();
    let parsed = match kind {
        SyntaxKind::BACKTICK => code_span(p, end),
        SyntaxKind::BANG => embed(p, end) || image(p, end),
        SyntaxKind::LBRACKET => wikilink(p, end) || link(p, end),
        SyntaxKind::HASH => tag(p, end),
        SyntaxKind::EQ => paired(p, end, PairedKinds::HIGHLIGHT),
        SyntaxKind::TILDE => paired(p, end, PairedKinds::STRIKETHROUGH),
        SyntaxKind::STAR | SyntaxKind::UNDERSCORE => emphasis(p, end),
        SyntaxKind::CARET => block_ref(p, end),
        SyntaxKind::LT => autolink(p, end),
        _ => false,
    };

    if !parsed {
        // A failed delimiter run is text as a whole; its tail must not be
        // retried as a fresh opener.
        let run = match kind {
            SyntaxKind::BACKTICK
            | SyntaxKind::STAR
            | SyntaxKind::UNDERSCORE
            | SyntaxKind::EQ
            | SyntaxKind::TILDE => p.run_len(0, kind),
            _ => 1,
        };
        let stop = p.pos().saturating_add(run.max(1)).min(end);
        p.bump_to(stop);
    }
}

/// Relative index of the first token at or after `from` matching `pred`,
/// before the absolute bound `end`.
fn find(
    p: &Parser<'_, '_>,
    from: usize,
    end: usize,
    pred: impl Fn(SyntaxKind) -> bool,
) -> Option<usize> {
    let mut i = from;
    loop {
        if p.pos().saturating_add(i) >= end {
            return None;
        }
        let kind = p.nth(i);
        if kind == SyntaxKind::EOF {
            return None;
        }
        if pred(kind) {
            return Some(i);
        }
        i += 1;
    }
}

/// True when `n` tokens starting at relative index `i` fit under `end`.
fn fits(p: &Parser<'_, '_>, i: usize, n: usize, end: usize) -> bool {
    p.pos().saturating_add(i + n) <= end
}

/// Code span: a backtick run closed by a run of the same length.
fn code_span(p: &mut Parser<'_, '_>, end: usize) -> bool {
    let open = p.run_len(0, SyntaxKind::BACKTICK);
    let mut i = open;
    let close = loop {
        let Some(j) = find(p, i, end, |k| k == SyntaxKind::BACKTICK) else {
            return false;
        };
        let run = p.run_len(j, SyntaxKind::BACKTICK);
        if run == open && fits(p, j, run, end) {
            break j;
        }
        i = j + run;
    };
    if close == open {
        return false;
    }

    let base = p.pos();
    let m = p.start();
    p.glue(open, SyntaxKind::CODE_MARK);
    p.bump_to(base + close);
    p.glue(open, SyntaxKind::CODE_MARK);
    m.complete(p, SyntaxKind::CODE_SPAN);
    true
}

/// Embed: `![[target]]`, `![[target#^id]]`, `![[target|alias]]`.
fn embed(p: &mut Parser<'_, '_>, end: usize) -> bool {
    p.nth(1) == SyntaxKind::LBRACKET
        && p.nth(2) == SyntaxKind::LBRACKET
        && double_bracket(p, end, 3, SyntaxKind::EMBED_MARK, SyntaxKind::EMBED)
}

/// Wikilink: `[[target]]` or `[[target|alias]]`.
fn wikilink(p: &mut Parser<'_, '_>, end: usize) -> bool {
    p.nth(1) == SyntaxKind::LBRACKET
        && double_bracket(p, end, 2, SyntaxKind::WIKILINK_MARK, SyntaxKind::WIKILINK)
}

/// Shared body of wikilinks and embeds once the `open` bracket tokens are known.
fn double_bracket(
    p: &mut Parser<'_, '_>,
    end: usize,
    open: usize,
    mark: SyntaxKind,
    node: SyntaxKind,
) -> bool {
    let Some(close) = find(p, open, end, |k| {
        matches!(
            k,
            SyntaxKind::LBRACKET | SyntaxKind::RBRACKET | SyntaxKind::NEWLINE
        )
    }) else {
        return false;
    };
    if p.nth(close) != SyntaxKind::RBRACKET
        || p.nth(close + 1) != SyntaxKind::RBRACKET
        || !fits(p, close, 2, end)
    {
        return false;
    }

    let pipe = (open..close).find(|&i| p.nth(i) == SyntaxKind::PIPE);
    let target_end = pipe.unwrap_or(close);
    if (open..target_end).all(|i| p.nth(i).is_trivia()) {
        return false;
    }

    let base = p.pos();
    let m = p.start();
    p.glue(open, mark);

    if node == SyntaxKind::EMBED {
        embed_target(p, base, open, target_end);
    } else {
        let target = p.start();
        p.bump_to(base + target_end);
        target.complete(p, SyntaxKind::WIKILINK_TARGET);
    }

    if pipe.is_some() {
        p.glue(1, mark);
        if p.pos() < base + close {
            let alias = p.start();
            p.bump_to(base + close);
            alias.complete(p, SyntaxKind::WIKILINK_ALIAS);
        }
    }

    p.glue(2, mark);
    m.complete(p, node);
    true
}

/// Split an embed target into the note part and an optional `#^id` suffix.
fn embed_target(p: &mut Parser<'_, '_>, base: usize, from: usize, to: usize) {
    let block_ref = (from..to).find(|&k| {
        p.nth(k) == SyntaxKind::HASH
            && p.nth(k + 1) == SyntaxKind::CARET
            && k + 2 < to
            && (k + 2..to).all(|i| matches!(p.nth(i), SyntaxKind::TEXT | SyntaxKind::DASH))
    });
    let note_end = block_ref.unwrap_or(to);

    if note_end > from {
        let target = p.start();
        p.bump_to(base + note_end);
        target.complete(p, SyntaxKind::EMBED_TARGET);
    }
    if block_ref.is_some() {
        let reference = p.start();
        p.bump_to(base + to);
        reference.complete(p, SyntaxKind::EMBED_REF);
    }
}

/// Scan `[...](...)` starting `open` tokens ahead of `[`.
///
/// Returns the relative indices of `]` and `)`. Destinations may not contain
/// whitespace; link titles are not recognised.
fn scan_link_tail(p: &Parser<'_, '_>, from: usize, end: usize) -> Option<(usize, usize)> {
    let close = find(p, from, end, |k| k == SyntaxKind::RBRACKET)?;
    if p.nth(close + 1) != SyntaxKind::LPAREN {
        return None;
    }
    let paren = find(p, close + 2, end, |k| {
        matches!(k, SyntaxKind::RPAREN) || k.is_trivia()
    })?;
    (p.nth(paren) == SyntaxKind::RPAREN).then_some((close, paren))
}

/// Emit `](`, the URL node if any, and `)`.
fn link_destination(p: &mut Parser<'_, '_>, base: usize, close: usize, paren: usize) {
    p.glue(1, SyntaxKind::LINK_MARK);
    p.glue(1, SyntaxKind::LINK_MARK);
    if paren > close + 2 {
        let url = p.start();
        p.bump_to(base + paren);
        url.complete(p, SyntaxKind::URL);
    }
    p.glue(1, SyntaxKind::LINK_MARK);
}

/// Standard link `[text](url)`. Link text is parsed as inline content.
fn link(p: &mut Parser<'_, '_>, end: usize) -> bool {
    let Some((close, paren)) = scan_link_tail(p, 1, end) else {
        return false;
    };

    let base = p.pos();
    let m = p.start();
    p.glue(1, SyntaxKind::LINK_MARK);
    inline_run(p, base + close);
    link_destination(p, base, close, paren);
    m.complete(p, SyntaxKind::LINK);
    true
}

/// Image `![alt](url)`. Alt text is kept raw.
fn image(p: &mut Parser<'_, '_>, end: usize) -> bool {
    if p.nth(1) != SyntaxKind::LBRACKET {
        return false;
    }
    let Some((close, paren)) = scan_link_tail(p, 2, end) else {
        return false;
    };

    let base = p.pos();
    let m = p.start();
    p.glue(2, SyntaxKind::LINK_MARK);
    p.bump_to(base + close);
    link_destination(p, base, close, paren);
    m.complete(p, SyntaxKind::IMAGE);
    true
}

/// Autolink `<scheme:rest>` with no whitespace inside.
fn autolink(p: &mut Parser<'_, '_>, end: usize) -> bool {
    let Some(close) = find(p, 1, end, |k| {
        matches!(k, SyntaxKind::GT | SyntaxKind::LT) || k.is_trivia()
    }) else {
        return false;
    };
    let has_scheme = (1..close).any(|i| p.nth(i) == SyntaxKind::PUNCT && p.nth_text(i) == ":");
    if p.nth(close) != SyntaxKind::GT || p.nth(1) != SyntaxKind::TEXT || !has_scheme {
        return false;
    }

    let base = p.pos();
    let m = p.start();
    p.glue(1, SyntaxKind::LINK_MARK);
    let url = p.start();
    p.bump_to(base + close);
    url.complete(p, SyntaxKind::URL);
    p.glue(1, SyntaxKind::LINK_MARK);
    m.complete(p, SyntaxKind::AUTOLINK);
    true
}

/// Tag `#name`: preceded by whitespace or line start, body of alphanumerics,
/// `/`, `-` and `_`, starting with an alphanumeric.
fn tag(p: &mut Parser<'_, '_>, end: usize) -> bool {
    if !matches!(p.prev(), SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE) {
        return false;
    }
    let alnum = |text: &str| !text.is_empty() && text.chars().all(char::is_alphanumeric);

    let mut i = 1;
    while fits(p, i, 1, end) {
        match p.nth(i) {
            SyntaxKind::TEXT if alnum(p.nth_text(i)) => i += 1,
            SyntaxKind::DASH | SyntaxKind::UNDERSCORE | SyntaxKind::SLASH if i > 1 => i += 1,
            _ => break,
        }
    }
    if i == 1 {
        return false;
    }

    let base = p.pos();
    let m = p.start();
    p.glue(1, SyntaxKind::TAG_MARK);
    p.bump_to(base + i);
    m.complete(p, SyntaxKind::TAG);
    true
}

/// Block reference `^id`, followed by whitespace or the end of the line.
fn block_ref(p: &mut Parser<'_, '_>, end: usize) -> bool {
    let mut i = 1;
    while fits(p, i, 1, end) {
        match p.nth(i) {
            SyntaxKind::TEXT if p.nth_text(i).chars().all(char::is_alphanumeric) => i += 1,
            SyntaxKind::DASH => i += 1,
            _ => break,
        }
    }
    let terminated = matches!(
        p.nth(i),
        SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
    );
    if i == 1 || !terminated {
        return false;
    }

    let base = p.pos();
    let m = p.start();
    p.glue(1, SyntaxKind::BLOCK_REF_MARK);
    p.bump_to(base + i);
    m.complete(p, SyntaxKind::BLOCK_REF);
    true
}

/// Delimiter token, mark and node of a `==`/`~~` style pair.
struct PairedKinds {
    delimiter: SyntaxKind,
    mark: SyntaxKind,
    node: SyntaxKind,
}

impl PairedKinds {
    const HIGHLIGHT: Self = Self {
        delimiter: SyntaxKind::EQ,
        mark: SyntaxKind::HIGHLIGHT_MARK,
        node: SyntaxKind::HIGHLIGHT,
    };
    const STRIKETHROUGH: Self = Self {
        delimiter: SyntaxKind::TILDE,
        mark: SyntaxKind::STRIKETHROUGH_MARK,
        node: SyntaxKind::STRIKETHROUGH,
    };
}

/// Highlight `==text==` and strikethrough `~~text~~`.
///
/// Content must be non-empty, must not start with whitespace, and the closing
/// pair must not follow whitespace.
fn paired(p: &mut Parser<'_, '_>, end: usize, kinds: PairedKinds) -> bool {
    let d = kinds.delimiter;
    if p.run_len(0, d) != 2 || p.nth(2).is_trivia() || p.nth(2) == SyntaxKind::EOF {
        return false;
    }

    let mut i = 2;
    let close = loop {
        let Some(j) = find(p, i, end, |k| k == d) else {
            return false;
        };
        let run = p.run_len(j, d);
        if run == 2 && !p.nth(j - 1).is_trivia() && fits(p, j, 2, end) {
            break j;
        }
        i = j + run;
    };

    let base = p.pos();
    let m = p.start();
    p.glue(2, kinds.mark);
    inline_run(p, base + close);
    p.glue(2, kinds.mark);
    m.complete(p, kinds.node);
    true
}

/// Emphasis `*x*`/`_x_` and strong `**x**`/`__x__`.
///
/// The opener must be followed by non-whitespace and the closer must be a
/// run of the same length not preceded by whitespace. Underscores do not
/// open or close inside a word.
fn emphasis(p: &mut Parser<'_, '_>, end: usize) -> bool {
    let d = p.current();
    let n = p.run_len(0, d);
    if n > 2 || p.nth(n).is_trivia() || p.nth(n) == SyntaxKind::EOF {
        return false;
    }
    let underscore = d == SyntaxKind::UNDERSCORE;
    if underscore && p.prev() == SyntaxKind::TEXT {
        return false;
    }

    let mut i = n;
    let close = loop {
        let Some(j) = find(p, i, end, |k| k == d) else {
            return false;
        };
        let run = p.run_len(j, d);
        let closes = run == n
            && !p.nth(j - 1).is_trivia()
            && fits(p, j, n, end)
            && !(underscore && p.nth(j + n) == SyntaxKind::TEXT);
        if closes {
            break j;
        }
        i = j + run;
    };

    let base = p.pos();
    let m = p.start();
    p.glue(n, SyntaxKind::EMPHASIS_MARK);
    inline_run(p, base + close);
    p.glue(n, SyntaxKind::EMPHASIS_MARK);
    m.complete(
        p,
        if n == 2 {
            SyntaxKind::STRONG
        } else {
            SyntaxKind::EMPHASIS
        },
    );
    true
}
