//! # Lexer - Tokenizing Markdown Source
//!
//! This module provides the first stage of parsing: breaking source text into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token. We never skip or
//! discard characters, which is what makes round-tripping possible:
//!
//! ```
//! use livemark_syntax::lexer::lex;
//!
//! let input = "# Hello, [[world]] #tag\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Tokens are minimal and context-free. The lexer doesn't know whether `#`
//! opens a heading or a tag, or whether `=` is half of a highlight delimiter;
//! that's the grammar's job.
//!
//! Characters that can delimit or terminate a construct get their own token,
//! and `TEXT` runs stop at all of them. This matters for the note extensions:
//! a tag body is only alphanumerics, `/`, `-` and `_`, so `#idea,` must lex as
//! `HASH TEXT("idea") PUNCT(",")` for the grammar to find the end of the tag.
//! Everything else is grouped into runs (`"Hello"` is one TEXT token).
//!
//! ## Public API
//!
//! - [`lex`] - Tokenize input, returning `Vec<Token>`
//! - [`lex_with_spans`] - Tokenize with byte offset spans
//! - [`Token`] - A token with its kind and text slice

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding raw `SyntaxKind` token.
///
/// [`SyntaxKind`]: crate::syntax_kind::SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    #[token(">")]
    Gt,

    #[token("<")]
    Lt,

    #[token("-")]
    Dash,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("_")]
    Underscore,

    #[token("`")]
    Backtick,

    #[token("~")]
    Tilde,

    #[token("=")]
    Eq,

    #[token("^")]
    Caret,

    #[token("!")]
    Bang,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("|")]
    Pipe,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("#")]
    Hash,

    #[token("/")]
    Slash,

    /// Punctuation that terminates text runs but carries no syntax of its own
    #[regex(r#"[.,;:?'"@&%\\{}]"#)]
    Punct,

    /// Plain text - anything not matched by other rules
    #[regex(r#"[^\s\[\]()<>`*+#|~=\^!_/.,;:?'"@&%\\{}-]+"#)]
    Text,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::Dash => SyntaxKind::DASH,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Underscore => SyntaxKind::UNDERSCORE,
            TokenKind::Backtick => SyntaxKind::BACKTICK,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::Caret => SyntaxKind::CARET,
            TokenKind::Bang => SyntaxKind::BANG,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::LParen => SyntaxKind::LPAREN,
            TokenKind::RParen => SyntaxKind::RPAREN,
            TokenKind::Hash => SyntaxKind::HASH,
            TokenKind::Slash => SyntaxKind::SLASH,
            TokenKind::Punct => SyntaxKind::PUNCT,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input).into_iter().map(|(t, _)| t).collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            // Unrecognized character (e.g. non-ASCII whitespace) - treat as TEXT
            Err(()) => SyntaxKind::TEXT,
        };
        tokens.push((Token { kind, text }, span));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: SyntaxKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn lex_plain_text() {
        let tokens = lex("hello");
        assert_eq!(tokens, vec![token(SyntaxKind::TEXT, "hello")]);
    }

    #[test]
    fn lex_newline_crlf() {
        let tokens = lex("\r\n");
        assert_eq!(tokens, vec![token(SyntaxKind::NEWLINE, "\r\n")]);
    }

    #[test]
    fn lex_heading_markers() {
        let tokens = lex("## ");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::HASH, "#"),
                token(SyntaxKind::HASH, "#"),
                token(SyntaxKind::WHITESPACE, " "),
            ]
        );
    }

    #[test]
    fn lex_wikilink_with_alias() {
        let tokens = lex("[[page|alias]]");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::LBRACKET, "["),
                token(SyntaxKind::LBRACKET, "["),
                token(SyntaxKind::TEXT, "page"),
                token(SyntaxKind::PIPE, "|"),
                token(SyntaxKind::TEXT, "alias"),
                token(SyntaxKind::RBRACKET, "]"),
                token(SyntaxKind::RBRACKET, "]"),
            ]
        );
    }

    #[test]
    fn lex_embed_with_block_ref() {
        let tokens = lex("![[note#^abc]]");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::BANG, "!"),
                token(SyntaxKind::LBRACKET, "["),
                token(SyntaxKind::LBRACKET, "["),
                token(SyntaxKind::TEXT, "note"),
                token(SyntaxKind::HASH, "#"),
                token(SyntaxKind::CARET, "^"),
                token(SyntaxKind::TEXT, "abc"),
                token(SyntaxKind::RBRACKET, "]"),
                token(SyntaxKind::RBRACKET, "]"),
            ]
        );
    }

    #[test]
    fn lex_tag_stops_at_punctuation() {
        let tokens = lex("#idea/sub-topic,");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::HASH, "#"),
                token(SyntaxKind::TEXT, "idea"),
                token(SyntaxKind::SLASH, "/"),
                token(SyntaxKind::TEXT, "sub"),
                token(SyntaxKind::DASH, "-"),
                token(SyntaxKind::TEXT, "topic"),
                token(SyntaxKind::PUNCT, ","),
            ]
        );
    }

    #[test]
    fn lex_highlight_delimiters() {
        let tokens = lex("==hi==");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::EQ, "="),
                token(SyntaxKind::EQ, "="),
                token(SyntaxKind::TEXT, "hi"),
                token(SyntaxKind::EQ, "="),
                token(SyntaxKind::EQ, "="),
            ]
        );
    }

    #[test]
    fn lex_task_marker() {
        let tokens = lex("- [x] done");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::DASH, "-"),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::LBRACKET, "["),
                token(SyntaxKind::TEXT, "x"),
                token(SyntaxKind::RBRACKET, "]"),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::TEXT, "done"),
            ]
        );
    }

    #[test]
    fn lex_dollar_stays_in_text() {
        let tokens = lex("$x$");
        assert_eq!(tokens, vec![token(SyntaxKind::TEXT, "$x$")]);
    }

    #[test]
    fn all_bytes_preserved_complex() {
        let input = "## Heading\n\n> [!note]- A *quote* with [[link|alias]] ==hl==\n\n- [ ] task ^block-1\n  - Nested #tag/sub\n\n```rust\ncode\n```\nnon-ascii: café ☃";
        let tokens = lex(input);
        let reconstructed: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }

    #[test]
    fn spans_are_correct() {
        let input = "hello [[world]] ~~gone~~";
        let tokens = lex_with_spans(input);
        for (token, span) in &tokens {
            assert_eq!(token.text, &input[span.clone()]);
        }
    }
}
