//! # Parser Events
//!
//! The grammar never touches rowan directly. It emits a flat list of events
//! and the [`Sink`](super::sink::Sink) replays them into a green tree:
//!
//! ```text
//! Start(STRONG)
//!   Token(EMPHASIS_MARK, 2)   ← two raw `*` tokens glued into one mark
//!   Token(TEXT, 1)
//!   Token(EMPHASIS_MARK, 2)
//! Finish
//! ```
//!
//! Gluing raw tokens is how delimiters become marks: the lexer only knows
//! `STAR`, and it is the grammar, once it has found the closing run, that
//! re-labels both runs as `EMPHASIS_MARK`.
//!

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node.
    Start { kind: SyntaxKind },

    /// Emit one tree token made of `n_raw_tokens` consecutive lexer tokens.
    Token { kind: SyntaxKind, n_raw_tokens: u32 },

    /// Close the innermost open node.
    Finish,

    /// Reserved slot for a node that was started but not yet completed.
    /// Abandoned markers leave these behind; the Sink skips them.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    /// Create a token event for a single raw token.
    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token {
            kind,
            n_raw_tokens: 1,
        }
    }

    /// Create a token event gluing `n` raw tokens into one token of `kind`.
    pub fn glued(kind: SyntaxKind, n: usize) -> Self {
        debug_assert!(n > 0 && n <= u32::MAX as usize);
        Event::Token {
            kind,
            n_raw_tokens: n as u32,
        }
    }
}
