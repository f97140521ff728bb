//! # Parser - Event-Based Tree Construction
//!
//! Transforms a token stream into a syntax tree using the event-based
//! architecture from rust-analyzer: grammar functions emit [`Event`]s and the
//! [`Sink`] builds the Rowan tree afterwards.
//!
//! ## Lookahead before commitment
//!
//! Markdown constructs are only real once their closing delimiter is seen.
//! Grammar rules therefore *scan* ahead with [`Parser::nth`] and
//! [`Parser::nth_text`] (which never consume anything) and only call
//! [`Parser::start`] once the whole construct is known to be present. When
//! the scan fails, the opening tokens are bumped as ordinary text, so an
//! unterminated `**bold` never yields a node or a mark.
//!
//! ## The Marker System
//!
//! `parser.start()` returns a [`Marker`] that must be completed or abandoned.
//! Dropping it on the floor panics, which catches grammar bugs early:
//!
//! ```ignore
//! let m = p.start();
//! p.glue(2, SyntaxKind::HIGHLIGHT_MARK);
//! // ...
//! m.complete(p, SyntaxKind::HIGHLIGHT);
//! ```
//!
//! ## Public API
//!
//! ```
//! use livemark_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("==hi==\n");
//! assert!(tree.descendants().any(|n| n.kind() == SyntaxKind::HIGHLIGHT));
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        let sink = Sink::new(self.tokens, self.events);
        sink.finish()
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Index of the current token in the raw token stream.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Text of the token n ahead, or `""` past the end.
    pub fn nth_text(&self, n: usize) -> &'input str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    /// Kind of the token just before the current one.
    ///
    /// Returns `NEWLINE` at the start of input so callers can treat
    /// "start of document" and "start of line" alike.
    pub fn prev(&self) -> SyntaxKind {
        match self.pos.checked_sub(1) {
            Some(i) => self.tokens[i].kind,
            None => SyntaxKind::NEWLINE,
        }
    }

    /// Evaluate `f` as if the parser stood at the absolute token index `pos`.
    pub fn lookahead<T>(&mut self, pos: usize, f: impl FnOnce(&Self) -> T) -> T {
        let saved = self.pos;
        self.pos = pos;
        let result = f(self);
        self.pos = saved;
        result
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// True when the current token ends the line (newline or end of input).
    pub fn at_line_end(&self) -> bool {
        matches!(self.current(), SyntaxKind::NEWLINE | SyntaxKind::EOF)
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume `n` raw tokens as a single token of `kind`.
    ///
    /// This is how delimiters are re-labelled as marks once a construct
    /// has been recognised.
    pub fn glue(&mut self, n: usize, kind: SyntaxKind) {
        if n > 0 && self.pos + n <= self.tokens.len() {
            self.events.push(Event::glued(kind, n));
            self.pos += n;
        }
    }

    /// Bump raw tokens until the absolute token index `end`.
    pub fn bump_to(&mut self, end: usize) {
        while self.pos < end && !self.at_end() {
            self.bump();
        }
    }

    /// Consume the rest of the current line, leaving the newline in place.
    pub fn bump_line(&mut self) {
        while !self.at_line_end() {
            self.bump();
        }
    }

    /// Number of consecutive `kind` tokens starting `n` ahead.
    pub fn run_len(&self, n: usize, kind: SyntaxKind) -> usize {
        let mut len = 0;
        while self.nth(n + len) == kind {
            len += 1;
        }
        len
    }
}

/// A marker for a node being constructed.
///
/// When you call `parser.start()`, a `Placeholder` event is pushed and you
/// get a `Marker` pointing to it. It must be completed or abandoned.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::start(kind);
        p.events.push(Event::Finish);
    }

    /// Abandon this marker without creating a node.
    ///
    /// Only removes the placeholder if it's the last event; otherwise it
    /// stays behind as an inert placeholder that the Sink ignores.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// Parse markdown source into a syntax tree.
pub fn parse(source: &str) -> SyntaxNode {
    let tokens = lex(source);
    let parser = Parser::new(&tokens);
    parser.parse()
}
