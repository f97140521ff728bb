//! # livemark-syntax
//!
//! A lossless Markdown syntax tree using [Rowan] + [Logos], following the
//! [rust-analyzer] architecture model, with the note-taking extensions a
//! live preview needs: wikilinks, embeds, tags, highlights, strikethrough,
//! block references and task checkboxes.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! The lexer produces small context-free tokens. Grammar rules decide what
//! they mean and, once a construct is proven complete, glue its delimiter
//! tokens into *mark* tokens (`HEADER_MARK`, `EMPHASIS_MARK`,
//! `WIKILINK_MARK`, ...). Consumers that hide syntax walk the tree for marks
//! and never have to re-check whether a delimiter is closed.
//!
//! ## Module Structure
//!
//! ```text
//! livemark-syntax/
//! ├── lib.rs           # This file - public API and integration tests
//! ├── syntax_kind.rs   # SyntaxKind enum (raw tokens, marks, nodes)
//! ├── lexer.rs         # Logos-based tokenizer
//! └── parser/
//!     ├── mod.rs       # Parser struct, Marker system, public parse() function
//!     ├── event.rs     # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs      # Converts events to Rowan GreenNode
//!     └── grammar/
//!         ├── mod.rs   # Root document parsing
//!         ├── block.rs # Headings, quotes, list items, fences
//!         └── inline.rs# Emphasis, code spans, links and the note extensions
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use livemark_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("See [[my-note]] #idea\n");
//! assert_eq!(tree.text().to_string(), "See [[my-note]] #idea\n");
//!
//! let kinds: Vec<_> = tree.descendants().map(|n| n.kind()).collect();
//! assert!(kinds.contains(&SyntaxKind::WIKILINK));
//! assert!(kinds.contains(&SyntaxKind::TAG));
//! ```

pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use parser::parse;
pub use syntax_kind::{MarkdownLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
