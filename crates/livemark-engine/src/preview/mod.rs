//! Cursor-aware decorations over a parsed document.
//!
//! ```text
//! Document ──(text change)──► TreeCache ──(every update)──► DecorationBuilder
//!                                                              │
//!                       inline set ◄── LivePreview ──► follow-up Transaction
//!                                                        (block set, atomic ranges)
//! ```

pub mod adapter;
pub mod builder;
pub mod cache;
pub mod decoration;
pub mod embed;
pub mod resolver;
pub mod widget;

pub use adapter::{Effect, LivePreview, Origin, Transaction};
pub use builder::{DecorationBuilder, Decorations};
pub use cache::{CachedKind, CachedNode, ParentSpan, TreeCache};
pub use decoration::{Decoration, DecorationKind, DecorationSet, Placement};
pub use embed::{EmbedExpander, EmbedTarget};
pub use resolver::{
    HeadingResolution, InteractionHandler, NullResolver, ResolveError, Resolution, Resolver,
};
pub use widget::{EmbedMedia, EmbedWidget, Widget};
