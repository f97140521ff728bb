//! The render-surface adapter.
//!
//! Hosts drive [`LivePreview`] from their update callback. Inline
//! decorations come back synchronously. Block decorations and atomic ranges
//! from the same pass are parked and handed out as one follow-up
//! [`Transaction`] tagged [`Origin::BlockFlush`]; when the host dispatches
//! it back, the adapter recognises its own echo, stores the block state and
//! does nothing else.

use livemark_config::PreviewConfig;

use crate::editing::Document;
use crate::parsing::rope::Span;

use super::builder::{DecorationBuilder, Decorations};
use super::cache::TreeCache;
use super::decoration::DecorationSet;
use super::resolver::Resolver;

/// Who produced a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A keystroke, cursor move or any other host-side change.
    User,
    /// The adapter's own block flush.
    BlockFlush,
}

/// State carried by a block flush.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SetBlockDecorations(DecorationSet),
    SetAtomicRanges(Vec<Span>),
}

/// One update cycle as the adapter sees it. Text edits are applied to the
/// [`Document`] before the transaction reaches [`LivePreview::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Cursor byte offset after the change.
    pub cursor: usize,
    pub origin: Origin,
    pub effects: Vec<Effect>,
}

impl Transaction {
    pub fn user(cursor: usize) -> Self {
        Self {
            cursor,
            origin: Origin::User,
            effects: vec![],
        }
    }

    pub fn is_block_flush(&self) -> bool {
        self.origin == Origin::BlockFlush
    }
}

/// Live preview for one open document.
pub struct LivePreview<R: Resolver> {
    resolver: R,
    preview: PreviewConfig,
    cache: Option<TreeCache>,
    inline: DecorationSet,
    block: DecorationSet,
    atomic: Vec<Span>,
    pending: Option<Transaction>,
    refresh_trigger: u64,
    document_name: Option<String>,
    rebuilds: u64,
}

impl<R: Resolver> LivePreview<R> {
    pub fn new(resolver: R, preview: PreviewConfig) -> Self {
        Self {
            resolver,
            preview,
            cache: None,
            inline: DecorationSet::default(),
            block: DecorationSet::default(),
            atomic: vec![],
            pending: None,
            refresh_trigger: 0,
            document_name: None,
            rebuilds: 0,
        }
    }

    /// Run one update cycle and return the inline decorations.
    ///
    /// A user transaction rebuilds the cache when the document version or
    /// refresh trigger moved, decorates, and queues exactly one follow-up.
    /// A block flush only applies its effects.
    pub fn update(&mut self, doc: &Document, tx: &Transaction) -> &DecorationSet {
        if tx.is_block_flush() {
            self.apply_flush(tx);
            return &self.inline;
        }

        let cache = match self.cache.take() {
            Some(cache) if cache.is_current(doc.version(), self.refresh_trigger) => {
                log::trace!(
                    "Cursor-only pass at {} for version {}",
                    tx.cursor,
                    doc.version()
                );
                cache
            }
            stale => {
                log::debug!(
                    "Rebuilding tree cache for version {} (refresh {}), previous {:?}",
                    doc.version(),
                    self.refresh_trigger,
                    stale.map(|c| (c.version, c.refresh))
                );
                self.rebuilds += 1;
                TreeCache::build(doc, self.refresh_trigger, &self.preview)
            }
        };

        let Decorations {
            inline,
            block,
            atomic,
        } = DecorationBuilder::new(&self.resolver, &self.preview, self.document_name.as_deref())
            .build(&cache, doc, tx.cursor);
        self.cache = Some(cache);

        self.inline = inline;
        self.pending = Some(Transaction {
            cursor: tx.cursor,
            origin: Origin::BlockFlush,
            effects: vec![
                Effect::SetBlockDecorations(block),
                Effect::SetAtomicRanges(atomic),
            ],
        });
        &self.inline
    }

    /// The follow-up for the last user update, at most once.
    pub fn take_follow_up(&mut self) -> Option<Transaction> {
        self.pending.take()
    }

    fn apply_flush(&mut self, tx: &Transaction) {
        for effect in &tx.effects {
            match effect {
                Effect::SetBlockDecorations(block) => self.block = block.clone(),
                Effect::SetAtomicRanges(atomic) => self.atomic = atomic.clone(),
            }
        }
        log::debug!(
            "Flushed {} block decorations and {} atomic ranges",
            self.block.len(),
            self.atomic.len()
        );
    }

    /// Force a full rebuild on the next update when `trigger` differs from
    /// the current value, e.g. after resolver answers changed.
    pub fn set_refresh_trigger(&mut self, trigger: u64) {
        self.refresh_trigger = trigger;
    }

    pub fn refresh_trigger(&self) -> u64 {
        self.refresh_trigger
    }

    /// Name of the open note, which embeds may not expand into.
    pub fn set_document_name(&mut self, name: Option<String>) {
        self.document_name = name;
    }

    /// Replace the preview configuration. The cache is dropped because block
    /// classification depends on it.
    pub fn set_preview_config(&mut self, preview: PreviewConfig) {
        self.preview = preview;
        self.cache = None;
    }

    pub fn inline_decorations(&self) -> &DecorationSet {
        &self.inline
    }

    pub fn block_decorations(&self) -> &DecorationSet {
        &self.block
    }

    pub fn atomic_ranges(&self) -> &[Span] {
        &self.atomic
    }

    /// How many times the tree cache has been built.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::resolver::NullResolver;
    use pretty_assertions::assert_eq;

    fn preview() -> LivePreview<NullResolver> {
        LivePreview::new(NullResolver, PreviewConfig::default())
    }

    #[test]
    fn follow_up_is_tagged_and_single() {
        let doc = Document::from_text("```\ncode\n```\ntext");
        let mut lp = preview();

        lp.update(&doc, &Transaction::user(14));
        let follow_up = lp.take_follow_up().unwrap();
        assert!(follow_up.is_block_flush());
        assert_eq!(follow_up.cursor, 14);
        assert_eq!(lp.take_follow_up(), None);

        // Block state lands only once the echo comes back
        assert!(lp.block_decorations().is_empty());
        lp.update(&doc, &follow_up);
        assert_eq!(lp.atomic_ranges(), &[Span::new(0, 12)]);
        assert_eq!(lp.take_follow_up(), None);
    }

    #[test]
    fn echo_does_not_rebuild() {
        let doc = Document::from_text("# a");
        let mut lp = preview();

        lp.update(&doc, &Transaction::user(0));
        let follow_up = lp.take_follow_up().unwrap();
        lp.update(&doc, &follow_up);
        assert_eq!(lp.rebuilds(), 1);
    }

    #[test]
    fn config_change_drops_cache() {
        let doc = Document::from_text("text");
        let mut lp = preview();

        lp.update(&doc, &Transaction::user(0));
        lp.set_preview_config(PreviewConfig {
            diagram_languages: vec![],
            ..PreviewConfig::default()
        });
        lp.update(&doc, &Transaction::user(0));
        assert_eq!(lp.rebuilds(), 2);
    }
}
