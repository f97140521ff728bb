//! The decoration builder: projects a [`TreeCache`] onto a cursor position.

use livemark_config::PreviewConfig;

use crate::editing::Document;
use crate::parsing::blocks::{BlockConstruct, BlockKind};
use crate::parsing::rope::Span;

use super::cache::{CachedKind, CachedNode, TreeCache};
use super::decoration::{Decoration, DecorationSet};
use super::embed::EmbedExpander;
use super::resolver::Resolver;
use super::widget::Widget;

/// Output of one decoration pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decorations {
    /// Applied synchronously by the host.
    pub inline: DecorationSet,
    /// Block replacements, delivered in a follow-up transaction.
    pub block: DecorationSet,
    /// One range per block replacement.
    pub atomic: Vec<Span>,
}

pub struct DecorationBuilder<'a, R: Resolver + ?Sized> {
    resolver: &'a R,
    embeds: EmbedExpander<'a, R>,
}

impl<'a, R: Resolver + ?Sized> DecorationBuilder<'a, R> {
    /// `document` names the open note for the embed cycle guard.
    pub fn new(resolver: &'a R, preview: &'a PreviewConfig, document: Option<&str>) -> Self {
        Self {
            resolver,
            embeds: EmbedExpander::new(resolver, preview, document),
        }
    }

    /// Decorate `doc` for a cursor at byte offset `cursor`. An offset inside
    /// a multi-byte character is treated as the start of that character.
    ///
    /// # Panics
    ///
    /// If `cache` was built for a different document version. Decorating
    /// with stale offsets is a bug in the caller, never a recoverable state.
    pub fn build(mut self, cache: &TreeCache, doc: &Document, cursor: usize) -> Decorations {
        assert_eq!(
            cache.version,
            doc.version(),
            "tree cache built for version {} used with document version {}",
            cache.version,
            doc.version()
        );

        let cursor = doc.char_boundary(cursor);
        let line = doc.line_of_offset(cursor);

        let mut inline = Vec::with_capacity(cache.nodes.len() + cache.stable.len());
        for node in &cache.nodes {
            if let Some(decoration) = self.node(node, cursor, line) {
                inline.push(decoration);
            }
        }
        inline.extend(cache.stable.iter().cloned());

        let mut block = vec![];
        let mut atomic = vec![];
        for construct in cache.blocks.iter().filter(|b| !b.lines().contains(&line)) {
            block.push(Decoration::block(construct.span, block_widget(construct)));
            atomic.push(construct.span);
        }

        Decorations {
            inline: DecorationSet::new(inline),
            block: DecorationSet::new(block),
            atomic,
        }
    }

    fn node(&mut self, node: &CachedNode, cursor: usize, line: usize) -> Option<Decoration> {
        let widget = match &node.kind {
            CachedKind::HeaderMark => {
                return (node.line != line).then(|| Decoration::hide(node.span));
            }
            CachedKind::ParentMark => {
                let parent = node.parent?;
                return (!parent.span.touches(cursor)).then(|| Decoration::hide(node.span));
            }
            _ if node.span.touches(cursor) => return None,
            CachedKind::WikiLink {
                target,
                heading,
                alias,
            } => self.wikilink(target, heading.as_deref(), alias.as_deref()),
            CachedKind::Embed(embed) => Widget::Embed(self.embeds.expand(embed.clone())),
            CachedKind::Tag { tag } => Widget::Tag { tag: tag.clone() },
            CachedKind::Image { src, alt } => Widget::Image {
                src: self.resolver.resolve_image(src),
                alt: alt.clone(),
            },
            CachedKind::InlineMath { source } => Widget::Math {
                source: source.clone(),
                display: false,
            },
        };
        Some(Decoration::replace(node.span, widget))
    }

    fn wikilink(&self, target: &str, heading: Option<&str>, alias: Option<&str>) -> Widget {
        let found = match heading {
            Some(heading) => self
                .resolver
                .resolve_heading(target, heading)
                .map(|r| r.is_some_and(|r| r.exists)),
            None => self
                .resolver
                .resolve_wikilink(target)
                .map(|r| r.is_some_and(|r| r.exists)),
        };
        let exists = found.unwrap_or_else(|e| {
            log::warn!("Failed to resolve wikilink {target}: {e}");
            false
        });

        let display = match (alias, heading) {
            (Some(alias), _) => alias.to_string(),
            (None, Some(heading)) => format!("{target}#{heading}"),
            (None, None) => target.to_string(),
        };

        Widget::WikiLink {
            target: target.to_string(),
            heading: heading.map(str::to_string),
            display,
            exists,
        }
    }
}

fn block_widget(construct: &BlockConstruct) -> Widget {
    match &construct.kind {
        BlockKind::FencedCode { language, code } => Widget::Code {
            language: language.clone(),
            code: code.clone(),
        },
        BlockKind::Math { source } => Widget::Math {
            source: source.clone(),
            display: true,
        },
        BlockKind::Diagram { language, source } => Widget::Diagram {
            language: language.clone(),
            source: source.clone(),
        },
        BlockKind::Callout(callout) => Widget::Callout {
            callout_type: callout.callout_type.clone(),
            title: callout.title.clone(),
            body: callout.body.clone(),
            folded: callout.folded,
            foldable: callout.foldable,
            pos: construct.span.start,
        },
    }
}
