//! Embed expansion with a per-pass guard.
//!
//! One [`EmbedExpander`] lives for a single decoration pass. It memoises
//! resolver answers so a note embedded twice is looked up once, and it
//! keeps the chain of notes currently being expanded so an embed that
//! points back into that chain (including at the open document) renders as
//! [`EmbedMedia::Recursive`] instead of looping.
//!
//! Only lookups are memoised. Nested embeds are expanded for each embed's
//! own depth and chain, so the result for one embed never depends on which
//! sibling was expanded first.

use std::collections::HashMap;

use livemark_config::{MediaKind, PreviewConfig};
use livemark_syntax::{SyntaxKind, SyntaxNode};
use relative_path::RelativePath;

use super::resolver::Resolver;
use super::widget::{EmbedMedia, EmbedWidget};

/// The parts of an `![[target#heading#^id|alias]]` embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedTarget {
    pub target: String,
    pub heading: Option<String>,
    /// Block id without the `#^` prefix.
    pub block_ref: Option<String>,
    pub alias: Option<String>,
}

impl EmbedTarget {
    /// Read the parts from an `EMBED` node.
    pub fn from_node(node: &SyntaxNode) -> Self {
        let child_text = |kind: SyntaxKind| {
            node.children()
                .find(|c| c.kind() == kind)
                .map(|c| c.text().to_string())
        };
        let raw = child_text(SyntaxKind::EMBED_TARGET).unwrap_or_default();
        let (target, heading) = split_heading(&raw);
        let block_ref =
            child_text(SyntaxKind::EMBED_REF).map(|r| r.trim_start_matches("#^").to_string());
        let alias = child_text(SyntaxKind::WIKILINK_ALIAS).map(|a| a.trim().to_string());

        Self {
            target,
            heading,
            block_ref,
            alias,
        }
    }
}

/// Split `note#heading` at the first `#`. An empty heading counts as none.
pub fn split_heading(raw: &str) -> (String, Option<String>) {
    match raw.split_once('#') {
        Some((note, heading)) if !heading.trim().is_empty() => {
            (note.trim().to_string(), Some(heading.trim().to_string()))
        }
        Some((note, _)) => (note.trim().to_string(), None),
        None => (raw.trim().to_string(), None),
    }
}

/// Note identity used by the cycle guard: `a.md` and `a` are the same note.
fn note_key(target: &str) -> String {
    let path = RelativePath::new(target);
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("md") => path.with_extension("").into_string(),
        _ => target.to_string(),
    }
}

/// Text of the paragraph whose last line ends with `^id`, marker removed.
pub fn extract_block(content: &str, id: &str) -> Option<String> {
    let marker = format!("^{id}");
    let lines: Vec<&str> = content.lines().collect();

    let end = lines.iter().position(|line| {
        line.trim_end()
            .strip_suffix(&marker)
            .is_some_and(|before| before.is_empty() || before.ends_with(char::is_whitespace))
    })?;
    let start = lines[..end]
        .iter()
        .rposition(|line| line.trim().is_empty())
        .map_or(0, |blank| blank + 1);

    let mut block: Vec<&str> = lines[start..=end].to_vec();
    let last = block.len() - 1;
    block[last] = block[last].trim_end().trim_end_matches(&marker).trim_end();
    Some(block.join("\n"))
}

pub struct EmbedExpander<'a, R: Resolver + ?Sized> {
    resolver: &'a R,
    preview: &'a PreviewConfig,
    /// `(exists, content)` per `(note, heading, block_ref)`.
    memo: HashMap<(String, Option<String>, Option<String>), (bool, Option<String>)>,
    /// Notes being expanded, outermost first.
    stack: Vec<String>,
}

impl<'a, R: Resolver + ?Sized> EmbedExpander<'a, R> {
    /// `document` is the open note, which may never embed itself.
    pub fn new(resolver: &'a R, preview: &'a PreviewConfig, document: Option<&str>) -> Self {
        Self {
            resolver,
            preview,
            memo: HashMap::new(),
            stack: document.map(note_key).into_iter().collect(),
        }
    }

    pub fn expand(&mut self, embed: EmbedTarget) -> EmbedWidget {
        self.expand_at(embed, 0)
    }

    fn expand_at(&mut self, embed: EmbedTarget, depth: usize) -> EmbedWidget {
        let media = match self.media_kind(&embed.target) {
            MediaKind::Image => EmbedMedia::Image {
                src: self.resolver.resolve_image(&embed.target),
            },
            MediaKind::Video => EmbedMedia::Video {
                src: self.resolver.resolve_image(&embed.target),
            },
            MediaKind::Document => EmbedMedia::Document {
                src: self.resolver.resolve_image(&embed.target),
            },
            MediaKind::Note => self.note(&embed, depth),
        };

        EmbedWidget {
            target: embed.target,
            heading: embed.heading,
            block_ref: embed.block_ref,
            alias: embed.alias,
            media,
        }
    }

    fn media_kind(&self, target: &str) -> MediaKind {
        self.preview.media_kind(RelativePath::new(target).extension())
    }

    fn note(&mut self, embed: &EmbedTarget, depth: usize) -> EmbedMedia {
        let key = note_key(&embed.target);
        if key.is_empty() || self.stack.contains(&key) {
            return EmbedMedia::Recursive;
        }

        let memo_key = (key.clone(), embed.heading.clone(), embed.block_ref.clone());
        let (exists, content) = match self.memo.get(&memo_key) {
            Some(found) => found.clone(),
            None => {
                let found = self.resolve_note(embed);
                self.memo.insert(memo_key, found.clone());
                found
            }
        };

        let nested = match &content {
            Some(text) if exists && depth + 1 < self.preview.max_embed_depth => {
                self.stack.push(key);
                let nested = nested_embeds(text)
                    .into_iter()
                    .map(|inner| self.expand_at(inner, depth + 1))
                    .collect();
                self.stack.pop();
                nested
            }
            _ => vec![],
        };

        EmbedMedia::Note {
            exists,
            content,
            nested,
        }
    }

    /// Note content narrowed to the embedded block, if any.
    fn resolve_note(&self, embed: &EmbedTarget) -> (bool, Option<String>) {
        let (exists, content) = self.lookup(embed);
        let content = match (&embed.block_ref, content) {
            (Some(id), Some(text)) => extract_block(&text, id),
            (_, content) => content,
        };
        let exists = exists && (embed.block_ref.is_none() || content.is_some());
        (exists, content)
    }

    fn lookup(&self, embed: &EmbedTarget) -> (bool, Option<String>) {
        let result = match &embed.heading {
            Some(heading) => self
                .resolver
                .resolve_heading(&embed.target, heading)
                .map(|found| found.map(|r| (r.exists, r.content))),
            None => self
                .resolver
                .resolve_wikilink(&embed.target)
                .map(|found| found.map(|r| (r.exists, r.content))),
        };
        match result {
            Ok(Some(found)) => found,
            Ok(None) => (false, None),
            Err(e) => {
                log::warn!("Failed to resolve embed {}: {e}", embed.target);
                (false, None)
            }
        }
    }
}

fn nested_embeds(content: &str) -> Vec<EmbedTarget> {
    livemark_syntax::parse(content)
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::EMBED)
        .map(|n| EmbedTarget::from_node(&n))
        .collect()
}
