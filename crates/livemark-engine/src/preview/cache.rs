//! The tree/cursor cache.
//!
//! Built once per document version by walking the syntax tree a single
//! time. It records every node whose decoration depends on the cursor,
//! together with the span that gates it, plus the decorations that never
//! depend on the cursor. A cursor move then only replays this list.

use livemark_config::PreviewConfig;
use livemark_syntax::{SyntaxKind, SyntaxNode, SyntaxToken};

use crate::editing::Document;
use crate::parsing::{ParsedDoc, blocks::BlockConstruct, inline::InlineMath, parse_document};
use crate::parsing::rope::Span;

use super::decoration::{Decoration, HEADING_CLASSES};
use super::embed::{EmbedTarget, split_heading};
use super::widget::Widget;

/// The container a parent-scoped mark belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentSpan {
    pub name: SyntaxKind,
    pub span: Span,
}

/// What a cached node turns into, and the data needed to build it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedKind {
    /// Shown only while the cursor is on the heading's line.
    HeaderMark,
    /// Shown only while the cursor touches the parent span.
    ParentMark,
    WikiLink {
        target: String,
        heading: Option<String>,
        alias: Option<String>,
    },
    Embed(EmbedTarget),
    Tag {
        tag: String,
    },
    Image {
        src: String,
        alt: String,
    },
    InlineMath {
        source: String,
    },
}

/// A cursor-sensitive node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedNode {
    pub name: SyntaxKind,
    pub span: Span,
    /// 1-based line of `span.start`.
    pub line: usize,
    pub parent: Option<ParentSpan>,
    pub kind: CachedKind,
}

/// Everything the decoration builder needs for one document version.
#[derive(Debug, Clone)]
pub struct TreeCache {
    pub version: u64,
    pub refresh: u64,
    pub nodes: Vec<CachedNode>,
    pub stable: Vec<Decoration>,
    pub blocks: Vec<BlockConstruct>,
}

impl TreeCache {
    pub fn build(doc: &Document, refresh: u64, preview: &PreviewConfig) -> Self {
        let parsed = parse_document(doc.rope(), preview);
        let mut walker = Walker {
            doc,
            nodes: vec![],
            stable: vec![],
            code_spans: vec![],
        };
        walker.walk(&parsed.tree);
        let Walker {
            mut nodes,
            mut stable,
            code_spans,
            ..
        } = walker;

        let ParsedDoc {
            blocks,
            inline_math,
            ..
        } = parsed;

        // Code spans and widget nodes win over math that overlaps them
        let raw: Vec<Span> = nodes
            .iter()
            .filter(|n| !matches!(n.kind, CachedKind::HeaderMark | CachedKind::ParentMark))
            .map(|n| n.span)
            .chain(code_spans)
            .collect();
        let math: Vec<InlineMath> = inline_math
            .into_iter()
            .filter(|m| !raw.iter().any(|s| s.overlaps(m.span)))
            .collect();

        // Math is opaque: drop anything that reaches into it from outside
        let crosses_math = |span: Span| math.iter().any(|m| span.crosses(m.span));
        nodes.retain(|n| {
            !crosses_math(n.span) && !n.parent.is_some_and(|p| crosses_math(p.span))
        });
        stable.retain(|d| !crosses_math(d.span));

        nodes.extend(math.into_iter().map(|InlineMath { span, source }| CachedNode {
            name: SyntaxKind::TEXT,
            span,
            line: doc.line_of_offset(span.start),
            parent: None,
            kind: CachedKind::InlineMath { source },
        }));

        Self {
            version: doc.version(),
            refresh,
            nodes,
            stable,
            blocks,
        }
    }

    /// Whether this cache was built for exactly this version and refresh.
    pub fn is_current(&self, version: u64, refresh: u64) -> bool {
        self.version == version && self.refresh == refresh
    }
}

struct Walker<'d> {
    doc: &'d Document,
    nodes: Vec<CachedNode>,
    stable: Vec<Decoration>,
    code_spans: Vec<Span>,
}

impl Walker<'_> {
    fn walk(&mut self, root: &SyntaxNode) {
        for element in root.descendants_with_tokens() {
            if let Some(token) = element.as_token() {
                self.token(token);
            } else if let Some(node) = element.as_node() {
                self.node(node);
            }
        }
    }

    fn push(&mut self, name: SyntaxKind, span: Span, parent: Option<ParentSpan>, kind: CachedKind) {
        self.nodes.push(CachedNode {
            name,
            span,
            line: self.doc.line_of_offset(span.start),
            parent,
            kind,
        });
    }

    fn token(&mut self, token: &SyntaxToken) {
        let Some(parent) = token.parent() else {
            return;
        };
        let span = Span::of_token(token);
        let scope = ParentSpan {
            name: parent.kind(),
            span: Span::of_node(&parent),
        };

        match (token.kind(), parent.kind()) {
            (SyntaxKind::HEADER_MARK, _) => {
                self.push(token.kind(), span, Some(scope), CachedKind::HeaderMark)
            }
            (SyntaxKind::CODE_MARK, SyntaxKind::CODE_SPAN)
            | (SyntaxKind::EMPHASIS_MARK, _)
            | (SyntaxKind::STRIKETHROUGH_MARK, _)
            | (SyntaxKind::HIGHLIGHT_MARK, _)
            | (SyntaxKind::LINK_MARK, SyntaxKind::LINK) => {
                self.push(token.kind(), span, Some(scope), CachedKind::ParentMark)
            }
            // The URL of an autolink stays visible; only `<` and `>` hide.
            (SyntaxKind::LINK_MARK, SyntaxKind::AUTOLINK) => {
                self.push(token.kind(), span, Some(scope), CachedKind::ParentMark)
            }
            _ => {}
        }
    }

    fn node(&mut self, node: &SyntaxNode) {
        let span = Span::of_node(node);
        match node.kind() {
            SyntaxKind::HEADING => {
                let level = node
                    .children_with_tokens()
                    .filter_map(|e| e.into_token())
                    .find(|t| t.kind() == SyntaxKind::HEADER_MARK)
                    .map_or(1, |mark| mark.text().len());
                let class = HEADING_CLASSES[level.clamp(1, 6) - 1];
                self.stable.push(Decoration::mark(without_newline(node), class));
            }
            SyntaxKind::STRONG => self.stable.push(Decoration::mark(span, "lm-strong")),
            SyntaxKind::EMPHASIS => self.stable.push(Decoration::mark(span, "lm-em")),
            SyntaxKind::CODE_SPAN => {
                self.code_spans.push(span);
                self.stable.push(Decoration::mark(span, "lm-code"));
            }
            SyntaxKind::STRIKETHROUGH => {
                self.stable.push(Decoration::mark(span, "lm-strikethrough"))
            }
            SyntaxKind::HIGHLIGHT => self.stable.push(Decoration::mark(span, "lm-highlight")),
            SyntaxKind::LINK | SyntaxKind::AUTOLINK => {
                self.stable.push(Decoration::mark(span, "lm-link"))
            }
            SyntaxKind::BLOCK_REF => self.stable.push(Decoration::mark(span, "lm-block-ref")),
            SyntaxKind::URL => {
                if let Some(parent) = node.parent().filter(|p| p.kind() == SyntaxKind::LINK) {
                    let scope = ParentSpan {
                        name: parent.kind(),
                        span: Span::of_node(&parent),
                    };
                    self.push(node.kind(), span, Some(scope), CachedKind::ParentMark);
                }
            }
            SyntaxKind::TASK => {
                let checked = matches!(node.text().to_string().chars().nth(1), Some('x' | 'X'));
                self.stable.push(Decoration::replace(
                    span,
                    Widget::Checkbox {
                        checked,
                        pos: span.start,
                    },
                ));
            }
            SyntaxKind::WIKILINK => {
                self.stable.push(Decoration::mark(span, "lm-wikilink"));
                let target = child_text(node, SyntaxKind::WIKILINK_TARGET).unwrap_or_default();
                let (target, heading) = split_heading(&target);
                let alias = child_text(node, SyntaxKind::WIKILINK_ALIAS)
                    .map(|a| a.trim().to_string())
                    .filter(|a| !a.is_empty());
                self.push(
                    node.kind(),
                    span,
                    None,
                    CachedKind::WikiLink {
                        target,
                        heading,
                        alias,
                    },
                );
            }
            SyntaxKind::EMBED => {
                self.push(node.kind(), span, None, CachedKind::Embed(EmbedTarget::from_node(node)))
            }
            SyntaxKind::TAG => {
                self.stable.push(Decoration::mark(span, "lm-tag"));
                let tag = node.text().to_string().trim_start_matches('#').to_string();
                self.push(node.kind(), span, None, CachedKind::Tag { tag });
            }
            SyntaxKind::IMAGE => {
                if let Some(src) = child_text(node, SyntaxKind::URL) {
                    let alt = image_alt(node);
                    self.push(node.kind(), span, None, CachedKind::Image { src, alt });
                }
            }
            _ => {}
        }
    }
}

fn child_text(node: &SyntaxNode, kind: SyntaxKind) -> Option<String> {
    node.children()
        .find(|c| c.kind() == kind)
        .map(|c| c.text().to_string())
}

/// Raw text between `![` and `]`.
fn image_alt(node: &SyntaxNode) -> String {
    node.children_with_tokens()
        .skip(1)
        .take_while(|e| e.kind() != SyntaxKind::LINK_MARK)
        .filter_map(|e| e.into_token())
        .map(|t| t.text().to_string())
        .collect()
}

fn without_newline(node: &SyntaxNode) -> Span {
    let span = Span::of_node(node);
    let text = node.text().to_string();
    let trimmed = text.trim_end_matches(['\r', '\n']).len();
    Span::new(span.start, span.start + trimmed)
}
