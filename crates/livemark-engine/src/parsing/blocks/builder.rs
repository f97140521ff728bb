use livemark_config::PreviewConfig;

use crate::parsing::rope::span::Span;

use super::{
    classify::LineClass,
    kinds::{CalloutHeader, CalloutSyntax, CodeFence, FenceSig, MathFence, MathLine},
    types::{BlockConstruct, BlockKind, Callout},
};

/// Where an open block started.
#[derive(Debug, Clone, Copy)]
struct Opened {
    start: usize,
    line: usize,
}

/// Where an open block currently ends.
#[derive(Debug, Clone, Copy)]
struct LastLine {
    end: usize,
    line: usize,
}

impl LastLine {
    fn of(c: &LineClass) -> Self {
        Self {
            end: c.content_span.end,
            line: c.number,
        }
    }
}

#[derive(Debug, Clone)]
enum LeafState {
    None,
    Fence {
        sig: FenceSig,
        opened: Opened,
        last: LastLine,
        body: Vec<String>,
    },
    Math {
        opened: Opened,
        body: Vec<String>,
        /// Lines consumed so far, replayed if the block never closes.
        replay: Vec<LineClass>,
    },
    Callout {
        header: CalloutHeader,
        opened: Opened,
        last: LastLine,
        body: Vec<String>,
    },
}

/// Phase 2 of block scanning: a single forward state machine over classified
/// lines producing [`BlockConstruct`]s in document order.
pub struct BlockBuilder<'c> {
    preview: &'c PreviewConfig,
    leaf: LeafState,
    prev_quoted: bool,
    out: Vec<BlockConstruct>,
}

impl<'c> BlockBuilder<'c> {
    pub fn new(preview: &'c PreviewConfig) -> Self {
        Self {
            preview,
            leaf: LeafState::None,
            prev_quoted: false,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        self.push_line(c);
        self.prev_quoted = c.quote_depth > 0;
    }

    pub fn finish(mut self) -> Vec<BlockConstruct> {
        // Unterminated block math is not a construct: rescan its lines
        // without the opener. Each replay drops one line, so this ends.
        loop {
            match std::mem::replace(&mut self.leaf, LeafState::None) {
                LeafState::Math { replay, .. } => {
                    self.prev_quoted = false;
                    for line in &replay {
                        self.push(line);
                    }
                }
                other => {
                    self.leaf = other;
                    break;
                }
            }
        }

        // EOF flush
        self.flush_fence();
        self.flush_callout();
        self.out
    }

    fn push_line(&mut self, c: &LineClass) {
        match &mut self.leaf {
            LeafState::Fence { .. } => {
                self.consume_fence_line(c);
                return;
            }
            LeafState::Math { body, replay, .. } => {
                replay.push(c.clone());
                match MathFence::close(&c.content_text) {
                    Some(before) => {
                        if !before.is_empty() {
                            body.push(before);
                        }
                        self.close_math(c);
                    }
                    None => body.push(c.content_text.clone()),
                }
                return;
            }
            LeafState::Callout { body, last, .. } => {
                if let Some(text) = &c.quoted_text {
                    body.push(text.clone());
                    *last = LastLine::of(c);
                    return;
                }
                self.flush_callout();
            }
            LeafState::None => {}
        }

        self.try_open(c);
    }

    fn try_open(&mut self, c: &LineClass) {
        let opened = Opened {
            start: c.content_span.start,
            line: c.number,
        };

        if c.quote_depth == 0 {
            if let Some(sig) = c.fence_sig.clone() {
                self.leaf = LeafState::Fence {
                    sig,
                    opened,
                    last: LastLine::of(c),
                    body: vec![],
                };
                return;
            }

            match MathFence::open(&c.content_text) {
                Some(MathLine::Single(source)) => self.out.push(BlockConstruct {
                    span: c.content_span,
                    start_line: c.number,
                    end_line: c.number,
                    kind: BlockKind::Math { source },
                }),
                Some(MathLine::Open(first)) => {
                    self.leaf = LeafState::Math {
                        opened,
                        body: if first.is_empty() { vec![] } else { vec![first] },
                        replay: vec![],
                    }
                }
                None => {}
            }
            return;
        }

        // A callout header must open its quote
        if c.quote_depth == 1
            && !self.prev_quoted
            && let Some(header) = c.quoted_text.as_deref().and_then(CalloutSyntax::header)
        {
            self.leaf = LeafState::Callout {
                header,
                opened,
                last: LastLine::of(c),
                body: vec![],
            };
        }
    }

    fn consume_fence_line(&mut self, c: &LineClass) {
        let LeafState::Fence { sig, last, body, .. } = &mut self.leaf else {
            return;
        };

        *last = LastLine::of(c);
        if CodeFence::closes(sig, c.fence_sig.as_ref()) {
            self.flush_fence();
        } else {
            body.push(c.content_text.clone());
        }
    }

    fn close_math(&mut self, c: &LineClass) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        if let LeafState::Math { opened, body, .. } = prev {
            self.out.push(BlockConstruct {
                span: Span::new(opened.start, c.content_span.end),
                start_line: opened.line,
                end_line: c.number,
                kind: BlockKind::Math {
                    source: body.join("\n"),
                },
            });
        }
    }

    /// Emit the open fence, terminated or not.
    fn flush_fence(&mut self) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        let LeafState::Fence {
            sig,
            opened,
            last,
            body,
        } = prev
        else {
            self.leaf = prev;
            return;
        };

        let code = body.join("\n");
        let kind = match CodeFence::language(&sig.info) {
            Some(language) if self.preview.is_diagram_language(&language) => BlockKind::Diagram {
                language,
                source: code,
            },
            language => BlockKind::FencedCode { language, code },
        };

        self.out.push(BlockConstruct {
            span: Span::new(opened.start, last.end),
            start_line: opened.line,
            end_line: last.line,
            kind,
        });
    }

    fn flush_callout(&mut self) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        let LeafState::Callout {
            header,
            opened,
            last,
            body,
        } = prev
        else {
            self.leaf = prev;
            return;
        };

        self.out.push(BlockConstruct {
            span: Span::new(opened.start, last.end),
            start_line: opened.line,
            end_line: last.line,
            kind: BlockKind::Callout(Callout {
                callout_type: header.callout_type,
                title: header.title,
                body: body.join("\n"),
                folded: header.folded,
                foldable: header.foldable,
            }),
        });
    }
}
