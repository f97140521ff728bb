use xi_rope::{Delta, Rope, RopeInfo};

use crate::parsing::rope::{slice::slice_to_string, span::Span};

/// A text change, compiled to an xi-rope `Delta` when applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    InsertText { at: usize, text: String },
    DeleteRange { range: Span },
    ReplaceRange { range: Span, text: String },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("edit range {start}..{end} is outside the document (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("edit offset {0} is not on a UTF-8 character boundary")]
    NotCharBoundary(usize),
}

/// Result of applying an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Range of the new text that was inserted (empty for deletions).
    pub changed: Span,
    pub version: u64,
}

/// The document being previewed.
///
/// The whole text lives in one `xi_rope::Rope`; every text-changing edit
/// bumps `version`, which is what the preview cache is keyed on. All
/// positions are UTF-8 byte offsets.
#[derive(Debug, Clone)]
pub struct Document {
    buffer: Rope,
    version: u64,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            version: 0,
        }
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.buffer
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Text of a span, clamped to the document.
    pub fn slice(&self, span: Span) -> String {
        slice_to_string(&self.buffer, span)
    }

    /// `offset` clamped to the document and moved back to the start of the
    /// character it falls inside.
    pub fn char_boundary(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.len());
        while !self.buffer.is_codepoint_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    /// 1-based line containing `offset`, clamped to the document.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.buffer.line_of_offset(self.char_boundary(offset)) + 1
    }

    /// Apply an edit, bumping the version.
    pub fn apply(&mut self, edit: Edit) -> Result<Patch, EditError> {
        let (range, text) = match edit {
            Edit::InsertText { at, text } => (Span::new(at, at), text),
            Edit::DeleteRange { range } => (range, String::new()),
            Edit::ReplaceRange { range, text } => (range, text),
        };
        self.check_range(range)?;

        let delta = self.compile(range, &text);
        self.buffer = delta.apply(&self.buffer);
        self.version += 1;

        Ok(Patch {
            changed: Span::new(range.start, range.start + text.len()),
            version: self.version,
        })
    }

    /// The edit that flips the task checkbox starting at `pos`.
    ///
    /// `pos` is the offset of the `[` in `[ ]`, `[x]` or `[X]`, as carried by
    /// checkbox widgets. Returns `None` when there is no checkbox there.
    pub fn toggle_task(&self, pos: usize) -> Option<Edit> {
        let state = match self.slice(Span::new(pos, pos + 3)).as_str() {
            "[ ]" => "x",
            "[x]" | "[X]" => " ",
            _ => return None,
        };
        Some(Edit::ReplaceRange {
            range: Span::new(pos + 1, pos + 2),
            text: state.to_string(),
        })
    }

    fn check_range(&self, range: Span) -> Result<(), EditError> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(EditError::OutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        for offset in [range.start, range.end] {
            if !self.buffer.is_codepoint_boundary(offset) {
                return Err(EditError::NotCharBoundary(offset));
            }
        }
        Ok(())
    }

    fn compile(&self, range: Span, text: &str) -> Delta<RopeInfo> {
        Delta::simple_edit(range.start..range.end, Rope::from(text), self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_bytes_round_trips() {
        let doc = Document::from_bytes("# Hi\r\n\ncafé".as_bytes()).unwrap();
        assert_eq!(doc.to_bytes(), "# Hi\r\n\ncafé".as_bytes());
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        assert!(Document::from_bytes(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn char_boundary_snaps_inside_multibyte() {
        let doc = Document::from_text("aé日\n");
        assert_eq!(doc.char_boundary(2), 1);
        assert_eq!(doc.char_boundary(5), 3);
        assert_eq!(doc.char_boundary(6), 6);
        assert_eq!(doc.char_boundary(99), doc.len());
        assert_eq!(doc.line_of_offset(2), 1);
    }

    #[test]
    fn edits_bump_version() {
        let mut doc = Document::from_text("hello");
        let patch = doc
            .apply(Edit::InsertText {
                at: 5,
                text: " world".to_string(),
            })
            .unwrap();
        assert_eq!(patch, Patch { changed: Span::new(5, 11), version: 1 });

        doc.apply(Edit::DeleteRange {
            range: Span::new(0, 6),
        })
        .unwrap();
        assert_eq!(doc.text(), "world");
        assert_eq!(doc.version(), 2);
    }

    #[test]
    fn invalid_edits_leave_document_untouched() {
        let mut doc = Document::from_text("é");
        assert_eq!(
            doc.apply(Edit::InsertText {
                at: 1,
                text: "x".to_string()
            }),
            Err(EditError::NotCharBoundary(1))
        );
        assert!(matches!(
            doc.apply(Edit::DeleteRange {
                range: Span::new(0, 10)
            }),
            Err(EditError::OutOfBounds { .. })
        ));
        assert_eq!(doc.version(), 0);
        assert_eq!(doc.text(), "é");
    }

    #[test]
    fn line_of_offset_is_one_based() {
        let doc = Document::from_text("# Heading\ntext");
        assert_eq!(doc.line_of_offset(0), 1);
        assert_eq!(doc.line_of_offset(9), 1);
        assert_eq!(doc.line_of_offset(10), 2);
        assert_eq!(doc.line_of_offset(999), 2);
    }

    #[test]
    fn toggle_task_round_trip() {
        let mut doc = Document::from_text("- [ ] task\n");
        let edit = doc.toggle_task(2).unwrap();
        doc.apply(edit).unwrap();
        assert_eq!(doc.text(), "- [x] task\n");

        let edit = doc.toggle_task(2).unwrap();
        doc.apply(edit).unwrap();
        assert_eq!(doc.text(), "- [ ] task\n");

        assert_eq!(doc.toggle_task(0), None);
    }
}
