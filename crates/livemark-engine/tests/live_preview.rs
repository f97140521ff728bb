//! End-to-end behaviour of the live preview, driven the way a host drives it:
//! apply edits to the document, call `update`, dispatch the follow-up.

use livemark_config::PreviewConfig;
use livemark_engine::{
    Document, Edit, EmbedMedia, HeadingResolution, InteractionHandler, LivePreview, Resolution,
    ResolveError, Resolver, Span, Transaction, Widget,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Resolves a fixed set of notes.
struct Vault(&'static [&'static str]);

impl Vault {
    fn knows(&self, note: &str) -> bool {
        self.0.iter().any(|n| *n == note)
    }
}

impl Resolver for Vault {
    fn resolve_wikilink(&self, target: &str) -> Result<Option<Resolution>, ResolveError> {
        Ok(self.knows(target).then(|| Resolution {
            exists: true,
            content: Some(format!("contents of {target}")),
        }))
    }

    fn resolve_heading(
        &self,
        note: &str,
        _heading: &str,
    ) -> Result<Option<HeadingResolution>, ResolveError> {
        Ok(self.knows(note).then(|| HeadingResolution {
            exists: true,
            content: None,
            heading_level: None,
        }))
    }
}

struct TestHost {
    doc: Document,
    preview: LivePreview<Vault>,
    follow_ups: usize,
}

impl TestHost {
    fn new(text: &str) -> Self {
        Self::with_notes(text, &["my-note"])
    }

    fn with_notes(text: &str, notes: &'static [&'static str]) -> Self {
        Self {
            doc: Document::from_text(text),
            preview: LivePreview::new(Vault(notes), PreviewConfig::default()),
            follow_ups: 0,
        }
    }

    /// One full update cycle: inline now, then dispatch the follow-up.
    fn cursor(&mut self, cursor: usize) -> &mut Self {
        self.preview.update(&self.doc, &Transaction::user(cursor));
        while let Some(follow_up) = self.preview.take_follow_up() {
            self.follow_ups += 1;
            self.preview.update(&self.doc, &follow_up);
        }
        self
    }

    fn edit(&mut self, edit: Edit, cursor: usize) -> &mut Self {
        self.doc.apply(edit).unwrap();
        self.cursor(cursor)
    }

    fn hides(&self, start: usize, end: usize) -> bool {
        self.preview.inline_decorations().hides(Span::new(start, end))
    }

    fn widget(&self, start: usize, end: usize) -> Option<&Widget> {
        self.preview
            .inline_decorations()
            .widget_at(Span::new(start, end))
    }
}

#[rstest]
#[case::at_open(0, false)]
#[case::inside(4, false)]
#[case::at_close(8, false)]
fn boundary_law_for_minimal_strong(#[case] cursor: usize, #[case] hidden: bool) {
    let mut host = TestHost::new("**bold**\nnext");
    host.cursor(cursor);
    assert_eq!(host.hides(0, 2), hidden);
    assert_eq!(host.hides(6, 8), hidden);
}

#[test]
fn strong_marks_hide_once_cursor_leaves() {
    let mut host = TestHost::new("**bold**\nnext");
    host.cursor(11);
    assert!(host.hides(0, 2));
    assert!(host.hides(6, 8));
}

#[test]
fn strong_spans_a_soft_line_break() {
    let mut host = TestHost::new("**bold\nacross** x");
    host.cursor(17);
    assert!(host.hides(0, 2));
    assert!(host.hides(13, 15));

    host.cursor(8);
    assert!(!host.hides(0, 2));
    assert!(!host.hides(13, 15));
}

#[test]
fn cursor_inside_multibyte_character_is_accepted() {
    let mut host = TestHost::new("é **a** b");
    host.cursor(1);
    assert!(host.hides(3, 5));
    assert!(host.hides(6, 8));
}

#[test]
fn nesting_law() {
    let text = "**bold *italic* bold** end";
    let mut host = TestHost::new(text);

    host.cursor(10);
    assert!(!host.hides(7, 8), "inner opener shown inside italic");
    assert!(!host.hides(14, 15), "inner closer shown inside italic");
    assert!(!host.hides(0, 2), "outer opener shown inside italic");
    assert!(!host.hides(20, 22), "outer closer shown inside italic");

    host.cursor(4);
    assert!(host.hides(7, 8));
    assert!(host.hides(14, 15));
    assert!(!host.hides(0, 2));
    assert!(!host.hides(20, 22));

    host.cursor(text.len());
    assert!(host.hides(0, 2));
    assert!(host.hides(7, 8));
}

#[test]
fn marks_toggle_by_cursor_moves_alone() {
    let mut host = TestHost::new("a ~~gone~~ and ==lit== b");
    let positions = [0, 5, 12, 18, 24, 5, 0];
    let mut seen = vec![];
    for cursor in positions {
        host.cursor(cursor);
        seen.push((host.hides(2, 4), host.hides(15, 17)));
    }
    assert_eq!(
        seen,
        vec![
            (true, true),
            (false, true),
            (true, true),
            (true, false),
            (true, true),
            (false, true),
            (true, true),
        ]
    );
    assert_eq!(host.preview.rebuilds(), 1);
}

#[test]
fn multiplicity_law() {
    let mut host = TestHost::new("[[my-note]] and [[other]]");
    host.cursor(5);
    assert_eq!(host.widget(0, 11), None);
    assert!(matches!(
        host.widget(16, 25),
        Some(Widget::WikiLink { exists: false, .. })
    ));

    host.cursor(20);
    assert!(matches!(
        host.widget(0, 11),
        Some(Widget::WikiLink { exists: true, .. })
    ));
    assert_eq!(host.widget(16, 25), None);
}

#[rstest]
#[case(0)]
#[case(6)]
#[case(8)]
#[case(13)]
fn unterminated_law(#[case] cursor: usize) {
    let mut host = TestHost::new("hello **world");
    host.cursor(cursor);
    assert!(!host.hides(6, 8));
    assert_eq!(host.preview.inline_decorations().len(), 0);
}

#[test]
fn idempotent_for_same_version_and_cursor() {
    let mut host = TestHost::new("# Title\n**a** [[my-note]] #t $x$\n```\ncode\n```\n");
    host.cursor(3);
    let first = (
        host.preview.inline_decorations().clone(),
        host.preview.block_decorations().clone(),
        host.preview.atomic_ranges().to_vec(),
    );
    host.cursor(3);
    let second = (
        host.preview.inline_decorations().clone(),
        host.preview.block_decorations().clone(),
        host.preview.atomic_ranges().to_vec(),
    );
    assert_eq!(first, second);
}

#[test]
fn scenario_heading_marker_hidden_off_line() {
    let mut host = TestHost::new("# Heading\ntext");
    host.cursor(12);
    assert!(host.hides(0, 1));
}

#[test]
fn scenario_wikilink_widget_and_raw() {
    let mut host = TestHost::new("See [[my-note]] for more");
    host.cursor(0);
    assert_eq!(
        host.widget(4, 15),
        Some(&Widget::WikiLink {
            target: "my-note".to_string(),
            heading: None,
            display: "my-note".to_string(),
            exists: true,
        })
    );

    host.cursor(10);
    assert_eq!(host.widget(4, 15), None);
    assert!(!host.hides(4, 15));
}

#[test]
fn scenario_tag_widget_and_raw() {
    let mut host = TestHost::new("#tag1 text");
    host.cursor(10);
    assert_eq!(
        host.widget(0, 5),
        Some(&Widget::Tag {
            tag: "tag1".to_string()
        })
    );

    host.cursor(2);
    assert_eq!(host.widget(0, 5), None);
}

#[test]
fn scenario_fenced_code_raw_then_block_widget() {
    let text = "intro\n```rust\nlet x = 1;\n```\noutro";
    let mut host = TestHost::new(text);

    // Cursor on the `let` line
    host.cursor(16);
    assert!(host.preview.block_decorations().is_empty());
    assert!(host.preview.atomic_ranges().is_empty());

    host.cursor(text.len());
    let code = Span::new(6, 28);
    assert_eq!(host.preview.atomic_ranges(), &[code]);
    assert_eq!(
        host.preview.block_decorations().widget_at(code),
        Some(&Widget::Code {
            language: Some("rust".to_string()),
            code: "let x = 1;".to_string(),
        })
    );
    assert_eq!(host.preview.block_decorations().len(), 1);
}

#[test]
fn scenario_aliased_wikilink() {
    let mut host = TestHost::new("[[my-note|Display Name]] x");
    host.cursor(26);
    let Some(Widget::WikiLink {
        target,
        display,
        exists,
        ..
    }) = host.widget(0, 24)
    else {
        panic!("expected a wikilink widget");
    };
    assert_eq!(target, "my-note");
    assert_eq!(display, "Display Name");
    assert!(*exists);
}

#[test]
fn one_follow_up_per_real_update() {
    let mut host = TestHost::new("text\n$$\nx\n$$\n");
    host.cursor(0);
    host.cursor(2);
    host.edit(
        Edit::InsertText {
            at: 4,
            text: "!".to_string(),
        },
        5,
    );
    assert_eq!(host.follow_ups, 3);
    assert_eq!(host.preview.take_follow_up(), None);
}

#[test]
fn rebuild_on_change_reuse_on_cursor_move() {
    let mut host = TestHost::new("**a** b");
    host.cursor(0).cursor(3).cursor(7);
    assert_eq!(host.preview.rebuilds(), 1);

    host.edit(
        Edit::InsertText {
            at: 7,
            text: "c".to_string(),
        },
        8,
    );
    assert_eq!(host.preview.rebuilds(), 2);

    host.preview.set_refresh_trigger(1);
    host.cursor(8);
    assert_eq!(host.preview.rebuilds(), 3);
    host.cursor(0);
    assert_eq!(host.preview.rebuilds(), 3);
}

#[test]
fn refresh_trigger_rebuilds_without_edit() {
    let mut host = TestHost::with_notes("[[later]] x", &[]);
    host.cursor(11);
    assert!(matches!(
        host.widget(0, 9),
        Some(Widget::WikiLink { exists: false, .. })
    ));

    host.preview.set_refresh_trigger(7);
    host.cursor(11);
    assert_eq!(host.preview.refresh_trigger(), 7);
    assert_eq!(host.preview.rebuilds(), 2);
}

#[test]
fn mixed_edit_and_cursor_uses_fresh_offsets() {
    let mut host = TestHost::new("**bold** tail");
    host.cursor(12);
    assert!(host.hides(0, 2));

    // Prepend text and move the cursor in the same transaction
    host.edit(
        Edit::InsertText {
            at: 0,
            text: "xx ".to_string(),
        },
        15,
    );
    assert!(host.hides(3, 5));
    assert!(host.hides(9, 11));
    assert!(!host.hides(0, 2));
}

#[test]
fn deleting_a_closer_unhides_the_opener() {
    let mut host = TestHost::new("**bold** x");
    host.cursor(10);
    assert!(host.hides(0, 2));

    host.edit(
        Edit::DeleteRange {
            range: Span::new(6, 8),
        },
        8,
    );
    assert!(!host.hides(0, 2));
    assert_eq!(host.preview.inline_decorations().len(), 0);
}

#[test]
fn edit_inside_block_moves_atomic_range() {
    let text = "```\na\n```\nafter\n";
    let mut host = TestHost::new(text);
    host.cursor(12);
    assert_eq!(host.preview.atomic_ranges(), &[Span::new(0, 9)]);

    host.edit(
        Edit::InsertText {
            at: 0,
            text: "line\n".to_string(),
        },
        0,
    );
    assert_eq!(host.preview.atomic_ranges(), &[Span::new(5, 14)]);
}

#[derive(Default)]
struct Toggles(Vec<(usize, bool)>);

impl InteractionHandler for Toggles {
    fn on_checkbox_toggle(&mut self, pos: usize, checked: bool) {
        self.0.push((pos, checked));
    }
}

#[test]
fn checkbox_click_round_trip() {
    let mut host = TestHost::new("- [ ] task\n");
    host.cursor(0);

    let checkbox = host.widget(2, 5).cloned().unwrap();
    let mut toggles = Toggles::default();
    checkbox.click(&mut toggles, false);
    assert_eq!(toggles.0, vec![(2, true)]);

    let edit = host.doc.toggle_task(2).unwrap();
    host.edit(edit, 0);
    assert_eq!(
        host.widget(2, 5),
        Some(&Widget::Checkbox {
            checked: true,
            pos: 2
        })
    );
}

#[test]
fn embed_of_open_document_is_recursive() {
    let mut host = TestHost::with_notes("![[self]] and ![[my-note]]", &["self", "my-note"]);
    host.preview.set_document_name(Some("self.md".to_string()));
    host.cursor(12);

    assert!(matches!(
        host.widget(0, 9),
        Some(Widget::Embed(e)) if e.media == EmbedMedia::Recursive
    ));
    assert!(matches!(
        host.widget(14, 26),
        Some(Widget::Embed(e)) if matches!(e.media, EmbedMedia::Note { exists: true, .. })
    ));
}
