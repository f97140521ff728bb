use xi_rope::Rope;

use super::span::Span;

/// Extracts the text for a span from the rope as an owned String.
///
/// The span is clamped to the rope, so a range computed against an older
/// version yields a shorter string rather than a panic.
pub fn slice_to_string(rope: &Rope, sp: Span) -> String {
    let end = sp.end.min(rope.len());
    let start = sp.start.min(end);
    rope.slice_to_cow(start..end).into_owned()
}

/// Extracts text for a span, truncating to `max` bytes with "..." suffix if needed.
///
/// Used for the inspection output of the CLI.
pub fn preview(rope: &Rope, sp: Span, max: usize) -> String {
    let mut s = slice_to_string(rope, sp).replace('\n', "\\n");
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_text_unchanged() {
        let rope = Rope::from("hello");
        assert_eq!(preview(&rope, Span::new(0, 5), 10), "hello");
    }

    #[test]
    fn preview_truncates_long_text() {
        let rope = Rope::from("hello world");
        assert_eq!(preview(&rope, Span::new(0, 11), 5), "hello...");
    }

    #[test]
    fn preview_escapes_newlines() {
        let rope = Rope::from("a\nb");
        assert_eq!(preview(&rope, Span::new(0, 3), 10), "a\\nb");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let rope = Rope::from("café");
        assert_eq!(preview(&rope, Span::new(0, 5), 4), "caf...");
    }

    #[test]
    fn slice_to_string_partial_span() {
        let rope = Rope::from("hello world");
        assert_eq!(slice_to_string(&rope, Span::new(6, 11)), "world");
    }

    #[test]
    fn slice_to_string_clamps() {
        let rope = Rope::from("hi");
        assert_eq!(slice_to_string(&rope, Span::new(1, 40)), "i");
        assert_eq!(slice_to_string(&rope, Span::new(9, 40)), "");
    }
}
