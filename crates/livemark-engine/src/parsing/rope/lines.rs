use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// 1-based line number.
    pub number: usize,
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    /// The line text including its line ending.
    pub text: String,
}

impl LineRef {
    /// The line text without its `\n` or `\r\n` ending.
    pub fn content(&self) -> &str {
        self.text.trim_end_matches(['\r', '\n'])
    }

    /// Span of the line without its line ending.
    pub fn content_span(&self) -> Span {
        Span::new(self.span.start, self.span.start + self.content().len())
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` to preserve newline characters, which keeps span
/// arithmetic exact during block scanning.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(index, line)| {
        let start = offset;
        offset += line.len();
        LineRef {
            number: index + 1,
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lines_carry_numbers_and_spans() {
        let rope = Rope::from("# a\r\nb\n\nc");
        let lines: Vec<_> = lines_with_spans(&rope)
            .map(|l| (l.number, l.span, l.content().to_string()))
            .collect();

        assert_eq!(
            lines,
            vec![
                (1, Span::new(0, 5), "# a".to_string()),
                (2, Span::new(5, 7), "b".to_string()),
                (3, Span::new(7, 8), String::new()),
                (4, Span::new(8, 9), "c".to_string()),
            ]
        );
    }

    #[test]
    fn content_span_excludes_crlf() {
        let rope = Rope::from("abc\r\n");
        let line = lines_with_spans(&rope).next().unwrap();
        assert_eq!(line.content_span(), Span::new(0, 3));
    }
}
