/// How a line relates to `$$` block math.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathLine {
    /// `$$source$$` on a single line.
    Single(String),
    /// `$$` opening a multi-line block, with any source after it.
    Open(String),
}

pub struct MathFence;

impl MathFence {
    pub const DELIMITER: &'static str = "$$";

    /// Recognise a line that starts block math.
    pub fn open(line: &str) -> Option<MathLine> {
        let t = line.trim();
        let rest = t.strip_prefix(Self::DELIMITER)?;

        match rest.strip_suffix(Self::DELIMITER) {
            Some(source) if !source.trim().is_empty() => {
                Some(MathLine::Single(source.trim().to_string()))
            }
            Some(_) => None,
            None => Some(MathLine::Open(rest.trim().to_string())),
        }
    }

    /// Recognise a line that ends open block math, returning the source
    /// before the closing delimiter.
    pub fn close(line: &str) -> Option<String> {
        line.trim()
            .strip_suffix(Self::DELIMITER)
            .map(|source| source.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_block() {
        assert_eq!(
            MathFence::open("$$ E = mc^2 $$"),
            Some(MathLine::Single("E = mc^2".to_string()))
        );
    }

    #[test]
    fn opening_line() {
        assert_eq!(MathFence::open("$$"), Some(MathLine::Open(String::new())));
        assert_eq!(
            MathFence::open("$$\\begin{x}"),
            Some(MathLine::Open("\\begin{x}".to_string()))
        );
    }

    #[test]
    fn not_math() {
        assert_eq!(MathFence::open("$x$"), None);
        assert_eq!(MathFence::open("$$$$"), None);
        assert_eq!(MathFence::open("costs $$ later"), None);
    }

    #[test]
    fn closing_line() {
        assert_eq!(MathFence::close("$$"), Some(String::new()));
        assert_eq!(MathFence::close("x + y $$"), Some("x + y".to_string()));
        assert_eq!(MathFence::close("x + y"), None);
    }
}
