/// Which character a fence is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// A line that looks like a code fence: its character, run length and the
/// info string after the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    pub len: usize,
    pub info: String,
}

pub struct CodeFence;

impl CodeFence {
    /// Shortest run of fence characters that opens a fence.
    pub const MIN_LEN: usize = 3;
    /// Most indentation allowed before a fence.
    pub const MAX_INDENT: usize = 3;

    /// Recognise a fence line, opening or closing.
    pub fn sig(line: &str) -> Option<FenceSig> {
        let t = line.trim_end_matches(['\r', '\n']);
        let indent = t.len() - t.trim_start_matches([' ', '\t']).len();
        if indent > Self::MAX_INDENT {
            return None;
        }
        let rest = &t[indent..];

        let (kind, ch) = match rest.as_bytes().first() {
            Some(b'`') => (FenceKind::Backticks, '`'),
            Some(b'~') => (FenceKind::Tildes, '~'),
            _ => return None,
        };
        let len = rest.len() - rest.trim_start_matches(ch).len();
        if len < Self::MIN_LEN {
            return None;
        }

        Some(FenceSig {
            kind,
            len,
            info: rest[len..].trim().to_string(),
        })
    }

    /// Whether `line` closes a fence opened by `open`: same character, at
    /// least as long, and nothing after the run.
    pub fn closes(open: &FenceSig, line: Option<&FenceSig>) -> bool {
        matches!(line, Some(sig) if sig.kind == open.kind && sig.len >= open.len && sig.info.is_empty())
    }

    /// The language of an info string: its first word, if any.
    pub fn language(info: &str) -> Option<String> {
        info.split_whitespace().next().map(str::to_string)
    }
}
