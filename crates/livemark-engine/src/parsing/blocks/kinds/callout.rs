use std::sync::OnceLock;

use regex::Regex;

/// A parsed `[!type]+/- title` callout header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutHeader {
    /// The type as written, e.g. `note` or `WARNING`.
    pub callout_type: String,
    /// Explicit title, or the capitalised type when none is given.
    pub title: String,
    /// `-` suffix: starts folded.
    pub folded: bool,
    /// Any fold suffix (`+` or `-`) makes the callout foldable.
    pub foldable: bool,
}

pub struct CalloutSyntax;

impl CalloutSyntax {
    /// Parse the remainder of a quote line (after the `> ` prefix).
    pub fn header(remainder: &str) -> Option<CalloutHeader> {
        static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();
        let header_regex = HEADER_REGEX.get_or_init(|| {
            Regex::new(r"^\[!([A-Za-z0-9_-]+)\]([+-])?(?:\s+(.*))?$")
                .expect("Invalid callout header regex")
        });

        let caps = header_regex.captures(remainder.trim_end())?;
        let callout_type = caps.get(1)?.as_str().to_string();
        let fold = caps.get(2).map(|m| m.as_str());
        let title = caps
            .get(3)
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| Self::default_title(&callout_type));

        Some(CalloutHeader {
            callout_type,
            title,
            folded: fold == Some("-"),
            foldable: fold.is_some(),
        })
    }

    /// `note` → `Note`, `WARNING` → `Warning`.
    fn default_title(callout_type: &str) -> String {
        let mut chars = callout_type.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => String::new(),
        }
    }
}
