//! SyntaxKind enum for all tokens and nodes in the Markdown CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.
//!
//! There are two flavours of token kind:
//!
//! - **Raw tokens** come straight out of the lexer (`STAR`, `LBRACKET`, ...).
//! - **Mark tokens** are assigned by the grammar when it has proven that a run
//!   of raw tokens is the delimiter of a complete construct (`EMPHASIS_MARK`
//!   for the `**` of a closed strong span, `WIKILINK_MARK` for `[[`, ...).
//!   Unterminated constructs never produce mark tokens, so anything that hides
//!   delimiters can trust that a mark always has its partner.

/// All syntax kinds for the Markdown CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Raw tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// Plain text content
    TEXT,
    /// `>` for blockquotes and autolinks
    GT,
    /// `<` for autolinks
    LT,
    /// `-` for lists, thematic breaks and tag bodies
    DASH,
    /// `*` for lists, emphasis, and thematic breaks
    STAR,
    /// `+` for lists and callout fold suffixes
    PLUS,
    /// `_` for emphasis and tag bodies
    UNDERSCORE,
    /// Single backtick for code spans and fences
    BACKTICK,
    /// `~` for fenced code and strikethrough
    TILDE,
    /// `=` for highlights
    EQ,
    /// `^` for block references
    CARET,
    /// `!` for images and embeds
    BANG,
    /// `[` for links, wikilinks and task markers
    LBRACKET,
    /// `]` for links, wikilinks and task markers
    RBRACKET,
    /// `|` for wikilink aliases
    PIPE,
    /// `(` for link URLs
    LPAREN,
    /// `)` for link URLs
    RPAREN,
    /// `#` for headings and tags
    HASH,
    /// `/` inside tags and URLs
    SLASH,
    /// Other single punctuation characters (`.`, `,`, `:`, ...)
    PUNCT,

    // === Mark tokens (grammar output) ===
    /// `#`..`######` opening an ATX heading
    HEADER_MARK,
    /// `*`, `_`, `**` or `__` delimiting emphasis/strong
    EMPHASIS_MARK,
    /// Backtick run delimiting a code span or a code fence
    CODE_MARK,
    /// Info string after an opening code fence
    CODE_INFO,
    /// `[`, `]`, `(`, `)`, `![`, `<`, `>` of links, images and autolinks
    LINK_MARK,
    /// `[[`, `|`, `]]` of a wikilink
    WIKILINK_MARK,
    /// `![[`, `|`, `]]` of an embed
    EMBED_MARK,
    /// `#` opening a tag
    TAG_MARK,
    /// `==` delimiting a highlight
    HIGHLIGHT_MARK,
    /// `~~` delimiting strikethrough
    STRIKETHROUGH_MARK,
    /// `^` opening a block reference
    BLOCK_REF_MARK,
    /// Bullet or ordered list marker
    LIST_MARK,
    /// `[ ]`, `[x]` or `[X]` checkbox of a task item
    TASK_MARK,
    /// `>` prefix of a blockquote line
    QUOTE_MARK,

    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    ROOT,
    /// Blockquote container (`> ...`)
    BLOCK_QUOTE,
    /// Individual list item
    LIST_ITEM,
    /// Paragraph block
    PARAGRAPH,
    /// ATX heading (`# ...`)
    HEADING,
    /// Thematic break (`---`, `***`, etc.)
    THEMATIC_BREAK,
    /// Fenced code block
    FENCED_CODE,
    /// Wikilink (`[[target]]` or `[[target|alias]]`)
    WIKILINK,
    /// Target part of a wikilink or embed alias-less form
    WIKILINK_TARGET,
    /// Alias after `|` in a wikilink or embed
    WIKILINK_ALIAS,
    /// Embed (`![[target]]`)
    EMBED,
    /// Note/file part of an embed target
    EMBED_TARGET,
    /// `#^id` block-reference suffix of an embed target
    EMBED_REF,
    /// Inline code span
    CODE_SPAN,
    /// Standard link `[text](url)`
    LINK,
    /// Destination of a link, image or autolink
    URL,
    /// Image `![alt](url)`
    IMAGE,
    /// Autolink `<scheme:...>`
    AUTOLINK,
    /// Emphasis `*text*`
    EMPHASIS,
    /// Strong emphasis `**text**`
    STRONG,
    /// Strikethrough `~~text~~`
    STRIKETHROUGH,
    /// Highlight `==text==`
    HIGHLIGHT,
    /// Inline tag `#tag`
    TAG,
    /// Block reference marker `^id`
    BLOCK_REF,
    /// Task checkbox at the start of a list item
    TASK,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer or mark).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace/newlines).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE)
    }

    /// Returns true if this kind is a construct delimiter assigned by the grammar.
    pub fn is_mark(self) -> bool {
        (self as u16) >= (Self::HEADER_MARK as u16) && (self as u16) <= (Self::QUOTE_MARK as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkdownLang {}

impl rowan::Language for MarkdownLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<MarkdownLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<MarkdownLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<MarkdownLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::WHITESPACE.is_token());
        assert!(SyntaxKind::TEXT.is_token());
        assert!(SyntaxKind::WIKILINK_MARK.is_token());
        assert!(SyntaxKind::EOF.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::PARAGRAPH.is_node());
        assert!(SyntaxKind::WIKILINK.is_node());
        assert!(SyntaxKind::TAG.is_node());
    }

    #[test]
    fn trivia_detection() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(SyntaxKind::NEWLINE.is_trivia());
        assert!(!SyntaxKind::TEXT.is_trivia());
    }

    #[test]
    fn mark_detection() {
        assert!(SyntaxKind::HEADER_MARK.is_mark());
        assert!(SyntaxKind::EMPHASIS_MARK.is_mark());
        assert!(SyntaxKind::QUOTE_MARK.is_mark());
        assert!(!SyntaxKind::STAR.is_mark());
        assert!(!SyntaxKind::EOF.is_mark());
        assert!(!SyntaxKind::STRONG.is_mark());
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        let kind = SyntaxKind::HIGHLIGHT;
        let raw: rowan::SyntaxKind = kind.into();
        let back = MarkdownLang::kind_from_raw(raw);
        assert_eq!(kind, back);
    }
}
