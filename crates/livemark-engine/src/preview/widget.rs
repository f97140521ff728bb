//! Rendered replacements for raw markdown.
//!
//! Every widget kind is one variant of [`Widget`], carrying only the fields
//! it needs. [`Widget::to_html`] is the single render dispatch and
//! [`Widget::click`] the single interaction dispatch, so adding a kind means
//! adding one variant and two match arms.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::resolver::InteractionHandler;

/// A widget substituted for a construct's source when it is not being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    WikiLink {
        /// Note name, without any `#heading` part.
        target: String,
        heading: Option<String>,
        /// Alias when given, otherwise the raw target.
        display: String,
        exists: bool,
    },
    Tag {
        /// Tag name without the leading `#`.
        tag: String,
    },
    Embed(EmbedWidget),
    Checkbox {
        checked: bool,
        /// Offset of the `[` of the checkbox.
        pos: usize,
    },
    Image {
        src: String,
        alt: String,
    },
    Math {
        source: String,
        display: bool,
    },
    Code {
        language: Option<String>,
        code: String,
    },
    Callout {
        callout_type: String,
        title: String,
        body: String,
        folded: bool,
        foldable: bool,
        /// Start of the callout's first line.
        pos: usize,
    },
    Diagram {
        language: String,
        source: String,
    },
}

/// A resolved `![[...]]` embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedWidget {
    pub target: String,
    pub heading: Option<String>,
    pub block_ref: Option<String>,
    pub alias: Option<String>,
    pub media: EmbedMedia,
}

/// What an embed expands to, chosen by the target's extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedMedia {
    Image { src: String },
    Video { src: String },
    Document { src: String },
    Note {
        exists: bool,
        content: Option<String>,
        /// Embeds found inside `content`, expanded up to the configured depth.
        nested: Vec<EmbedWidget>,
    },
    /// The target is already being expanded further up.
    Recursive,
}

impl Widget {
    /// Render this widget as an HTML fragment for the host surface.
    pub fn to_html(&self) -> String {
        match self {
            Widget::WikiLink {
                target,
                heading,
                display,
                exists,
            } => {
                let state = if *exists { "lm-exists" } else { "lm-missing" };
                format!(
                    r#"<span class="lm-wikilink {state}" data-target="{}">{}</span>"#,
                    attr(&link_target(target, heading.as_deref())),
                    text(display)
                )
            }
            Widget::Tag { tag } => format!(
                r#"<span class="lm-tag" data-tag="{}">#{}</span>"#,
                attr(tag),
                text(tag)
            ),
            Widget::Embed(embed) => embed.to_html(),
            Widget::Checkbox { checked, pos } => format!(
                r#"<input type="checkbox" class="lm-checkbox" data-pos="{pos}"{}>"#,
                if *checked { " checked" } else { "" }
            ),
            Widget::Image { src, alt } => format!(
                r#"<img class="lm-image" src="{}" alt="{}">"#,
                attr(src),
                attr(alt)
            ),
            Widget::Math { source, display } => {
                if *display {
                    format!(r#"<div class="lm-math lm-math-display">{}</div>"#, text(source))
                } else {
                    format!(r#"<span class="lm-math">{}</span>"#, text(source))
                }
            }
            Widget::Code { language, code } => {
                let language = language
                    .as_deref()
                    .map(|l| format!(r#" data-language="{}""#, attr(l)))
                    .unwrap_or_default();
                format!(
                    r#"<pre class="lm-code-block"{language}><code>{}</code></pre>"#,
                    text(code)
                )
            }
            Widget::Callout {
                callout_type,
                title,
                body,
                folded,
                foldable,
                pos,
            } => {
                let kind = callout_type.to_lowercase();
                let body = if *folded {
                    String::new()
                } else {
                    format!(r#"<div class="lm-callout-body">{}</div>"#, text(body))
                };
                format!(
                    r#"<div class="lm-callout lm-callout-{}" data-pos="{pos}" data-foldable="{foldable}" data-folded="{folded}"><div class="lm-callout-title">{}</div>{body}</div>"#,
                    attr(&kind),
                    text(title)
                )
            }
            Widget::Diagram { language, source } => format!(
                r#"<div class="lm-diagram" data-language="{}"><pre>{}</pre></div>"#,
                attr(language),
                text(source)
            ),
        }
    }

    /// Fire the interaction callback for a click on this widget.
    ///
    /// `cmd` is set when the platform's command/control modifier is held.
    pub fn click(&self, handler: &mut dyn InteractionHandler, cmd: bool) {
        match self {
            Widget::WikiLink {
                target, heading, ..
            } => {
                let target = link_target(target, heading.as_deref());
                if cmd {
                    handler.on_wikilink_cmd_click(&target);
                } else {
                    handler.on_wikilink_click(&target);
                }
            }
            Widget::Tag { tag } => handler.on_tag_click(tag),
            Widget::Embed(EmbedWidget {
                target,
                heading,
                media: EmbedMedia::Note { exists: true, .. },
                ..
            }) => handler.on_wikilink_click(&link_target(target, heading.as_deref())),
            Widget::Checkbox { checked, pos } => handler.on_checkbox_toggle(*pos, !checked),
            Widget::Callout {
                foldable: true,
                pos,
                ..
            } => handler.on_callout_toggle(*pos),
            _ => {}
        }
    }
}

impl EmbedWidget {
    pub fn to_html(&self) -> String {
        let label = self.alias.as_deref().unwrap_or(&self.target);
        match &self.media {
            EmbedMedia::Image { src } => format!(
                r#"<img class="lm-embed lm-embed-image" src="{}" alt="{}">"#,
                attr(src),
                attr(label)
            ),
            EmbedMedia::Video { src } => format!(
                r#"<video class="lm-embed lm-embed-video" src="{}" controls></video>"#,
                attr(src)
            ),
            EmbedMedia::Document { src } => format!(
                r#"<iframe class="lm-embed lm-embed-document" src="{}" title="{}"></iframe>"#,
                attr(src),
                attr(label)
            ),
            EmbedMedia::Note {
                exists: false, ..
            } => format!(
                r#"<div class="lm-embed lm-embed-note lm-missing">{}</div>"#,
                text(label)
            ),
            EmbedMedia::Note {
                content, nested, ..
            } => {
                let nested: String = nested.iter().map(EmbedWidget::to_html).collect();
                format!(
                    r#"<div class="lm-embed lm-embed-note"><div class="lm-embed-title">{}</div><div class="lm-embed-body">{}</div>{nested}</div>"#,
                    text(label),
                    text(content.as_deref().unwrap_or_default())
                )
            }
            EmbedMedia::Recursive => format!(
                r#"<div class="lm-embed lm-embed-recursive">{}</div>"#,
                text(label)
            ),
        }
    }
}

/// `note` or `note#heading`, the form hosts navigate to.
fn link_target(target: &str, heading: Option<&str>) -> String {
    match heading {
        Some(heading) => format!("{target}#{heading}"),
        None => target.to_string(),
    }
}
