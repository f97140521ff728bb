//! Seams to the host: answering lookups and reacting to clicks.
//!
//! The engine never touches the file system. Everything it needs to know
//! about other notes comes through [`Resolver`], and everything a rendered
//! widget wants to do goes out through [`InteractionHandler`].

/// Answer to a wikilink or embed lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub exists: bool,
    /// Note text, used for note embeds.
    pub content: Option<String>,
}

/// Answer to a `note#heading` lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingResolution {
    pub exists: bool,
    /// Section text under the heading, used for heading embeds.
    pub content: Option<String>,
    pub heading_level: Option<u8>,
}

/// A lookup that failed outright, as opposed to finding nothing.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("failed to read {target}: {source}")]
    Io {
        target: String,
        source: std::io::Error,
    },
    #[error("resolver failed for {target}: {message}")]
    Other { target: String, message: String },
}

/// Lookups the preview makes while building widgets.
///
/// Calls are synchronous and happen inside a decoration pass, so
/// implementations must answer from memory or a cheap cache. `Ok(None)` and
/// `Err` both render the construct as missing; errors are also logged.
pub trait Resolver {
    fn resolve_wikilink(&self, target: &str) -> Result<Option<Resolution>, ResolveError>;

    /// Rewrite an image or media source into something the host can load.
    fn resolve_image(&self, src: &str) -> String {
        src.to_string()
    }

    fn resolve_heading(
        &self,
        note: &str,
        heading: &str,
    ) -> Result<Option<HeadingResolution>, ResolveError>;
}

/// A resolver that knows nothing: every target is missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl Resolver for NullResolver {
    fn resolve_wikilink(&self, _target: &str) -> Result<Option<Resolution>, ResolveError> {
        Ok(None)
    }

    fn resolve_heading(
        &self,
        _note: &str,
        _heading: &str,
    ) -> Result<Option<HeadingResolution>, ResolveError> {
        Ok(None)
    }
}

/// Callbacks fired by widgets. Every method defaults to doing nothing.
pub trait InteractionHandler {
    fn on_wikilink_click(&mut self, _target: &str) {}

    fn on_wikilink_cmd_click(&mut self, _target: &str) {}

    fn on_tag_click(&mut self, _tag: &str) {}

    /// `checked` is the state the box should take.
    fn on_checkbox_toggle(&mut self, _pos: usize, _checked: bool) {}

    fn on_callout_toggle(&mut self, _pos: usize) {}
}
