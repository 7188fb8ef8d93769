//! Content payloads and content-producing callbacks.

use std::fmt;

use netconf_xml::{Element, ElementWriter};

/// Body content classified from the caller's arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPayload {
    /// An owned element tree. Callers that keep their original hand over a
    /// copy, so the request never aliases caller data.
    Subtree(Element),
    /// Text, already joined when it arrived as a list of lines.
    Text(String),
}

/// Text produced by a textual content callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPayload {
    /// A single block of text.
    Text(String),
    /// Ordered lines, joined with newlines on use.
    Lines(Vec<String>),
}

impl TextPayload {
    /// Flattens the payload into one string.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Lines(lines) => lines.join("\n"),
        }
    }
}

impl From<String> for TextPayload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for TextPayload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Vec<String>> for TextPayload {
    fn from(lines: Vec<String>) -> Self {
        Self::Lines(lines)
    }
}

impl From<Vec<&str>> for TextPayload {
    fn from(lines: Vec<&str>) -> Self {
        Self::Lines(lines.into_iter().map(str::to_owned).collect())
    }
}

/// Structured callback: receives a writer scoped to the body element.
pub type StructuredFn<'a> = Box<dyn FnOnce(&mut ElementWriter<'_>) + 'a>;

/// Textual callback: returns the body text.
pub type TextualFn<'a> = Box<dyn FnOnce() -> TextPayload + 'a>;

/// Deferred content producer, invoked once while a request is assembled.
///
/// Structured callbacks suit `xml` bodies; textual callbacks suit `text` and
/// `set` bodies. Supplying the wrong shape is a configuration error.
///
/// # Example
///
/// ```
/// use junos_rpc::ContentCallback;
///
/// let structured = ContentCallback::structured(|config| {
///     config.element("system", |system| {
///         system.leaf("host-name", "edge-1");
///     });
/// });
/// assert_eq!(structured.shape(), "structured");
///
/// let textual = ContentCallback::textual(|| vec!["set system host-name edge-1"]);
/// assert_eq!(textual.shape(), "textual");
/// ```
pub enum ContentCallback<'a> {
    /// Emits nested structure beneath the body element.
    Structured(StructuredFn<'a>),
    /// Produces the body text.
    Textual(TextualFn<'a>),
}

impl<'a> ContentCallback<'a> {
    /// Wraps a closure that writes structure beneath the body element.
    #[must_use]
    pub fn structured<F>(build: F) -> Self
    where
        F: FnOnce(&mut ElementWriter<'_>) + 'a,
    {
        Self::Structured(Box::new(build))
    }

    /// Wraps a closure that returns text or lines of text.
    #[must_use]
    pub fn textual<F, T>(produce: F) -> Self
    where
        F: FnOnce() -> T + 'a,
        T: Into<TextPayload>,
    {
        Self::Textual(Box::new(move || -> TextPayload { produce().into() }))
    }

    /// Names the callback shape for diagnostics.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Structured(_) => "structured",
            Self::Textual(_) => "textual",
        }
    }
}

impl fmt::Debug for ContentCallback<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContentCallback").field(&self.shape()).finish()
    }
}
