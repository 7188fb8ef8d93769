//! Argument classification.
//!
//! Operations that accept content take an unordered list of [`RpcArg`]
//! values. [`classify`] buckets them into at most one content payload and one
//! merged option set. When several content arguments are supplied the last
//! one wins; earlier ones are dropped with a warning so the override is
//! visible in logs.

use netconf_xml::{Document, Element};
use tracing::warn;

use crate::attributes::Attributes;
use crate::content::ContentPayload;

/// Tracing target for argument classification.
pub(crate) const CLASSIFY_TARGET: &str = "junos_rpc::classify";

/// One caller-supplied argument to a content-bearing operation.
///
/// Conversions exist for the common shapes, so call sites can pass values
/// straight in:
///
/// ```
/// use junos_rpc::{Attributes, RpcArg};
/// use netconf_xml::Element;
///
/// let filter = Element::new("configuration").with_child(Element::new("system"));
/// let args = [
///     RpcArg::from(&filter),
///     RpcArg::from(Attributes::from([("database", "committed")])),
/// ];
/// assert!(matches!(args[0], RpcArg::Content(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcArg {
    /// A content subtree, owned by the request once classified.
    Content(Element),
    /// Attribute overrides for the operation element.
    Options(Attributes),
    /// A text payload.
    Text(String),
    /// Text lines, joined with newlines.
    Lines(Vec<String>),
}

impl RpcArg {
    /// Names the argument shape for diagnostics.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Content(_) => "content",
            Self::Options(_) => "options",
            Self::Text(_) => "text",
            Self::Lines(_) => "lines",
        }
    }
}

impl From<Element> for RpcArg {
    fn from(element: Element) -> Self {
        Self::Content(element)
    }
}

/// Copies the borrowed subtree; the caller's original is never attached.
impl From<&Element> for RpcArg {
    fn from(element: &Element) -> Self {
        Self::Content(element.clone())
    }
}

/// Unwraps the document to its root element.
impl From<Document> for RpcArg {
    fn from(document: Document) -> Self {
        Self::Content(document.into_root())
    }
}

/// Copies the root element of a borrowed document.
impl From<&Document> for RpcArg {
    fn from(document: &Document) -> Self {
        Self::Content(document.root().clone())
    }
}

impl From<Attributes> for RpcArg {
    fn from(options: Attributes) -> Self {
        Self::Options(options)
    }
}

impl From<String> for RpcArg {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RpcArg {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Vec<String>> for RpcArg {
    fn from(lines: Vec<String>) -> Self {
        Self::Lines(lines)
    }
}

impl From<Vec<&str>> for RpcArg {
    fn from(lines: Vec<&str>) -> Self {
        Self::Lines(lines.into_iter().map(str::to_owned).collect())
    }
}

/// Arguments sorted into content and options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    /// The content payload, if any argument carried one.
    pub content: Option<ContentPayload>,
    /// Option overrides merged in argument order.
    pub options: Option<Attributes>,
}

/// Sorts arguments into one content payload and one option set.
///
/// Options from several arguments are merged, later keys winning. Content
/// is last-write-wins. Classification never fails.
#[must_use]
pub fn classify<I>(args: I) -> Classified
where
    I: IntoIterator<Item = RpcArg>,
{
    let mut classified = Classified::default();
    for arg in args {
        let content = match arg {
            RpcArg::Options(options) => {
                classified
                    .options
                    .get_or_insert_with(Attributes::new)
                    .merge(options);
                continue;
            }
            RpcArg::Content(element) => ContentPayload::Subtree(element),
            RpcArg::Text(text) => ContentPayload::Text(text),
            RpcArg::Lines(lines) => ContentPayload::Text(lines.join("\n")),
        };
        if let Some(previous) = classified.content.replace(content) {
            warn!(
                target: CLASSIFY_TARGET,
                discarded = payload_shape(&previous),
                "multiple content arguments supplied; keeping the last"
            );
        }
    }
    classified
}

const fn payload_shape(payload: &ContentPayload) -> &'static str {
    match payload {
        ContentPayload::Subtree(_) => "content",
        ContentPayload::Text(_) => "text",
    }
}
