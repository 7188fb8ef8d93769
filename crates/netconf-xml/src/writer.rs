//! Scoped writer for appending nested content to an element.
//!
//! An [`ElementWriter`] borrows the element it writes into, so content
//! callbacks can emit arbitrary structure without ever holding the
//! surrounding document.

use crate::element::Element;

/// Handle that appends attributes, text and child elements to one element.
///
/// Methods return `&mut Self` so calls can be chained.
///
/// # Example
///
/// ```
/// use netconf_xml::Element;
///
/// let mut configuration = Element::new("configuration");
/// configuration.writer().element("system", |system| {
///     system.leaf("host-name", "edge-1");
/// });
/// assert_eq!(
///     configuration.to_string(),
///     "<configuration><system><host-name>edge-1</host-name></system></configuration>"
/// );
/// ```
#[derive(Debug)]
pub struct ElementWriter<'a> {
    element: &'a mut Element,
}

impl<'a> ElementWriter<'a> {
    /// Opens a writer over the given element.
    pub const fn new(element: &'a mut Element) -> Self {
        Self { element }
    }

    /// Returns the name of the element being written.
    #[must_use]
    pub fn name(&self) -> &str {
        self.element.name()
    }

    /// Sets an attribute on the element being written.
    pub fn attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.element.set_attribute(name, value);
        self
    }

    /// Appends a text run.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.element.push_text(text);
        self
    }

    /// Appends an empty child element such as `<candidate/>`.
    pub fn empty(&mut self, name: impl Into<String>) -> &mut Self {
        self.element.push(Element::new(name));
        self
    }

    /// Appends a child element holding only text.
    pub fn leaf(&mut self, name: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.element.push(Element::new(name).with_text(text));
        self
    }

    /// Appends a child element and hands a writer for it to `build`.
    pub fn element<F>(&mut self, name: impl Into<String>, build: F) -> &mut Self
    where
        F: FnOnce(&mut ElementWriter<'_>),
    {
        let mut child = Element::new(name);
        build(&mut ElementWriter::new(&mut child));
        self.element.push(child);
        self
    }

    /// Appends an already-built element, taking ownership of it.
    pub fn append(&mut self, element: Element) -> &mut Self {
        self.element.push(element);
        self
    }
}
