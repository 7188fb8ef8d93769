//! Element, node and document types.

use crate::error::DocumentError;
use crate::validate::{is_name, is_text};
use crate::writer::ElementWriter;

/// A child of an [`Element`]: either a nested element or a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// Character data, stored unescaped.
    Text(String),
}

impl Node {
    /// Returns the element when this node is one.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Returns the text when this node is a text run.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Element(_) => None,
            Self::Text(text) => Some(text.as_str()),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An XML element with ordered attributes and ordered children.
///
/// Attribute order follows first insertion; replacing the value of an
/// existing attribute keeps its position.
///
/// Names and text are stored as given. Call [`Element::validate`] before
/// sending a tree built from untrusted strings.
///
/// # Example
///
/// ```
/// use netconf_xml::Element;
///
/// let element = Element::new("command")
///     .with_attribute("format", "text")
///     .with_text("show version");
/// assert_eq!(element.attribute("format"), Some("text"));
/// assert_eq!(element.text(), "show version");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the element with an attribute set.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Returns the element with a child element appended.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.push(child);
        self
    }

    /// Returns the element with a text run appended.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Returns the element name, including any namespace prefix.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the element name without its namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    /// Unprefixed queries match on the local name; prefixed ones must match
    /// exactly.
    fn is_named(&self, name: &str) -> bool {
        self.name == name || (!name.contains(':') && self.local_name() == name)
    }

    /// Looks up an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over the attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Sets an attribute, replacing any existing value in place.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Appends a child element, taking ownership of it.
    pub fn push(&mut self, child: Self) {
        self.children.push(Node::Element(child));
    }

    /// Appends a text run. Empty text is dropped.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(Node::Text(text));
        }
    }

    /// Returns all child nodes in document order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Iterates over the direct child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Returns the first direct child element.
    #[must_use]
    pub fn first_element(&self) -> Option<&Self> {
        self.elements().next()
    }

    /// Returns the first direct child element with the given name.
    ///
    /// An unprefixed name also matches prefixed elements with that local
    /// name, so `child("ok")` finds `<junos:ok/>`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.elements().find(|element| element.is_named(name))
    }

    /// Returns a mutable handle to the first direct child element with the
    /// given name.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) if element.is_named(name) => Some(element),
            _ => None,
        })
    }

    /// Concatenates every text run beneath this element in document order.
    #[must_use]
    pub fn text(&self) -> String {
        let mut buffer = String::new();
        collect_text(self, &mut buffer);
        buffer
    }

    /// Iterates, in document order, over this element and every element
    /// beneath it whose name matches.
    #[must_use]
    pub fn descendants<'a>(&'a self, name: &'a str) -> Descendants<'a> {
        Descendants {
            stack: vec![self],
            name,
        }
    }

    /// Reports whether this element or any element beneath it has the given
    /// name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.descendants(name).next().is_some()
    }

    /// Opens a writer that appends content beneath this element.
    pub fn writer(&mut self) -> ElementWriter<'_> {
        ElementWriter::new(self)
    }

    /// Checks that every name and every string in the tree can be written as
    /// XML 1.0.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidName`] for the first element or
    /// attribute name that is not an XML name, or
    /// [`DocumentError::InvalidText`] for the first attribute value or text
    /// run holding a character XML forbids.
    ///
    /// # Example
    ///
    /// ```
    /// use netconf_xml::{DocumentError, Element};
    ///
    /// assert!(Element::new("commit-configuration").validate().is_ok());
    /// assert!(matches!(
    ///     Element::new("bad name").validate(),
    ///     Err(DocumentError::InvalidName { .. })
    /// ));
    /// ```
    pub fn validate(&self) -> Result<(), DocumentError> {
        if !is_name(&self.name) {
            return Err(DocumentError::InvalidName {
                name: self.name.clone(),
            });
        }
        for (key, value) in &self.attributes {
            if !is_name(key) {
                return Err(DocumentError::InvalidName { name: key.clone() });
            }
            if !is_text(value) {
                return Err(self.invalid_text());
            }
        }
        for node in &self.children {
            match node {
                Node::Element(child) => child.validate()?,
                Node::Text(text) if !is_text(text) => return Err(self.invalid_text()),
                Node::Text(_) => {}
            }
        }
        Ok(())
    }

    fn invalid_text(&self) -> DocumentError {
        DocumentError::InvalidText {
            element: self.name.clone(),
        }
    }
}

fn collect_text(element: &Element, buffer: &mut String) {
    for node in &element.children {
        match node {
            Node::Element(child) => collect_text(child, buffer),
            Node::Text(text) => buffer.push_str(text),
        }
    }
}

/// Pre-order iterator over elements with a given name.
///
/// Created by [`Element::descendants`] and [`Document::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
    name: &'a str,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(element) = self.stack.pop() {
            self.stack
                .extend(element.children.iter().rev().filter_map(Node::as_element));
            if element.is_named(self.name) {
                return Some(element);
            }
        }
        None
    }
}

/// A complete document with a single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Wraps a root element into a document.
    #[must_use]
    pub const fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parses markup into an owned document.
    ///
    /// Element and attribute names keep their namespace prefixes, and each
    /// element keeps the `xmlns` declarations made on it. Whitespace-only
    /// text is discarded when it sits between child elements and kept when it
    /// is an element's only content.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] when the markup is not well formed.
    pub fn parse(markup: &str) -> Result<Self, DocumentError> {
        crate::parse::parse_document(markup)
    }

    /// Returns the root element.
    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// Returns the root element mutably.
    pub const fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Consumes the document, returning its root element.
    #[must_use]
    pub fn into_root(self) -> Element {
        self.root
    }

    /// Iterates over every element in the document with the given name.
    #[must_use]
    pub fn descendants<'a>(&'a self, name: &'a str) -> Descendants<'a> {
        self.root.descendants(name)
    }

    /// Reports whether any element in the document has the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.root.contains(name)
    }
}

impl From<Element> for Document {
    fn from(root: Element) -> Self {
        Self::new(root)
    }
}
