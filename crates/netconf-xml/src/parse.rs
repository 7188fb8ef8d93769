//! Markup parsing backed by `roxmltree`.
//!
//! `roxmltree` produces a borrowed, read-only tree. The nodes are copied into
//! owned [`Element`] values so that replies outlive the input buffer and can
//! be inspected or edited freely. Copies keep qualified names and the
//! namespace declarations made on each element, so a parsed subtree
//! serialises back to the same structure.

use roxmltree::{Namespace, Node};

use crate::element::{Document, Element};
use crate::error::DocumentError;

const XMLNS: &str = "xmlns";

pub(crate) fn parse_document(markup: &str) -> Result<Document, DocumentError> {
    let parsed =
        roxmltree::Document::parse(markup).map_err(|source| DocumentError::Parse { source })?;
    Ok(Document::new(copy_element(parsed.root_element())))
}

fn copy_element(node: Node<'_, '_>) -> Element {
    let tag = node.tag_name();
    let mut element = Element::new(qualify(node, tag.namespace(), tag.name()));

    for namespace in node.namespaces().filter(|ns| declared_here(node, ns)) {
        let name = namespace
            .name()
            .map_or_else(|| XMLNS.to_owned(), |prefix| format!("{XMLNS}:{prefix}"));
        element.set_attribute(name, namespace.uri());
    }
    for attribute in node.attributes() {
        element.set_attribute(
            qualify(node, attribute.namespace(), attribute.name()),
            attribute.value(),
        );
    }

    let has_elements = node.children().any(|child| child.is_element());
    for child in node.children() {
        if child.is_element() {
            element.push(copy_element(child));
        } else if child.is_text() {
            // Layout between elements is dropped; a blank leaf keeps its text.
            match child.text() {
                Some(text) if !has_elements || !text.trim().is_empty() => {
                    element.push_text(text);
                }
                _ => {}
            }
        }
    }
    element
}

fn qualify(node: Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.to_owned(),
    }
}

/// Reports whether `namespace` is declared on `node` rather than inherited.
fn declared_here(node: Node<'_, '_>, namespace: &Namespace<'_>) -> bool {
    if namespace.name() == Some("xml") {
        return false;
    }
    !node.parent_element().is_some_and(|parent| {
        parent.namespaces().any(|inherited| {
            inherited.name() == namespace.name() && inherited.uri() == namespace.uri()
        })
    })
}
