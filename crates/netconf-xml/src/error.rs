//! Errors raised by document operations.

use thiserror::Error;

/// Errors arising while reading markup into a [`Document`](crate::Document)
/// or checking a tree with [`Element::validate`](crate::Element::validate).
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The markup was not well formed.
    #[error("failed to parse markup: {source}")]
    Parse {
        /// Underlying parser error, carrying the position of the fault.
        #[source]
        source: roxmltree::Error,
    },

    /// An element or attribute name is not an XML name.
    #[error("`{name}` is not a valid XML name")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// Text or an attribute value holds a character XML cannot carry.
    #[error("content of <{element}> holds a character XML forbids")]
    InvalidText {
        /// Name of the element whose text or attribute was rejected.
        element: String,
    },
}
