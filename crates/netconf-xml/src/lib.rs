//! Owned XML element trees for NETCONF request and reply documents.
//!
//! The crate provides the small set of document operations a NETCONF client
//! needs and nothing more:
//!
//! - **Construction** via [`Element`] and the scoped [`ElementWriter`] handle
//!   used by content callbacks
//! - **Parsing** of reply markup into an owned [`Document`]
//! - **Serialisation** through [`std::fmt::Display`] with attribute and text
//!   escaping
//! - **Queries** by element name ([`Element::child`], [`Element::descendants`])
//! - **Validation** of names and characters ([`Element::validate`])
//!
//! Trees own their nodes outright. Attaching an element to another moves it,
//! and [`Clone`] produces a deep copy, so a caller's tree can never be
//! re-parented or mutated through a document it was copied into.
//!
//! # Example
//!
//! ```
//! use netconf_xml::{Document, Element};
//!
//! let mut rpc = Element::new("rpc");
//! rpc.writer().element("lock", |lock| {
//!     lock.element("target", |target| {
//!         target.empty("candidate");
//!     });
//! });
//!
//! let document = Document::new(rpc);
//! assert_eq!(
//!     document.to_string(),
//!     "<rpc><lock><target><candidate/></target></lock></rpc>"
//! );
//! assert!(document.contains("candidate"));
//! ```

mod element;
mod error;
mod parse;
mod serialise;
mod validate;
mod writer;

pub use self::element::{Descendants, Document, Element, Node};
pub use self::error::DocumentError;
pub use self::validate::{is_name, is_text};
pub use self::writer::ElementWriter;
