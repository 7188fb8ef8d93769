//! Errors raised while compiling and executing RPCs.
//!
//! [`ConfigurationError`] covers caller misuse detected before anything is
//! sent. [`RpcError`] is what every entry point returns: configuration errors,
//! device-reported faults discriminated by the operation that caused them,
//! and transport failures passed through untouched.

use std::error::Error as StdError;
use std::sync::Arc;

use netconf_xml::DocumentError;
use thiserror::Error;

use crate::fault::RpcFault;

/// Caller misuse detected while a request is assembled.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The `format` attribute named a format outside `xml`, `text` and `set`.
    #[error("unsupported load format '{value}' (expected xml, text or set)")]
    UnknownFormat {
        /// Value supplied by the caller.
        value: String,
    },

    /// A mandatory argument was absent.
    #[error("{operation} requires the '{argument}' argument")]
    MissingArgument {
        /// Operation being assembled.
        operation: &'static str,
        /// Name of the absent argument.
        argument: &'static str,
    },

    /// An argument was present but had an unusable shape.
    #[error("{operation} argument '{argument}' is invalid: {reason}")]
    InvalidArgument {
        /// Operation being assembled.
        operation: &'static str,
        /// Name of the offending argument.
        argument: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// The rollback index fell outside the retained history.
    #[error("rollback index {index} is out of range (0 to {max} inclusive)")]
    RollbackOutOfRange {
        /// Index requested by the caller.
        index: u32,
        /// Highest valid index.
        max: u32,
    },

    /// A content callback of the wrong shape was supplied.
    #[error("{operation} expects a {expected} content callback, got a {found} one")]
    CallbackShape {
        /// Operation being assembled.
        operation: &'static str,
        /// Shape the operation needed.
        expected: &'static str,
        /// Shape the caller supplied.
        found: &'static str,
    },

    /// Content was not well-formed markup, or held a name or character that
    /// cannot be written as XML.
    #[error("configuration content is not valid XML: {source}")]
    InvalidContent {
        /// Parse or validation failure.
        #[source]
        source: DocumentError,
    },
}

/// Errors returned by RPC entry points.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The request could not be assembled; nothing was sent.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The device rejected a commit.
    #[error("commit failed: {}", summarise(.faults))]
    Commit {
        /// Faults reported in the reply.
        faults: Vec<RpcFault>,
    },

    /// The device rejected a configuration load.
    #[error("configuration load failed: {}", summarise(.faults))]
    Edit {
        /// Faults reported in the reply.
        faults: Vec<RpcFault>,
    },

    /// The device reported a fault for any other operation.
    #[error("rpc failed: {}", summarise(.faults))]
    Rpc {
        /// Faults reported in the reply.
        faults: Vec<RpcFault>,
    },

    /// The session or connection failed.
    #[error("transport failure: {message}")]
    Transport {
        /// Human-readable failure description.
        message: String,
        /// Optional underlying error.
        #[source]
        source: Option<Arc<dyn StdError + Send + Sync>>,
    },

    /// The reply could not be parsed.
    #[error("reply is not well-formed XML: {source}")]
    InvalidReply {
        /// Parse or validation failure.
        #[source]
        source: DocumentError,
    },
}

impl RpcError {
    /// Creates a transport error without an underlying cause.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Returns the device-reported faults, empty for non-fault errors.
    #[must_use]
    pub fn faults(&self) -> &[RpcFault] {
        match self {
            Self::Commit { faults } | Self::Edit { faults } | Self::Rpc { faults } => {
                faults.as_slice()
            }
            Self::Configuration(_) | Self::Transport { .. } | Self::InvalidReply { .. } => &[],
        }
    }
}

fn summarise(faults: &[RpcFault]) -> String {
    match faults {
        [] => String::from("no error detail in reply"),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}
