//! Fault classification for assembled requests.
//!
//! Each request carries a [`FaultKind`] chosen by the operation that built
//! it. Executors read the kind when a reply reports `<rpc-error>` elements and
//! raise the matching [`RpcError`] variant, so callers can tell a failed
//! commit from a failed load without looking at the reply.

use std::fmt;

use netconf_xml::{Document, Element};
use strum::Display;
use tracing::debug;

use crate::error::RpcError;

/// Tracing target for reply inspection.
pub(crate) const FAULT_TARGET: &str = "junos_rpc::fault";

/// Error classification attached to a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FaultKind {
    /// Faults raise [`RpcError::Commit`].
    Commit,
    /// Faults raise [`RpcError::Edit`].
    Edit,
    /// Faults raise [`RpcError::Rpc`].
    #[default]
    Generic,
}

impl FaultKind {
    /// Builds the error this classification raises for the given faults.
    #[must_use]
    pub fn raise(self, faults: Vec<RpcFault>) -> RpcError {
        match self {
            Self::Commit => RpcError::Commit { faults },
            Self::Edit => RpcError::Edit { faults },
            Self::Generic => RpcError::Rpc { faults },
        }
    }

    /// Passes a reply through, or raises when it reports error-severity
    /// faults.
    ///
    /// Warnings alone do not fail the reply.
    ///
    /// # Errors
    ///
    /// Returns the variant selected by [`FaultKind::raise`] when at least one
    /// `<rpc-error>` has error severity.
    pub fn check_reply(self, reply: Document) -> Result<Document, RpcError> {
        let faults: Vec<RpcFault> = reply_faults(&reply)
            .into_iter()
            .filter(RpcFault::is_error)
            .collect();
        if faults.is_empty() {
            return Ok(reply);
        }
        debug!(
            target: FAULT_TARGET,
            kind = %self,
            count = faults.len(),
            "reply reported faults"
        );
        Err(self.raise(faults))
    }
}

/// Severity of a reported fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FaultSeverity {
    /// The operation failed.
    Error,
    /// The operation succeeded with a caveat.
    Warning,
}

/// One `<rpc-error>` entry from a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcFault {
    severity: FaultSeverity,
    tag: Option<String>,
    message: Option<String>,
    path: Option<String>,
}

impl RpcFault {
    /// Creates a fault with the given severity and no detail.
    #[must_use]
    pub const fn new(severity: FaultSeverity) -> Self {
        Self {
            severity,
            tag: None,
            message: None,
            path: None,
        }
    }

    /// Attaches the `error-tag`.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Attaches the `error-message`.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches the `error-path`.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> FaultSeverity {
        self.severity
    }

    /// Reports whether the fault has error severity.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == FaultSeverity::Error
    }

    /// Returns the `error-tag`, when present.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns the `error-message`, when present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the `error-path`, when present.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn from_element(element: &Element) -> Self {
        let detail = |name: &str| {
            element
                .child(name)
                .map(|child| child.text().trim().to_owned())
                .filter(|text| !text.is_empty())
        };
        let severity = match detail("error-severity").as_deref() {
            Some("warning") => FaultSeverity::Warning,
            _ => FaultSeverity::Error,
        };
        Self {
            severity,
            tag: detail("error-tag"),
            message: detail("error-message"),
            path: detail("error-path"),
        }
    }
}

impl fmt::Display for RpcFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        match (&self.message, &self.tag) {
            (Some(message), _) => write!(f, ": {message}")?,
            (None, Some(tag)) => write!(f, ": {tag}")?,
            (None, None) => {}
        }
        if let Some(path) = &self.path {
            write!(f, " at {path}")?;
        }
        Ok(())
    }
}

/// Collects every `<rpc-error>` in a reply, in document order.
///
/// An entry without `error-severity` counts as an error.
#[must_use]
pub fn reply_faults(reply: &Document) -> Vec<RpcFault> {
    reply
        .descendants("rpc-error")
        .map(RpcFault::from_element)
        .collect()
}
