//! Execution seam between request assembly and the session layer.
//!
//! Assembly never performs I/O. An [`RpcExecutor`] takes an assembled
//! [`RpcRequest`] and returns the device's reply, raising the request's
//! [`FaultKind`](crate::FaultKind) when the reply reports errors. Sessions
//! that only move bytes implement [`RpcTransport`] instead and are wrapped in
//! a [`MarkupExecutor`], which handles serialisation and reply inspection.

use netconf_xml::Document;
use tracing::debug;

use crate::error::RpcError;
use crate::request::RpcRequest;

/// Tracing target for request execution.
pub(crate) const EXECUTOR_TARGET: &str = "junos_rpc::executor";

/// Sends an assembled request and returns the parsed reply.
///
/// # Example
///
/// ```
/// use junos_rpc::{RpcError, RpcExecutor, RpcRequest};
/// use netconf_xml::{Document, Element};
///
/// struct AlwaysOk;
///
/// impl RpcExecutor for AlwaysOk {
///     fn execute(&self, _request: RpcRequest) -> Result<Document, RpcError> {
///         Ok(Document::new(
///             Element::new("rpc-reply").with_child(Element::new("ok")),
///         ))
///     }
/// }
/// ```
pub trait RpcExecutor {
    /// Executes one request.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Transport`] when the exchange fails,
    /// [`RpcError::InvalidReply`] when the reply cannot be parsed, or the
    /// variant selected by the request's fault classification when the
    /// reply reports errors.
    fn execute(&self, request: RpcRequest) -> Result<Document, RpcError>;
}

impl<E: RpcExecutor + ?Sized> RpcExecutor for &E {
    fn execute(&self, request: RpcRequest) -> Result<Document, RpcError> {
        (**self).execute(request)
    }
}

/// Moves serialised markup to the device and back.
pub trait RpcTransport {
    /// Sends one request document and returns the raw reply.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Transport`] when the session fails.
    fn exchange(&self, request: &str) -> Result<String, RpcError>;
}

/// Executor that serialises requests for an [`RpcTransport`].
#[derive(Debug, Clone, Default)]
pub struct MarkupExecutor<T> {
    transport: T,
}

impl<T> MarkupExecutor<T> {
    /// Wraps a transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the wrapped transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: RpcTransport> RpcExecutor for MarkupExecutor<T> {
    fn execute(&self, request: RpcRequest) -> Result<Document, RpcError> {
        let (document, fault) = request.into_parts();
        let markup = document.to_string();
        debug!(target: EXECUTOR_TARGET, bytes = markup.len(), "sending request");
        let raw = self.transport.exchange(&markup)?;
        let reply = Document::parse(&raw).map_err(|source| RpcError::InvalidReply { source })?;
        fault.check_reply(reply)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use rstest::rstest;

    use super::*;
    use crate::request::{command, commit_configuration};

    struct Recording {
        reply: String,
        sent: RefCell<Vec<String>>,
    }

    impl Recording {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_owned(),
                sent: RefCell::default(),
            }
        }
    }

    impl RpcTransport for Recording {
        fn exchange(&self, request: &str) -> Result<String, RpcError> {
            self.sent.borrow_mut().push(request.to_owned());
            Ok(self.reply.clone())
        }
    }

    struct Broken;

    impl RpcTransport for Broken {
        fn exchange(&self, _request: &str) -> Result<String, RpcError> {
            Err(RpcError::transport("session closed"))
        }
    }

    const COMMIT_FAILED: &str = "<rpc-reply><rpc-error><error-severity>error</error-severity>\
        <error-message>commit check failed</error-message></rpc-error></rpc-reply>";

    #[rstest]
    fn serialises_request_and_returns_reply() {
        let executor = MarkupExecutor::new(Recording::replying("<rpc-reply><ok/></rpc-reply>"));
        let reply = executor
            .execute(command("show version", None).expect("build"))
            .expect("execute");

        assert!(reply.contains("ok"));
        assert_eq!(
            executor.transport().sent.borrow().as_slice(),
            ["<rpc><command>show version</command></rpc>"]
        );
    }

    #[rstest]
    fn reply_faults_raise_the_request_classification() {
        let executor = MarkupExecutor::new(Recording::replying(COMMIT_FAILED));
        let err = executor
            .execute(commit_configuration(None, None).expect("build"))
            .expect_err("commit should fail");
        assert!(matches!(err, RpcError::Commit { .. }), "got: {err}");
        assert_eq!(err.faults().len(), 1);
    }

    #[rstest]
    fn malformed_reply_is_reported() {
        let executor = MarkupExecutor::new(Recording::replying("<rpc-reply>"));
        let err = executor
            .execute(command("show version", None).expect("build"))
            .expect_err("malformed reply");
        assert!(matches!(err, RpcError::InvalidReply { .. }));
    }

    #[rstest]
    fn transport_failure_propagates() {
        let executor = MarkupExecutor::new(Broken);
        let err = executor
            .execute(command("show version", None).expect("build"))
            .expect_err("transport failure");
        assert!(matches!(err, RpcError::Transport { .. }));
    }

    #[rstest]
    fn borrowed_executor_delegates() {
        let executor = MarkupExecutor::new(Recording::replying("<rpc-reply><ok/></rpc-reply>"));
        let client = crate::JunosRpc::new(&executor);
        client
            .command("show chassis hardware", None)
            .expect("execute");
        assert_eq!(executor.transport().sent.borrow().len(), 1);
    }
}
