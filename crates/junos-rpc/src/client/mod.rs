//! Client entry points.
//!
//! [`JunosRpc`] is the surface callers use. Each method assembles a request
//! with the functions in [`request`](crate::request), hands it to the
//! configured [`RpcExecutor`], and returns the reply. Configuration errors
//! are raised before the executor is reached.

use netconf_xml::Document;
use tracing::debug;

use crate::attributes::Attributes;
use crate::classify::RpcArg;
use crate::config::RpcConfig;
use crate::content::ContentCallback;
use crate::error::RpcError;
use crate::executor::RpcExecutor;
use crate::params::Params;
use crate::request::{self, RpcRequest, names};

/// Tracing target for client dispatch.
pub(crate) const CLIENT_TARGET: &str = "junos_rpc::client";

/// Configuration-management client over an executor.
///
/// # Example
///
/// ```
/// use junos_rpc::{JunosRpc, RpcError, RpcExecutor, RpcRequest};
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
///
/// let client = JunosRpc::new(AlwaysOk);
/// client.lock_configuration().unwrap();
/// assert!(client.rollback(1).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct JunosRpc<E> {
    executor: E,
    config: RpcConfig,
}

impl<E> JunosRpc<E> {
    /// Creates a client with the default configuration.
    #[must_use]
    pub fn new(executor: E) -> Self {
        Self::with_config(executor, RpcConfig::default())
    }

    /// Creates a client with the given configuration.
    #[must_use]
    pub const fn with_config(executor: E, config: RpcConfig) -> Self {
        Self { executor, config }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Returns the executor.
    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }
}

impl<E: RpcExecutor> JunosRpc<E> {
    /// Locks the candidate configuration.
    ///
    /// # Errors
    ///
    /// Returns whatever the executor raises.
    pub fn lock_configuration(&self) -> Result<Document, RpcError> {
        self.dispatch(request::lock_configuration())
    }

    /// Releases the candidate lock.
    ///
    /// # Errors
    ///
    /// Returns whatever the executor raises.
    pub fn unlock_configuration(&self) -> Result<Document, RpcError> {
        self.dispatch(request::unlock_configuration())
    }

    /// Validates the candidate configuration without committing it.
    ///
    /// # Errors
    ///
    /// Returns whatever the executor raises.
    pub fn check_configuration(&self) -> Result<Document, RpcError> {
        self.dispatch(request::validate_configuration())
    }

    /// Commits the candidate configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Configuration`] when a parameter or attribute
    /// cannot be written as XML, [`RpcError::Commit`] when the reply reports
    /// errors, or any transport failure.
    pub fn commit_configuration(
        &self,
        params: Option<&Attributes>,
        attrs: Option<&Attributes>,
    ) -> Result<Document, RpcError> {
        self.dispatch(request::commit_configuration(params, attrs)?)
    }

    /// Retrieves configuration, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns whatever the executor raises.
    pub fn get_configuration<I>(&self, args: I) -> Result<Document, RpcError>
    where
        I: IntoIterator<Item = RpcArg>,
    {
        self.dispatch(request::get_configuration(args, None)?)
    }

    /// Retrieves configuration using a callback to build the filter.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Configuration`] for a textual callback, otherwise
    /// whatever the executor raises.
    pub fn get_configuration_with<I>(
        &self,
        args: I,
        callback: ContentCallback<'_>,
    ) -> Result<Document, RpcError>
    where
        I: IntoIterator<Item = RpcArg>,
    {
        self.dispatch(request::get_configuration(args, Some(callback))?)
    }

    /// Loads configuration into the candidate.
    ///
    /// The format defaults to the configured load format.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Configuration`] for bad arguments and
    /// [`RpcError::Edit`] when the reply reports errors.
    pub fn load_configuration<I>(&self, args: I) -> Result<Document, RpcError>
    where
        I: IntoIterator<Item = RpcArg>,
    {
        self.dispatch(request::load_configuration(
            args,
            None,
            self.config.load_format(),
        )?)
    }

    /// Loads configuration produced by a callback.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Configuration`] for bad arguments or a callback
    /// that does not suit the format, and [`RpcError::Edit`] when the reply
    /// reports errors.
    pub fn load_configuration_with<I>(
        &self,
        args: I,
        callback: ContentCallback<'_>,
    ) -> Result<Document, RpcError>
    where
        I: IntoIterator<Item = RpcArg>,
    {
        self.dispatch(request::load_configuration(
            args,
            Some(callback),
            self.config.load_format(),
        )?)
    }

    /// Runs an operational CLI command.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Configuration`] when the command text holds a
    /// character XML forbids, otherwise whatever the executor raises.
    pub fn command(&self, command: &str, attrs: Option<&Attributes>) -> Result<Document, RpcError> {
        self.dispatch(request::command(command, attrs)?)
    }

    /// Runs packet forwarding engine diagnostic commands.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Configuration`] when `target` or `command` is
    /// missing, otherwise whatever the executor raises.
    pub fn request_pfe_execute(&self, params: &Params) -> Result<Document, RpcError> {
        self.dispatch(request::request_pfe_execute(params)?)
    }

    /// Restores rollback snapshot `index` into the candidate.
    ///
    /// Returns whether the reply carried an `<ok/>` marker.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Configuration`] for an index above
    /// [`MAX_ROLLBACK`](crate::request::MAX_ROLLBACK) and [`RpcError::Edit`]
    /// when the reply reports errors.
    pub fn rollback(&self, index: u32) -> Result<bool, RpcError> {
        let reply = self.dispatch(request::rollback(index)?)?;
        Ok(reply.contains(names::OK))
    }

    fn dispatch(&self, request: RpcRequest) -> Result<Document, RpcError> {
        debug!(
            target: CLIENT_TARGET,
            operation = request.operation_name(),
            fault = %request.fault(),
            "dispatching request"
        );
        self.executor.execute(request)
    }
}
