//! Request compiler for Junos configuration-management RPCs.
//!
//! The crate turns high-level calls such as "load this configuration" or
//! "roll back to snapshot 3" into `<rpc>` documents, and classifies the
//! device's replies so a failed commit surfaces differently from a failed
//! load. Session handling stays outside: an [`RpcExecutor`] moves assembled
//! requests to the device.
//!
//! - [`classify`](mod@classify) sorts loosely typed arguments into content and options.
//! - [`format`] resolves the load format and the body element it implies.
//! - [`request`] assembles one [`RpcRequest`] per operation.
//! - [`fault`] reads `<rpc-error>` entries from replies.
//! - [`JunosRpc`] ties assembly to an executor.
//!
//! # Example
//!
//! ```
//! use junos_rpc::{Attributes, LoadFormat, RpcArg, request};
//!
//! let request = request::load_configuration(
//!     [
//!         RpcArg::from(Attributes::from([("format", "set")])),
//!         RpcArg::from(vec!["set system host-name edge-1"]),
//!     ],
//!     None,
//!     LoadFormat::Xml,
//! )?;
//! assert_eq!(
//!     request.document().to_string(),
//!     "<rpc><load-configuration action=\"set\" format=\"text\">\
//!      <configuration-set>set system host-name edge-1</configuration-set>\
//!      </load-configuration></rpc>",
//! );
//! # Ok::<(), junos_rpc::ConfigurationError>(())
//! ```

pub mod attributes;
pub mod classify;
mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod executor;
pub mod fault;
pub mod format;
mod params;
pub mod request;
pub mod telemetry;

pub use attributes::Attributes;
pub use classify::{Classified, RpcArg, classify};
pub use client::JunosRpc;
pub use config::{LogFormat, RpcConfig};
pub use content::{ContentCallback, ContentPayload, TextPayload};
pub use error::{ConfigurationError, RpcError};
pub use executor::{MarkupExecutor, RpcExecutor, RpcTransport};
pub use fault::{FaultKind, FaultSeverity, RpcFault};
pub use format::LoadFormat;
pub use params::{ParamValue, Params};
pub use request::RpcRequest;

#[cfg(test)]
mod tests;
