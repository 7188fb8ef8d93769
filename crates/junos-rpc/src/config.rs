//! Client configuration.
//!
//! [`RpcConfig`] carries the few knobs the client consults: the tracing
//! filter and output format used by [`telemetry`](crate::telemetry), and the
//! load format applied when a load call does not name one. Every field has a
//! default, so a partial document deserialises cleanly.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::format::LoadFormat;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON, one object per event.
    #[default]
    Json,
    /// Human-readable single line output.
    Compact,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Configuration for a [`JunosRpc`](crate::JunosRpc) client.
///
/// ```
/// use junos_rpc::{LoadFormat, LogFormat, RpcConfig};
///
/// let config = RpcConfig::default().with_load_format(LoadFormat::Set);
/// assert_eq!(config.log_filter(), "info");
/// assert_eq!(config.log_format(), LogFormat::Json);
/// assert_eq!(config.load_format(), LoadFormat::Set);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    #[serde(default = "default_log_filter")]
    log_filter: String,
    log_format: LogFormat,
    load_format: LoadFormat,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            log_format: LogFormat::default(),
            load_format: LoadFormat::default(),
        }
    }
}

impl RpcConfig {
    /// Returns the tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the format used when a load names none.
    #[must_use]
    pub const fn load_format(&self) -> LoadFormat {
        self.load_format
    }

    /// Replaces the tracing filter expression.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Replaces the log output format.
    #[must_use]
    pub const fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Replaces the default load format.
    #[must_use]
    pub const fn with_load_format(mut self, format: LoadFormat) -> Self {
        self.load_format = format;
        self
    }
}
