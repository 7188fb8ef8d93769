//! Tracing subscriber setup for processes embedding the client.
//!
//! The library only emits events, each on one of the [`TARGETS`]. A binary
//! that wants them written out calls [`initialise`] once with its
//! [`RpcConfig`]. A bare level such as `debug` in
//! [`RpcConfig::log_filter`] is scoped to this crate, leaving other crates at
//! `warn`; any other value is used as a full `EnvFilter` expression.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing_subscriber::filter::{LevelFilter, ParseError};
use tracing_subscriber::fmt::{self, time::UtcTime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer};

use crate::classify::CLASSIFY_TARGET;
use crate::client::CLIENT_TARGET;
use crate::config::{LogFormat, RpcConfig};
use crate::executor::EXECUTOR_TARGET;
use crate::fault::FAULT_TARGET;
use crate::request::REQUEST_TARGET;

/// Root target shared by every event the crate emits.
pub const CRATE_TARGET: &str = "junos_rpc";

/// Tracing targets the crate emits on, one per stage of a call.
pub const TARGETS: [&str; 5] = [
    CLASSIFY_TARGET,
    REQUEST_TARGET,
    CLIENT_TARGET,
    EXECUTOR_TARGET,
    FAULT_TARGET,
];

/// Directives of the installed subscriber, set by the first successful call.
static ACTIVE: OnceCell<String> = OnceCell::new();

/// Outcome of an [`initialise`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryHandle {
    directives: String,
    installed: bool,
}

impl TelemetryHandle {
    /// Returns the filter directives the process subscriber was built with.
    ///
    /// After the first call this reflects the configuration that installed
    /// the subscriber, not the one passed most recently.
    #[must_use]
    pub fn directives(&self) -> &str {
        &self.directives
    }

    /// Reports whether this call installed the subscriber.
    #[must_use]
    pub const fn installed(&self) -> bool {
        self.installed
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The filter expression did not parse.
    #[error("invalid log filter '{directives}': {source}")]
    Filter {
        /// Directives derived from the configured filter.
        directives: String,
        /// Parser failure.
        #[source]
        source: ParseError,
    },
    /// A subscriber from outside this module already owns the process.
    #[error("another tracing subscriber is already installed: {source}")]
    Subscriber {
        /// Installation failure.
        #[source]
        source: TryInitError,
    },
}

/// Expands the configured filter into `EnvFilter` directives.
///
/// ```
/// use junos_rpc::RpcConfig;
/// use junos_rpc::telemetry::directives;
///
/// assert_eq!(directives(&RpcConfig::default()), "warn,junos_rpc=info");
/// assert_eq!(
///     directives(&RpcConfig::default().with_log_filter("junos_rpc::fault=trace")),
///     "junos_rpc::fault=trace"
/// );
/// ```
#[must_use]
pub fn directives(config: &RpcConfig) -> String {
    let filter = config.log_filter().trim();
    filter.parse::<LevelFilter>().map_or_else(
        |_| filter.to_owned(),
        |level| {
            format!(
                "{},{CRATE_TARGET}={}",
                LevelFilter::WARN.min(level).to_string().to_ascii_lowercase(),
                level.to_string().to_ascii_lowercase()
            )
        },
    )
}

/// Installs the process-wide subscriber on first use.
///
/// Later calls leave global state alone and report the directives already in
/// force. Library code never calls this; binaries embedding the client do.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for a malformed filter and
/// [`TelemetryError::Subscriber`] when another subscriber is already set.
///
/// # Examples
///
/// ```rust
/// use junos_rpc::{RpcConfig, telemetry};
///
/// # fn main() -> Result<(), junos_rpc::telemetry::TelemetryError> {
/// let config = RpcConfig::default();
/// let first = telemetry::initialise(&config)?;
/// let second = telemetry::initialise(&config.clone().with_log_filter("trace"))?;
///
/// assert!(first.installed());
/// assert!(!second.installed());
/// assert_eq!(second.directives(), first.directives());
/// # Ok(())
/// # }
/// ```
pub fn initialise(config: &RpcConfig) -> Result<TelemetryHandle, TelemetryError> {
    let mut installed = false;
    let active = ACTIVE.get_or_try_init(|| {
        let wanted = directives(config);
        install(config, &wanted)?;
        installed = true;
        Ok::<_, TelemetryError>(wanted)
    })?;
    Ok(TelemetryHandle {
        directives: active.clone(),
        installed,
    })
}

fn build_filter(directives: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse(directives)
        .map_err(|source| TelemetryError::Filter {
            directives: directives.to_owned(),
            source,
        })
}

fn install(config: &RpcConfig, directives: &str) -> Result<(), TelemetryError> {
    let filter = build_filter(directives)?;
    let layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(UtcTime::rfc_3339());

    let output = match config.log_format() {
        LogFormat::Json => layer.json().flatten_event(true).with_filter(filter).boxed(),
        LogFormat::Compact => layer.compact().with_filter(filter).boxed(),
    };

    tracing_subscriber::registry()
        .with(output)
        .try_init()
        .map_err(|source| TelemetryError::Subscriber { source })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::default("info", "warn,junos_rpc=info")]
    #[case::verbose("DEBUG", "warn,junos_rpc=debug")]
    #[case::quieter_than_warn("error", "error,junos_rpc=error")]
    #[case::silenced(" off ", "off,junos_rpc=off")]
    #[case::expression("junos_rpc::request=trace", "junos_rpc::request=trace")]
    #[case::mixed("info,netconf=debug", "info,netconf=debug")]
    fn bare_levels_are_scoped_to_the_crate(#[case] filter: &str, #[case] expected: &str) {
        let config = RpcConfig::default().with_log_filter(filter);
        assert_eq!(directives(&config), expected);
    }

    #[rstest]
    fn every_target_sits_under_the_crate_target() {
        for target in TARGETS {
            assert!(
                target.starts_with(&format!("{CRATE_TARGET}::")),
                "{target} escapes the crate directive"
            );
        }
    }

    #[rstest]
    fn malformed_filter_is_rejected() {
        let config = RpcConfig::default().with_log_filter("junos_rpc=loud");
        let err = build_filter(&directives(&config)).expect_err("filter should fail");
        assert!(
            matches!(&err, TelemetryError::Filter { directives: filter, .. } if filter == "junos_rpc=loud"),
            "got: {err}"
        );
    }
}
