//! Process-wide subscriber installation.
//!
//! Installation is global, so these checks live in their own test binary.

use junos_rpc::telemetry::{self, CRATE_TARGET};
use junos_rpc::{LogFormat, RpcConfig};

#[test]
fn first_call_installs_and_later_calls_report_it() {
    let config = RpcConfig::default()
        .with_log_filter("debug")
        .with_log_format(LogFormat::Compact);

    let first = telemetry::initialise(&config).expect("install subscriber");
    assert!(first.installed());
    assert_eq!(first.directives(), format!("warn,{CRATE_TARGET}=debug"));
    tracing::debug!(target: "junos_rpc::client", "subscriber is live");

    let second = telemetry::initialise(&RpcConfig::default().with_log_filter("junos_rpc=loud"))
        .expect("already installed");
    assert!(!second.installed());
    assert_eq!(second.directives(), first.directives());
}
