//! Crate-level integration and BDD tests.

use crate::error::RpcError;
use crate::executor::{MarkupExecutor, RpcTransport};
use crate::{JunosRpc, RpcArg};


/// Transport that answers every request with the same reply.
struct CannedTransport {
    reply: &'static str,
}

impl RpcTransport for CannedTransport {
    fn exchange(&self, _request: &str) -> Result<String, RpcError> {
        Ok(self.reply.to_owned())
    }
}

const OK_REPLY: &str = "<rpc-reply><ok/></rpc-reply>";

const COMMIT_FAILURE: &str = "<rpc-reply xmlns:junos=\"http://xml.juniper.net/junos/*/junos\">\
    <rpc-error><error-type>protocol</error-type><error-tag>operation-failed</error-tag>\
    <error-severity>error</error-severity>\
    <error-message>configuration check-out failed</error-message></rpc-error></rpc-reply>";

const LOAD_WARNING: &str = "<rpc-reply><load-configuration-results><rpc-error>\
    <error-severity>warning</error-severity><error-message>statement not found</error-message>\
    </rpc-error><ok/></load-configuration-results></rpc-reply>";

fn canned_client(reply: &'static str) -> JunosRpc<MarkupExecutor<CannedTransport>> {
    JunosRpc::new(MarkupExecutor::new(CannedTransport { reply }))
}

#[test]
fn end_to_end_load_and_commit() {
    let client = canned_client(OK_REPLY);
    client.lock_configuration().expect("lock");
    client
        .load_configuration([RpcArg::from("<configuration><system/></configuration>")])
        .expect("load");
    client.commit_configuration(None, None).expect("commit");
    client.unlock_configuration().expect("unlock");
}

#[test]
fn end_to_end_commit_failure_carries_device_detail() {
    let client = canned_client(COMMIT_FAILURE);
    let err = client
        .commit_configuration(None, None)
        .expect_err("commit should fail");
    assert_eq!(
        err.to_string(),
        "commit failed: error: configuration check-out failed"
    );
}
