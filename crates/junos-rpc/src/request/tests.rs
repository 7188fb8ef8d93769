//! Unit tests for request assembly.

use netconf_xml::{Document, DocumentError, Element};
use rstest::{fixture, rstest};

use super::*;
use crate::content::ContentCallback;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn operation(request: &RpcRequest) -> &Element {
    request.operation().expect("operation element")
}

fn no_args() -> Vec<RpcArg> {
    Vec::new()
}

#[fixture]
fn interfaces_config() -> Element {
    Element::new("configuration").with_child(
        Element::new("interfaces").with_child(
            Element::new("interface").with_child(Element::new("name").with_text("ge-0/0/0")),
        ),
    )
}

// ---------------------------------------------------------------------------
// Target-shaped operations
// ---------------------------------------------------------------------------

#[rstest]
#[case::lock(lock_configuration(), "lock")]
#[case::unlock(unlock_configuration(), "unlock")]
#[case::validate(validate_configuration(), "validate")]
fn target_operations_select_the_candidate(#[case] request: RpcRequest, #[case] name: &str) {
    assert_eq!(
        request.document().to_string(),
        format!("<rpc><{name}><target><candidate/></target></{name}></rpc>")
    );
    assert_eq!(request.fault(), FaultKind::Generic);
    assert_eq!(request.operation_name(), name);
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

#[rstest]
fn bare_commit_is_an_empty_element_tagged_commit() {
    let request = commit_configuration(None, None).expect("build");
    assert_eq!(
        request.document().to_string(),
        "<rpc><commit-configuration/></rpc>"
    );
    assert_eq!(request.fault(), FaultKind::Commit);
}

#[rstest]
fn commit_params_become_children_and_attrs_attributes() {
    let params = Attributes::from([("confirmed", ""), ("confirm-timeout", "5")]);
    let attrs = Attributes::from([("xmlns:junos", "http://xml.juniper.net/junos/*/junos")]);
    let request = commit_configuration(Some(&params), Some(&attrs)).expect("build");
    let commit = operation(&request);

    assert!(commit.child("confirmed").is_some_and(|c| c.children().is_empty()));
    assert_eq!(
        commit.child("confirm-timeout").map(Element::text).as_deref(),
        Some("5")
    );
    assert_eq!(
        commit.attribute("xmlns:junos"),
        Some("http://xml.juniper.net/junos/*/junos")
    );
}

#[rstest]
#[case::param_name(Attributes::from([("bad name", "")]), None, "params", "not a valid XML name")]
#[case::param_value(
    Attributes::from([("comment", "x\u{1}")]),
    None,
    "params",
    "holds a character XML forbids"
)]
#[case::attribute_name(
    Attributes::new(),
    Some(Attributes::from([("<junos>", "1")])),
    "attrs",
    "not a valid XML name"
)]
fn commit_rejects_entries_xml_cannot_carry(
    #[case] params: Attributes,
    #[case] attrs: Option<Attributes>,
    #[case] expected_argument: &str,
    #[case] expected_reason: &str,
) {
    let err = commit_configuration(Some(&params), attrs.as_ref()).expect_err("rejected");
    assert!(
        matches!(
            &err,
            ConfigurationError::InvalidArgument { operation: "commit-configuration", argument, reason }
                if *argument == expected_argument && *reason == expected_reason
        ),
        "got: {err}"
    );
}

// ---------------------------------------------------------------------------
// Get configuration
// ---------------------------------------------------------------------------

#[rstest]
fn get_configuration_without_arguments() {
    let request = get_configuration(no_args(), None).expect("build");
    assert_eq!(
        request.document().to_string(),
        "<rpc><get-configuration/></rpc>"
    );
    assert_eq!(request.fault(), FaultKind::Generic);
}

#[rstest]
fn get_configuration_attaches_a_copy_of_the_filter(interfaces_config: Element) {
    let original = interfaces_config.clone();
    let request = get_configuration(
        [
            RpcArg::from(&interfaces_config),
            RpcArg::from(Attributes::from([("database", "committed")])),
        ],
        None,
    )
    .expect("build");

    let (mut document, _) = request.into_parts();
    let get = document.root_mut().child_mut("get-configuration").expect("get");
    assert_eq!(get.attribute("database"), Some("committed"));
    assert_eq!(get.first_element(), Some(&interfaces_config));

    get.push(Element::new("injected"));
    get.child_mut("configuration")
        .expect("configuration")
        .set_attribute("changed", "yes");
    assert_eq!(interfaces_config, original);
}

#[rstest]
fn get_configuration_prefers_the_callback(interfaces_config: Element) {
    let request = get_configuration(
        [RpcArg::from(interfaces_config)],
        Some(ContentCallback::structured(|config| {
            config.empty("system");
        })),
    )
    .expect("build");

    assert_eq!(
        request.document().to_string(),
        "<rpc><get-configuration><configuration><system/></configuration>\
         </get-configuration></rpc>"
    );
}

#[rstest]
fn get_configuration_ignores_text() {
    let request = get_configuration([RpcArg::from("interfaces")], None).expect("build");
    assert!(operation(&request).children().is_empty());
}

#[rstest]
fn get_configuration_rejects_textual_callback() {
    let err = get_configuration(no_args(), Some(ContentCallback::textual(|| "x")))
        .expect_err("textual callback");
    assert!(matches!(
        err,
        ConfigurationError::CallbackShape {
            expected: "structured",
            found: "textual",
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Load configuration
// ---------------------------------------------------------------------------

#[rstest]
fn load_defaults_to_xml(interfaces_config: Element) {
    let request =
        load_configuration([RpcArg::from(&interfaces_config)], None, LoadFormat::Xml)
            .expect("build");
    let load = operation(&request);

    assert_eq!(load.attribute("format"), Some("xml"));
    assert_eq!(load.first_element().map(Element::name), Some("configuration"));
    assert_eq!(request.fault(), FaultKind::Edit);
}

#[rstest]
fn load_xml_callback_writes_under_configuration() {
    let request = load_configuration(
        [RpcArg::from(Attributes::from([("action", "merge")]))],
        Some(ContentCallback::structured(|config| {
            config.element("system", |system| {
                system.leaf("host-name", "edge-1");
            });
        })),
        LoadFormat::Xml,
    )
    .expect("build");

    assert_eq!(
        request.document().to_string(),
        "<rpc><load-configuration action=\"merge\" format=\"xml\"><configuration>\
         <system><host-name>edge-1</host-name></system></configuration>\
         </load-configuration></rpc>"
    );
}

#[rstest]
fn load_xml_text_is_parsed_as_markup() {
    let request = load_configuration(
        [RpcArg::from("<configuration><system/></configuration>")],
        None,
        LoadFormat::Xml,
    )
    .expect("build");
    let body = operation(&request).first_element().expect("body");
    assert_eq!(body.name(), "configuration");
    assert!(body.child("system").is_some());
}

#[rstest]
fn load_xml_rejects_malformed_text() {
    let err = load_configuration([RpcArg::from("<configuration>")], None, LoadFormat::Xml)
        .expect_err("malformed");
    assert!(matches!(err, ConfigurationError::InvalidContent { .. }));
}

#[rstest]
fn load_xml_text_keeps_prefixes_declarations_and_blank_leaves() {
    let markup = "<configuration xmlns:junos=\"http://xml.juniper.net/junos/*/junos\">\
        <system><junos:comment>/* edge */</junos:comment><host-name>edge</host-name>\
        <location><building> </building></location></system></configuration>";
    let request =
        load_configuration([RpcArg::from(markup)], None, LoadFormat::Xml).expect("build");
    let body = operation(&request).first_element().expect("body");

    assert_eq!(body.to_string(), markup);
}

#[rstest]
fn load_rejects_structured_content_with_an_invalid_name() {
    let err = load_configuration(
        no_args(),
        Some(ContentCallback::structured(|config| {
            config.leaf("host name", "edge");
        })),
        LoadFormat::Xml,
    )
    .expect_err("invalid name");
    assert!(
        matches!(
            &err,
            ConfigurationError::InvalidContent {
                source: DocumentError::InvalidName { name }
            } if name == "host name"
        ),
        "got: {err}"
    );
}

#[rstest]
fn get_rejects_an_option_name_xml_cannot_carry() {
    let err = get_configuration([RpcArg::from(Attributes::from([("a b", "1")]))], None)
        .expect_err("invalid option");
    assert!(matches!(err, ConfigurationError::InvalidContent { .. }));
}

#[rstest]
fn load_text_wraps_content_in_configuration_text() {
    let request = load_configuration(
        [
            RpcArg::from(Attributes::from([("format", "text")])),
            RpcArg::from("system { host-name edge-1; }"),
        ],
        None,
        LoadFormat::Xml,
    )
    .expect("build");

    assert_eq!(
        request.document().to_string(),
        "<rpc><load-configuration format=\"text\"><configuration-text>\
         system { host-name edge-1; }</configuration-text></load-configuration></rpc>"
    );
}

#[rstest]
#[case::no_overrides(Attributes::from([("format", "set")]))]
#[case::caller_action(Attributes::from([("format", "set"), ("action", "replace")]))]
fn load_set_forces_text_format_and_set_action(#[case] options: Attributes) {
    let request = load_configuration(
        [
            RpcArg::from(options),
            RpcArg::from(vec!["set system host-name edge-1", "delete system ntp"]),
        ],
        None,
        LoadFormat::Xml,
    )
    .expect("build");
    let load = operation(&request);

    assert_eq!(load.attribute("format"), Some("text"));
    assert_eq!(load.attribute("action"), Some("set"));
    let body = load.first_element().expect("body");
    assert_eq!(body.name(), "configuration-set");
    assert_eq!(
        body.text(),
        "set system host-name edge-1\ndelete system ntp"
    );
}

#[rstest]
fn load_textual_callback_lines_are_joined() {
    let request = load_configuration(
        [RpcArg::from(Attributes::from([("format", "set")]))],
        Some(ContentCallback::textual(|| vec!["set a", "set b"])),
        LoadFormat::Xml,
    )
    .expect("build");
    let body = operation(&request).child("configuration-set").expect("body");
    assert_eq!(body.text(), "set a\nset b");
}

#[rstest]
fn load_text_serialises_a_subtree(interfaces_config: Element) {
    let request = load_configuration(
        [
            RpcArg::from(&interfaces_config),
            RpcArg::from(Attributes::from([("format", "text")])),
        ],
        None,
        LoadFormat::Xml,
    )
    .expect("build");
    let body = operation(&request).child("configuration-text").expect("body");
    assert_eq!(body.text(), interfaces_config.to_string());
}

#[rstest]
#[case::structured_for_text(
    "text",
    ContentCallback::structured(|config| {
        config.empty("system");
    }),
    "textual"
)]
#[case::textual_for_xml("xml", ContentCallback::textual(|| "set a"), "structured")]
fn load_rejects_mismatched_callback(
    #[case] format: &str,
    #[case] callback: ContentCallback<'static>,
    #[case] expected: &str,
) {
    let err = load_configuration(
        [RpcArg::from(Attributes::from([("format", format)]))],
        Some(callback),
        LoadFormat::Xml,
    )
    .expect_err("mismatched callback");
    assert!(
        matches!(&err, ConfigurationError::CallbackShape { expected: e, .. } if *e == expected),
        "got: {err}"
    );
}

#[rstest]
fn load_rejects_unknown_format_before_invoking_callback() {
    let mut invoked = false;
    let err = load_configuration(
        [RpcArg::from(Attributes::from([("format", "json")]))],
        Some(ContentCallback::structured(|_| invoked = true)),
        LoadFormat::Xml,
    )
    .expect_err("unknown format");
    assert!(matches!(err, ConfigurationError::UnknownFormat { .. }));
    assert!(!invoked);
}

#[rstest]
fn load_uses_configured_default_format() {
    let request = load_configuration([RpcArg::from("set a")], None, LoadFormat::Set)
        .expect("build");
    let load = operation(&request);
    assert_eq!(load.attribute("format"), Some("text"));
    assert!(load.child("configuration-set").is_some());
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

#[rstest]
fn command_text_is_escaped_not_spliced() {
    let attrs = Attributes::from([("format", "text")]);
    let request = command("show route <x> & more", Some(&attrs)).expect("build");

    assert_eq!(
        request.document().to_string(),
        "<rpc><command format=\"text\">show route &lt;x&gt; &amp; more</command></rpc>"
    );
    let reparsed = Document::parse(&request.document().to_string()).expect("reparse");
    assert_eq!(&reparsed, request.document());
}

#[rstest]
#[case::control_character("show\u{1}x", None)]
#[case::nul("show version\0", None)]
#[case::attribute_name("show version", Some(Attributes::from([("bad name", "text")])))]
fn command_rejects_text_xml_cannot_carry(
    #[case] text: &str,
    #[case] attrs: Option<Attributes>,
) {
    let err = command(text, attrs.as_ref()).expect_err("command should be rejected");
    assert!(
        matches!(err, ConfigurationError::InvalidArgument { operation: "command", .. }),
        "got: {err}"
    );
}

// ---------------------------------------------------------------------------
// PFE execute
// ---------------------------------------------------------------------------

#[rstest]
fn pfe_execute_repeats_commands_in_order() {
    let params = Params::new()
        .with("target", "fpc0")
        .with("command", vec!["show a", "show b"]);
    let request = request_pfe_execute(&params).expect("build");

    assert_eq!(
        request.document().to_string(),
        "<rpc><request-pfe-execute><target>fpc0</target><command>show a</command>\
         <command>show b</command></request-pfe-execute></rpc>"
    );
}

#[rstest]
fn pfe_execute_accepts_a_single_command() {
    let params = Params::new().with("target", "fpc0").with("command", "show jnh 0 pool");
    let request = request_pfe_execute(&params).expect("build");
    let commands: Vec<String> = operation(&request)
        .descendants("command")
        .map(Element::text)
        .collect();
    assert_eq!(commands, ["show jnh 0 pool"]);
}

#[rstest]
#[case::no_command(Params::new().with("target", "fpc0"), "command")]
#[case::no_target(Params::new().with("command", "show a"), "target")]
#[case::empty(Params::new(), "target")]
fn pfe_execute_requires_target_and_command(#[case] params: Params, #[case] missing: &str) {
    let err = request_pfe_execute(&params).expect_err("missing argument");
    assert!(
        matches!(&err, ConfigurationError::MissingArgument { argument, .. } if *argument == missing),
        "got: {err}"
    );
}

#[rstest]
fn pfe_execute_rejects_a_target_list() {
    let params = Params::new()
        .with("target", vec!["fpc0", "fpc1"])
        .with("command", "show a");
    let err = request_pfe_execute(&params).expect_err("list target");
    assert!(matches!(err, ConfigurationError::InvalidArgument { .. }));
}

#[rstest]
fn pfe_execute_rejects_control_characters() {
    let params = Params::new().with("target", "fpc0").with("command", "show\u{7}");
    let err = request_pfe_execute(&params).expect_err("control character");
    assert!(
        matches!(
            &err,
            ConfigurationError::InvalidContent {
                source: DocumentError::InvalidText { element }
            } if element == "command"
        ),
        "got: {err}"
    );
}

// ---------------------------------------------------------------------------
// Rollback
// ---------------------------------------------------------------------------

#[rstest]
#[case::first(0)]
#[case::fifth(5)]
#[case::last(MAX_ROLLBACK)]
fn rollback_loads_the_snapshot_as_xml(#[case] index: u32) {
    let request = rollback(index).expect("build");
    let load = operation(&request);

    assert_eq!(load.name(), "load-configuration");
    assert_eq!(load.attribute("rollback"), Some(index.to_string().as_str()));
    assert_eq!(load.attribute("format"), Some("xml"));
    assert!(load.children().is_empty());
    assert_eq!(request.fault(), FaultKind::Edit);
}

#[rstest]
#[case::just_past(50)]
#[case::far_past(u32::MAX)]
fn rollback_rejects_out_of_range_indices(#[case] index: u32) {
    let err = rollback(index).expect_err("out of range");
    assert!(matches!(
        err,
        ConfigurationError::RollbackOutOfRange { index: i, max: 49 } if i == index
    ));
}
