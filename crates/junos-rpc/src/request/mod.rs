//! Request assembly.
//!
//! Each function here compiles one operation into an [`RpcRequest`]: the
//! `<rpc>` document paired with the [`FaultKind`] its replies are judged by.
//! Assembly performs no I/O and touches no caller-owned data; content is
//! moved in by value, and callers keep their originals by handing over
//! copies.
//!
//! Every configuration error is raised before the request is returned, so a
//! failed call never yields a partial request. Caller-supplied names and text
//! are checked against XML's rules as part of assembly.

use netconf_xml::{Document, Element, is_name, is_text};
use tracing::debug;

use crate::attributes::{self, Attributes};
use crate::classify::{Classified, RpcArg, classify};
use crate::content::{ContentCallback, ContentPayload};
use crate::error::ConfigurationError;
use crate::fault::FaultKind;
use crate::format::{self, LoadFormat};
use crate::params::{ParamValue, Params};

/// Element and attribute names used in request documents.
pub mod names {
    /// Document root.
    pub const RPC: &str = "rpc";
    /// Configuration retrieval.
    pub const GET_CONFIGURATION: &str = "get-configuration";
    /// Configuration load.
    pub const LOAD_CONFIGURATION: &str = "load-configuration";
    /// Candidate lock.
    pub const LOCK: &str = "lock";
    /// Candidate unlock.
    pub const UNLOCK: &str = "unlock";
    /// Candidate validation.
    pub const VALIDATE: &str = "validate";
    /// Commit.
    pub const COMMIT_CONFIGURATION: &str = "commit-configuration";
    /// Opaque CLI command.
    pub const COMMAND: &str = "command";
    /// Packet forwarding engine diagnostic command.
    pub const REQUEST_PFE_EXECUTE: &str = "request-pfe-execute";
    /// Datastore selector.
    pub const TARGET: &str = "target";
    /// Candidate datastore.
    pub const CANDIDATE: &str = "candidate";
    /// XML configuration body.
    pub const CONFIGURATION: &str = "configuration";
    /// Text configuration body.
    pub const CONFIGURATION_TEXT: &str = "configuration-text";
    /// `set` command body.
    pub const CONFIGURATION_SET: &str = "configuration-set";
    /// Load format attribute.
    pub const FORMAT_ATTRIBUTE: &str = "format";
    /// Load action attribute.
    pub const ACTION_ATTRIBUTE: &str = "action";
    /// Rollback index attribute.
    pub const ROLLBACK_ATTRIBUTE: &str = "rollback";
    /// Success marker in replies.
    pub const OK: &str = "ok";
}

/// Highest rollback index the device retains.
pub const MAX_ROLLBACK: u32 = 49;

/// Tracing target for request assembly.
pub(crate) const REQUEST_TARGET: &str = "junos_rpc::request";

/// An assembled request and the classification its faults raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcRequest {
    document: Document,
    fault: FaultKind,
}

impl RpcRequest {
    /// Pairs a request document with its fault classification.
    #[must_use]
    pub const fn new(document: Document, fault: FaultKind) -> Self {
        Self { document, fault }
    }

    /// Returns the request document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the fault classification.
    #[must_use]
    pub const fn fault(&self) -> FaultKind {
        self.fault
    }

    /// Returns the operation element beneath `<rpc>`.
    #[must_use]
    pub fn operation(&self) -> Option<&Element> {
        self.document.root().first_element()
    }

    /// Returns the operation element name, or an empty string for an empty
    /// envelope.
    #[must_use]
    pub fn operation_name(&self) -> &str {
        self.operation().map_or("", Element::name)
    }

    /// Splits the request into its document and classification.
    #[must_use]
    pub fn into_parts(self) -> (Document, FaultKind) {
        (self.document, self.fault)
    }
}

/// Builds `<rpc><lock><target><candidate/></target></lock></rpc>`.
#[must_use]
pub fn lock_configuration() -> RpcRequest {
    target_request(names::LOCK)
}

/// Builds the unlock counterpart of [`lock_configuration`].
#[must_use]
pub fn unlock_configuration() -> RpcRequest {
    target_request(names::UNLOCK)
}

/// Builds a candidate validation request.
#[must_use]
pub fn validate_configuration() -> RpcRequest {
    target_request(names::VALIDATE)
}

fn target_request(operation: &'static str) -> RpcRequest {
    let mut element = Element::new(operation);
    element.writer().element(names::TARGET, |target| {
        target.empty(names::CANDIDATE);
    });
    finish(element, FaultKind::Generic)
}

/// Builds a commit request.
///
/// Each `params` entry becomes a child element: an empty value yields an
/// empty element such as `<check/>`, anything else `<name>value</name>`.
/// `attrs` are set on the operation element.
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidArgument`] when a parameter or
/// attribute name is not an XML name, or a value holds a character XML
/// forbids.
pub fn commit_configuration(
    params: Option<&Attributes>,
    attrs: Option<&Attributes>,
) -> Result<RpcRequest, ConfigurationError> {
    check_attributes(names::COMMIT_CONFIGURATION, "params", params)?;
    check_attributes(names::COMMIT_CONFIGURATION, "attrs", attrs)?;

    let mut element = Element::new(names::COMMIT_CONFIGURATION);
    if let Some(attrs) = attrs {
        attrs.apply_to(&mut element);
    }
    if let Some(params) = params {
        let mut writer = element.writer();
        for (name, value) in params.iter() {
            if value.is_empty() {
                writer.empty(name);
            } else {
                writer.leaf(name, value);
            }
        }
    }
    Ok(finish(element, FaultKind::Commit))
}

/// Builds a configuration retrieval request.
///
/// Option arguments become attributes of `<get-configuration>`. A structured
/// callback takes precedence over a content argument and writes beneath a
/// synthesised `<configuration>`; otherwise a content subtree, expected to be
/// `<configuration>` itself, is attached as the filter. Text arguments are
/// ignored.
///
/// # Errors
///
/// Returns [`ConfigurationError::CallbackShape`] for a textual callback and
/// [`ConfigurationError::InvalidContent`] when an option or the filter holds
/// a name or character XML forbids.
pub fn get_configuration<I>(
    args: I,
    callback: Option<ContentCallback<'_>>,
) -> Result<RpcRequest, ConfigurationError>
where
    I: IntoIterator<Item = RpcArg>,
{
    let Classified { content, options } = classify(args);
    let build = match callback {
        Some(ContentCallback::Structured(build)) => Some(build),
        Some(textual @ ContentCallback::Textual(_)) => {
            return Err(ConfigurationError::CallbackShape {
                operation: names::GET_CONFIGURATION,
                expected: "structured",
                found: textual.shape(),
            });
        }
        None => None,
    };

    let mut element = Element::new(names::GET_CONFIGURATION);
    attributes::merge(Attributes::new(), options.unwrap_or_default()).apply_to(&mut element);

    match (build, content) {
        (Some(build), content) => {
            if content.is_some() {
                debug!(
                    target: REQUEST_TARGET,
                    operation = names::GET_CONFIGURATION,
                    "content callback supplied; ignoring content argument"
                );
            }
            let mut configuration = Element::new(names::CONFIGURATION);
            build(&mut configuration.writer());
            element.push(configuration);
        }
        (None, Some(ContentPayload::Subtree(filter))) => element.push(filter),
        (None, Some(ContentPayload::Text(_))) => {
            debug!(
                target: REQUEST_TARGET,
                operation = names::GET_CONFIGURATION,
                "text content is not a filter; ignoring it"
            );
        }
        (None, None) => {}
    }
    finish_checked(element, FaultKind::Generic)
}

/// Builds a configuration load request.
///
/// The format defaults to `default_format` (`xml` unless configured) and is
/// resolved before the body is chosen; `set` forces `format=text` and
/// `action=set`. For `xml` bodies a structured callback writes beneath a
/// synthesised `<configuration>`, a content subtree is attached as-is, and
/// text is parsed as markup. For `text` and `set` bodies the callback's text,
/// or the content argument as text, becomes the body element's content. A
/// callback takes precedence over a content argument.
///
/// # Errors
///
/// Returns [`ConfigurationError::UnknownFormat`] for an unsupported format,
/// [`ConfigurationError::CallbackShape`] when the callback does not suit the
/// format, and [`ConfigurationError::InvalidContent`] when text offered as
/// XML is not well formed or the assembled body holds a name or character
/// XML forbids.
pub fn load_configuration<I>(
    args: I,
    callback: Option<ContentCallback<'_>>,
    default_format: LoadFormat,
) -> Result<RpcRequest, ConfigurationError>
where
    I: IntoIterator<Item = RpcArg>,
{
    let Classified { content, options } = classify(args);
    let defaults = Attributes::from([(names::FORMAT_ATTRIBUTE, default_format.as_str())]);
    let resolution = format::resolve(
        attributes::merge(defaults, options.unwrap_or_default()),
        default_format,
    )?;
    let body_name = resolution.body_element();
    let format = resolution.format();

    let body = match (format, callback) {
        (LoadFormat::Xml, Some(ContentCallback::Structured(build))) => {
            note_shadowed_content(content.as_ref());
            let mut body = Element::new(body_name);
            build(&mut body.writer());
            Some(body)
        }
        (LoadFormat::Xml, None) => match content {
            Some(ContentPayload::Subtree(tree)) => Some(tree),
            Some(ContentPayload::Text(markup)) => Some(
                Document::parse(&markup)
                    .map_err(|source| ConfigurationError::InvalidContent { source })?
                    .into_root(),
            ),
            None => None,
        },
        (LoadFormat::Text | LoadFormat::Set, Some(ContentCallback::Textual(produce))) => {
            note_shadowed_content(content.as_ref());
            Some(Element::new(body_name).with_text(produce().into_text()))
        }
        (LoadFormat::Text | LoadFormat::Set, None) => content.map(|payload| {
            let text = match payload {
                ContentPayload::Text(text) => text,
                ContentPayload::Subtree(tree) => tree.to_string(),
            };
            Element::new(body_name).with_text(text)
        }),
        (_, Some(mismatched)) => {
            return Err(ConfigurationError::CallbackShape {
                operation: names::LOAD_CONFIGURATION,
                expected: expected_callback(format),
                found: mismatched.shape(),
            });
        }
    };

    let mut element = Element::new(names::LOAD_CONFIGURATION);
    resolution.attributes().apply_to(&mut element);
    if let Some(body) = body {
        element.push(body);
    }
    debug!(
        target: REQUEST_TARGET,
        format = %format,
        body = body_name,
        "resolved load format"
    );
    finish_checked(element, FaultKind::Edit)
}

const fn expected_callback(format: LoadFormat) -> &'static str {
    match format {
        LoadFormat::Xml => "structured",
        LoadFormat::Text | LoadFormat::Set => "textual",
    }
}

fn note_shadowed_content(content: Option<&ContentPayload>) {
    if content.is_some() {
        debug!(
            target: REQUEST_TARGET,
            operation = names::LOAD_CONFIGURATION,
            "content callback supplied; ignoring content argument"
        );
    }
}

/// Builds `<rpc><command>TEXT</command></rpc>`.
///
/// The command is stored as escaped text, never spliced into markup.
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidArgument`] when the command holds a
/// character XML forbids, or an attribute cannot be written as XML.
pub fn command(
    command: &str,
    attrs: Option<&Attributes>,
) -> Result<RpcRequest, ConfigurationError> {
    if !is_text(command) {
        return Err(ConfigurationError::InvalidArgument {
            operation: names::COMMAND,
            argument: names::COMMAND,
            reason: FORBIDDEN_CHARACTER,
        });
    }
    check_attributes(names::COMMAND, "attrs", attrs)?;

    let mut element = Element::new(names::COMMAND).with_text(command);
    if let Some(attrs) = attrs {
        attrs.apply_to(&mut element);
    }
    Ok(finish(element, FaultKind::Generic))
}

/// Builds a packet forwarding engine diagnostic request.
///
/// `params` must hold a single-valued `target` and a `command`, which may be
/// one string or a list; a list yields one `<command>` per entry, in order.
///
/// # Errors
///
/// Returns [`ConfigurationError::MissingArgument`] when either key is absent,
/// [`ConfigurationError::InvalidArgument`] when `target` is a list, and
/// [`ConfigurationError::InvalidContent`] when a value holds a character XML
/// forbids.
pub fn request_pfe_execute(params: &Params) -> Result<RpcRequest, ConfigurationError> {
    let target = match params.get(names::TARGET) {
        Some(ParamValue::Text(target)) => target,
        Some(ParamValue::List(_)) => {
            return Err(ConfigurationError::InvalidArgument {
                operation: names::REQUEST_PFE_EXECUTE,
                argument: names::TARGET,
                reason: "expected a single value",
            });
        }
        None => {
            return Err(ConfigurationError::MissingArgument {
                operation: names::REQUEST_PFE_EXECUTE,
                argument: names::TARGET,
            });
        }
    };
    let commands: &[String] = match params.get(names::COMMAND) {
        Some(ParamValue::Text(command)) => std::slice::from_ref(command),
        Some(ParamValue::List(commands)) => commands,
        None => {
            return Err(ConfigurationError::MissingArgument {
                operation: names::REQUEST_PFE_EXECUTE,
                argument: names::COMMAND,
            });
        }
    };

    let mut element = Element::new(names::REQUEST_PFE_EXECUTE);
    let mut writer = element.writer();
    writer.leaf(names::TARGET, target.as_str());
    for command in commands {
        writer.leaf(names::COMMAND, command.as_str());
    }
    finish_checked(element, FaultKind::Generic)
}

/// Builds a load request restoring rollback snapshot `index`.
///
/// The request always uses the `xml` format.
///
/// # Errors
///
/// Returns [`ConfigurationError::RollbackOutOfRange`] when `index` exceeds
/// [`MAX_ROLLBACK`].
pub fn rollback(index: u32) -> Result<RpcRequest, ConfigurationError> {
    if index > MAX_ROLLBACK {
        return Err(ConfigurationError::RollbackOutOfRange {
            index,
            max: MAX_ROLLBACK,
        });
    }
    let options = Attributes::from([(names::ROLLBACK_ATTRIBUTE, index.to_string())]);
    load_configuration([RpcArg::Options(options)], None, LoadFormat::Xml)
}

const INVALID_NAME: &str = "not a valid XML name";
const FORBIDDEN_CHARACTER: &str = "holds a character XML forbids";

fn check_attributes(
    operation: &'static str,
    argument: &'static str,
    entries: Option<&Attributes>,
) -> Result<(), ConfigurationError> {
    for (name, value) in entries.into_iter().flat_map(Attributes::iter) {
        let reason = match (is_name(name), is_text(value)) {
            (false, _) => INVALID_NAME,
            (true, false) => FORBIDDEN_CHARACTER,
            (true, true) => continue,
        };
        debug!(target: REQUEST_TARGET, operation, argument, name, "rejected entry");
        return Err(ConfigurationError::InvalidArgument {
            operation,
            argument,
            reason,
        });
    }
    Ok(())
}

/// Finishes a request whose operation element carries caller content.
fn finish_checked(
    operation: Element,
    fault: FaultKind,
) -> Result<RpcRequest, ConfigurationError> {
    operation
        .validate()
        .map_err(|source| ConfigurationError::InvalidContent { source })?;
    Ok(finish(operation, fault))
}

fn finish(operation: Element, fault: FaultKind) -> RpcRequest {
    debug!(
        target: REQUEST_TARGET,
        operation = operation.name(),
        fault = %fault,
        "assembled request"
    );
    let root = Element::new(names::RPC).with_child(operation);
    RpcRequest::new(Document::new(root), fault)
}

#[cfg(test)]
mod tests;
