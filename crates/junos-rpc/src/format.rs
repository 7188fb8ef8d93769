//! Load format resolution.
//!
//! The `format` attribute of a load request picks the body element and, for
//! `set`, rewrites the attributes the device expects:
//!
//! | format | body element         | forced attributes          |
//! |--------|----------------------|----------------------------|
//! | `xml`  | `configuration`      | none                       |
//! | `text` | `configuration-text` | none                       |
//! | `set`  | `configuration-set`  | `format=text`, `action=set` |

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::attributes::Attributes;
use crate::error::ConfigurationError;
use crate::request::names;

/// Declared content format of a load request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LoadFormat {
    /// Structured configuration.
    #[default]
    Xml,
    /// Curly-brace configuration text.
    Text,
    /// `set` command lines.
    Set,
}

impl LoadFormat {
    /// Returns the attribute value naming this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Text => "text",
            Self::Set => "set",
        }
    }

    /// Returns the name of the body element carrying content in this format.
    #[must_use]
    pub const fn body_element(self) -> &'static str {
        match self {
            Self::Xml => names::CONFIGURATION,
            Self::Text => names::CONFIGURATION_TEXT,
            Self::Set => names::CONFIGURATION_SET,
        }
    }

    /// Returns the attributes this format forces over caller values.
    #[must_use]
    pub fn forced_overrides(self) -> Attributes {
        match self {
            Self::Xml | Self::Text => Attributes::new(),
            Self::Set => Attributes::from([
                (names::FORMAT_ATTRIBUTE, Self::Text.as_str()),
                (names::ACTION_ATTRIBUTE, "set"),
            ]),
        }
    }

    /// Parses an attribute value, rejecting anything but the three formats.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownFormat`] for any other value.
    pub fn parse(value: &str) -> Result<Self, ConfigurationError> {
        Self::from_str(value).map_err(|_| ConfigurationError::UnknownFormat {
            value: value.to_owned(),
        })
    }
}

/// Outcome of resolving a load request's attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    format: LoadFormat,
    attributes: Attributes,
}

impl Resolution {
    /// Returns the format the body is written in.
    #[must_use]
    pub const fn format(&self) -> LoadFormat {
        self.format
    }

    /// Returns the body element name.
    #[must_use]
    pub const fn body_element(&self) -> &'static str {
        self.format.body_element()
    }

    /// Returns the final attributes, forced overrides included.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// Resolves merged load attributes into a body shape and final attributes.
///
/// `attributes` must already hold the defaults; a missing `format` resolves
/// to `default` so the result always names one.
///
/// # Errors
///
/// Returns [`ConfigurationError::UnknownFormat`] when `format` is not one of
/// `xml`, `text` or `set`.
pub fn resolve(
    mut attributes: Attributes,
    default: LoadFormat,
) -> Result<Resolution, ConfigurationError> {
    let format = match attributes.get(names::FORMAT_ATTRIBUTE) {
        Some(value) => LoadFormat::parse(value)?,
        None => default,
    };
    attributes.insert(names::FORMAT_ATTRIBUTE, format.as_str());
    attributes.merge(format.forced_overrides());
    Ok(Resolution { format, attributes })
}
