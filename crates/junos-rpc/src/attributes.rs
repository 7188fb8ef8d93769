//! Attribute sets and the default/override merge.
//!
//! Every operation element carries at most one [`Attributes`] set. Sets are
//! built by merging an operation's defaults with caller overrides, where the
//! override wins on every shared key.

use std::collections::BTreeMap;
use std::collections::btree_map;

use netconf_xml::Element;

/// Ordered mapping of attribute name to value.
///
/// # Example
///
/// ```
/// use junos_rpc::Attributes;
///
/// let defaults = Attributes::from([("format", "xml")]);
/// let merged = junos_rpc::attributes::merge(defaults, Attributes::from([("format", "text")]));
/// assert_eq!(merged.get("format"), Some("text"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the set with one more entry.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts an entry, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Looks up a value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Reports whether the set holds the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Reports whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over entries ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Folds `overrides` into this set; their values win on collision.
    pub fn merge(&mut self, overrides: Self) {
        self.0.extend(overrides.0);
    }

    /// Writes every entry onto `element` as an attribute.
    pub fn apply_to(&self, element: &mut Element) {
        for (name, value) in self.iter() {
            element.set_attribute(name, value);
        }
    }
}

/// Merges defaults with overrides, the overrides taking precedence per key.
#[must_use]
pub fn merge(defaults: Attributes, overrides: Attributes) -> Attributes {
    let mut merged = defaults;
    merged.merge(overrides);
    merged
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Attributes {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
