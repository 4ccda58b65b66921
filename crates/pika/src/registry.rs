use std::collections::{BTreeMap, HashMap, hash_map};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Returns `true` if `tag` is non-empty and made only of `[a-z0-9-]`.
///
/// Tags never contain `_`, which separates the tag from the payload on the
/// wire.
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Lower-cases `tag` and checks it with [`is_valid_tag`].
///
/// # Errors
///
/// Returns [`Error::InvalidTag`] carrying the original input.
pub(crate) fn normalize_tag(tag: &str) -> Result<String> {
    let lowered = tag.to_ascii_lowercase();
    if is_valid_tag(&lowered) {
        Ok(lowered)
    } else {
        Err(Error::InvalidTag {
            tag: tag.to_owned(),
        })
    }
}

/// A registered ID category.
///
/// `secure` prefixes get 128 bits of random salt mixed into every payload.
/// The description and metadata are informational and never affect the
/// encoding.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrefixDefinition {
    pub tag: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl PrefixDefinition {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Lookup table of known prefixes keyed by tag.
///
/// Every stored tag has been lower-cased and validated, so lookups with a
/// normalized tag always agree with what [`crate::Pika::generate`] writes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrefixRegistry {
    prefixes: HashMap<String, PrefixDefinition>,
}

impl PrefixRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a prefix, returning the definition it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTag`] if the tag does not match `[a-z0-9-]+`
    /// after lower-casing.
    pub fn insert(&mut self, mut prefix: PrefixDefinition) -> Result<Option<PrefixDefinition>> {
        prefix.tag = normalize_tag(&prefix.tag)?;
        Ok(self.prefixes.insert(prefix.tag.clone(), prefix))
    }

    /// Removes a prefix. The tag is lower-cased first, matching
    /// [`PrefixRegistry::insert`].
    pub fn remove(&mut self, tag: &str) -> Option<PrefixDefinition> {
        self.prefixes.remove(&tag.to_ascii_lowercase())
    }

    pub fn get(&self, tag: &str) -> Option<&PrefixDefinition> {
        self.prefixes.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.prefixes.contains_key(tag)
    }

    pub fn iter(&self) -> hash_map::Values<'_, String, PrefixDefinition> {
        self.prefixes.values()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl<'a> IntoIterator for &'a PrefixRegistry {
    type Item = &'a PrefixDefinition;
    type IntoIter = hash_map::Values<'a, String, PrefixDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<PrefixDefinition>> for PrefixRegistry {
    type Error = Error;

    fn try_from(prefixes: Vec<PrefixDefinition>) -> Result<Self> {
        prefixes.into_iter().collect()
    }
}

impl FromIterator<PrefixDefinition> for Result<PrefixRegistry> {
    fn from_iter<I: IntoIterator<Item = PrefixDefinition>>(iter: I) -> Self {
        let mut registry = PrefixRegistry::new();
        for prefix in iter {
            registry.insert(prefix)?;
        }
        Ok(registry)
    }
}
