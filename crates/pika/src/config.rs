use core::time::Duration;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_EPOCH, PrefixDefinition};

/// Construction inputs for [`crate::Pika`].
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use pika::PikaOptions;
///
/// let options = PikaOptions::from_json_str(
///     r#"{ "node_id": 12, "prefixes": [{ "tag": "user" }] }"#,
/// )
/// .unwrap();
/// assert_eq!(options.node_id, 12);
/// assert_eq!(options.epoch_ms, 1_640_995_200_000);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PikaOptions {
    /// Milliseconds since the Unix epoch that IDs are measured from.
    pub epoch_ms: u64,
    /// Node identifier in `0..=1023`.
    pub node_id: u16,
    pub prefixes: Vec<PrefixDefinition>,
    /// Silence the warning logged when generating with an unregistered tag.
    pub suppress_unregistered_tag_warning: bool,
    /// Fail generation for unregistered tags instead of warning.
    pub strict_tags: bool,
}

impl Default for PikaOptions {
    fn default() -> Self {
        Self {
            epoch_ms: DEFAULT_EPOCH.as_millis() as u64,
            node_id: 0,
            prefixes: Vec::new(),
            suppress_unregistered_tag_warning: false,
            strict_tags: false,
        }
    }
}

impl PikaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] if the document is malformed or a
    /// field has the wrong type.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn epoch_ms(mut self, epoch_ms: u64) -> Self {
        self.epoch_ms = epoch_ms;
        self
    }

    /// Sets the epoch from a [`Duration`] since the Unix epoch.
    #[must_use]
    pub fn epoch(self, epoch: Duration) -> Self {
        self.epoch_ms(epoch.as_millis() as u64)
    }

    /// Sets the epoch from a point in time. Instants before the Unix epoch
    /// clamp to it.
    #[must_use]
    pub fn epoch_at(self, epoch: SystemTime) -> Self {
        let since_unix = epoch
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        self.epoch(since_unix)
    }

    #[must_use]
    pub fn node_id(mut self, node_id: u16) -> Self {
        self.node_id = node_id;
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: PrefixDefinition) -> Self {
        self.prefixes.push(prefix);
        self
    }

    #[must_use]
    pub fn prefixes(mut self, prefixes: impl IntoIterator<Item = PrefixDefinition>) -> Self {
        self.prefixes.extend(prefixes);
        self
    }

    #[must_use]
    pub fn suppress_unregistered_tag_warning(mut self, suppress: bool) -> Self {
        self.suppress_unregistered_tag_warning = suppress;
        self
    }

    #[must_use]
    pub fn strict_tags(mut self, strict: bool) -> Self {
        self.strict_tags = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = PikaOptions::default();
        assert_eq!(options.epoch_ms, 1_640_995_200_000);
        assert_eq!(options.node_id, 0);
        assert!(options.prefixes.is_empty());
        assert!(!options.suppress_unregistered_tag_warning);
        assert!(!options.strict_tags);
    }

    #[test]
    fn builder() {
        let options = PikaOptions::new()
            .epoch(Duration::from_secs(1_000))
            .node_id(3)
            .prefix(PrefixDefinition::new("user"))
            .prefixes([PrefixDefinition::new("sk").secure(true)])
            .strict_tags(true);
        assert_eq!(options.epoch_ms, 1_000_000);
        assert_eq!(options.node_id, 3);
        assert_eq!(options.prefixes.len(), 2);
        assert!(options.strict_tags);
    }

    #[test]
    fn epoch_from_system_time() {
        let at = SystemTime::UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);
        assert_eq!(PikaOptions::new().epoch_at(at).epoch_ms, 1_700_000_000_123);

        let before = SystemTime::UNIX_EPOCH - Duration::from_secs(1);
        assert_eq!(PikaOptions::new().epoch_at(before).epoch_ms, 0);
    }

    #[test]
    fn from_json_fills_defaults() {
        let options = PikaOptions::from_json_str(
            r#"{
                "epoch_ms": 1000,
                "prefixes": [
                    { "tag": "user", "description": "people" },
                    { "tag": "sk", "secure": true, "metadata": { "rotates": true } }
                ],
                "suppress_unregistered_tag_warning": true
            }"#,
        )
        .unwrap();
        assert_eq!(options.epoch_ms, 1000);
        assert_eq!(options.node_id, 0);
        assert!(options.suppress_unregistered_tag_warning);
        assert!(options.prefixes[1].secure);
        assert_eq!(options.prefixes[1].metadata["rotates"], serde_json::Value::Bool(true));
    }

    #[test]
    fn from_json_rejects_wrong_types() {
        assert!(PikaOptions::from_json_str(r#"{ "node_id": "seven" }"#).is_err());
        assert!(PikaOptions::from_json_str("not json").is_err());
    }
}
