use core::fmt;

use crate::{DecodedSnowflake, PikaSnowflake, PrefixDefinition};

/// A generated or decoded Pika ID: the canonical `{tag}_{payload}` text
/// together with the fields it resolves to.
///
/// The random salt of secure prefixes is never exposed here; it stays inside
/// the base64 payload.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedId {
    tag: String,
    payload: String,
    text: String,
    decoded: DecodedSnowflake,
    prefix: Option<PrefixDefinition>,
}

impl EncodedId {
    /// Format version of the textual encoding.
    pub const VERSION: u8 = 1;

    pub(crate) fn new(
        tag: String,
        payload: String,
        text: String,
        decoded: DecodedSnowflake,
        prefix: Option<PrefixDefinition>,
    ) -> Self {
        Self {
            tag,
            payload,
            text,
            decoded,
            prefix,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The base64 part after the first `_`.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// The full canonical text, e.g. `user_MTIzNDU2`.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn snowflake(&self) -> PikaSnowflake {
        self.decoded.id
    }

    pub fn node_id(&self) -> u16 {
        self.decoded.node_id
    }

    pub fn sequence(&self) -> u16 {
        self.decoded.sequence
    }

    /// Milliseconds since the Unix epoch at which the ID was minted.
    pub fn timestamp_ms(&self) -> u64 {
        self.decoded.timestamp_ms
    }

    pub fn epoch_ms(&self) -> u64 {
        self.decoded.epoch_ms
    }

    pub fn decoded(&self) -> &DecodedSnowflake {
        &self.decoded
    }

    /// The registered definition for the tag, if there was one when the ID
    /// was generated or decoded.
    pub fn prefix(&self) -> Option<&PrefixDefinition> {
        self.prefix.as_ref()
    }

    pub fn version(&self) -> u8 {
        Self::VERSION
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for EncodedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for EncodedId {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<EncodedId> for String {
    fn from(id: EncodedId) -> Self {
        id.text
    }
}
