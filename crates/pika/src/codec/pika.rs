use tracing::{debug, warn};

use super::engine;
use crate::{
    DecodeError, DecodeErrorKind, EncodedId, Error, GeneratorConfig, LockPikaGenerator,
    PikaGenerator, PikaOptions, PikaSnowflake, PrefixDefinition, PrefixRegistry, RandSource,
    Result, SystemClock, ThreadRandom, registry::normalize_tag,
};

/// Generates and decodes prefixed Pika IDs such as `user_MjQ0MjQ4ODI4OTE2NjU5ODQw`.
///
/// A `Pika` owns a snowflake generator, a salt source for secure prefixes
/// and the prefix registry. With the default type parameters it is
/// `Send + Sync` and can be shared across threads behind an `Arc`.
///
/// ```
/// use pika::{Pika, PikaOptions, PrefixDefinition};
///
/// let pika = Pika::new(
///     PikaOptions::new()
///         .node_id(7)
///         .prefix(PrefixDefinition::new("user").description("User accounts")),
/// )
/// .unwrap();
///
/// let id = pika.generate("user").unwrap();
/// assert!(id.as_str().starts_with("user_"));
///
/// let decoded = pika.decode(id.as_str()).unwrap();
/// assert_eq!(decoded.snowflake(), id.snowflake());
/// assert_eq!(decoded.node_id(), 7);
/// assert!(pika.validate(id.as_str(), Some("user")));
/// ```
pub struct Pika<G = LockPikaGenerator<SystemClock>, R = ThreadRandom>
where
    G: PikaGenerator,
    R: RandSource<u128>,
{
    generator: G,
    rng: R,
    registry: PrefixRegistry,
    suppress_unregistered_tag_warning: bool,
    strict_tags: bool,
}

impl Pika {
    /// Builds a codec over a [`LockPikaGenerator`] driven by the system
    /// clock, salting secure prefixes from [`ThreadRandom`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] if `node_id` is above 1023.
    /// - [`Error::InvalidTag`] if a prefix tag is malformed.
    pub fn new(options: PikaOptions) -> Result<Self> {
        let config = GeneratorConfig::new(options.epoch_ms, options.node_id)?;
        Self::with_generator(LockPikaGenerator::new(config, SystemClock), ThreadRandom, options)
    }
}

impl<G, R> Pika<G, R>
where
    G: PikaGenerator,
    R: RandSource<u128>,
{
    /// Builds a codec around an existing generator and salt source.
    ///
    /// The epoch and node ID come from `generator.config()`; the
    /// `epoch_ms` and `node_id` fields of `options` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTag`] if a prefix tag is malformed.
    pub fn with_generator(generator: G, rng: R, options: PikaOptions) -> Result<Self> {
        let PikaOptions {
            prefixes,
            suppress_unregistered_tag_warning,
            strict_tags,
            ..
        } = options;
        Ok(Self {
            generator,
            rng,
            registry: PrefixRegistry::try_from(prefixes)?,
            suppress_unregistered_tag_warning,
            strict_tags,
        })
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn registry(&self) -> &PrefixRegistry {
        &self.registry
    }

    /// Adds or replaces a prefix, returning the definition it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTag`] if the tag is malformed.
    pub fn register(&mut self, prefix: PrefixDefinition) -> Result<Option<PrefixDefinition>> {
        self.registry.insert(prefix)
    }

    pub fn deregister(&mut self, tag: &str) -> Option<PrefixDefinition> {
        self.registry.remove(tag)
    }

    /// Mints a raw snowflake without any prefix or encoding.
    ///
    /// # Errors
    ///
    /// Propagates generator errors such as a poisoned lock.
    pub fn generate_snowflake(&self) -> Result<PikaSnowflake> {
        self.generator
            .try_next_id(crate::sleep_yield)
            .map_err(Into::into)
    }

    /// Mints a new ID under `tag`.
    ///
    /// The tag is lower-cased first. Unregistered tags log a warning unless
    /// suppressed, or fail when strict tags are enabled. Blocks briefly if
    /// this millisecond's 4096 sequence values are used up.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTag`] if the tag is not `[a-z0-9-]+` after
    ///   lower-casing.
    /// - [`Error::UnregisteredTag`] in strict mode.
    /// - Generator errors such as a poisoned lock.
    pub fn generate(&self, tag: &str) -> Result<EncodedId> {
        let tag = normalize_tag(tag)?;
        let prefix = self.registry.get(&tag);
        if prefix.is_none() {
            if self.strict_tags {
                return Err(Error::UnregisteredTag { tag });
            }
            if !self.suppress_unregistered_tag_warning {
                warn!(
                    tag = %tag,
                    "generating id with unregistered tag; register the prefix or suppress this warning"
                );
            }
        }

        let snowflake = self.generate_snowflake()?;
        let raw = match prefix {
            Some(prefix) if prefix.secure => {
                let salt: u128 = self.rng.rand();
                format!("s_{}_{snowflake}", hex::encode(salt.to_be_bytes()))
            }
            _ => snowflake.to_string(),
        };
        let payload = engine::encode(raw.as_bytes());
        let text = format!("{tag}_{payload}");

        Ok(EncodedId::new(
            tag,
            payload,
            text,
            self.generator.unpack(snowflake),
            prefix.cloned(),
        ))
    }

    /// Parses `text` back into its fields.
    ///
    /// Unregistered tags decode fine and leave [`EncodedId::prefix`] empty.
    /// Decoding proves nothing about where the ID came from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] carrying the input and the cause.
    pub fn decode(&self, text: &str) -> Result<EncodedId> {
        self.decode_parts(text).map_err(|kind| {
            let err = DecodeError::new(text, kind);
            debug!(input = text, error = %err.kind(), "failed to decode pika id");
            Error::Decode(err)
        })
    }

    fn decode_parts(&self, text: &str) -> Result<EncodedId, DecodeErrorKind> {
        let (tag, payload) = text
            .split_once('_')
            .ok_or(DecodeErrorKind::MissingSeparator)?;
        if tag.is_empty() {
            return Err(DecodeErrorKind::EmptyTag);
        }

        let bytes = engine::decode(payload)?;
        if bytes.is_empty() {
            return Err(DecodeErrorKind::EmptyPayload);
        }
        let raw = String::from_utf8(bytes).map_err(|_| DecodeErrorKind::NotUtf8)?;

        // Secure payloads are `s_{salt}_{id}`; the id is always last.
        let segment = raw.rsplit('_').next().unwrap_or_default();
        if segment.is_empty() {
            return Err(DecodeErrorKind::EmptyNumeric);
        }
        let snowflake: PikaSnowflake =
            segment
                .parse()
                .map_err(|source| DecodeErrorKind::InvalidNumeric {
                    segment: segment.to_owned(),
                    source,
                })?;

        Ok(EncodedId::new(
            tag.to_owned(),
            payload.to_owned(),
            text.to_owned(),
            self.generator.unpack(snowflake),
            self.registry.get(tag).cloned(),
        ))
    }

    /// Cheap syntactic check of `text`.
    ///
    /// Requires a `_` separator and a non-empty payload. With
    /// `expected_tag` the tag must equal it once lower-cased, as
    /// [`Pika::generate`] writes it; otherwise the tag must be registered.
    /// The payload is not decoded.
    pub fn validate(&self, text: &str, expected_tag: Option<&str>) -> bool {
        let Some((tag, payload)) = text.split_once('_') else {
            return false;
        };
        if payload.is_empty() {
            return false;
        }
        match expected_tag {
            Some(expected) => tag == expected.to_ascii_lowercase(),
            None => self.registry.contains(tag),
        }
    }
}
