use core::fmt;

/// A result type defaulting to the crate [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `pika` can produce.
///
/// Generation is infallible under normal operation: the only runtime
/// failures come from configuration, tag validation, lock poisoning, and
/// decoding user supplied text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The generator configuration is out of range (e.g. a node id above
    /// 1023).
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// A tag contains characters outside `[a-z0-9-]` or is empty.
    #[error("invalid tag `{tag}`: tags must be non-empty and match [a-z0-9-]")]
    InvalidTag { tag: String },

    /// A tag was used that is absent from the registry while strict tags are
    /// enabled.
    #[error("unregistered tag `{tag}`")]
    UnregisteredTag { tag: String },

    /// A textual ID could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The generator state lock was poisoned by a panicking thread.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,

    /// The node id could not be derived from the host.
    #[cfg_attr(docsrs, doc(cfg(feature = "mac-address")))]
    #[cfg(feature = "mac-address")]
    #[error("failed to derive node id: {reason}")]
    NodeId { reason: String },
}

impl From<core::convert::Infallible> for Error {
    fn from(e: core::convert::Infallible) -> Self {
        match e {}
    }
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}

/// A failure to decode a textual Pika ID.
///
/// Carries the original input so callers can log or echo it back, along with
/// the underlying cause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeError {
    input: String,
    kind: DecodeErrorKind,
}

impl DecodeError {
    pub(crate) fn new(input: &str, kind: DecodeErrorKind) -> Self {
        Self {
            input: input.to_owned(),
            kind,
        }
    }

    /// The text that failed to decode.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Why decoding failed.
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to decode `{}`: {}", self.input, self.kind)
    }
}

impl core::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// The cause of a [`DecodeError`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    /// The text has no `_` between tag and payload.
    #[error("missing `_` separator between tag and payload")]
    MissingSeparator,

    /// Nothing precedes the first `_`.
    #[error("empty tag")]
    EmptyTag,

    /// The payload is not URL-safe base64.
    #[error("payload is not valid url-safe base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The payload decoded to no bytes.
    #[error("payload decoded to zero bytes")]
    EmptyPayload,

    /// The decoded payload is not UTF-8.
    #[error("payload is not valid utf-8")]
    NotUtf8,

    /// The segment after the last `_` of the decoded payload is empty.
    #[error("numeric segment is empty")]
    EmptyNumeric,

    /// The numeric segment does not parse as a `u64`.
    #[error("numeric segment `{segment}` is not a valid integer: {source}")]
    InvalidNumeric {
        segment: String,
        source: core::num::ParseIntError,
    },
}
