use crate::PikaSnowflake;

/// Represents the result of attempting to generate a new ID without
/// blocking.
///
/// - [`Poll::Ready`] indicates a new ID was generated.
/// - [`Poll::Pending`] means the sequence space is exhausted for the
///   requested millisecond and the wall clock has not moved past it yet.
///
/// This allows custom backoff strategies around
/// [`PikaGenerator::try_poll_at`].
///
/// [`PikaGenerator::try_poll_at`]: crate::PikaGenerator::try_poll_at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: PikaSnowflake,
    },
    /// No ID could be generated because the sequence has been exhausted for
    /// the current millisecond.
    ///
    /// Wait until the wall clock reaches `yield_until` (ms since the Unix
    /// epoch) before polling again.
    Pending {
        /// The wall-clock millisecond (inclusive) at which generation may
        /// resume.
        yield_until: u64,
    },
}
