use core::{fmt, time::Duration};

use crate::{DecodedSnowflake, Error, GeneratorConfig, PikaSnowflake, Poll, Result};

/// How long [`sleep_yield`] sleeps between polls while the sequence is
/// exhausted.
pub const DEFAULT_YIELD: Duration = Duration::from_micros(100);

/// The default yield strategy for the blocking loops: a short sleep instead
/// of a hot spin, re-checking the clock afterwards.
pub fn sleep_yield(_yield_until: u64) {
    std::thread::sleep(DEFAULT_YIELD);
}

/// A minimal interface for generating Pika Snowflake IDs.
///
/// Implementors provide the two non-blocking steps, [`try_poll`] (stamped
/// with the generator's own clock) and [`try_poll_at`] (stamped with a
/// caller supplied millisecond). The blocking entry points are built on top:
/// they poll, and on [`Poll::Pending`] hand the wake-up time to a yield
/// callback before polling again. Any lock taken by a poll is released
/// between polls, so other threads are not starved while one waits.
///
/// [`try_poll`]: PikaGenerator::try_poll
/// [`try_poll_at`]: PikaGenerator::try_poll_at
pub trait PikaGenerator {
    /// The error type returned by the fallible methods.
    type Err: fmt::Debug + Into<Error>;

    /// The epoch and node ID this generator stamps into IDs.
    fn config(&self) -> &GeneratorConfig;

    /// Attempts one generation step for the current millisecond of the
    /// generator's clock.
    ///
    /// # Errors
    ///
    /// May return an error if the underlying implementation uses a lock and
    /// it is poisoned.
    fn try_poll(&self) -> Result<Poll, Self::Err>;

    /// Attempts one generation step for the millisecond `now_ms`.
    ///
    /// # Errors
    ///
    /// May return an error if the underlying implementation uses a lock and
    /// it is poisoned.
    fn try_poll_at(&self, now_ms: u64) -> Result<Poll, Self::Err>;

    /// Generates an ID for the current millisecond, calling
    /// `f(yield_until)` each time the sequence is exhausted.
    ///
    /// Every retry reads the clock again, so an ID minted after a wait
    /// carries the new millisecond. There is no timeout: if the clock never
    /// advances, neither does this.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`PikaGenerator::try_poll`].
    fn try_next_id(&self, mut f: impl FnMut(u64)) -> Result<PikaSnowflake, Self::Err> {
        loop {
            match self.try_poll()? {
                Poll::Ready { id } => break Ok(id),
                Poll::Pending { yield_until } => f(yield_until),
            }
        }
    }

    /// Generates an ID for the fixed millisecond `now_ms`, calling
    /// `f(yield_until)` each time the sequence is exhausted until the wall
    /// clock moves past `now_ms`.
    ///
    /// The ID is stamped with `now_ms` even after waiting. Callers that keep
    /// passing the same millisecond will see the sequence cycle and repeat.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`PikaGenerator::try_poll_at`].
    fn try_next_id_at(&self, now_ms: u64, mut f: impl FnMut(u64)) -> Result<PikaSnowflake, Self::Err> {
        loop {
            match self.try_poll_at(now_ms)? {
                Poll::Ready { id } => break Ok(id),
                Poll::Pending { yield_until } => f(yield_until),
            }
        }
    }

    /// Splits an ID into its fields using this generator's epoch.
    ///
    /// No check is made that the ID came from this generator, epoch or
    /// node; decoding does not imply authenticity.
    fn unpack(&self, id: PikaSnowflake) -> DecodedSnowflake {
        id.decompose(self.config().epoch_ms())
    }
}
