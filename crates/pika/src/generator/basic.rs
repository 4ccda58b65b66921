use core::cell::Cell;
use core::convert::Infallible;

#[cfg(feature = "instrument")]
use tracing::instrument;

use crate::{
    GeneratorConfig, GeneratorState, PikaGenerator, PikaSnowflake, Poll, Result, SystemClock,
    TimeSource,
};

/// A non-concurrent Pika ID generator suitable for single-threaded
/// environments.
///
/// The counter lives in a [`Cell`], so this generator is lightweight but
/// **not thread-safe** (`!Sync`).
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ Infallible
///
/// ## Recommended When
/// - You're in a single-threaded environment (no shared access)
/// - You want the fastest generator
///
/// ## See Also
/// - [`LockPikaGenerator`]
///
/// [`LockPikaGenerator`]: crate::LockPikaGenerator
pub struct BasicPikaGenerator<T = SystemClock>
where
    T: TimeSource,
{
    state: Cell<GeneratorState>,
    config: GeneratorConfig,
    time: T,
}

impl<T> BasicPikaGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new generator with a zeroed counter.
    ///
    /// # Example
    /// ```
    /// use pika::{BasicPikaGenerator, GeneratorConfig, SystemClock};
    ///
    /// let generator = BasicPikaGenerator::new(GeneratorConfig::default(), SystemClock);
    /// let id = generator.next_id();
    /// assert_eq!(id.node_id(), 0);
    /// ```
    pub fn new(config: GeneratorConfig, time: T) -> Self {
        Self::from_state(config, GeneratorState::default(), time)
    }

    /// Creates a generator preloaded with the given counter state.
    ///
    /// # ⚠️ Note
    /// In typical use cases, you should prefer [`Self::new`].
    pub fn from_state(config: GeneratorConfig, state: GeneratorState, time: T) -> Self {
        Self {
            state: Cell::new(state),
            config,
            time,
        }
    }

    /// Returns a copy of the current counter state.
    pub fn state(&self) -> GeneratorState {
        self.state.get()
    }

    /// Generates a new ID for the current millisecond, blocking while the
    /// sequence is exhausted.
    pub fn next_id(&self) -> PikaSnowflake {
        match self.try_next_id(crate::sleep_yield) {
            Ok(id) => id,
            Err(e) =>
            {
                #[allow(unreachable_code)]
                match e {}
            }
        }
    }

    /// Generates a new ID for an explicit millisecond `now_ms`.
    pub fn next_id_at(&self, now_ms: u64) -> PikaSnowflake {
        match self.try_next_id_at(now_ms, crate::sleep_yield) {
            Ok(id) => id,
            Err(e) =>
            {
                #[allow(unreachable_code)]
                match e {}
            }
        }
    }

    /// Attempts one generation step for the current millisecond without
    /// blocking.
    pub fn poll(&self) -> Poll {
        match self.try_poll() {
            Ok(poll) => poll,
            Err(e) =>
            {
                #[allow(unreachable_code)]
                match e {}
            }
        }
    }

    /// Attempts one generation step for `now_ms` without blocking.
    pub fn poll_at(&self, now_ms: u64) -> Poll {
        match self.try_poll_at(now_ms) {
            Ok(poll) => poll,
            Err(e) =>
            {
                #[allow(unreachable_code)]
                match e {}
            }
        }
    }
}

impl<T> PikaGenerator for BasicPikaGenerator<T>
where
    T: TimeSource,
{
    type Err = Infallible;

    fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    #[cfg_attr(feature = "instrument", instrument(level = "trace", skip(self)))]
    fn try_poll(&self) -> Result<Poll, Self::Err> {
        let now_ms = self.time.current_millis();
        let mut state = self.state.get();
        let poll = state.poll(&self.config, now_ms, || now_ms);
        self.state.set(state);
        Ok(poll)
    }

    #[cfg_attr(feature = "instrument", instrument(level = "trace", skip(self)))]
    fn try_poll_at(&self, now_ms: u64) -> Result<Poll, Self::Err> {
        let mut state = self.state.get();
        let poll = state.poll(&self.config, now_ms, || self.time.current_millis());
        self.state.set(state);
        Ok(poll)
    }
}
