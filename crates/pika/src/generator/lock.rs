use std::sync::Arc;

#[cfg(feature = "instrument")]
use tracing::instrument;

use crate::{
    Error, GeneratorConfig, GeneratorState, Mutex, PikaGenerator, Poll, Result, SystemClock,
    TimeSource,
};

/// A lock-based Pika ID generator suitable for multi-threaded environments.
///
/// The counter sits in an [`Arc<Mutex<_>>`], and the read-modify-write of
/// the sequence happens entirely under the lock, so concurrent callers never
/// observe the same sequence twice. Cloning the generator shares the counter.
///
/// While the sequence is exhausted the lock is released between polls.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Cheap to clone and share
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - Fair access across threads is important
///
/// ## See Also
/// - [`BasicPikaGenerator`]
///
/// [`BasicPikaGenerator`]: crate::BasicPikaGenerator
pub struct LockPikaGenerator<T = SystemClock>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: Arc<crossbeam_utils::CachePadded<Mutex<GeneratorState>>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Arc<Mutex<GeneratorState>>,
    config: GeneratorConfig,
    time: T,
}

impl<T> Clone for LockPikaGenerator<T>
where
    T: TimeSource + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            config: self.config,
            time: self.time.clone(),
        }
    }
}

impl<T> LockPikaGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new generator with a zeroed counter.
    ///
    /// # Example
    /// ```
    /// use pika::{GeneratorConfig, LockPikaGenerator, PikaGenerator, SystemClock};
    ///
    /// let config = GeneratorConfig::new(1_640_995_200_000, 12).unwrap();
    /// let generator = LockPikaGenerator::new(config, SystemClock);
    ///
    /// let id = generator.try_next_id(pika::sleep_yield).unwrap();
    /// assert_eq!(id.node_id(), 12);
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
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(Mutex::new(state))),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(Mutex::new(state)),
            config,
            time,
        }
    }

    /// Returns a copy of the current counter state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if another thread panicked while
    /// holding the lock.
    pub fn state(&self) -> Result<GeneratorState> {
        Ok(*self.lock()?)
    }

    #[cfg(not(feature = "parking-lot"))]
    fn lock(&self) -> Result<crate::MutexGuard<'_, GeneratorState>> {
        Ok(self.state.lock()?)
    }

    #[cfg(feature = "parking-lot")]
    fn lock(&self) -> Result<crate::MutexGuard<'_, GeneratorState>> {
        Ok(self.state.lock())
    }
}

impl<T> PikaGenerator for LockPikaGenerator<T>
where
    T: TimeSource,
{
    type Err = Error;

    fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    #[cfg_attr(feature = "instrument", instrument(level = "trace", skip(self)))]
    fn try_poll(&self) -> Result<Poll, Self::Err> {
        let mut state = self.lock()?;
        // Read under the lock so stamps follow lock acquisition order.
        let now_ms = self.time.current_millis();
        Ok(state.poll(&self.config, now_ms, || now_ms))
    }

    #[cfg_attr(feature = "instrument", instrument(level = "trace", skip(self)))]
    fn try_poll_at(&self, now_ms: u64) -> Result<Poll, Self::Err> {
        let mut state = self.lock()?;
        Ok(state.poll(&self.config, now_ms, || self.time.current_millis()))
    }
}
