use crate::TimeSource;
use core::time::Duration;
use portable_atomic::{AtomicU64, Ordering};
use std::{
    sync::{Arc, OnceLock},
    thread::{self, JoinHandle},
    time::{Instant, SystemTime, UNIX_EPOCH},
};

/// Shared ticker thread that updates every millisecond.
#[derive(Debug)]
struct SharedTickerInner {
    current: AtomicU64,
    _handle: OnceLock<JoinHandle<()>>,
}

/// A monotonic time source anchored to the Unix epoch.
///
/// The wall clock is sampled once at construction. After that, time advances
/// only by the elapsed [`Instant`] measured on a background ticker thread, so
/// readings never go backward even if the system clock is adjusted.
///
/// Readings are in milliseconds since the Unix epoch, like [`SystemClock`],
/// which makes the two interchangeable as a generator's clock.
///
/// The ticker thread exits once the last clone of the clock is dropped.
///
/// [`SystemClock`]: crate::SystemClock
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTickerInner>,
    unix_offset: u64, // in milliseconds
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock and spawns its ticker thread.
    ///
    /// On each call to [`TimeSource::current_millis`], the clock returns the
    /// current tick plus the wall-clock reading captured here.
    pub fn new() -> Self {
        let start = Instant::now();
        let unix_offset = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64);

        let inner = Arc::new(SharedTickerInner {
            current: AtomicU64::new(0),
            _handle: OnceLock::new(),
        });

        let weak_inner = Arc::downgrade(&inner);
        let handle = thread::spawn(move || {
            let mut tick = 0;

            loop {
                let Some(inner_ref) = weak_inner.upgrade() else {
                    break;
                };

                let target = start + Duration::from_millis(tick);
                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                let elapsed = start.elapsed().as_millis() as u64;
                inner_ref.current.store(elapsed, Ordering::Relaxed);

                tick = elapsed + 1;
            }
        });

        // Freshly created, so the cell is always empty here.
        let _ = inner._handle.set(handle);

        Self { inner, unix_offset }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        self.unix_offset + self.inner.current.load(Ordering::Relaxed)
    }
}
