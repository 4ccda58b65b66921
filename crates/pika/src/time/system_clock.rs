use crate::TimeSource;
use std::time::{SystemTime, UNIX_EPOCH};

/// A [`TimeSource`] backed by [`SystemTime::now`].
///
/// Every call is a syscall and follows wall-clock adjustments (NTP slews,
/// manual changes). This matches how Pika IDs have always been stamped and is
/// the default clock for [`crate::Pika`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        // A clock set before 1970 reads as zero rather than panicking.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}
