use core::time::Duration;

/// Default Pika epoch: Saturday, January 1, 2022 00:00:00 UTC
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_640_995_200_000);

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
///
/// Used by the first Pika releases before the 2022 epoch became the default.
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock, a
/// monotonic ticker, or a mocked time source in tests.
///
/// Unlike the generator's epoch-relative timestamps, the unit here is
/// **milliseconds since the Unix epoch** (1970-01-01T00:00:00Z). The
/// generator subtracts its configured epoch when packing an ID.
///
/// # Example
///
/// ```
/// use pika::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1_700_000_000_000
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1_700_000_000_000);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64;
}
