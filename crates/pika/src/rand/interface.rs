/// A trait for random sources that return random integers.
///
/// Secure tags draw their salt from a `RandSource<u128>`. This abstraction
/// allows you to plug in a real random source or a mocked one in tests.
///
/// # Example
/// ```
/// use pika::RandSource;
///
/// struct FixedRand;
/// impl RandSource<u128> for FixedRand {
///     fn rand(&self) -> u128 {
///         1234
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand(), 1234);
/// ```
pub trait RandSource<T> {
    /// Returns a random integer.
    fn rand(&self) -> T;
}
