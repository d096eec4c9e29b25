/// A source of randomness for sampling and shuffling.
///
/// This abstraction allows you to plug in a real random source or a
/// deterministic one in tests.
///
/// # Example
/// ```
/// use vocab_atom::RandSource;
///
/// struct Lowest;
/// impl RandSource for Lowest {
///     fn below(&mut self, _bound: u64) -> u64 {
///         0
///     }
///
///     fn shuffle<T>(&mut self, _items: &mut [T]) {}
/// }
///
/// let mut rng = Lowest;
/// assert_eq!(rng.below(10), 0);
/// ```
pub trait RandSource {
    /// Returns an integer drawn uniformly from `0..bound`.
    ///
    /// Callers never pass `bound == 0`.
    fn below(&mut self, bound: u64) -> u64;

    /// Shuffles `items` in place.
    fn shuffle<T>(&mut self, items: &mut [T]);
}
