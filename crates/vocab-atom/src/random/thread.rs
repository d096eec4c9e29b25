use crate::RandSource;
use rand::{Rng, rng, seq::SliceRandom};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This type does **not** store the RNG itself; it accesses the thread-local
/// generator on each call. It is therefore `Send` and may move between
/// runtime worker threads together with the task that owns it.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn below(&mut self, bound: u64) -> u64 {
        rng().random_range(0..bound)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut rng());
    }
}
