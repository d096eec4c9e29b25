use crate::RandSource;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// A reproducible `RandSource` backed by a seeded [`StdRng`].
///
/// Two instances created from the same seed produce the same sequence, which
/// makes sampling runs repeatable in tests and benchmarks. Cloning copies the
/// generator state, so a clone replays the original's future sequence.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandSource for SeededRandom {
    fn below(&mut self, bound: u64) -> u64 {
        self.rng.random_range(0..bound)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
