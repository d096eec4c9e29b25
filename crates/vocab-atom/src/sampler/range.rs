use crate::{Interval, LocalId, RandSource};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// The outcome of a single [`RangeSampler::next_batch`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Batch {
    /// Sub-intervals to resolve, in the order they were drawn. Their total
    /// size never exceeds the requested quota.
    pub intervals: Vec<Interval>,
    /// `true` iff the sampler holds no identifiers after this call.
    pub exhausted: bool,
}

impl Batch {
    /// Total number of identifiers covered by the batch.
    pub fn total_len(&self) -> u64 {
        self.intervals
            .iter()
            .fold(0u64, |acc, interval| acc.saturating_add(interval.len()))
    }
}

/// Draws randomized batches of identifiers from a shrinking set of disjoint
/// intervals.
///
/// Sampling picks a held interval uniformly at random, then a random
/// contiguous sub-interval of it, and removes that sub-interval from the held
/// space. This approximates uniform sampling without replacement over a sparse
/// key space while doing work proportional to the batch rather than to the
/// number of identifiers.
///
/// Held intervals are kept in ascending order; adjacent intervals are not
/// merged.
///
/// # Example
/// ```
/// use vocab_atom::{Interval, RangeSampler, SeededRandom};
///
/// let mut sampler = RangeSampler::new(SeededRandom::new(7));
/// sampler.initialize(Interval::new(1, 100).unwrap());
///
/// let batch = sampler.next_batch(10);
/// assert!(batch.total_len() <= 10);
/// assert!(!batch.exhausted);
/// assert_eq!(sampler.remaining(), 100 - batch.total_len());
/// ```
#[derive(Clone, Debug)]
pub struct RangeSampler<R> {
    ranges: Vec<Interval>,
    rng: R,
}

impl<R> RangeSampler<R>
where
    R: RandSource,
{
    /// Creates an empty sampler. Until [`initialize`] is called every batch is
    /// empty and reports exhaustion.
    ///
    /// [`initialize`]: Self::initialize
    pub const fn new(rng: R) -> Self {
        Self {
            ranges: Vec::new(),
            rng,
        }
    }

    /// Discards all state and holds exactly `range`.
    pub fn initialize(&mut self, range: Interval) {
        self.ranges.clear();
        self.ranges.push(range);
    }

    /// Draws random sub-intervals totalling at most `quota` identifiers.
    ///
    /// Every drawn sub-interval is removed from the held space, splitting its
    /// source interval into up to two remainders. Drawing stops once `quota`
    /// identifiers are covered or nothing is left.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_batch(&mut self, quota: u64) -> Batch {
        let mut intervals = Vec::new();
        let mut requested = 0u64;

        while requested < quota && !self.ranges.is_empty() {
            let index = self.rng.below(self.ranges.len() as u64) as usize;
            let source = self.ranges[index];

            let max_size = (quota - requested).min(source.len());
            let size = 1 + self.rng.below(max_size);
            let offset = self.rng.below(source.len() - size + 1);

            let low = source.low() + offset;
            let taken = Interval::from_ordered(low, low + (size - 1));

            self.carve(index, taken);
            intervals.push(taken);
            requested += size;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            drawn = intervals.len(),
            requested,
            held = self.ranges.len(),
            "Drew batch"
        );

        Batch {
            intervals,
            exhausted: self.ranges.is_empty(),
        }
    }

    /// Removes `id` from whichever held interval contains it.
    ///
    /// An endpoint shrinks its interval by one, an interior id splits it in
    /// two, and a singleton `[id, id]` is dropped. Returns `false` (and changes
    /// nothing) when no held interval contains `id`.
    pub fn shrink_or_remove(&mut self, id: LocalId) -> bool {
        match self.ranges.iter().position(|range| range.contains(id)) {
            Some(index) => {
                self.carve(index, Interval::singleton(id));
                true
            }
            None => false,
        }
    }

    /// Removes a held interval equal to `interval`. Returns `false` when no
    /// exact match is held.
    pub fn remove_exact(&mut self, interval: Interval) -> bool {
        match self.ranges.iter().position(|range| *range == interval) {
            Some(index) => {
                self.ranges.remove(index);
                true
            }
            None => false,
        }
    }

    /// Hands a previously drawn interval back to the held space, so its
    /// identifiers can be drawn again.
    ///
    /// Returns `false` (and changes nothing) if `interval` overlaps anything
    /// still held.
    pub fn restore(&mut self, interval: Interval) -> bool {
        let index = self
            .ranges
            .partition_point(|range| range.high() < interval.low());
        if self
            .ranges
            .get(index)
            .is_some_and(|range| range.overlaps(&interval))
        {
            return false;
        }

        self.ranges.insert(index, interval);
        true
    }

    /// `true` iff no identifiers remain.
    pub fn is_done(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of identifiers still held (saturating).
    pub fn remaining(&self) -> u64 {
        self.ranges
            .iter()
            .fold(0u64, |acc, range| acc.saturating_add(range.len()))
    }

    /// The held intervals in ascending order.
    pub fn ranges(&self) -> &[Interval] {
        &self.ranges
    }

    /// The random source, shared with callers that shuffle sampled results.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Replaces `ranges[index]` with what is left of it after removing
    /// `taken`, which must lie inside it.
    fn carve(&mut self, index: usize, taken: Interval) {
        let source = self.ranges[index];
        debug_assert!(source.contains(taken.low()) && source.contains(taken.high()));

        let left = (taken.low() > source.low())
            .then(|| Interval::from_ordered(source.low(), taken.low() - 1));
        let right = (taken.high() < source.high())
            .then(|| Interval::from_ordered(taken.high() + 1, source.high()));

        match (left, right) {
            (Some(left), Some(right)) => {
                self.ranges[index] = left;
                self.ranges.insert(index + 1, right);
            }
            (Some(rest), None) | (None, Some(rest)) => self.ranges[index] = rest,
            (None, None) => {
                self.ranges.remove(index);
            }
        }
    }
}
