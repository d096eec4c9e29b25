use core::fmt;

/// Local identifier of a stored vocabulary record.
pub type LocalId = u64;

/// An inclusive, contiguous run of local identifiers `[low, high]`.
///
/// An `Interval` is never empty: the constructor rejects `low > high`, so
/// every value of this type holds at least one identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    low: LocalId,
    high: LocalId,
}

impl Interval {
    /// Creates the interval `[low, high]`, or `None` when `low > high`.
    ///
    /// # Example
    /// ```
    /// use vocab_atom::Interval;
    ///
    /// assert!(Interval::new(1, 100).is_some());
    /// assert!(Interval::new(5, 4).is_none());
    /// ```
    pub const fn new(low: LocalId, high: LocalId) -> Option<Self> {
        if low > high {
            None
        } else {
            Some(Self { low, high })
        }
    }

    /// Builds `[low, high]` from bounds the caller has already ordered.
    pub(crate) const fn from_ordered(low: LocalId, high: LocalId) -> Self {
        debug_assert!(low <= high);
        Self { low, high }
    }

    /// The single-identifier interval `[id, id]`.
    pub const fn singleton(id: LocalId) -> Self {
        Self { low: id, high: id }
    }

    pub const fn low(&self) -> LocalId {
        self.low
    }

    pub const fn high(&self) -> LocalId {
        self.high
    }

    /// Number of identifiers in the interval.
    ///
    /// Saturates at `u64::MAX` for the full `[0, u64::MAX]` domain, which
    /// holds one more identifier than a `u64` can count.
    pub const fn len(&self) -> u64 {
        (self.high - self.low).saturating_add(1)
    }

    pub const fn is_singleton(&self) -> bool {
        self.low == self.high
    }

    pub const fn contains(&self, id: LocalId) -> bool {
        self.low <= id && id <= self.high
    }

    pub const fn overlaps(&self, other: &Self) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        assert_eq!(Interval::new(3, 2), None);
        assert_eq!(Interval::new(2, 2), Some(Interval::singleton(2)));
    }

    #[test]
    fn len_counts_both_endpoints() {
        assert_eq!(Interval::new(1, 100).unwrap().len(), 100);
        assert_eq!(Interval::singleton(7).len(), 1);
        assert_eq!(Interval::new(0, u64::MAX).unwrap().len(), u64::MAX);
    }

    #[test]
    fn containment_and_overlap() {
        let a = Interval::new(10, 20).unwrap();
        let b = Interval::new(20, 30).unwrap();
        let c = Interval::new(21, 30).unwrap();

        assert!(a.contains(10));
        assert!(a.contains(20));
        assert!(!a.contains(21));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.to_string(), "[10, 20]");
    }
}
