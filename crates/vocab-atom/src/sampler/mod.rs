//! Random sampling without replacement over a sparse identifier space.
//!
//! The [`RangeSampler`] tracks the identifier space that has not been offered
//! yet as a list of disjoint [`Interval`]s. Each call to
//! [`RangeSampler::next_batch`] carves random sub-intervals out of that space,
//! so no identifier is offered twice between two calls to
//! [`RangeSampler::initialize`] unless it is handed back with
//! [`RangeSampler::restore`].
//!
//! [`Interval`]: crate::Interval

mod range;

pub use range::*;
