//! The storage collaborator boundary.
//!
//! The orchestrator never owns vocabulary records. It asks a
//! [`VocabularyStore`] for the identifier range of a set and then resolves
//! sampled sub-intervals to the records whose ids fall inside them.
//! [`MemoryStore`] is an in-process implementation for tools and tests.

mod memory;
mod model;

pub use memory::*;
pub use model::*;

use crate::{Interval, LocalId, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to stored vocabulary, addressed by local identifier.
///
/// Implementations must tolerate concurrent calls: all sub-intervals of a
/// batch are resolved at the same time.
#[async_trait]
pub trait VocabularyStore: Send + Sync {
    /// The smallest interval covering every local id of `set_id`, or `None`
    /// when the set has no vocabulary.
    async fn vocabulary_range(&self, set_id: &str) -> Result<Option<Interval>>;

    /// Every record admitted by `query`, paired with its local id, in id
    /// order. An empty result means the queried range is dead space.
    async fn vocabulary_between(&self, query: &RangeQuery) -> Result<Vec<(Vocabulary, LocalId)>>;
}

#[async_trait]
impl<S> VocabularyStore for Arc<S>
where
    S: VocabularyStore + ?Sized,
{
    async fn vocabulary_range(&self, set_id: &str) -> Result<Option<Interval>> {
        (**self).vocabulary_range(set_id).await
    }

    async fn vocabulary_between(&self, query: &RangeQuery) -> Result<Vec<(Vocabulary, LocalId)>> {
        (**self).vocabulary_between(query).await
    }
}
