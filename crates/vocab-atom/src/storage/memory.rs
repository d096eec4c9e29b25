use crate::{Interval, LocalId, RangeQuery, Result, Vocabulary, VocabularyStatus, VocabularyStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// A vocabulary record together with the columns the store filters on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoredVocabulary {
    pub local_id: LocalId,
    pub set_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: VocabularyStatus,
    pub vocabulary: Vocabulary,
}

/// An in-memory [`VocabularyStore`] ordered by local id.
///
/// Lookups take a read lock and never hold it across an await point, so any
/// number of concurrent range lookups may run against the same store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<LocalId, StoredVocabulary>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = StoredVocabulary>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Inserts `record`, returning the record it replaced, if any.
    pub fn insert(&self, record: StoredVocabulary) -> Option<StoredVocabulary> {
        self.records.write().insert(record.local_id, record)
    }

    /// Changes the status of a stored record. Returns `false` if `local_id` is
    /// unknown.
    pub fn set_status(&self, local_id: LocalId, status: VocabularyStatus) -> bool {
        match self.records.write().get_mut(&local_id) {
            Some(record) => {
                record.status = status;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl VocabularyStore for MemoryStore {
    async fn vocabulary_range(&self, set_id: &str) -> Result<Option<Interval>> {
        let records = self.records.read();
        let mut in_set = records.values().filter(|record| record.set_id == set_id);

        let Some(first) = in_set.next() else {
            return Ok(None);
        };
        let last = in_set.last().unwrap_or(first);

        Ok(Interval::new(first.local_id, last.local_id))
    }

    async fn vocabulary_between(&self, query: &RangeQuery) -> Result<Vec<(Vocabulary, LocalId)>> {
        let Some((low, high)) = query.id_bounds() else {
            return Ok(Vec::new());
        };

        let records = self.records.read();
        let found = records
            .range(low..=high)
            .map(|(_, record)| record)
            .filter(|record| {
                record.set_id == query.set_id
                    && record.status == query.status
                    && query.admits_category(&record.vocabulary)
            })
            .map(|record| (record.vocabulary.clone(), record.local_id))
            .collect();

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Definition;

    fn record(local_id: LocalId, set_id: &str, category: Option<&str>) -> StoredVocabulary {
        StoredVocabulary {
            local_id,
            set_id: set_id.to_owned(),
            status: VocabularyStatus::Active,
            vocabulary: Vocabulary {
                vocabulary_id: format!("v{local_id}"),
                vocabulary_text: format!("word {local_id}"),
                category_name: category.map(str::to_owned),
                definitions: vec![Definition {
                    meaning: format!("meaning {local_id}"),
                }],
            },
        }
    }

    fn interval(low: u64, high: u64) -> Interval {
        Interval::new(low, high).unwrap()
    }

    #[tokio::test]
    async fn range_spans_the_set_only() {
        let store = MemoryStore::from_records([
            record(1, "other", None),
            record(4, "set", None),
            record(9, "set", None),
            record(12, "other", None),
        ]);

        assert_eq!(store.vocabulary_range("set").await, Ok(Some(interval(4, 9))));
        assert_eq!(store.vocabulary_range("missing").await, Ok(None));
    }

    #[tokio::test]
    async fn range_of_single_record_is_singleton() {
        let store = MemoryStore::from_records([record(7, "set", None)]);
        assert_eq!(
            store.vocabulary_range("set").await,
            Ok(Some(Interval::singleton(7)))
        );
    }

    fn found_ids(found: Vec<(Vocabulary, LocalId)>) -> Vec<LocalId> {
        found.into_iter().map(|(_, id)| id).collect()
    }

    #[tokio::test]
    async fn between_returns_matches_in_id_order() {
        let store = MemoryStore::from_records([
            record(6, "set", None),
            record(2, "set", None),
            record(5, "set", None),
        ]);

        let query = RangeQuery::active("set", None, interval(3, 10));
        let found = store.vocabulary_between(&query).await.unwrap();
        assert_eq!(found[0].0.vocabulary_id, "v5");
        assert_eq!(found_ids(found), vec![5, 6]);

        let query = RangeQuery::active("set", None, interval(7, 10));
        assert_eq!(store.vocabulary_between(&query).await, Ok(vec![]));
    }

    #[tokio::test]
    async fn between_honours_status_and_category() {
        let store = MemoryStore::from_records([
            record(1, "set", Some("Food")),
            record(2, "set", Some("Travel")),
            record(3, "set", Some("Food")),
        ]);
        store.set_status(1, VocabularyStatus::Archived);

        let food = vec!["Food".to_owned()];
        let query = RangeQuery::active("set", Some(&food), interval(1, 3));
        let found = store.vocabulary_between(&query).await.unwrap();
        assert_eq!(found_ids(found), vec![3]);

        let mut archived = RangeQuery::active("set", None, interval(1, 3));
        archived.status = VocabularyStatus::Archived;
        let found = store.vocabulary_between(&archived).await.unwrap();
        assert_eq!(found_ids(found), vec![1]);
    }

    #[tokio::test]
    async fn between_respects_exclusive_bounds() {
        let store = MemoryStore::from_records([record(1, "set", None), record(2, "set", None)]);

        let mut query = RangeQuery::active("set", None, interval(1, 2));
        query.include_low = false;
        let found = store.vocabulary_between(&query).await.unwrap();
        assert_eq!(found_ids(found), vec![2]);

        query.include_high = false;
        assert_eq!(store.vocabulary_between(&query).await, Ok(vec![]));
    }
}
