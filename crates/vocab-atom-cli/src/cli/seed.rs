//! Builds the in-memory store the orchestrator samples from.

use crate::cli::config::StoreSource;
use anyhow::Context;
use std::path::Path;
use vocab_atom::{
    Definition, MemoryStore, StoredVocabulary, Vocabulary, VocabularyStatus,
};

/// Set id of the generated demo set.
pub const DEMO_SET_ID: &str = "demo";

const DEMO_CATEGORIES: [Option<&str>; 3] = [Some("Greetings"), Some("Food"), None];

impl StoreSource {
    pub fn load(&self) -> anyhow::Result<MemoryStore> {
        match self {
            Self::Seed(path) => load_seed(path),
            Self::Demo(size) => Ok(demo_store(*size)),
        }
    }
}

/// Reads a JSON array of [`StoredVocabulary`] records.
pub fn load_seed(path: &Path) -> anyhow::Result<MemoryStore> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let records: Vec<StoredVocabulary> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse seed file {}", path.display()))?;
    Ok(MemoryStore::from_records(records))
}

/// Generates `size` records with ids `1..=size` in the `demo` set.
///
/// Every seventh record has no definitions and every eleventh is archived,
/// so sampling has something to skip.
pub fn demo_store(size: u64) -> MemoryStore {
    MemoryStore::from_records((1..=size).map(|id| {
        let definitions = if id % 7 == 0 {
            Vec::new()
        } else {
            vec![Definition {
                meaning: format!("meaning of word {id}"),
            }]
        };
        let status = if id % 11 == 0 {
            VocabularyStatus::Archived
        } else {
            VocabularyStatus::Active
        };
        StoredVocabulary {
            local_id: id,
            set_id: DEMO_SET_ID.to_owned(),
            status,
            vocabulary: Vocabulary {
                vocabulary_id: format!("demo-{id}"),
                vocabulary_text: format!("word {id}"),
                category_name: DEMO_CATEGORIES[(id % 3) as usize].map(str::to_owned),
                definitions,
            },
        }
    }))
}
