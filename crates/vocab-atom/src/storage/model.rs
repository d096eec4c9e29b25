use crate::{Interval, LocalId};

/// Category name given to vocabulary that has none, for filtering purposes.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Lifecycle status of a stored vocabulary record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum VocabularyStatus {
    #[default]
    Active,
    Archived,
    Deleted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Definition {
    pub meaning: String,
}

/// A vocabulary item as returned to callers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vocabulary {
    pub vocabulary_id: String,
    pub vocabulary_text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub definitions: Vec<Definition>,
}

impl Vocabulary {
    pub fn has_definitions(&self) -> bool {
        !self.definitions.is_empty()
    }

    /// The category used for filtering, falling back to [`UNCATEGORIZED`].
    pub fn category_or_default(&self) -> &str {
        self.category_name.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

/// A single sub-interval lookup against a [`VocabularyStore`].
///
/// [`VocabularyStore`]: crate::VocabularyStore
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeQuery {
    pub set_id: String,
    pub status: VocabularyStatus,
    /// Restrict to these categories; `None` admits every category.
    pub category_names: Option<Vec<String>>,
    pub interval: Interval,
    pub include_low: bool,
    pub include_high: bool,
}

impl RangeQuery {
    /// An inclusive query for active vocabulary of `set_id` inside `interval`.
    pub fn active(set_id: &str, category_names: Option<&[String]>, interval: Interval) -> Self {
        Self {
            set_id: set_id.to_owned(),
            status: VocabularyStatus::Active,
            category_names: category_names.map(<[String]>::to_vec),
            interval,
            include_low: true,
            include_high: true,
        }
    }

    /// The inclusive id bounds after applying the include flags, or `None`
    /// when the flags leave nothing to search.
    pub fn id_bounds(&self) -> Option<(LocalId, LocalId)> {
        let low = if self.include_low {
            self.interval.low()
        } else {
            self.interval.low().checked_add(1)?
        };
        let high = if self.include_high {
            self.interval.high()
        } else {
            self.interval.high().checked_sub(1)?
        };
        (low <= high).then_some((low, high))
    }

    pub fn admits_category(&self, vocabulary: &Vocabulary) -> bool {
        match &self.category_names {
            Some(names) => {
                let category = vocabulary.category_or_default();
                names.iter().any(|name| name == category)
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusive_flags_narrow_bounds() {
        let mut query = RangeQuery::active("set", None, Interval::new(3, 5).unwrap());
        assert_eq!(query.id_bounds(), Some((3, 5)));

        query.include_low = false;
        query.include_high = false;
        assert_eq!(query.id_bounds(), Some((4, 4)));

        query.interval = Interval::new(3, 4).unwrap();
        assert_eq!(query.id_bounds(), None);
    }

    #[test]
    fn missing_category_counts_as_uncategorized() {
        let vocabulary = Vocabulary {
            vocabulary_id: "v1".into(),
            vocabulary_text: "hola".into(),
            category_name: None,
            definitions: vec![],
        };
        let names = vec![UNCATEGORIZED.to_owned()];
        let query = RangeQuery::active("set", Some(&names), Interval::singleton(1));
        assert!(query.admits_category(&vocabulary));

        let names = vec!["Food".to_owned()];
        let query = RangeQuery::active("set", Some(&names), Interval::singleton(1));
        assert!(!query.admits_category(&vocabulary));
    }
}
