use crate::{
    Error, Interval, LocalId, RandSource, RangeQuery, RangeSampler, Result, Vocabulary,
    VocabularyStore,
};
use futures::future::join_all;
use tokio_util::sync::CancellationToken;

/// State of one prepare-to-clear cycle.
///
/// The session exclusively owns its sampler. It is dropped, together with
/// anything it accumulated, when its task is cancelled.
pub(crate) struct FetchSession<R> {
    set_id: String,
    category_names: Option<Vec<String>>,
    fetch_limit: usize,
    sampler: RangeSampler<R>,
}

impl<R> FetchSession<R>
where
    R: RandSource,
{
    pub(crate) fn new(
        set_id: String,
        category_names: Option<Vec<String>>,
        fetch_limit: usize,
        rng: R,
        range: Interval,
    ) -> Self {
        let mut sampler = RangeSampler::new(rng);
        sampler.initialize(range);
        Self {
            set_id,
            category_names,
            fetch_limit,
            sampler,
        }
    }

    /// `true` once every identifier of the set has been sampled.
    pub(crate) fn no_more(&self) -> bool {
        self.sampler.is_done()
    }

    /// Accumulates up to `fetch_limit` vocabulary items.
    ///
    /// Returns `None` if `token` is cancelled while a batch is being resolved;
    /// the partial accumulation is discarded in that case. Falling short of
    /// the limit because the set ran out is reported as
    /// [`Error::InsufficientVocabulary`].
    ///
    /// A failed lookup hands every interval drawn during the episode back to
    /// the sampler, so a later fetch can still reach those records.
    pub(crate) async fn run_episode<S>(
        &mut self,
        store: &S,
        token: &CancellationToken,
    ) -> Option<Result<Vec<Vocabulary>>>
    where
        S: VocabularyStore + ?Sized,
    {
        let mut vocabulary_list: Vec<Vocabulary> = Vec::new();
        let mut accepted = 0;
        let mut drawn: Vec<Interval> = Vec::new();

        while vocabulary_list.len() < self.fetch_limit && !self.no_more() {
            let remaining = self.fetch_limit - vocabulary_list.len();

            let fetched = match self.fetch_batch(store, token, remaining, &mut drawn).await? {
                Ok(fetched) => fetched,
                Err(e) => {
                    self.restore(&drawn);
                    return Some(Err(e));
                }
            };

            accepted += fetched.len();
            vocabulary_list.extend(fetched);
            self.sampler.rng_mut().shuffle(&mut vocabulary_list);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            accepted,
            limit = self.fetch_limit,
            no_more = self.no_more(),
            "Episode finished"
        );

        if accepted < self.fetch_limit {
            Some(Err(Error::InsufficientVocabulary {
                requested: self.fetch_limit,
                found: accepted,
            }))
        } else {
            Some(Ok(vocabulary_list))
        }
    }

    /// Gives `drawn` back to the sampler after a failed episode.
    fn restore(&mut self, drawn: &[Interval]) {
        let mut _restored = 0usize;
        for interval in drawn {
            if self.sampler.restore(*interval) {
                _restored += 1;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            restored = _restored,
            drawn = drawn.len(),
            remaining = self.sampler.remaining(),
            "Restored intervals of failed episode"
        );
    }

    /// Draws one batch, resolves every sub-interval concurrently, and prunes
    /// the sampler with what came back.
    ///
    /// The drawn intervals are appended to `drawn` before any lookup runs.
    /// All lookups run to completion before the first error (in batch order)
    /// is returned. Vocabulary without definitions is dropped from the result
    /// but still counts as sampled.
    async fn fetch_batch<S>(
        &mut self,
        store: &S,
        token: &CancellationToken,
        quota: usize,
        drawn: &mut Vec<Interval>,
    ) -> Option<Result<Vec<Vocabulary>>>
    where
        S: VocabularyStore + ?Sized,
    {
        let batch = self.sampler.next_batch(quota as u64);
        drawn.extend_from_slice(&batch.intervals);

        let lookups = batch.intervals.iter().map(|interval| {
            let query = RangeQuery::active(&self.set_id, self.category_names.as_deref(), *interval);
            async move { store.vocabulary_between(&query).await }
        });

        // Cancelled here means nothing below runs: the sampler keeps the
        // batch removed and the session is about to be dropped anyway.
        let results = token.run_until_cancelled(join_all(lookups)).await?;

        let resolved: Vec<(Vocabulary, LocalId)> =
            match results.into_iter().collect::<Result<Vec<_>>>() {
                Ok(found) => found.into_iter().flatten().collect(),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Batch lookup failed: {e}");
                    return Some(Err(e));
                }
            };

        // Ids inside the batch were carved out already; this only bites when a
        // store reports an id outside the range it was asked about.
        for (_, local_id) in &resolved {
            self.sampler.shrink_or_remove(*local_id);
        }

        // Empty intervals were carved out when drawn as well; this only
        // matches if one of them is held again.
        for interval in &batch.intervals {
            let yielded = resolved
                .iter()
                .any(|(_, local_id)| interval.contains(*local_id));
            if !yielded {
                self.sampler.remove_exact(*interval);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            intervals = batch.intervals.len(),
            resolved = resolved.len(),
            remaining = self.sampler.remaining(),
            "Resolved batch"
        );

        Some(Ok(resolved
            .into_iter()
            .map(|(vocabulary, _)| vocabulary)
            .filter(Vocabulary::has_definitions)
            .collect()))
    }
}
