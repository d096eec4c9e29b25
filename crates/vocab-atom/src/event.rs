//! Typed signal surface of the fetch orchestrator.
//!
//! Callers send [`Command`]s in and receive [`Event`]s out. Each prepare or
//! fetch episode that is not cancelled ends with exactly one terminal event
//! (`*Succeeded` or `*Failed`).

use crate::{Error, ErrorCode, Vocabulary};

/// A signal consumed by the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start a session for `set_id`, optionally limited to some categories.
    Prepare {
        set_id: String,
        category_names: Option<Vec<String>>,
    },
    /// Run one accumulation episode in the prepared session.
    Fetch,
    /// Cancel the current session and start over, awaiting a new `Prepare`.
    Clear,
}

impl Command {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Prepare { .. } => "prepare",
            Self::Fetch => "fetch",
            Self::Clear => "clear",
        }
    }
}

/// A signal produced by the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Preparing,
    PrepareSucceeded,
    PrepareFailed {
        error_code: ErrorCode,
        error: Error,
    },
    Fetching,
    FetchSucceeded {
        /// Accumulated vocabulary in random order.
        vocabulary_list: Vec<Vocabulary>,
        /// `true` once the sampled set has been exhausted.
        no_more: bool,
    },
    FetchFailed {
        error_code: ErrorCode,
        error: Error,
    },
}

impl Event {
    pub fn prepare_failed(error: Error) -> Self {
        Self::PrepareFailed {
            error_code: error.code(),
            error,
        }
    }

    pub fn fetch_failed(error: Error) -> Self {
        Self::FetchFailed {
            error_code: error.code(),
            error,
        }
    }

    /// `true` for events that end a prepare or fetch episode.
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::PrepareSucceeded
                | Self::PrepareFailed { .. }
                | Self::FetchSucceeded { .. }
                | Self::FetchFailed { .. }
        )
    }
}

/// Where the current session stands. Observable through
/// [`FetchHandle::phase`].
///
/// [`FetchHandle::phase`]: crate::FetchHandle::phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for a `Prepare` command.
    #[default]
    Idle,
    /// Looking up the identifier range of the requested set.
    Preparing,
    /// Prepared; waiting for a `Fetch` command.
    Ready,
    /// Running an accumulation episode.
    Fetching,
}
