//! Error types for vocabulary sampling.
//!
//! This module defines the central [`Error`] enum, which captures every
//! recoverable and reportable failure of the fetch orchestrator. Errors are
//! `Clone` so they can travel inside [`Event`]s, and each maps to a stable
//! [`ErrorCode`] that callers can match on without inspecting messages.
//!
//! ## Error Cases
//! - `InsufficientVocabulary`: the population, or what is left of it, cannot
//!   satisfy the requested fetch limit.
//! - `Storage`: the storage collaborator failed a lookup.
//! - `ChannelError`: an internal communication failure between tasks.
//! - `InvalidRequest`: a command or configuration value was malformed.
//! - `ServiceShutdown`: a command arrived after the orchestrator shut down.
//!
//! [`Event`]: crate::Event

use core::fmt;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the vocabulary sampling service.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Not enough vocabulary is left to satisfy the request.
    #[error("Insufficient vocabulary: requested {requested}, found {found}")]
    InsufficientVocabulary { requested: usize, found: usize },

    /// The storage collaborator failed.
    #[error("Storage error: {context}")]
    Storage { context: String },

    /// Internal channel send/receive failure (e.g., closed channel).
    #[error("Channel error: {context}")]
    ChannelError { context: String },

    /// The request or configuration was invalid.
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// The orchestrator is shutting down or has shut down.
    #[error("Service is shutting down")]
    ServiceShutdown,
}

impl Error {
    /// Convenience constructor for storage implementations.
    pub fn storage(context: impl Into<String>) -> Self {
        Self::Storage {
            context: context.into(),
        }
    }

    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InsufficientVocabulary { .. } => ErrorCode::InsufficientVocabulary,
            Self::Storage { .. } => ErrorCode::StorageLookupFailed,
            Self::ChannelError { .. } => ErrorCode::ChannelError,
            Self::InvalidRequest { .. } => ErrorCode::InvalidRequest,
            Self::ServiceShutdown => ErrorCode::ServiceShutdown,
        }
    }
}

/// Stable, machine-readable classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    InsufficientVocabulary,
    StorageLookupFailed,
    ChannelError,
    InvalidRequest,
    ServiceShutdown,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InsufficientVocabulary => "ATOM__INSUFFICIENT_VOCABULARY",
            Self::StorageLookupFailed => "STORAGE__LOOKUP_FAILED",
            Self::ChannelError => "INTERNAL__CHANNEL_ERROR",
            Self::InvalidRequest => "REQUEST__INVALID",
            Self::ServiceShutdown => "SERVICE__SHUTDOWN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let err = Error::InsufficientVocabulary {
            requested: 10,
            found: 5,
        };
        assert_eq!(err.code(), ErrorCode::InsufficientVocabulary);
        assert_eq!(err.code().to_string(), "ATOM__INSUFFICIENT_VOCABULARY");
        assert_eq!(
            err.to_string(),
            "Insufficient vocabulary: requested 10, found 5"
        );

        assert_eq!(
            Error::storage("disk on fire").code().as_str(),
            "STORAGE__LOOKUP_FAILED"
        );
        assert_eq!(Error::ServiceShutdown.code(), ErrorCode::ServiceShutdown);
    }
}
