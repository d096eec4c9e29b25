//! Runtime configuration for the fetch orchestrator.

use crate::{Error, Result};

/// Number of vocabulary items a fetch episode must accumulate.
pub const DEFAULT_FETCH_LIMIT: usize = 30;

/// Capacity of the command channel between callers and the supervisor, and
/// between the supervisor and the session task.
pub const DEFAULT_COMMAND_BUFFER_SIZE: usize = 32;

/// Capacity of the outgoing event channel. A slow event consumer applies
/// backpressure to the session task once this many events are queued.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 64;

/// Seconds [`FetchHandle::shutdown`] waits for the supervisor to acknowledge.
///
/// [`FetchHandle::shutdown`]: crate::FetchHandle::shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    pub fetch_limit: usize,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
    pub shutdown_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            fetch_limit: DEFAULT_FETCH_LIMIT,
            command_buffer_size: DEFAULT_COMMAND_BUFFER_SIZE,
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

impl FetchConfig {
    pub fn with_fetch_limit(mut self, fetch_limit: usize) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }

    /// Rejects values that would make the orchestrator unusable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for a zero fetch limit or a zero
    /// channel capacity (tokio channels panic on zero capacity).
    pub fn validate(&self) -> Result<()> {
        if self.fetch_limit == 0 {
            return Err(Error::InvalidRequest {
                reason: "fetch_limit must be greater than 0".to_string(),
            });
        }
        if self.command_buffer_size == 0 || self.event_buffer_size == 0 {
            return Err(Error::InvalidRequest {
                reason: "channel buffer sizes must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(FetchConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_values() {
        let config = FetchConfig::default().with_fetch_limit(0);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidRequest { .. })
        ));

        let config = FetchConfig {
            event_buffer_size: 0,
            ..FetchConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
