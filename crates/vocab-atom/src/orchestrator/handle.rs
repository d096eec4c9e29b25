use super::{request::SupervisorRequest, supervisor::supervisor_loop, worker::SessionContext};
use crate::{Command, Error, Event, FetchConfig, Phase, RandSource, Result, VocabularyStore};
use core::time::Duration;
use std::sync::Arc;
use tokio::{
    sync::{mpsc, oneshot, watch},
    time::timeout,
};
use tokio_util::sync::CancellationToken;

/// Entry point for spawning the fetch orchestrator.
pub struct FetchOrchestrator;

impl FetchOrchestrator {
    /// Validates `config`, spawns the supervisor task, and returns a handle
    /// for sending commands together with the receiving end of the event
    /// channel.
    ///
    /// Every session clones `rng`, so a [`SeededRandom`] replays the same
    /// draws after each clear.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if `config` fails validation.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use vocab_atom::{Event, FetchConfig, FetchOrchestrator, MemoryStore, ThreadRandom};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> vocab_atom::Result<()> {
    /// let store = Arc::new(MemoryStore::new());
    /// let (handle, mut events) =
    ///     FetchOrchestrator::spawn(store, FetchConfig::default(), ThreadRandom)?;
    ///
    /// handle.prepare("empty-set", None).await?;
    /// assert_eq!(events.recv().await, Some(Event::Preparing));
    /// assert!(matches!(events.recv().await, Some(Event::PrepareFailed { .. })));
    ///
    /// handle.shutdown().await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// [`SeededRandom`]: crate::SeededRandom
    pub fn spawn<S, R>(
        store: Arc<S>,
        config: FetchConfig,
        rng: R,
    ) -> Result<(FetchHandle, mpsc::Receiver<Event>)>
    where
        S: VocabularyStore + ?Sized + 'static,
        R: RandSource + Clone + Send + Sync + 'static,
    {
        config.validate()?;

        let (request_tx, request_rx) = mpsc::channel(config.command_buffer_size);
        let (event_tx, event_rx) = mpsc::channel(config.event_buffer_size);
        let (phase_tx, phase_rx) = watch::channel(Phase::Idle);
        let shutdown_token = CancellationToken::new();

        let ctx = SessionContext {
            store,
            rng,
            fetch_limit: config.fetch_limit,
            command_buffer_size: config.command_buffer_size,
            events: event_tx,
            phase: Arc::new(phase_tx),
        };

        tokio::spawn(supervisor_loop(request_rx, ctx, shutdown_token.clone()));

        #[cfg(feature = "tracing")]
        tracing::info!(
            fetch_limit = config.fetch_limit,
            "Fetch orchestrator started"
        );

        let handle = FetchHandle {
            requests: request_tx,
            phase: phase_rx,
            shutdown_token,
            shutdown_timeout: Duration::from_secs(config.shutdown_timeout_secs),
        };

        Ok((handle, event_rx))
    }
}

/// Cloneable handle for signalling a running orchestrator.
///
/// Sending only enqueues the command; outcomes arrive as [`Event`]s. Commands
/// the current [`Phase`] does not accept (a `Fetch` before prepare succeeded,
/// a second `Prepare` in a prepared session) are dropped.
#[derive(Clone, Debug)]
pub struct FetchHandle {
    requests: mpsc::Sender<SupervisorRequest>,
    phase: watch::Receiver<Phase>,
    shutdown_token: CancellationToken,
    shutdown_timeout: Duration,
}

impl FetchHandle {
    /// Sends a command to the supervisor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceShutdown`] once the orchestrator has stopped.
    pub async fn send(&self, command: Command) -> Result<()> {
        if self.shutdown_token.is_cancelled() {
            return Err(Error::ServiceShutdown);
        }

        self.requests
            .send(SupervisorRequest::Signal(command))
            .await
            .map_err(|_| Error::ServiceShutdown)
    }

    pub async fn prepare(
        &self,
        set_id: impl Into<String>,
        category_names: Option<Vec<String>>,
    ) -> Result<()> {
        self.send(Command::Prepare {
            set_id: set_id.into(),
            category_names,
        })
        .await
    }

    pub async fn fetch(&self) -> Result<()> {
        self.send(Command::Fetch).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.send(Command::Clear).await
    }

    /// The current phase of the session.
    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    /// A receiver notified on every phase change.
    pub fn watch_phase(&self) -> watch::Receiver<Phase> {
        self.phase.clone()
    }

    /// Gracefully stops the orchestrator.
    ///
    /// - Asks the supervisor to cancel and join the session task.
    /// - Waits up to the configured timeout for its acknowledgement.
    /// - Cancels the shared [`CancellationToken`] so every task unwinds even
    ///   if the acknowledgement never came.
    ///
    /// Calling this more than once is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelError`] if the supervisor did not acknowledge
    /// in time.
    pub async fn shutdown(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let result = if self
            .requests
            .send(SupervisorRequest::Shutdown { response: tx })
            .await
            .is_err()
        {
            #[cfg(feature = "tracing")]
            tracing::debug!("Supervisor already stopped");
            Ok(())
        } else {
            match timeout(self.shutdown_timeout, rx).await {
                // A dropped sender means the supervisor exited on its own.
                Ok(_) => Ok(()),
                Err(_) => Err(Error::ChannelError {
                    context: "Timed out waiting for supervisor shutdown".to_string(),
                }),
            }
        };

        self.shutdown_token.cancel();

        #[cfg(feature = "tracing")]
        tracing::info!("Fetch orchestrator shut down");

        result
    }
}
