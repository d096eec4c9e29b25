use crate::Command;
use tokio::sync::oneshot;

/// A message sent from a [`FetchHandle`] to the supervisor task.
///
/// [`FetchHandle`]: crate::FetchHandle
#[derive(Debug)]
pub(crate) enum SupervisorRequest {
    /// A caller signal to route or act on.
    Signal(Command),

    /// Stop the supervisor and its session task.
    ///
    /// - `response`: One-shot channel for acknowledging that the session task
    ///   has been cancelled and joined.
    Shutdown { response: oneshot::Sender<()> },
}
