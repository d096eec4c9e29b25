use super::{
    request::SupervisorRequest,
    worker::{SessionContext, session_loop},
};
use crate::{Command, Phase, RandSource, VocabularyStore};
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

/// The currently running session task and the means to reach or stop it.
struct SessionTask {
    commands: mpsc::Sender<Command>,
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl SessionTask {
    fn spawn<S, R>(ctx: &SessionContext<S, R>, parent: &CancellationToken) -> Self
    where
        S: VocabularyStore + ?Sized + 'static,
        R: RandSource + Clone + Send + Sync + 'static,
    {
        let (commands, rx) = mpsc::channel(ctx.command_buffer_size);
        let token = parent.child_token();
        let join = tokio::spawn(session_loop(ctx.clone(), rx, token.clone()));

        Self {
            commands,
            token,
            join,
        }
    }

    /// Cancels the task and waits for it to unwind. Whatever the session had
    /// accumulated is dropped with it.
    async fn cancel(self) {
        self.token.cancel();
        if let Err(_e) = self.join.await {
            #[cfg(feature = "tracing")]
            tracing::error!("Session task ended abnormally: {_e}");
        }
    }

    /// Forwards `command` if the current phase accepts it.
    ///
    /// `Prepare` is accepted only while idle and `Fetch` only while ready;
    /// accepting moves the phase to `Preparing` / `Fetching` so a duplicate
    /// arriving before the session reacts is dropped too.
    fn offer<S: ?Sized, R>(&self, ctx: &SessionContext<S, R>, command: Command) {
        let accepted = ctx
            .phase
            .send_if_modified(|phase| match (&command, *phase) {
                (Command::Prepare { .. }, Phase::Idle) => {
                    *phase = Phase::Preparing;
                    true
                }
                (Command::Fetch, Phase::Ready) => {
                    *phase = Phase::Fetching;
                    true
                }
                _ => false,
            });

        if !accepted {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "Ignoring {} while {:?}",
                command.name(),
                *ctx.phase.borrow()
            );
            return;
        }

        // The phase gate admits one command at a time, so the channel is
        // never full; it can only be closed if the session task died.
        if let Err(_e) = self.commands.try_send(command) {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to forward command to session: {_e}");
        }
    }
}

/// Supervisor task: routes commands and restarts the session on clear.
///
/// Runs until a [`SupervisorRequest::Shutdown`] arrives, every handle is
/// dropped, or `shutdown_token` is cancelled. The running session is always
/// cancelled and joined before the supervisor returns.
pub(crate) async fn supervisor_loop<S, R>(
    mut requests: mpsc::Receiver<SupervisorRequest>,
    ctx: SessionContext<S, R>,
    shutdown_token: CancellationToken,
) where
    S: VocabularyStore + ?Sized + 'static,
    R: RandSource + Clone + Send + Sync + 'static,
{
    #[cfg(feature = "tracing")]
    tracing::debug!("Supervisor started");

    let mut session = SessionTask::spawn(&ctx, &shutdown_token);

    loop {
        let request = tokio::select! {
            biased;
            () = shutdown_token.cancelled() => break,
            request = requests.recv() => match request {
                Some(request) => request,
                None => break,
            },
        };

        match request {
            SupervisorRequest::Signal(Command::Clear) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Clear received, restarting session");

                session.cancel().await;
                ctx.phase.send_replace(Phase::Idle);
                session = SessionTask::spawn(&ctx, &shutdown_token);
            }
            SupervisorRequest::Signal(command) => session.offer(&ctx, command),
            SupervisorRequest::Shutdown { response } => {
                session.cancel().await;
                ctx.phase.send_replace(Phase::Idle);

                if response.send(()).is_err() {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Shutdown requester went away before acknowledgement");
                }

                #[cfg(feature = "tracing")]
                tracing::debug!("Supervisor stopped");
                return;
            }
        }
    }

    session.cancel().await;
    ctx.phase.send_replace(Phase::Idle);

    #[cfg(feature = "tracing")]
    tracing::debug!("Supervisor stopped");
}
