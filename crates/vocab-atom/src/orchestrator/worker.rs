use super::session::FetchSession;
use crate::{Command, Error, Event, Phase, RandSource, Result, VocabularyStore};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

/// Everything a session task needs, shared by every session the supervisor
/// spawns.
pub(crate) struct SessionContext<S: ?Sized, R> {
    pub(crate) store: Arc<S>,
    pub(crate) rng: R,
    pub(crate) fetch_limit: usize,
    pub(crate) command_buffer_size: usize,
    pub(crate) events: mpsc::Sender<Event>,
    pub(crate) phase: Arc<watch::Sender<Phase>>,
}

impl<S: ?Sized, R: Clone> Clone for SessionContext<S, R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            rng: self.rng.clone(),
            fetch_limit: self.fetch_limit,
            command_buffer_size: self.command_buffer_size,
            events: self.events.clone(),
            phase: Arc::clone(&self.phase),
        }
    }
}

impl<S: ?Sized, R> SessionContext<S, R> {
    /// Publishes `phase`. Callers do this *before* emitting the event that
    /// reports the transition, so a caller reacting to that event already
    /// sees the new phase.
    fn set_phase(&self, phase: Phase) {
        self.phase.send_replace(phase);
    }

    /// Sends `event` unless `token` is cancelled.
    ///
    /// Returns `None` on cancellation. A closed event channel is not an error
    /// for the session: nobody is listening, but the session keeps serving.
    async fn emit(&self, token: &CancellationToken, event: Event) -> Option<()> {
        if token.is_cancelled() {
            return None;
        }

        match token.run_until_cancelled(self.events.send(event)).await? {
            Ok(()) => {}
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Event receiver dropped: {_e}");
            }
        }
        Some(())
    }
}

/// Body of a session task, spawned by the supervisor.
///
/// Waits for a prepare command, prepares a [`FetchSession`], and then serves
/// fetch commands until `token` is cancelled. A failed prepare returns the
/// session to waiting for another prepare command.
///
/// The supervisor only forwards commands that fit the current phase, so a
/// mismatched command here is dropped.
pub(crate) async fn session_loop<S, R>(
    ctx: SessionContext<S, R>,
    mut commands: mpsc::Receiver<Command>,
    token: CancellationToken,
) where
    S: VocabularyStore + ?Sized,
    R: RandSource + Clone,
{
    #[cfg(feature = "tracing")]
    tracing::trace!("Session task started");

    while let Some(Some(command)) = token.run_until_cancelled(commands.recv()).await {
        let Command::Prepare {
            set_id,
            category_names,
        } = command
        else {
            continue;
        };

        let Some(prepared) = prepare(&ctx, &token, set_id, category_names).await else {
            break;
        };

        match prepared {
            Ok(session) => {
                ctx.set_phase(Phase::Ready);
                if ctx.emit(&token, Event::PrepareSucceeded).await.is_none() {
                    break;
                }
                serve_fetches(&ctx, &mut commands, &token, session).await;
                break;
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::info!("Prepare failed: {e}");

                ctx.set_phase(Phase::Idle);
                if ctx.emit(&token, Event::prepare_failed(e)).await.is_none() {
                    break;
                }
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("Session task stopped");
}

/// Looks up the set's identifier range and builds a session around it.
///
/// Returns `None` if cancelled. An empty set is an
/// [`Error::InsufficientVocabulary`] failure.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(ctx, token, category_names)))]
async fn prepare<S, R>(
    ctx: &SessionContext<S, R>,
    token: &CancellationToken,
    set_id: String,
    category_names: Option<Vec<String>>,
) -> Option<Result<FetchSession<R>>>
where
    S: VocabularyStore + ?Sized,
    R: RandSource + Clone,
{
    ctx.emit(token, Event::Preparing).await?;

    let range = token
        .run_until_cancelled(ctx.store.vocabulary_range(&set_id))
        .await?;

    let prepared = match range {
        Ok(Some(range)) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("Sampling {set_id} over {range}");

            Ok(FetchSession::new(
                set_id,
                category_names,
                ctx.fetch_limit,
                ctx.rng.clone(),
                range,
            ))
        }
        Ok(None) => Err(Error::InsufficientVocabulary {
            requested: ctx.fetch_limit,
            found: 0,
        }),
        Err(e) => Err(e),
    };

    Some(prepared)
}

/// Runs one episode per fetch command until cancelled.
async fn serve_fetches<S, R>(
    ctx: &SessionContext<S, R>,
    commands: &mut mpsc::Receiver<Command>,
    token: &CancellationToken,
    mut session: FetchSession<R>,
) where
    S: VocabularyStore + ?Sized,
    R: RandSource,
{
    while let Some(Some(command)) = token.run_until_cancelled(commands.recv()).await {
        if command != Command::Fetch {
            continue;
        }

        if ctx.emit(token, Event::Fetching).await.is_none() {
            return;
        }

        let Some(result) = session.run_episode(ctx.store.as_ref(), token).await else {
            return;
        };

        let event = match result {
            Ok(vocabulary_list) => Event::FetchSucceeded {
                vocabulary_list,
                no_more: session.no_more(),
            },
            Err(e) => Event::fetch_failed(e),
        };

        ctx.set_phase(Phase::Ready);
        if ctx.emit(token, event).await.is_none() {
            return;
        }
    }
}
