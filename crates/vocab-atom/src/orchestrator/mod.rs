//! Cancellable, restartable vocabulary fetching.
//!
//! The orchestrator is a small tree of tokio tasks:
//!
//! - The **supervisor** ([`supervisor_loop`]) owns the command channel. It is
//!   the clear listener: on [`Command::Clear`] it cancels the running session
//!   task and spawns a fresh one. Other commands are gated by the current
//!   [`Phase`] and forwarded to the session task.
//! - The **session task** ([`session_loop`]) awaits a prepare command, builds
//!   a [`FetchSession`] around a freshly initialized [`RangeSampler`], then
//!   runs one accumulation episode per fetch command.
//!
//! Cancellation is cooperative: every await in the session task is raced
//! against its [`CancellationToken`], and a cancelled episode never emits an
//! event.
//!
//! [`supervisor_loop`]: supervisor::supervisor_loop
//! [`session_loop`]: worker::session_loop
//! [`FetchSession`]: session::FetchSession
//! [`Command::Clear`]: crate::Command::Clear
//! [`Phase`]: crate::Phase
//! [`RangeSampler`]: crate::RangeSampler
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

mod handle;
mod request;
mod session;
mod supervisor;
mod worker;

pub use handle::*;
