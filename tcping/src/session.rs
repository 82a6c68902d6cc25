//! # Session - main control flow of one run
//!
//! The scheduler runs on its own Tokio task while the caller waits on two
//! events at once: the task finishing and an external interrupt.
//!
//! ```text
//!            ┌──────────── spawn ────────────┐
//!            │                               ▼
//!   run_session ──select──► interrupt   Scheduler::run
//!            │                 │             │
//!            │        stop.interrupt() ─────►│ (probe / sleep abort)
//!            │                               │
//!            └──────── await task ◄──────────┘
//!                         │
//!                         ▼
//!                 snapshot + terminal state
//! ```
//!
//! On interrupt the task is always awaited, never detached, so the snapshot
//! is taken only after the last in-flight probe has been either recorded or
//! dropped.

use std::future::Future;
use std::sync::Arc;

use log::warn;

use crate::analysis::Snapshot;
use crate::domain::SessionError;
use crate::probing::{Probe, ProbeObserver, RunState, Scheduler, StopSignal};

/// What a finished session hands back for reporting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionReport {
    pub state: RunState,
    pub snapshot: Snapshot,
}

/// Drive `scheduler` to a terminal state.
///
/// `interrupt` is raced against the probe loop; when it resolves first the
/// shared stop signal is raised with
/// [`StopReason::Interrupt`](crate::probing::StopReason::Interrupt). Calling [`StopSignal::cancel`] on `stop`
/// from elsewhere ends the run as `Cancelled`.
///
/// # Errors
/// Returns [`SessionError::TaskFailed`] if the probe task panicked.
pub async fn run_session<P, O, F>(
    scheduler: Arc<Scheduler<P, O>>,
    stop: StopSignal,
    interrupt: F,
) -> Result<SessionReport, SessionError>
where
    P: Probe + 'static,
    O: ProbeObserver + 'static,
    F: Future<Output = ()>,
{
    let mut task = tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        let stop = stop.clone();
        async move { scheduler.run(&stop).await }
    });
    tokio::pin!(interrupt);

    let finished = tokio::select! {
        joined = &mut task => Some(joined),
        () = &mut interrupt => None,
    };

    let joined = match finished {
        Some(joined) => joined,
        None => {
            stop.interrupt();
            task.await
        }
    };

    let state = joined?;
    Ok(SessionReport { state, snapshot: scheduler.statistics().snapshot() })
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
///
/// A handler that cannot be installed is logged and never fires.
pub async fn interrupt_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
