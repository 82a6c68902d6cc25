//! # Probe Scheduler
//!
//! Drives the repeat/interval loop for one run.
//!
//! ## State Machine
//!
//! ```text
//!   Idle ──run()──► Running ──count exhausted──► Completed
//!                      │
//!                      ├──stop: Interrupt──► Interrupted
//!                      └──stop: Cancel─────► Cancelled
//! ```
//!
//! Each tick checks the stop signal, runs exactly one probe and waits for it,
//! records the outcome, then either finishes or sleeps for the interval. Both
//! the probe and the sleep race the stop signal, so a stop request is seen
//! within one poll instead of after the remaining timeout or interval.
//!
//! A probe cancelled mid-flight is reported to the observer but never reaches
//! the statistics.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::watch;

use super::{Probe, ProbeAttempt, ProbeOutcome, StopReason, StopSignal};
use crate::analysis::Statistics;
use crate::config::RunConfig;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    /// The configured probe count was reached
    Completed,
    /// An external interrupt stopped the run
    Interrupted,
    /// The run was cancelled programmatically
    Cancelled,
}

impl RunState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Interrupted | Self::Cancelled)
    }
}

/// Receives per-probe results as they happen (e.g. to print them).
pub trait ProbeObserver: Send + Sync {
    /// A probe finished and has already been recorded
    fn on_outcome(&self, seq: u64, outcome: &ProbeOutcome);

    /// The probe with this sequence number was aborted by the stop signal
    fn on_cancelled(&self, _seq: u64) {}
}

/// Observer that ignores everything
impl ProbeObserver for () {
    fn on_outcome(&self, _seq: u64, _outcome: &ProbeOutcome) {}
}

/// Runs probes one at a time according to a [`RunConfig`].
pub struct Scheduler<P, O> {
    config: RunConfig,
    probe: P,
    observer: O,
    stats: Arc<Statistics>,
    state: watch::Sender<RunState>,
}

impl<P: Probe, O: ProbeObserver> Scheduler<P, O> {
    #[must_use]
    pub fn new(config: RunConfig, probe: P, observer: O, stats: Arc<Statistics>) -> Self {
        let (state, _) = watch::channel(RunState::Idle);
        Self { config, probe, observer, stats, state }
    }

    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    #[must_use]
    pub fn statistics(&self) -> &Arc<Statistics> {
        &self.stats
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        *self.state.borrow()
    }

    /// Watch state transitions
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    /// Run the loop until the count is exhausted or `stop` fires.
    ///
    /// Returns the terminal state. Every probe that finished before that
    /// point has been recorded by the time this returns. A scheduler runs
    /// once; calling this again returns the state it already reached.
    pub async fn run(&self, stop: &StopSignal) -> RunState {
        // Check and claim in one step so concurrent callers cannot both start
        let claimed = self.state.send_if_modified(|state| {
            if *state == RunState::Idle {
                *state = RunState::Running;
                true
            } else {
                false
            }
        });
        if !claimed {
            let current = self.state();
            warn!("scheduler already started, state {current:?}");
            return current;
        }
        debug!("scheduler state Idle -> Running");

        let state = self.probe_loop(stop).await;
        self.transition(state);
        state
    }

    async fn probe_loop(&self, stop: &StopSignal) -> RunState {
        let count = self.config.count;
        let mut seq: u64 = 0;

        loop {
            if stop.is_stopped() {
                return stopped_state(stop);
            }

            match self.probe.probe(stop).await {
                ProbeAttempt::Finished(outcome) => {
                    self.stats.record(&outcome);
                    debug!("probe {seq} finished, success={}", outcome.is_success());
                    self.observer.on_outcome(seq, &outcome);
                }
                ProbeAttempt::Cancelled => {
                    debug!("probe {seq} cancelled in flight, not recorded");
                    self.observer.on_cancelled(seq);
                    return stopped_state(stop);
                }
            }

            seq += 1;
            if count > 0 && seq >= count {
                return RunState::Completed;
            }

            tokio::select! {
                biased;
                () = stop.stopped() => return stopped_state(stop),
                () = tokio::time::sleep(self.config.interval) => {}
            }
        }
    }

    fn transition(&self, next: RunState) {
        let prev = self.state.send_replace(next);
        debug!("scheduler state {prev:?} -> {next:?}");
    }
}

fn stopped_state(stop: &StopSignal) -> RunState {
    match stop.reason() {
        Some(StopReason::Interrupt) => RunState::Interrupted,
        Some(StopReason::Cancel) | None => RunState::Cancelled,
    }
}
