//! Probing core
//!
//! - `outcome`: what one probe attempt produces
//! - `stop`: the cancellation signal shared by every suspension point
//! - `executor`: one timed, cancellable TCP connect and its `Connector` seam
//! - `scheduler`: the repeat/interval loop and its state machine

pub mod executor;
pub mod outcome;
pub mod scheduler;
pub mod stop;

use std::future::Future;

// Re-export common types
pub use executor::{Connector, TcpProbe, TokioConnector};
pub use outcome::{ProbeAttempt, ProbeOutcome};
pub use scheduler::{ProbeObserver, RunState, Scheduler};
pub use stop::{StopReason, StopSignal};

/// A single reachability measurement.
///
/// Implementations must return [`ProbeAttempt::Cancelled`] promptly once
/// `stop` fires, and must release any resource they opened on every path.
pub trait Probe: Send + Sync {
    fn probe(&self, stop: &StopSignal) -> impl Future<Output = ProbeAttempt> + Send;
}
