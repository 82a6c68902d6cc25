//! Values produced by a single probe attempt

use std::net::SocketAddr;

use crate::domain::ProbeFailure;

/// Result of one completed (non-cancelled) probe.
///
/// Immutable once built; the scheduler hands it to the statistics exactly once
/// and then to the observer for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    elapsed_ms: f64,
    status: ProbeStatus,
}

#[derive(Debug, Clone, PartialEq)]
enum ProbeStatus {
    /// Local end of the (already closed) connection, when the OS reported it
    Connected(Option<SocketAddr>),
    Failed(ProbeFailure),
}

impl ProbeOutcome {
    #[must_use]
    pub fn success(elapsed_ms: f64, local_addr: Option<SocketAddr>) -> Self {
        Self { elapsed_ms, status: ProbeStatus::Connected(local_addr) }
    }

    #[must_use]
    pub fn failure(elapsed_ms: f64, reason: ProbeFailure) -> Self {
        Self { elapsed_ms, status: ProbeStatus::Failed(reason) }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, ProbeStatus::Connected(_))
    }

    /// Wall-clock duration of the attempt in fractional milliseconds
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    #[must_use]
    pub fn failure_reason(&self) -> Option<&ProbeFailure> {
        match &self.status {
            ProbeStatus::Failed(reason) => Some(reason),
            ProbeStatus::Connected(_) => None,
        }
    }

    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        match self.status {
            ProbeStatus::Connected(addr) => addr,
            ProbeStatus::Failed(_) => None,
        }
    }
}

/// What a probe attempt hands back to the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeAttempt {
    /// The attempt ran to completion (connected, timed out or failed)
    Finished(ProbeOutcome),
    /// The stop signal fired before or during the attempt; nothing to record
    Cancelled,
}
