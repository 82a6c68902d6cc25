//! Cooperative stop signal shared by the scheduler and the executor

use std::sync::{Arc, OnceLock};

use log::info;
use tokio_util::sync::CancellationToken;

/// Why the run was asked to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// External interrupt (Ctrl-C, SIGTERM)
    Interrupt,
    /// Programmatic cancellation, e.g. a parent operation going away
    Cancel,
}

/// One cancellation token observed at every suspension point of a run.
///
/// Cloning is cheap and every clone refers to the same token. The first
/// reason passed to [`interrupt`](Self::interrupt) or
/// [`cancel`](Self::cancel) wins; later calls only re-cancel the token.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    token: CancellationToken,
    reason: Arc<OnceLock<StopReason>>,
}

impl StopSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop because of an external interrupt
    pub fn interrupt(&self) {
        self.stop(StopReason::Interrupt);
    }

    /// Stop because the caller no longer wants the run
    pub fn cancel(&self) {
        self.stop(StopReason::Cancel);
    }

    fn stop(&self, reason: StopReason) {
        if self.reason.set(reason).is_ok() {
            info!("stop requested: {reason:?}");
        }
        self.token.cancel();
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The first reason recorded, if any
    #[must_use]
    pub fn reason(&self) -> Option<StopReason> {
        self.reason.get().copied()
    }

    /// Resolves once the signal has fired (immediately if it already has)
    pub async fn stopped(&self) {
        self.token.cancelled().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_reason_wins() {
        let stop = StopSignal::new();
        assert!(!stop.is_stopped());
        assert_eq!(stop.reason(), None);

        stop.interrupt();
        stop.cancel();
        assert!(stop.is_stopped());
        assert_eq!(stop.reason(), Some(StopReason::Interrupt));
    }

    #[test]
    fn test_clones_share_state() {
        let stop = StopSignal::new();
        let other = stop.clone();
        other.cancel();
        assert!(stop.is_stopped());
        assert_eq!(stop.reason(), Some(StopReason::Cancel));
    }

    #[tokio::test]
    async fn test_stopped_wakes_waiters() {
        let stop = StopSignal::new();
        let waiter = {
            let stop = stop.clone();
            tokio::spawn(async move { stop.stopped().await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        stop.interrupt();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake promptly")
            .unwrap();
    }
}
