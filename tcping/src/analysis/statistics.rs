//! Running statistics over a probe run.
//!
//! # Architecture
//!
//! - **`Statistics`** - shared accumulator, one `record()` per completed probe
//! - **`Snapshot`** - consistent point-in-time copy read by the report
//!
//! ## Data Flow
//!
//! ```text
//! Probe executor ──► ProbeOutcome ──► Statistics.record()
//!                                          │
//!                          (terminal state reached)
//!                                          │
//!                                          ▼
//!                              Statistics.snapshot() ──► summary
//! ```
//!
//! Every field sits behind a single mutex. `record()` and `snapshot()` take
//! that lock for the duration of the bookkeeping only; no network I/O ever
//! happens while it is held.
//!
//! Means are kept with the incremental recurrence
//! `avg += (x - avg) / n` rather than as a running total, so long unbounded
//! runs never accumulate a large sum.

// Sample counts are converted to f64 for the mean recurrences
#![allow(clippy::cast_precision_loss)]

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::probing::ProbeOutcome;

// =============================================================================
// SNAPSHOT (OUTPUT TYPE)
// =============================================================================

/// A consistent copy of the statistics at one point in time.
///
/// Latency fields are `None` until at least one probe succeeded; the jitter
/// mean is `None` until two probes succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Snapshot {
    /// Probes attempted (success or failure, cancelled attempts excluded)
    pub sent: u64,
    /// Probes that established a connection
    pub responded: u64,
    pub min_ms: Option<f64>,
    pub max_ms: Option<f64>,
    pub avg_ms: Option<f64>,
    /// Mean absolute difference between consecutive successful probes
    pub jitter_avg_ms: Option<f64>,
}

impl Snapshot {
    /// Probes that did not yield a connection
    #[must_use]
    pub fn lost(&self) -> u64 {
        self.sent.saturating_sub(self.responded)
    }

    /// Loss percentage (0.0 - 100.0), `None` when nothing was sent
    #[must_use]
    pub fn loss_percent(&self) -> Option<f64> {
        (self.sent > 0).then(|| self.lost() as f64 / self.sent as f64 * 100.0)
    }
}

// =============================================================================
// STATISTICS (AGGREGATOR)
// =============================================================================

/// Thread-safe accumulator of probe outcomes.
///
/// Owned by the run (typically behind an `Arc`) and handed explicitly to the
/// scheduler and to whoever renders the final report.
#[derive(Debug, Default)]
pub struct Statistics {
    inner: Mutex<Accumulator>,
}

/// Raw fields guarded by the `Statistics` mutex.
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sent: u64,
    responded: u64,
    min_ms: f64,
    max_ms: f64,
    avg_ms: f64,
    /// Elapsed time of the most recent success, only used for jitter
    last_success_ms: f64,
    jitter_avg_ms: f64,
    jitter_samples: u64,
}

impl Statistics {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completed probe into the statistics.
    ///
    /// Always counts the probe as sent. Successful probes additionally update
    /// min/max, the running mean and, from the second success on, the jitter
    /// mean.
    pub fn record(&self, outcome: &ProbeOutcome) {
        let mut acc = self.lock();
        acc.sent += 1;

        if !outcome.is_success() {
            return;
        }

        let elapsed = outcome.elapsed_ms();
        acc.responded += 1;
        let n = acc.responded as f64;

        if acc.responded == 1 {
            acc.min_ms = elapsed;
            acc.max_ms = elapsed;
            acc.avg_ms = elapsed;
        } else {
            acc.min_ms = acc.min_ms.min(elapsed);
            acc.max_ms = acc.max_ms.max(elapsed);
            acc.avg_ms += (elapsed - acc.avg_ms) / n;

            let jitter = (elapsed - acc.last_success_ms).abs();
            acc.jitter_samples += 1;
            acc.jitter_avg_ms += (jitter - acc.jitter_avg_ms) / acc.jitter_samples as f64;
        }

        acc.last_success_ms = elapsed;
    }

    /// Copy every field under one lock acquisition.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let acc = *self.lock();
        let has_latency = acc.responded > 0;

        Snapshot {
            sent: acc.sent,
            responded: acc.responded,
            min_ms: has_latency.then_some(acc.min_ms),
            max_ms: has_latency.then_some(acc.max_ms),
            avg_ms: has_latency.then_some(acc.avg_ms),
            jitter_avg_ms: (acc.jitter_samples > 0).then_some(acc.jitter_avg_ms),
        }
    }

    // A panic while holding the lock leaves the fields in a valid state
    // (each update is a handful of plain stores), so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Accumulator> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProbeFailure;
    use std::sync::Arc;

    fn ok(ms: f64) -> ProbeOutcome {
        ProbeOutcome::success(ms, None)
    }

    fn failed() -> ProbeOutcome {
        ProbeOutcome::failure(1000.0, ProbeFailure::Timeout)
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_empty_snapshot_has_no_latency() {
        let snap = Statistics::new().snapshot();
        assert_eq!(snap, Snapshot::default());
        assert_eq!(snap.loss_percent(), None);
    }

    #[test]
    fn test_all_successes() {
        let stats = Statistics::new();
        for ms in [10.0, 20.0, 15.0] {
            stats.record(&ok(ms));
        }

        let snap = stats.snapshot();
        assert_eq!(snap.sent, 3);
        assert_eq!(snap.responded, 3);
        assert_eq!(snap.min_ms, Some(10.0));
        assert_eq!(snap.max_ms, Some(20.0));
        assert!(approx_eq(snap.avg_ms.unwrap(), 15.0));
        assert!(approx_eq(snap.jitter_avg_ms.unwrap(), 7.5));
        assert_eq!(snap.loss_percent(), Some(0.0));
    }

    #[test]
    fn test_mixed_outcomes() {
        let stats = Statistics::new();
        stats.record(&failed());
        stats.record(&ok(5.0));
        stats.record(&failed());
        stats.record(&ok(7.0));

        let snap = stats.snapshot();
        assert_eq!(snap.sent, 4);
        assert_eq!(snap.responded, 2);
        assert_eq!(snap.lost(), 2);
        assert_eq!(snap.min_ms, Some(5.0));
        assert_eq!(snap.max_ms, Some(7.0));
        assert!(approx_eq(snap.avg_ms.unwrap(), 6.0));
        assert_eq!(snap.loss_percent(), Some(50.0));
    }

    #[test]
    fn test_failures_only_touch_sent() {
        let stats = Statistics::new();
        stats.record(&failed());

        let snap = stats.snapshot();
        assert_eq!(snap.sent, 1);
        assert_eq!(snap.responded, 0);
        assert_eq!(snap.min_ms, None);
        assert_eq!(snap.avg_ms, None);
        assert_eq!(snap.jitter_avg_ms, None);
        assert_eq!(snap.loss_percent(), Some(100.0));
    }

    #[test]
    fn test_jitter_needs_two_successes() {
        let stats = Statistics::new();
        stats.record(&ok(42.0));
        stats.record(&failed());

        let snap = stats.snapshot();
        assert_eq!(snap.avg_ms, Some(42.0));
        assert_eq!(snap.jitter_avg_ms, None);
    }

    #[test]
    fn test_jitter_skips_over_failures() {
        // Jitter pairs consecutive *successes*, failures in between don't reset it
        let stats = Statistics::new();
        stats.record(&ok(10.0));
        stats.record(&failed());
        stats.record(&ok(16.0));

        assert!(approx_eq(stats.snapshot().jitter_avg_ms.unwrap(), 6.0));
    }

    #[test]
    fn test_incremental_mean_matches_sum() {
        let samples: Vec<f64> = (1..=10_000).map(|i| f64::from(i % 97) * 0.37 + 1.5).collect();
        let stats = Statistics::new();
        for &ms in &samples {
            stats.record(&ok(ms));
        }

        let snap = stats.snapshot();
        let expected_avg = samples.iter().sum::<f64>() / samples.len() as f64;
        let expected_jitter = samples.windows(2).map(|w| (w[1] - w[0]).abs()).sum::<f64>()
            / (samples.len() - 1) as f64;

        assert!(approx_eq(snap.avg_ms.unwrap(), expected_avg));
        assert!(approx_eq(snap.jitter_avg_ms.unwrap(), expected_jitter));
        for &ms in &samples {
            assert!(snap.min_ms.unwrap() <= ms && ms <= snap.max_ms.unwrap());
        }
    }

    #[test]
    fn test_concurrent_records_are_not_lost() {
        let stats = Arc::new(Statistics::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let stats = Arc::clone(&stats);
                std::thread::spawn(move || {
                    for i in 0..250 {
                        if (i + t) % 2 == 0 {
                            stats.record(&ok(f64::from(i)));
                        } else {
                            stats.record(&failed());
                        }
                        let snap = stats.snapshot();
                        assert!(snap.responded <= snap.sent);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = stats.snapshot();
        assert_eq!(snap.sent, 1000);
        assert_eq!(snap.responded, 500);
    }
}
