//! Human-readable output: header, one line per probe, final summary.
//!
//! Formatting lives in pure `String`-returning methods so it can be tested;
//! the [`ProbeObserver`] impl is the only place that prints.

use super::sanitize::strip_target;
use super::theme;
use crate::analysis::Snapshot;
use crate::domain::Target;
use crate::probing::{ProbeObserver, ProbeOutcome};

/// Formats everything the user sees for one run.
#[derive(Debug, Clone)]
pub struct Renderer {
    target: Target,
    color: bool,
    verbose: bool,
}

impl Renderer {
    #[must_use]
    pub fn new(target: Target, color: bool, verbose: bool) -> Self {
        Self { target, color, verbose }
    }

    /// `TCPing example.com (IPv4 - 93.184.216.34) port 443`
    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "TCPing {} ({} - {}) port {}",
            self.target.host(),
            self.target.family_label(),
            self.target.ip(),
            self.target.port()
        )
    }

    /// Line (two in verbose mode) for one completed probe
    #[must_use]
    pub fn outcome_line(&self, seq: u64, outcome: &ProbeOutcome) -> String {
        let endpoint = self.target.to_string();

        match outcome.failure_reason() {
            None => {
                let mut line = theme::success(
                    &format!("Reply from {endpoint}: seq={seq} time={:.2}ms", outcome.elapsed_ms()),
                    self.color,
                );
                if self.verbose {
                    let local = outcome
                        .local_addr()
                        .map_or_else(|| "unknown".to_string(), |addr| addr.to_string());
                    line.push_str(&format!("\n  details: local={local}, remote={endpoint}"));
                }
                line
            }
            Some(reason) => {
                let reason = strip_target(&reason.to_string(), &endpoint);
                let mut line = theme::failure(
                    &format!("TCP connect to {endpoint} failed: seq={seq} error={reason}"),
                    self.color,
                );
                if self.verbose {
                    line.push_str(&format!(
                        "\n  details: attempt took {:.2}ms, target {endpoint}",
                        outcome.elapsed_ms()
                    ));
                }
                line
            }
        }
    }

    #[must_use]
    pub fn cancelled_line(&self) -> String {
        theme::info("Probe aborted, connect attempt cancelled", self.color)
    }

    #[must_use]
    pub fn interrupted_line(&self) -> String {
        theme::info("Operation interrupted.", self.color)
    }

    /// End-of-run summary from one snapshot.
    ///
    /// Latency is only shown once something responded, jitter only once
    /// two probes responded.
    #[must_use]
    pub fn summary(&self, snapshot: &Snapshot) -> String {
        let mut lines = vec![format!("\n--- {} TCP ping statistics ---", self.target.host())];

        if let Some(loss) = snapshot.loss_percent() {
            lines.push(format!(
                "{} sent, {} received, {} lost ({loss:.1}% loss)",
                snapshot.sent,
                snapshot.responded,
                snapshot.lost()
            ));
        }

        if let (Some(min), Some(avg), Some(max)) = (snapshot.min_ms, snapshot.avg_ms, snapshot.max_ms) {
            lines.push(format!("rtt min/avg/max = {min:.2}/{avg:.2}/{max:.2} ms"));
        }

        if let Some(jitter) = snapshot.jitter_avg_ms {
            lines.push(format!("jitter avg = {jitter:.2} ms"));
        }

        lines.join("\n")
    }
}

impl ProbeObserver for Renderer {
    fn on_outcome(&self, seq: u64, outcome: &ProbeOutcome) {
        println!("{}", self.outcome_line(seq, outcome));
    }

    fn on_cancelled(&self, _seq: u64) {
        println!("\n{}", self.cancelled_line());
    }
}
