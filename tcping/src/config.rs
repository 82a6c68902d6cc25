//! Run configuration handed to the probing core

use std::time::Duration;

use crate::cli::Args;
use crate::domain::Target;

/// Everything one run needs, already validated and resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub target: Target,
    /// Probes to send; 0 runs until stopped
    pub count: u64,
    /// Wait between the end of one probe and the start of the next
    pub interval: Duration,
    /// Upper bound for a single connect attempt
    pub timeout: Duration,
}

impl RunConfig {
    /// Combine parsed arguments with the resolved target.
    ///
    /// Interval and timeout are always given in milliseconds.
    #[must_use]
    pub fn from_args(args: &Args, target: Target) -> Self {
        Self {
            target,
            count: args.count,
            interval: Duration::from_millis(args.interval),
            timeout: Duration::from_millis(args.timeout),
        }
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.count == 0
    }
}
