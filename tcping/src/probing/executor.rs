//! # Probe Executor
//!
//! One timed TCP connect against the target, bounded by the connect timeout
//! and by the run's [`StopSignal`], whichever fires first.
//!
//! ## Outcome Classification
//!
//! Checked in this order:
//!
//! 1. **Cancelled** - the stop signal fired before or during the attempt.
//!    Reported as [`ProbeAttempt::Cancelled`] and never recorded.
//! 2. **Timed out** - no connection within the timeout, [`ProbeFailure::Timeout`].
//! 3. **Connect error** - refused, unreachable, reset... the OS error text is
//!    preserved in [`ProbeFailure::Connect`].
//!
//! ## Socket Ownership
//!
//! The socket lives inside the connect future. On cancellation or timeout the
//! future is dropped before this function returns, which closes the socket;
//! on success the stream is dropped right after its local address is read.
//! No data is ever exchanged.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use log::debug;
use tokio::net::TcpStream;

use super::{Probe, ProbeAttempt, ProbeOutcome, StopSignal};
use crate::config::RunConfig;
use crate::domain::{ProbeFailure, Target};

/// Opens the TCP connection for a [`TcpProbe`].
///
/// The returned future owns the socket until it resolves, so dropping it
/// early closes the socket.
pub trait Connector: Send + Sync {
    fn connect(&self, addr: SocketAddr) -> impl Future<Output = io::Result<TcpStream>> + Send;
}

/// Plain `TcpStream::connect`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioConnector;

impl Connector for TokioConnector {
    fn connect(&self, addr: SocketAddr) -> impl Future<Output = io::Result<TcpStream>> + Send {
        TcpStream::connect(addr)
    }
}

/// Probes a target by opening, and immediately closing, a TCP connection.
#[derive(Debug, Clone)]
pub struct TcpProbe<C = TokioConnector> {
    target: Target,
    timeout: Duration,
    connector: C,
}

impl TcpProbe {
    #[must_use]
    pub fn new(target: Target, timeout: Duration) -> Self {
        Self::with_connector(target, timeout, TokioConnector)
    }

    #[must_use]
    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.target.clone(), config.timeout)
    }
}

impl<C: Connector> TcpProbe<C> {
    /// Same probe, with the connection opened by `connector`
    #[must_use]
    pub fn with_connector(target: Target, timeout: Duration, connector: C) -> Self {
        Self {
            target,
            timeout,
            connector,
        }
    }

    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }
}

impl<C: Connector> Probe for TcpProbe<C> {
    fn probe(&self, stop: &StopSignal) -> impl Future<Output = ProbeAttempt> + Send {
        async move {
            let start = Instant::now();
            let connect = tokio::time::timeout(self.timeout, self.connector.connect(self.target.addr()));

            // biased: an already-fired stop signal wins over a connect that
            // happens to be ready on first poll
            let result = tokio::select! {
                biased;
                () = stop.stopped() => {
                    debug!("connect to {} cancelled after {:.2}ms", self.target, elapsed_ms(start));
                    return ProbeAttempt::Cancelled;
                }
                result = connect => result,
            };
            let elapsed = elapsed_ms(start);

            let outcome = match result {
                Ok(Ok(stream)) => {
                    let local_addr = stream.local_addr().ok();
                    drop(stream);
                    ProbeOutcome::success(elapsed, local_addr)
                }
                Ok(Err(err)) => ProbeOutcome::failure(elapsed, ProbeFailure::Connect(err.to_string())),
                Err(_) => ProbeOutcome::failure(elapsed, ProbeFailure::Timeout),
            };
            ProbeAttempt::Finished(outcome)
        }
    }
}

/// Fractional milliseconds since `start`
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
