//! # tcping - TCP reachability and latency probing
//!
//! Repeatedly opens (and immediately closes) a TCP connection to one
//! endpoint, prints a line per attempt and a min/avg/max/jitter/loss summary
//! at the end, much like `ping` but over a TCP handshake.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  cli::Args ──► resolve::resolve() ──► config::RunConfig        │
//! └───────────────────────────┬──────────────────────────────────┘
//!                             ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  session::run_session()          (main task: select!)        │
//! │     │                                                        │
//! │     ├─ spawn ─► probing::Scheduler ── tick ──► TcpProbe      │
//! │     │              │        ▲                     │          │
//! │     │              │        └──── ProbeAttempt ◄──┘          │
//! │     │              ▼                                         │
//! │     │     analysis::Statistics.record()  report::Renderer    │
//! │     │                                    (per-probe lines)   │
//! │     └─ interrupt ─► probing::StopSignal ─► every await point │
//! └───────────────────────────┬──────────────────────────────────┘
//!                             ▼
//!          Statistics.snapshot() ──► Renderer::summary()
//! ```
//!
//! ## Module Structure
//!
//! - [`probing`]: the stop signal, the TCP executor and the scheduler loop
//! - [`analysis`]: thread-safe running statistics and snapshots
//! - [`report`]: per-probe lines, the summary, colours, error-text cleanup
//! - [`session`]: runs the scheduler on a task and races it against Ctrl-C
//! - [`resolve`]: numeric IPv4 forms, literals, DNS, address family choice
//! - [`cli`] / [`config`]: argument parsing and the validated run config
//! - [`domain`]: core types (`Target`, `AddressFamily`) and error enums
//!
//! ## Cancellation
//!
//! One [`probing::StopSignal`] is shared by the scheduler and the executor.
//! The connect attempt and the inter-probe sleep both race it, so Ctrl-C
//! ends a run within one poll, not after the remaining timeout. A probe
//! aborted this way is never counted.
//!
//! ## Typical Usage
//!
//! ```bash
//! tcping example.com 443
//! tcping -n 5 -t 500 -w 2000 10.0.0.1 22
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod domain;
pub mod probing;
pub mod report;
pub mod resolve;
pub mod session;
