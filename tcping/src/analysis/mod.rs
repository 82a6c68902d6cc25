//! Aggregation of probe outcomes
//!
//! Pure bookkeeping, separated from the network code in [`crate::probing`]
//! and from the text output in [`crate::report`].

pub mod statistics;

pub use statistics::{Snapshot, Statistics};
