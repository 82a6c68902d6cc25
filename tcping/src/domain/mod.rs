//! Domain model for tcping
//!
//! - [`Target`]: the host as typed by the user plus the single socket
//!   address every probe connects to
//! - [`AddressFamily`]: which IP family resolution may pick
//! - Error enums shared by resolution, probing and the session

pub mod errors;
pub mod types;

// Re-export common types for convenience
pub use types::{AddressFamily, Target};

pub use errors::{ProbeFailure, ResolveError, SessionError};
