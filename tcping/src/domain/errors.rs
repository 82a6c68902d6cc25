//! Structured error types for tcping
//!
//! Using thiserror for automatic Display implementation and error chaining.

use thiserror::Error;

/// Failure to turn the user's host argument into a target address.
///
/// These are configuration errors: they are raised before the probe loop
/// starts and never touch the statistics.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("IPv6 does not accept the decimal numeric address form: {0}")]
    DecimalIpv6(String),

    #[error("IPv6 does not accept the hexadecimal numeric address form: {0}")]
    HexIpv6(String),

    #[error("address {0} is not an IPv4 address")]
    NotIpv4(String),

    #[error("address {0} is not an IPv6 address")]
    NotIpv6(String),

    #[error("failed to resolve {host}: {source}")]
    Lookup {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no IP address found for {0}")]
    NoAddress(String),

    #[error("no IPv4 address found for {0}")]
    NoIpv4Address(String),

    #[error("no IPv6 address found for {0}")]
    NoIpv6Address(String),
}

/// Why a single probe did not produce a connection.
///
/// Recorded as a failed probe; the loop always continues after one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    #[error("timeout")]
    Timeout,

    /// Refused, unreachable, reset... the OS error text is kept as-is
    #[error("{0}")]
    Connect(String),
}

/// The probe loop itself could not be driven to a terminal state
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("probe task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_failure_display() {
        assert_eq!(ProbeFailure::Timeout.to_string(), "timeout");
        let err = ProbeFailure::Connect("Connection refused (os error 111)".to_string());
        assert_eq!(err.to_string(), "Connection refused (os error 111)");
    }

    #[test]
    fn test_lookup_error_names_host() {
        let err = ResolveError::Lookup {
            host: "nowhere.invalid".to_string(),
            source: std::io::Error::other("no such host"),
        };
        assert!(err.to_string().contains("nowhere.invalid"));
        assert!(err.to_string().contains("no such host"));
    }
}
