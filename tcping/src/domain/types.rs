//! Domain types providing compile-time safety and self-documentation

use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Address family requested on the command line (`-4` / `-6`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressFamily {
    /// Whatever the host resolves to first
    #[default]
    Any,
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// Returns true if `ip` belongs to this family
    #[must_use]
    pub fn accepts(self, ip: IpAddr) -> bool {
        match self {
            Self::Any => true,
            Self::Ipv4 => ip.is_ipv4(),
            Self::Ipv6 => ip.is_ipv6(),
        }
    }
}

/// A resolved probe target
///
/// Keeps the host exactly as the user typed it (for the header and summary)
/// next to the socket address every probe connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    host: String,
    addr: SocketAddr,
}

impl Target {
    #[must_use]
    pub fn new(host: impl Into<String>, addr: SocketAddr) -> Self {
        Self { host: host.into(), addr }
    }

    /// Host as supplied by the user (hostname or literal)
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    #[must_use]
    pub fn ip(&self) -> IpAddr {
        self.addr.ip()
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// "IPv4" or "IPv6"
    #[must_use]
    pub fn family_label(&self) -> &'static str {
        if self.addr.is_ipv4() {
            "IPv4"
        } else {
            "IPv6"
        }
    }
}

/// Displays as `ip:port`, with IPv6 addresses bracketed
impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}
