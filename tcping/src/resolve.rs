//! Turn the user's host argument into a probe target.
//!
//! Accepted forms, tried in order:
//! - numeric IPv4: a decimal (`134744072`) or `0x`-prefixed hexadecimal
//!   (`0x08080808`) 32-bit integer
//! - literal IPv4 / IPv6 addresses (IPv6 optionally bracketed)
//! - host names, resolved through the system resolver
//!
//! The address family is taken from `-4` / `-6` when given, otherwise guessed
//! from the shape of the host.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use log::debug;

use crate::domain::{AddressFamily, ResolveError, Target};

/// Resolve `host` to a target on `port`.
///
/// # Errors
/// - numeric IPv4 forms combined with a forced IPv6 family
/// - a literal address of the wrong family
/// - lookup failures, or no address of the requested family
pub async fn resolve(host: &str, family: AddressFamily, port: u16) -> Result<Target, ResolveError> {
    let family = effective_family(host, family);
    let ip = resolve_ip(host, family, port).await?;
    debug!("resolved {host} ({family:?}) to {ip}");
    Ok(Target::new(host, SocketAddr::new(ip, port)))
}

/// Forced family wins; otherwise infer it from what the host looks like.
#[must_use]
pub fn effective_family(host: &str, forced: AddressFamily) -> AddressFamily {
    match forced {
        AddressFamily::Any if looks_like_ipv4(host) => AddressFamily::Ipv4,
        AddressFamily::Any if looks_like_ipv6(host) => AddressFamily::Ipv6,
        other => other,
    }
}

async fn resolve_ip(host: &str, family: AddressFamily, port: u16) -> Result<IpAddr, ResolveError> {
    if family == AddressFamily::Ipv6 {
        if host.parse::<u32>().is_ok() {
            return Err(ResolveError::DecimalIpv6(host.to_string()));
        }
        if parse_hex_ipv4(host).is_some() {
            return Err(ResolveError::HexIpv6(host.to_string()));
        }
    } else if let Some(ip) = parse_numeric_ipv4(host) {
        return Ok(IpAddr::V4(ip));
    }

    if let Ok(ip) = strip_brackets(host).parse::<IpAddr>() {
        return match family {
            AddressFamily::Ipv4 if !ip.is_ipv4() => Err(ResolveError::NotIpv4(host.to_string())),
            AddressFamily::Ipv6 if !ip.is_ipv6() => Err(ResolveError::NotIpv6(host.to_string())),
            _ => Ok(ip),
        };
    }

    let addrs: Vec<IpAddr> = tokio::net::lookup_host((host, port))
        .await
        .map_err(|source| ResolveError::Lookup { host: host.to_string(), source })?
        .map(|addr| addr.ip())
        .collect();

    pick_address(host, family, &addrs)
}

/// First address of the wanted family, or the first one overall for `Any`
fn pick_address(host: &str, family: AddressFamily, addrs: &[IpAddr]) -> Result<IpAddr, ResolveError> {
    if addrs.is_empty() {
        return Err(ResolveError::NoAddress(host.to_string()));
    }

    addrs.iter().copied().find(|ip| family.accepts(*ip)).ok_or_else(|| match family {
        AddressFamily::Ipv6 => ResolveError::NoIpv6Address(host.to_string()),
        _ => ResolveError::NoIpv4Address(host.to_string()),
    })
}

/// Decimal first, then `0x` hexadecimal
#[must_use]
pub fn parse_numeric_ipv4(host: &str) -> Option<Ipv4Addr> {
    host.parse::<u32>().ok().map(Ipv4Addr::from).or_else(|| parse_hex_ipv4(host))
}

fn parse_hex_ipv4(host: &str) -> Option<Ipv4Addr> {
    let digits = host.strip_prefix("0x").or_else(|| host.strip_prefix("0X"))?;
    u32::from_str_radix(digits, 16).ok().map(Ipv4Addr::from)
}

fn looks_like_ipv4(host: &str) -> bool {
    parse_numeric_ipv4(host).is_some() || host.parse::<Ipv4Addr>().is_ok()
}

fn looks_like_ipv6(host: &str) -> bool {
    host.matches(':').count() >= 2
}

fn strip_brackets(host: &str) -> &str {
    host.strip_prefix('[').and_then(|h| h.strip_suffix(']')).unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    #[test]
    fn test_numeric_ipv4_forms() {
        let google = Ipv4Addr::new(8, 8, 8, 8);
        assert_eq!(parse_numeric_ipv4("134744072"), Some(google));
        assert_eq!(parse_numeric_ipv4("0x08080808"), Some(google));
        assert_eq!(parse_numeric_ipv4("0X08080808"), Some(google));
        // Bare hex words are host names, not addresses
        assert_eq!(parse_numeric_ipv4("cafe"), None);
        assert_eq!(parse_numeric_ipv4("4294967296"), None);
        assert_eq!(parse_numeric_ipv4("8.8.8.8"), None);
    }

    #[test]
    fn test_effective_family() {
        assert_eq!(effective_family("8.8.8.8", AddressFamily::Any), AddressFamily::Ipv4);
        assert_eq!(effective_family("0x08080808", AddressFamily::Any), AddressFamily::Ipv4);
        assert_eq!(effective_family("2001:db8::1", AddressFamily::Any), AddressFamily::Ipv6);
        assert_eq!(effective_family("example.com", AddressFamily::Any), AddressFamily::Any);
        assert_eq!(effective_family("example.com", AddressFamily::Ipv6), AddressFamily::Ipv6);
    }

    #[tokio::test]
    async fn test_resolves_literals() {
        let target = resolve("134744072", AddressFamily::Any, 443).await.unwrap();
        assert_eq!(target.addr(), "8.8.8.8:443".parse().unwrap());
        assert_eq!(target.host(), "134744072");

        let target = resolve("[::1]", AddressFamily::Any, 80).await.unwrap();
        assert_eq!(target.ip(), IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert_eq!(target.to_string(), "[::1]:80");
    }

    #[tokio::test]
    async fn test_family_mismatch() {
        let err = resolve("::1", AddressFamily::Ipv4, 80).await.unwrap_err();
        assert!(matches!(err, ResolveError::NotIpv4(_)));

        let err = resolve("127.0.0.1", AddressFamily::Ipv6, 80).await.unwrap_err();
        assert!(matches!(err, ResolveError::NotIpv6(_)));
    }

    #[tokio::test]
    async fn test_numeric_forms_rejected_for_ipv6() {
        let err = resolve("134744072", AddressFamily::Ipv6, 80).await.unwrap_err();
        assert!(matches!(err, ResolveError::DecimalIpv6(_)));

        let err = resolve("0x08080808", AddressFamily::Ipv6, 80).await.unwrap_err();
        assert!(matches!(err, ResolveError::HexIpv6(_)));
    }

    #[test]
    fn test_pick_address() {
        let v4 = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let v6 = IpAddr::V6(Ipv6Addr::LOCALHOST);

        assert_eq!(pick_address("h", AddressFamily::Any, &[v6, v4]).unwrap(), v6);
        assert_eq!(pick_address("h", AddressFamily::Ipv4, &[v6, v4]).unwrap(), v4);
        assert!(matches!(
            pick_address("h", AddressFamily::Ipv6, &[v4]),
            Err(ResolveError::NoIpv6Address(_))
        ));
        assert!(matches!(pick_address("h", AddressFamily::Any, &[]), Err(ResolveError::NoAddress(_))));
    }
}
