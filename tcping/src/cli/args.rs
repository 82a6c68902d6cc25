//! CLI argument definitions

use clap::Parser;

use crate::domain::AddressFamily;

/// Port used when neither a positional port nor `--port` is given
pub const DEFAULT_PORT: u16 = 80;

#[derive(Parser, Debug)]
#[command(
    name = "tcping",
    version,
    about = "Test TCP reachability of a host and port, ping-style",
    after_help = "\
EXAMPLES:
    tcping google.com                  Basic usage (port 80)
    tcping google.com 443              Explicit port
    tcping -p 443 google.com           Port via --port
    tcping -4 -n 5 8.8.8.8 443         IPv4 only, 5 probes
    tcping -w 2000 example.com 22      2 second connect timeout
    tcping -n 5 134744072 443          Decimal IPv4 form of 8.8.8.8
    tcping 0x08080808 80               Hexadecimal IPv4 form of 8.8.8.8
    tcping -c -v example.com 443       Colour and verbose output"
)]
pub struct Args {
    /// Host name, IP address or numeric IPv4 form to probe
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Port to connect to (takes precedence over --port)
    #[arg(value_name = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub port_arg: Option<u16>,

    /// Force IPv4
    #[arg(short = '4', long = "ipv4", conflicts_with = "ipv6")]
    pub ipv4: bool,

    /// Force IPv6
    #[arg(short = '6', long = "ipv6")]
    pub ipv6: bool,

    /// Number of probes to send (0 = until interrupted)
    #[arg(short = 'n', long, default_value_t = 0, env = "TCPING_COUNT")]
    pub count: u64,

    /// Port to connect to when no PORT argument is given
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Wait between probes, in milliseconds
    #[arg(short = 't', long, value_name = "MS", default_value_t = 1000, env = "TCPING_INTERVAL")]
    pub interval: u64,

    /// Connect timeout, in milliseconds
    #[arg(short = 'w', long, value_name = "MS", default_value_t = 1000, env = "TCPING_TIMEOUT")]
    pub timeout: u64,

    /// Colour the output
    #[arg(short, long)]
    pub color: bool,

    /// Print connection details for every probe
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Positional port, then `--port`, then [`DEFAULT_PORT`]
    #[must_use]
    pub fn effective_port(&self) -> u16 {
        self.port_arg.or(self.port).unwrap_or(DEFAULT_PORT)
    }

    #[must_use]
    pub fn family(&self) -> AddressFamily {
        if self.ipv4 {
            AddressFamily::Ipv4
        } else if self.ipv6 {
            AddressFamily::Ipv6
        } else {
            AddressFamily::Any
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("tcping").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["example.com"]).unwrap();
        assert_eq!(args.host, "example.com");
        assert_eq!(args.effective_port(), DEFAULT_PORT);
        assert_eq!(args.count, 0);
        assert_eq!(args.interval, 1000);
        assert_eq!(args.timeout, 1000);
        assert_eq!(args.family(), AddressFamily::Any);
    }

    #[test]
    fn test_port_precedence() {
        assert_eq!(parse(&["-p", "443", "host"]).unwrap().effective_port(), 443);
        assert_eq!(parse(&["-p", "443", "host", "22"]).unwrap().effective_port(), 22);
    }

    #[test]
    fn test_rejects_out_of_range_ports() {
        assert!(parse(&["host", "0"]).is_err());
        assert!(parse(&["host", "65536"]).is_err());
        assert!(parse(&["-p", "0", "host"]).is_err());
        assert!(parse(&["host", "http"]).is_err());
    }

    #[test]
    fn test_rejects_negative_durations() {
        assert!(parse(&["-t", "-5", "host"]).is_err());
        assert!(parse(&["-w", "-1", "host"]).is_err());
    }

    #[test]
    fn test_family_flags_conflict() {
        assert!(parse(&["-4", "-6", "host"]).is_err());
        assert_eq!(parse(&["-6", "::1"]).unwrap().family(), AddressFamily::Ipv6);
        assert_eq!(parse(&["-4", "host"]).unwrap().family(), AddressFamily::Ipv4);
    }

    #[test]
    fn test_requires_host() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
