use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{FlowTupleError, UnknownProtocolSnafu};

/// IP Protocol Number of ICMP
const IPPROTO_ICMP: u8 = 1;

/// IP Protocol Number of TCP
const IPPROTO_TCP: u8 = 6;

/// IP Protocol Number of UDP
const IPPROTO_UDP: u8 = 17;

/// IP Protocol Number of ICMPv6
const IPPROTO_ICMPV6: u8 = 58;

/// IP Protocol Number of SCTP
const IPPROTO_SCTP: u8 = 132;

/// The transport or network protocol of a flow.
///
/// The five named variants are the protocols whose flows carry a port pair (or an ICMP
/// type/code pair). Every other IANA protocol number is carried opaquely by `Other`, and is
/// identified by its addresses alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum Protocol {
    Icmp,
    Tcp,
    Udp,
    Icmpv6,
    Sctp,
    /// Any other IP protocol number. Never holds one of the numbers above.
    Other(u8),
}

impl Protocol {
    /// The IANA protocol number.
    pub const fn number(self) -> u8 {
        match self {
            Self::Icmp => IPPROTO_ICMP,
            Self::Tcp => IPPROTO_TCP,
            Self::Udp => IPPROTO_UDP,
            Self::Icmpv6 => IPPROTO_ICMPV6,
            Self::Sctp => IPPROTO_SCTP,
            Self::Other(number) => number,
        }
    }

    /// Short lowercase name, or `None` for protocols without a dedicated variant.
    pub const fn name(self) -> Option<&'static str> {
        match self {
            Self::Icmp => Some("icmp"),
            Self::Tcp => Some("tcp"),
            Self::Udp => Some("udp"),
            Self::Icmpv6 => Some("icmp6"),
            Self::Sctp => Some("sctp"),
            Self::Other(_) => None,
        }
    }

    /// Whether flows of this protocol are identified by a port or type/code pair.
    pub const fn carries_ports(self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<u8> for Protocol {
    fn from(number: u8) -> Self {
        match number {
            IPPROTO_ICMP => Self::Icmp,
            IPPROTO_TCP => Self::Tcp,
            IPPROTO_UDP => Self::Udp,
            IPPROTO_ICMPV6 => Self::Icmpv6,
            IPPROTO_SCTP => Self::Sctp,
            other => Self::Other(other),
        }
    }
}

impl From<Protocol> for u8 {
    fn from(protocol: Protocol) -> Self {
        protocol.number()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.number()),
        }
    }
}

impl FromStr for Protocol {
    type Err = FlowTupleError;

    /// Accepts the protocol names used by tcpdump and Zeek, or a decimal protocol number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "icmp" => Ok(Self::Icmp),
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            "icmp6" | "icmpv6" | "ipv6-icmp" => Ok(Self::Icmpv6),
            "sctp" => Ok(Self::Sctp),
            other => other
                .parse::<u8>()
                .map(Self::from)
                .map_err(|_| UnknownProtocolSnafu { name: s }.build()),
        }
    }
}
