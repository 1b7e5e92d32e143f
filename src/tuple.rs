use std::{
    cmp::Ordering,
    fmt,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
};

use snafu::{ensure, ResultExt};

use crate::{
    error::{AddressParseSnafu, InvalidTupleSnafu, Result, UnsupportedFamilySnafu},
    icmpv4, icmpv6,
    internal_events::{emit, FlowTuplePortsIgnored},
    Protocol,
};

/// Anything that can stand in for one endpoint address of a flow.
///
/// Raw forms (`[u8; 4]`, `[u8; 16]`, `&[u8]`) are read in network byte order. Textual forms are
/// parsed as dotted-quad IPv4 or colon-hex IPv6.
pub trait FlowAddr {
    /// Resolves the address. `field` names the tuple field in any error.
    fn into_ip_addr(self, field: &'static str) -> Result<IpAddr>;
}

impl FlowAddr for IpAddr {
    fn into_ip_addr(self, _field: &'static str) -> Result<IpAddr> {
        Ok(self)
    }
}

impl FlowAddr for Ipv4Addr {
    fn into_ip_addr(self, _field: &'static str) -> Result<IpAddr> {
        Ok(IpAddr::V4(self))
    }
}

impl FlowAddr for Ipv6Addr {
    fn into_ip_addr(self, _field: &'static str) -> Result<IpAddr> {
        Ok(IpAddr::V6(self))
    }
}

impl FlowAddr for [u8; 4] {
    fn into_ip_addr(self, _field: &'static str) -> Result<IpAddr> {
        Ok(IpAddr::from(self))
    }
}

impl FlowAddr for [u8; 16] {
    fn into_ip_addr(self, _field: &'static str) -> Result<IpAddr> {
        Ok(IpAddr::from(self))
    }
}

impl FlowAddr for &[u8] {
    fn into_ip_addr(self, field: &'static str) -> Result<IpAddr> {
        if let Ok(octets) = <[u8; 4]>::try_from(self) {
            return Ok(IpAddr::from(octets));
        }
        if let Ok(octets) = <[u8; 16]>::try_from(self) {
            return Ok(IpAddr::from(octets));
        }
        UnsupportedFamilySnafu {
            field,
            detail: format!("{}-byte address is neither IPv4 nor IPv6", self.len()),
        }
        .fail()
    }
}

impl FlowAddr for &str {
    fn into_ip_addr(self, field: &'static str) -> Result<IpAddr> {
        self.parse::<IpAddr>()
            .context(AddressParseSnafu { field, input: self })
    }
}

impl FlowAddr for &String {
    fn into_ip_addr(self, field: &'static str) -> Result<IpAddr> {
        self.as_str().into_ip_addr(field)
    }
}

impl FlowAddr for String {
    fn into_ip_addr(self, field: &'static str) -> Result<IpAddr> {
        self.as_str().into_ip_addr(field)
    }
}

/// The identifying fields of one flow, exactly as they were observed.
///
/// `sport`/`dport` are ports for TCP, UDP and SCTP, and the ICMP type and code for ICMP and
/// ICMPv6. Other protocols are identified by their addresses only.
///
/// A tuple never changes after construction. [`FlowTuple::canonical`] derives the
/// direction-independent view that gets hashed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlowTuple {
    protocol: Protocol,
    saddr: IpAddr,
    daddr: IpAddr,
    ports: Option<(u16, u16)>,
}

/// A [`FlowTuple`] in canonical orientation, ready to be hashed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalTuple {
    pub protocol: Protocol,
    pub saddr: IpAddr,
    pub daddr: IpAddr,
    /// Ports or ICMP type/counterpart values to hash, `None` for protocols without ports.
    pub ports: Option<(u16, u16)>,
    /// Set for ICMP messages without a reply type. Their orientation is kept as observed.
    pub one_way: bool,
}

impl FlowTuple {
    /// Builds a tuple from already-decoded fields.
    ///
    /// `sport` and `dport` must be both set or both unset, and must be set for TCP, UDP, SCTP,
    /// ICMP and ICMPv6. Ports given for any other protocol are kept but not hashed.
    pub fn new(
        protocol: impl Into<Protocol>,
        saddr: impl FlowAddr,
        daddr: impl FlowAddr,
        sport: Option<u16>,
        dport: Option<u16>,
    ) -> Result<Self> {
        let protocol = protocol.into();
        let saddr = saddr.into_ip_addr("saddr")?;
        let daddr = daddr.into_ip_addr("daddr")?;

        ensure!(
            saddr.is_ipv4() == daddr.is_ipv4(),
            UnsupportedFamilySnafu {
                field: "daddr",
                detail: format!(
                    "{} address cannot be paired with {} saddr",
                    family(&daddr),
                    family(&saddr)
                ),
            }
        );

        let ports = match (sport, dport) {
            (Some(sport), Some(dport)) => Some((sport, dport)),
            (None, None) => None,
            (Some(_), None) => {
                return InvalidTupleSnafu {
                    field: "dport",
                    reason: "sport is set but dport is not",
                }
                .fail()
            }
            (None, Some(_)) => {
                return InvalidTupleSnafu {
                    field: "sport",
                    reason: "dport is set but sport is not",
                }
                .fail()
            }
        };

        if protocol.carries_ports() {
            ensure!(
                ports.is_some(),
                InvalidTupleSnafu {
                    field: "sport",
                    reason: format!("{} flows need sport and dport", protocol),
                }
            );
        } else if ports.is_some() {
            emit!(FlowTuplePortsIgnored { protocol });
        }

        Ok(Self {
            protocol,
            saddr,
            daddr,
            ports,
        })
    }

    pub fn tcp(saddr: impl FlowAddr, daddr: impl FlowAddr, sport: u16, dport: u16) -> Result<Self> {
        Self::new(Protocol::Tcp, saddr, daddr, Some(sport), Some(dport))
    }

    pub fn udp(
        saddr: impl FlowAddr,
        daddr: impl FlowAddr,
        sport: u16,
        dport: u16,
    ) -> Result<Self> {
        Self::new(Protocol::Udp, saddr, daddr, Some(sport), Some(dport))
    }

    pub fn sctp(
        saddr: impl FlowAddr,
        daddr: impl FlowAddr,
        sport: u16,
        dport: u16,
    ) -> Result<Self> {
        Self::new(Protocol::Sctp, saddr, daddr, Some(sport), Some(dport))
    }

    pub fn icmp(
        saddr: impl FlowAddr,
        daddr: impl FlowAddr,
        icmp_type: u8,
        code: u8,
    ) -> Result<Self> {
        Self::new(
            Protocol::Icmp,
            saddr,
            daddr,
            Some(icmp_type.into()),
            Some(code.into()),
        )
    }

    pub fn icmpv6(
        saddr: impl FlowAddr,
        daddr: impl FlowAddr,
        icmp_type: u8,
        code: u8,
    ) -> Result<Self> {
        Self::new(
            Protocol::Icmpv6,
            saddr,
            daddr,
            Some(icmp_type.into()),
            Some(code.into()),
        )
    }

    /// A flow identified by protocol and addresses only.
    ///
    /// Fails for protocols that need ports; use the dedicated constructors for those.
    pub fn ip(
        protocol: impl Into<Protocol>,
        saddr: impl FlowAddr,
        daddr: impl FlowAddr,
    ) -> Result<Self> {
        Self::new(protocol, saddr, daddr, None, None)
    }

    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub const fn saddr(&self) -> IpAddr {
        self.saddr
    }

    pub const fn daddr(&self) -> IpAddr {
        self.daddr
    }

    pub fn sport(&self) -> Option<u16> {
        self.ports.map(|(sport, _)| sport)
    }

    pub fn dport(&self) -> Option<u16> {
        self.ports.map(|(_, dport)| dport)
    }

    pub const fn has_ports(&self) -> bool {
        self.ports.is_some()
    }

    /// Whether the observed orientation is already the canonical one.
    pub fn is_ordered(&self) -> bool {
        let (ports, one_way) = self.port_equivalents();
        one_way || is_ordered(&self.saddr, &self.daddr, ports)
    }

    /// Puts the tuple in canonical orientation.
    ///
    /// The lower address comes first, with the lower port breaking ties between equal
    /// addresses. ICMP types that belong to a request/reply pair are replaced by
    /// (type, counterpart type) before ordering, so a request and its reply end up identical.
    /// ICMP types without a counterpart are one-way and keep their observed orientation.
    pub fn canonical(&self) -> CanonicalTuple {
        let (ports, one_way) = self.port_equivalents();

        let (saddr, daddr, ports) = if one_way || is_ordered(&self.saddr, &self.daddr, ports) {
            (self.saddr, self.daddr, ports)
        } else {
            (self.daddr, self.saddr, ports.map(|(sport, dport)| (dport, sport)))
        };

        CanonicalTuple {
            protocol: self.protocol,
            saddr,
            daddr,
            ports,
            one_way,
        }
    }

    /// The values that take the place of ports in the hash, and whether the flow is one-way.
    fn port_equivalents(&self) -> (Option<(u16, u16)>, bool) {
        match self.protocol {
            Protocol::Tcp | Protocol::Udp | Protocol::Sctp => (self.ports, false),
            Protocol::Icmp => icmp_port_equivalents(self.ports, icmpv4::counterpart),
            Protocol::Icmpv6 => icmp_port_equivalents(self.ports, icmpv6::counterpart),
            Protocol::Other(_) => (None, false),
        }
    }
}

impl fmt::Display for FlowTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ports {
            Some((sport, dport)) => write!(
                f,
                "{} {} -> {}",
                self.protocol,
                std::net::SocketAddr::new(self.saddr, sport),
                std::net::SocketAddr::new(self.daddr, dport),
            ),
            None => write!(f, "{} {} -> {}", self.protocol, self.saddr, self.daddr),
        }
    }
}

fn family(addr: &IpAddr) -> &'static str {
    match addr {
        IpAddr::V4(_) => "IPv4",
        IpAddr::V6(_) => "IPv6",
    }
}

/// Maps an ICMP (type, code) pair onto port-like values, and reports whether the message is
/// one-way.
fn icmp_port_equivalents(
    ports: Option<(u16, u16)>,
    counterpart: fn(u16) -> Option<u16>,
) -> (Option<(u16, u16)>, bool) {
    match ports {
        Some((icmp_type, code)) => match counterpart(icmp_type) {
            Some(other) => (Some((icmp_type, other)), false),
            None => (Some((icmp_type, code)), true),
        },
        None => (None, false),
    }
}

// Both addresses are of the same family here, and `IpAddr` orders same-family addresses by
// their big-endian octets.
fn is_ordered(saddr: &IpAddr, daddr: &IpAddr, ports: Option<(u16, u16)>) -> bool {
    match saddr.cmp(daddr) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => ports.map_or(true, |(sport, dport)| sport <= dport),
    }
}
