use std::net::IpAddr;

use base64::prelude::*;
use sha1::{Digest, Sha1};
use smallvec::SmallVec;

use crate::{
    config::Encoding,
    internal_events::{emit, CommunityIdCalculated},
    tuple::{CanonicalTuple, FlowTuple},
};

/// Version tag prepended to every Community ID produced by this crate.
pub const VERSION_PREFIX: &str = "1:";

/// Length of the SHA-1 digest.
pub const DIGEST_LEN: usize = 20;

/// Longest possible hashed input: seed, two IPv6 addresses, protocol, padding and two ports.
pub const MAX_FLOW_BYTES: usize = 2 + 16 + 16 + 1 + 1 + 2 + 2;

/// Default Padding
const PADDING: u8 = 0;

/// Calculates Community IDs for flow tuples.
///
/// The calculator only holds its configuration, so it is cheap to copy and can be shared across
/// threads freely. Different configurations can be used side by side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommunityId {
    seed: u16,
    encoding: Encoding,
}

impl CommunityId {
    /// `seed` can be used to enable additional control over "domains" of Community ID usage.
    /// `use_base64` selects base64 output, otherwise the digest is rendered as hex.
    pub const fn new(seed: u16, use_base64: bool) -> Self {
        let encoding = if use_base64 {
            Encoding::Base64
        } else {
            Encoding::Hex
        };
        Self::with_encoding(seed, encoding)
    }

    pub const fn with_encoding(seed: u16, encoding: Encoding) -> Self {
        Self { seed, encoding }
    }

    pub const fn seed(&self) -> u16 {
        self.seed
    }

    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Computes the Community ID of `tuple`, e.g. `1:wCb3OG7yAFWelaUydu0D+125CLM=`.
    ///
    /// Both directions of the same flow produce the same string.
    pub fn calc(&self, tuple: &FlowTuple) -> String {
        let canonical = tuple.canonical();
        let digest = self.hash_canonical(&canonical);

        emit!(CommunityIdCalculated {
            protocol: canonical.protocol,
            one_way: canonical.one_way,
        });

        self.render(&digest)
    }

    /// The raw SHA-1 digest behind [`CommunityId::calc`].
    pub fn hash(&self, tuple: &FlowTuple) -> [u8; DIGEST_LEN] {
        self.hash_canonical(&tuple.canonical())
    }

    /// The exact byte sequence that gets hashed for `tuple`.
    pub fn flow_bytes(&self, tuple: &FlowTuple) -> SmallVec<[u8; MAX_FLOW_BYTES]> {
        self.encode(&tuple.canonical())
    }

    /// Renders a digest with the version prefix and the configured encoding.
    pub fn render(&self, digest: &[u8; DIGEST_LEN]) -> String {
        let mut id = String::with_capacity(VERSION_PREFIX.len() + DIGEST_LEN * 2);
        id.push_str(VERSION_PREFIX);
        match self.encoding {
            Encoding::Base64 => BASE64_STANDARD.encode_string(digest, &mut id),
            Encoding::Hex => id.push_str(&hex::encode(digest)),
        }
        id
    }

    fn hash_canonical(&self, canonical: &CanonicalTuple) -> [u8; DIGEST_LEN] {
        Sha1::digest(self.encode(canonical)).into()
    }

    // seed | saddr | daddr | proto | pad | [sport | dport], all in network byte order
    fn encode(&self, canonical: &CanonicalTuple) -> SmallVec<[u8; MAX_FLOW_BYTES]> {
        let mut bytes = SmallVec::new();
        bytes.extend_from_slice(&self.seed.to_be_bytes());
        push_addr(&mut bytes, &canonical.saddr);
        push_addr(&mut bytes, &canonical.daddr);
        bytes.push(canonical.protocol.number());
        bytes.push(PADDING);
        if let Some((sport, dport)) = canonical.ports {
            bytes.extend_from_slice(&sport.to_be_bytes());
            bytes.extend_from_slice(&dport.to_be_bytes());
        }
        bytes
    }
}

fn push_addr(bytes: &mut SmallVec<[u8; MAX_FLOW_BYTES]>, addr: &IpAddr) {
    match addr {
        IpAddr::V4(addr) => bytes.extend_from_slice(&addr.octets()),
        IpAddr::V6(addr) => bytes.extend_from_slice(&addr.octets()),
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;
    use crate::Protocol;

    #[test]
    fn test_calc() {
        let saddr = Ipv4Addr::new(1, 2, 3, 4);
        let daddr = Ipv4Addr::new(5, 6, 7, 8);
        let tuple = FlowTuple::tcp(saddr, daddr, 1122, 3344).unwrap();
        assert_eq!("1:wCb3OG7yAFWelaUydu0D+125CLM=", CommunityId::default().calc(&tuple));
    }

    #[test]
    fn reference_flow_in_both_directions() {
        let calculator = CommunityId::new(0, true);
        let forward = FlowTuple::tcp("128.232.110.120", "66.35.250.204", 34855, 80).unwrap();
        let reverse = FlowTuple::tcp("66.35.250.204", "128.232.110.120", 80, 34855).unwrap();

        assert_eq!(calculator.calc(&forward), "1:LQU9qZlK+B5F3KDmev6m5PMibrg=");
        assert_eq!(calculator.calc(&reverse), "1:LQU9qZlK+B5F3KDmev6m5PMibrg=");
    }

    #[test]
    fn flow_bytes_layout() {
        let tuple = FlowTuple::tcp("5.6.7.8", "1.2.3.4", 3344, 1122).unwrap();
        let bytes = CommunityId::new(0x0102, true).flow_bytes(&tuple);

        assert_eq!(
            bytes.as_slice(),
            &[
                0x01, 0x02, // seed
                1, 2, 3, 4, // saddr
                5, 6, 7, 8, // daddr
                6, 0, // proto, padding
                0x04, 0x62, // 1122
                0x0d, 0x10, // 3344
            ][..]
        );
    }

    #[test]
    fn flow_bytes_without_ports() {
        let tuple = FlowTuple::ip(Protocol::Other(46), "fe80::2", "fe80::1").unwrap();
        let bytes = CommunityId::default().flow_bytes(&tuple);

        assert_eq!(bytes.len(), 2 + 16 + 16 + 2);
        assert!(!bytes.spilled());
        let lower = "fe80::1".parse::<std::net::Ipv6Addr>().unwrap();
        assert_eq!(&bytes[2..18], &lower.octets()[..]);
        assert_eq!(&bytes[34..], &[46, 0][..]);
    }

    #[test]
    fn ipv6_with_ports_fills_buffer() {
        let tuple = FlowTuple::udp("::1", "::2", 1, 2).unwrap();
        let bytes = CommunityId::default().flow_bytes(&tuple);

        assert_eq!(bytes.len(), MAX_FLOW_BYTES);
        assert!(!bytes.spilled());
    }

    #[test]
    fn hex_and_base64_encode_the_same_digest() {
        let tuple = FlowTuple::udp("192.168.1.42", "8.8.8.8", 4242, 53).unwrap();
        let digest = CommunityId::default().hash(&tuple);

        let base64_id = CommunityId::new(0, true).calc(&tuple);
        let hex_id = CommunityId::new(0, false).calc(&tuple);

        assert_eq!(base64_id, "1:vTdrngJjlP5eZ9mw9JtnKyn99KM=");
        assert_eq!(hex_id, "1:bd376b9e026394fe5e67d9b0f49b672b29fdf4a3");

        let from_base64 = BASE64_STANDARD
            .decode(base64_id.strip_prefix(VERSION_PREFIX).unwrap())
            .unwrap();
        let from_hex = hex::decode(hex_id.strip_prefix(VERSION_PREFIX).unwrap()).unwrap();
        assert_eq!(from_base64.as_slice(), &digest[..]);
        assert_eq!(from_hex.as_slice(), &digest[..]);
    }

    #[test]
    fn output_lengths() {
        let tuple = FlowTuple::sctp("10.0.0.1", "10.0.0.2", 36412, 36412).unwrap();

        assert_eq!(CommunityId::new(0, true).calc(&tuple).len(), 2 + 28);
        assert_eq!(CommunityId::new(0, false).calc(&tuple).len(), 2 + 40);
    }

    #[test]
    fn seed_changes_digest() {
        let tuple = FlowTuple::tcp("1.2.3.4", "5.6.7.8", 1122, 3344).unwrap();
        let seed_0 = CommunityId::new(0, true);
        let seed_1 = CommunityId::new(1, true);

        assert_eq!(seed_1.calc(&tuple), "1:HhA1B+6CoLbiKPEs5nhNYN4XWfk=");
        assert_ne!(seed_0.calc(&tuple), seed_1.calc(&tuple));
        assert_eq!(seed_1.calc(&tuple), seed_1.calc(&tuple));
    }

    #[test]
    fn same_address_tie_break() {
        let calculator = CommunityId::default();
        let a = FlowTuple::tcp("192.168.1.42", "192.168.1.42", 42, 41).unwrap();
        let b = FlowTuple::tcp("192.168.1.42", "192.168.1.42", 41, 42).unwrap();

        assert_eq!(calculator.calc(&a), "1:eRcf7I/xocOxnYo5pbJBV5NhVm0=");
        assert_eq!(calculator.calc(&b), "1:eRcf7I/xocOxnYo5pbJBV5NhVm0=");
    }

    #[test]
    fn render_prefixes_version() {
        let calculator = CommunityId::new(0, false);
        assert_eq!(
            calculator.render(&[0xab; DIGEST_LEN]),
            format!("1:{}", "ab".repeat(DIGEST_LEN))
        );
    }
}
