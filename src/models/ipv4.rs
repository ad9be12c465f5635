//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] for CIDR blocks along with the subnet arithmetic the planner is built
//! on. All arithmetic happens on the `u32` value of the address, never per octet.

use crate::error::{PlannerError, Result};
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::sync::OnceLock;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Dotted quad followed by a prefix length, e.g. `192.168.1.0/24`.
static CIDR_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_cidr_regex() -> &'static Regex {
    CIDR_REGEX.get_or_init(|| {
        Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})/(\d{1,2})$").expect("Invalid Regex")
    })
}

/// Parse `a.b.c.d/n` into an [`Ipv4`].
///
/// Fails with [`PlannerError::InvalidAddress`] carrying the original text when the syntax
/// does not match, an octet exceeds 255 or the prefix exceeds 32.
///
/// # Examples
/// ```
/// use vlan_subnet_planner::models::parse_cidr;
/// let cidr = parse_cidr("10.1.2.3/16").unwrap();
/// assert_eq!(cidr.lo().to_string(), "10.1.0.0");
/// assert!(parse_cidr("10.1.2.300/16").is_err());
/// ```
pub fn parse_cidr(text: &str) -> Result<Ipv4> {
    let invalid = || PlannerError::InvalidAddress(text.to_string());
    let caps = get_cidr_regex().captures(text.trim()).ok_or_else(invalid)?;

    let mut octets = [0u8; 4];
    for (i, octet) in octets.iter_mut().enumerate() {
        *octet = caps[i + 1].parse::<u8>().map_err(|_| invalid())?;
    }
    let mask: u8 = caps[5].parse().map_err(|_| invalid())?;
    if mask > MAX_LENGTH {
        return Err(invalid());
    }

    Ok(Ipv4 {
        addr: Ipv4Addr::from(octets),
        mask,
    })
}

/// Mask bits for a prefix length, clamped to 32.
fn mask_bits(len: u8) -> u32 {
    let len = len.min(MAX_LENGTH);
    if len == 0 {
        0
    } else {
        u32::MAX << (MAX_LENGTH - len)
    }
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use vlan_subnet_planner::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        Err(PlannerError::InvalidAddress(format!("/{len}")))
    } else {
        Ok(mask_bits(len))
    }
}

/// Subnet mask in dotted-decimal notation.
///
/// Built one octet at a time from 8-bit runs of the prefix: `256 - (256 >> run)`.
pub fn dotted_mask(len: u8) -> String {
    let mut remaining = len.min(MAX_LENGTH) as u32;
    let mut octets = Vec::with_capacity(4);
    for _ in 0..4 {
        let run = remaining.min(8);
        octets.push((256 - (256 >> run)).to_string());
        remaining -= run;
    }
    octets.join(".")
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Returns the IP address following the given subnet.
///
/// The addition carries across all four octets; running past 255.255.255.255 is an error.
pub fn ip_after_subnet(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let network_bits = u32::from(cut_addr(addr, len)?);
    let subnet_size = block_size(len);
    let next = (network_bits as u64) + subnet_size;
    u32::try_from(next)
        .map(Ipv4Addr::from)
        .map_err(|_| PlannerError::RangeExhausted(format!("no address after {addr}/{len}")))
}

/// Number of addresses in a block of the given prefix length.
pub fn block_size(len: u8) -> u64 {
    1u64 << (MAX_LENGTH - len.min(MAX_LENGTH))
}

/// Number of usable host addresses: block size minus network and broadcast.
///
/// Only meaningful for prefixes up to /30.
pub fn num_usable_hosts(len: u8) -> Result<u64> {
    if len > MAX_LENGTH - 2 {
        Err(PlannerError::InvalidRequirement(format!(
            "/{len} has no usable hosts"
        )))
    } else {
        Ok(block_size(len) - 2)
    }
}

/// Calculate the minimum mask for an IP address based on trailing zeros.
pub fn lo_mask(ip: Ipv4Addr) -> u8 {
    let trailing_zeros = u32::from(ip).trailing_zeros().min(32) as u8;
    MAX_LENGTH - trailing_zeros
}

/// True when `addr` is the network address of its `/len` block.
pub fn is_network_address(addr: Ipv4Addr, len: u8) -> bool {
    len <= MAX_LENGTH && lo_mask(addr) <= len
}

/// RFC1918 private address ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateRange {
    /// 10.0.0.0/8
    Ten,
    /// 172.16.0.0/12
    OneSeventyTwo,
    /// 192.168.0.0/16
    OneNinetyTwo,
}

impl PrivateRange {
    /// Range containing `addr`, if any.
    pub fn of(addr: Ipv4Addr) -> Option<PrivateRange> {
        [
            PrivateRange::Ten,
            PrivateRange::OneSeventyTwo,
            PrivateRange::OneNinetyTwo,
        ]
        .into_iter()
        .find(|range| range.block().contains(addr))
    }

    /// The range as a CIDR block.
    pub fn block(self) -> Ipv4 {
        match self {
            PrivateRange::Ten => Ipv4 {
                addr: Ipv4Addr::new(10, 0, 0, 0),
                mask: 8,
            },
            PrivateRange::OneSeventyTwo => Ipv4 {
                addr: Ipv4Addr::new(172, 16, 0, 0),
                mask: 12,
            },
            PrivateRange::OneNinetyTwo => Ipv4 {
                addr: Ipv4Addr::new(192, 168, 0, 0),
                mask: 16,
            },
        }
    }
}

/// Classful address class, decided by the leading octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AddressClass {
    A,
    B,
    C,
}

impl AddressClass {
    /// Class of `addr`. Everything from 192 upwards is treated as class C.
    pub fn of(addr: Ipv4Addr) -> AddressClass {
        match addr.octets()[0] {
            0..=127 => AddressClass::A,
            128..=191 => AddressClass::B,
            _ => AddressClass::C,
        }
    }

    /// Host capacity used when deciding whether a group outgrows its class.
    pub fn host_capacity(self) -> u64 {
        match self {
            AddressClass::A => 16_777_214,
            AddressClass::B => 1_048_574,
            AddressClass::C => 65_534,
        }
    }
}

impl std::fmt::Display for AddressClass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match self {
            AddressClass::A => "A",
            AddressClass::B => "B",
            AddressClass::C => "C",
        };
        write!(f, "{label}")
    }
}

/// IPv4 address with CIDR notation support.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_cidr(&s).map_err(de::Error::custom)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4> {
        parse_cidr(addr_cidr)
    }

    /// The block re-expressed from its network address.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & mask_bits(self.mask))
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.lo()) | !mask_bits(self.mask))
    }

    /// Check if an IP address is contained within this subnet.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        ip >= self.lo() && ip <= self.hi()
    }

    /// Two blocks overlap iff they agree on the shorter of their two prefixes.
    pub fn overlaps(&self, other: &Ipv4) -> bool {
        let shorter = self.mask.min(other.mask);
        let mask = mask_bits(shorter);
        u32::from(self.addr) & mask == u32::from(other.addr) & mask
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cidr() {
        let cidr = parse_cidr(" 192.168.1.42/24 ").unwrap();
        assert_eq!(cidr.addr, Ipv4Addr::new(192, 168, 1, 42));
        assert_eq!(cidr.mask, 24);
        assert_eq!(parse_cidr("0.0.0.0/0").unwrap().mask, 0);

        for bad in [
            "192.168.1.0/33",
            "999.1.1.1/24",
            "192.168.1.0",
            "192.168.1/24",
            "a.b.c.d/8",
            "10.0.0.0/-1",
            "",
        ] {
            match parse_cidr(bad) {
                Err(PlannerError::InvalidAddress(text)) => assert_eq!(text, bad),
                other => panic!("{bad} should be InvalidAddress, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_dotted_mask() {
        assert_eq!(dotted_mask(0), "0.0.0.0");
        assert_eq!(dotted_mask(8), "255.0.0.0");
        assert_eq!(dotted_mask(20), "255.255.240.0");
        assert_eq!(dotted_mask(24), "255.255.255.0");
        assert_eq!(dotted_mask(26), "255.255.255.192");
        assert_eq!(dotted_mask(32), "255.255.255.255");
    }

    #[test]
    fn test_cut_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(cut_addr(ip, 24).unwrap(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(cut_addr(ip, 16).unwrap(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(cut_addr(ip, 0).unwrap(), Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(cut_addr(ip, 32).unwrap(), ip);
        assert!(cut_addr(ip, 33).is_err());
    }

    #[test]
    fn test_ip_after_subnet() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            ip_after_subnet(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 2, 0)
        );
        assert_eq!(ip_after_subnet(ip, 8).unwrap(), Ipv4Addr::new(193, 0, 0, 0));
        // carry from the last octet into the second
        assert_eq!(
            ip_after_subnet(Ipv4Addr::new(10, 0, 255, 192), 26).unwrap(),
            Ipv4Addr::new(10, 1, 0, 0)
        );
        assert!(ip_after_subnet(Ipv4Addr::new(255, 255, 255, 0), 24).is_err());
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            broadcast_addr(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 1, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 16).unwrap(),
            Ipv4Addr::new(192, 168, 255, 255)
        );
        assert_eq!(broadcast_addr(ip, 32).unwrap(), ip);
    }

    #[test]
    fn test_num_usable_hosts() {
        assert_eq!(num_usable_hosts(16).unwrap(), 65534);
        assert_eq!(num_usable_hosts(24).unwrap(), 254);
        assert_eq!(num_usable_hosts(26).unwrap(), 62);
        assert_eq!(num_usable_hosts(30).unwrap(), 2);
        assert!(num_usable_hosts(31).is_err());
    }

    #[test]
    fn test_lo_mask_and_alignment() {
        assert_eq!(lo_mask(Ipv4Addr::new(192, 168, 1, 1)), 32);
        assert_eq!(lo_mask(Ipv4Addr::new(10, 110, 10, 64)), 26);
        assert!(is_network_address(Ipv4Addr::new(10, 110, 10, 64), 26));
        assert!(!is_network_address(Ipv4Addr::new(10, 110, 10, 64), 24));
        assert!(is_network_address(Ipv4Addr::new(0, 0, 0, 0), 0));
    }

    #[test]
    fn test_overlaps() {
        let a = Ipv4::new("10.0.10.0/24").unwrap();
        let b = Ipv4::new("10.0.0.0/8").unwrap();
        let c = Ipv4::new("10.0.10.64/26").unwrap();
        let d = Ipv4::new("10.0.11.0/24").unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(a.overlaps(&c));
        assert!(!a.overlaps(&d));
        assert!(!c.overlaps(&d));
    }

    #[test]
    fn test_private_range() {
        assert_eq!(
            PrivateRange::of(Ipv4Addr::new(10, 1, 2, 3)),
            Some(PrivateRange::Ten)
        );
        assert_eq!(
            PrivateRange::of(Ipv4Addr::new(172, 31, 255, 255)),
            Some(PrivateRange::OneSeventyTwo)
        );
        assert_eq!(PrivateRange::of(Ipv4Addr::new(172, 32, 0, 0)), None);
        assert_eq!(
            PrivateRange::of(Ipv4Addr::new(192, 168, 0, 0)),
            Some(PrivateRange::OneNinetyTwo)
        );
        assert_eq!(PrivateRange::of(Ipv4Addr::new(8, 8, 8, 8)), None);
    }

    #[test]
    fn test_address_class() {
        assert_eq!(AddressClass::of(Ipv4Addr::new(10, 0, 0, 0)), AddressClass::A);
        assert_eq!(AddressClass::of(Ipv4Addr::new(172, 16, 0, 0)), AddressClass::B);
        assert_eq!(AddressClass::of(Ipv4Addr::new(192, 168, 1, 0)), AddressClass::C);
        assert_eq!(AddressClass::C.host_capacity(), 65_534);
    }

    #[test]
    fn test_ip4_cmp_overlap() {
        let ip1 = Ipv4::new("10.0.10.0/24").unwrap();
        let ip2 = Ipv4::new("10.0.0.0/8").unwrap();
        let ip3 = Ipv4::new("10.0.10.64/26").unwrap();

        assert!(ip1 > ip2);
        assert!(ip1 < ip3);
        assert!(ip2.lo() < ip1.lo());
        assert!(ip2.hi() > ip3.hi());
        assert_eq!(ip2.hi(), Ipv4Addr::new(10, 255, 255, 255));
        assert_eq!(ip3.network().to_string(), "10.0.10.64/26");
    }

    #[test]
    fn test_serde_roundtrip_string() {
        let ip: Ipv4 = serde_json::from_str("\"172.16.3.128/25\"").unwrap();
        assert_eq!(serde_json::to_string(&ip).unwrap(), "\"172.16.3.128/25\"");
        assert!(serde_json::from_str::<Ipv4>("\"172.16.3.128\"").is_err());
    }
}
