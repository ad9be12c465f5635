//! Single-address analysis records.

use serde::Serialize;
use std::net::Ipv4Addr;

/// Site label used when an imported row has no site to carry forward.
pub const UNASSIGNED_SITE: &str = "Unassigned";

/// Conventional role the analysed input address plays inside its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AddressRole {
    /// The input is the network address itself.
    Network,
    /// The input is network+1, reported as the first usable host.
    FirstUsable,
    /// The input is broadcast-1, reported as the gateway.
    Gateway,
    /// Any other usable address.
    Host,
    /// The input is the broadcast address.
    Broadcast,
}

/// Boundaries derived from one CIDR string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// The text that was analysed, trimmed.
    pub input_address: String,
    pub prefix_length: u8,
    pub network: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    /// Dotted-decimal subnet mask.
    pub subnet_mask: String,
    pub first_usable: Ipv4Addr,
    pub last_usable: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub input_role: AddressRole,
    /// Site label, empty for single-address analysis.
    pub site: String,
}

/// One `{site, ip}` row after import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpRecord {
    pub site: String,
    pub ip: String,
}

/// Analysis results sharing a site, in first-seen order.
#[derive(Debug, Clone, Serialize)]
pub struct SiteGroup {
    pub site: String,
    pub results: Vec<AnalysisResult>,
}
