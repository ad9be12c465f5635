//! Domain models for the VLAN and subnet planner.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 CIDR block and the address arithmetic around it
//! - [`AnalysisResult`] - boundaries of one analysed address
//! - [`SubnetRequirement`] and [`AllocatedSubnet`] - subnet splitting
//! - [`StandardVlan`] - the static VLAN catalog
//! - [`DeviceForVlan`] - inventory entries
//! - [`VlanMigrationResult`], [`SubnetReorganization`] - planning output

mod allocation;
mod analysis;
mod device;
mod ipv4;
mod plan;
mod vlan;

// Re-export public types
pub use allocation::{
    AllocatedSubnet, SubnetRequirement, MAX_REQUIREMENT_MASK, MIN_REQUIREMENT_MASK,
};
pub use analysis::{AddressRole, AnalysisResult, IpRecord, SiteGroup, UNASSIGNED_SITE};
pub use device::{DeviceForVlan, DeviceType};
pub use ipv4::{
    block_size, broadcast_addr, cut_addr, dotted_mask, get_cidr_mask, ip_after_subnet,
    is_network_address, lo_mask, num_usable_hosts, parse_cidr, AddressClass, Ipv4,
    PrivateRange, MAX_LENGTH,
};
pub use plan::{
    CapacityInfo, MigrationStats, NetworkInfo, SubnetReorganization, VlanMigrationResult, VlanPlan,
};
pub use vlan::{
    catalog_vlan, default_vlan, find_vlan, vlan_id, StandardVlan, VlanFamily, MAIN_VLAN_CAPACITY,
    STANDARD_VLANS,
};
