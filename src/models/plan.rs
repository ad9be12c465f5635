//! Records produced by a VLAN planning pass.

use super::device::{DeviceForVlan, DeviceType};
use super::ipv4::Ipv4;
use super::vlan::StandardVlan;
use serde::Serialize;

/// Suggested VLAN for one device.
#[derive(Debug, Clone, Serialize)]
pub struct VlanMigrationResult {
    pub device: DeviceForVlan,
    pub suggested_vlan: &'static StandardVlan,
    pub has_conflict: bool,
}

/// Totals over a migration plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationStats {
    pub total_devices: usize,
    /// Devices whose suggested VLAN differs from their current one.
    pub devices_to_migrate: usize,
    pub conflicts_count: usize,
    /// Projected devices per VLAN id, in first-seen order.
    pub vlan_usage: Vec<(u16, usize)>,
}

/// Summary of one current network.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkInfo {
    pub network: Ipv4,
    pub prefix_length: u8,
    /// Current VLAN of the first device, 0 when unknown.
    pub current_vlan: u16,
    pub suggested_vlan: u16,
    pub device_count: usize,
    pub device_types: Vec<DeviceType>,
    pub zones: Vec<String>,
}

/// Address capacity of a proposed subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityInfo {
    pub total: u64,
    pub used: u64,
    /// Negative when the group does not fit the proposed block.
    pub available: i64,
}

impl CapacityInfo {
    pub fn new(total: u64, used: u64) -> CapacityInfo {
        CapacityInfo {
            total,
            used,
            available: total as i64 - used as i64,
        }
    }
}

/// Proposed re-addressing of one current network.
#[derive(Debug, Clone, Serialize)]
pub struct SubnetReorganization {
    pub original_subnet: Ipv4,
    pub new_subnet: Ipv4,
    pub device_count: usize,
    pub vlan: u16,
    pub vlan_name: &'static str,
    pub current_vlan: Option<u16>,
    pub devices: Vec<DeviceForVlan>,
    pub reason: String,
    pub capacity_info: CapacityInfo,
}

/// Everything one planning pass produces for an inventory.
#[derive(Debug, Clone, Serialize)]
pub struct VlanPlan {
    pub primary_zone: String,
    pub migration: Vec<VlanMigrationResult>,
    pub conflicts: Vec<String>,
    pub stats: MigrationStats,
    pub networks: Vec<NetworkInfo>,
    pub reorganization: Vec<SubnetReorganization>,
}
