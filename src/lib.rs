//! VLAN and subnet planning for private IPv4 networks.
//!
//! - CIDR analysis, single and bulk ([`processing::analyze`], [`processing::analyze_records`])
//! - splitting a private base into aligned blocks ([`processing::allocate`])
//! - standard VLAN assignment, conflicts and migration plans ([`processing::VlanAssigner`])
//! - subnet re-addressing per current network ([`processing::SubnetReorganizer`])

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod processing;

use error::Result;
use models::{DeviceForVlan, VlanPlan};
use processing::{SubnetReorganizer, VlanAssigner};

/// Run a full planning pass over `devices` with `primary_zone` as the main-VLAN zone.
///
/// # Returns
/// * `Ok(VlanPlan)` - migration plan, conflicts, statistics, network summary, reorganization
/// * `Err(AllocationExhausted)` - the reorganizer could not place a network
pub fn plan_vlans(devices: Vec<DeviceForVlan>, primary_zone: &str) -> Result<VlanPlan> {
    log::info!("#Start plan_vlans() {} devices, primary zone {primary_zone}", devices.len());
    let assigner = VlanAssigner::new(devices).with_primary_zone(primary_zone);

    let conflicts = assigner.check_conflicts();
    for conflict in &conflicts {
        log::warn!("{conflict}");
    }
    let reorganization = SubnetReorganizer::new(&assigner).reorganize()?;

    let plan = VlanPlan {
        primary_zone: assigner.primary_zone().to_string(),
        migration: assigner.migration_plan(),
        conflicts,
        stats: assigner.migration_stats(),
        networks: assigner.analyze_networks(),
        reorganization,
    };
    log::info!(
        "# {} devices to migrate, {} conflicts, {} networks",
        plan.stats.devices_to_migrate,
        plan.conflicts.len(),
        plan.networks.len()
    );
    Ok(plan)
}
