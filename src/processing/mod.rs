//! Planning logic.
//!
//! This module contains the computational engines:
//! - [`address`] - CIDR analysis, single and bulk
//! - [`allocator`] - subnet splitting
//! - [`vlan_assigner`] - VLAN assignment, conflicts and migration plans
//! - [`reorganizer`] - subnet re-addressing per current network

mod address;
mod allocator;
mod reorganizer;
mod vlan_assigner;

// Re-export public functions
pub use address::{analyze, analyze_records, group_by_site, BulkAnalysis};
pub use allocator::{allocate, MAX_ALLOCATION_SPACE};
pub use reorganizer::{required_mask, SubnetReorganizer, MAX_PLACEMENT_ATTEMPTS};
pub use vlan_assigner::{group_by_network, VlanAssigner, DEFAULT_PRIMARY_ZONE};
