//! Subnet splitting requirements and results.

use super::ipv4::Ipv4;
use crate::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Smallest prefix (largest block) the allocator accepts.
pub const MIN_REQUIREMENT_MASK: u8 = 16;
/// Largest prefix (smallest block) the allocator accepts.
pub const MAX_REQUIREMENT_MASK: u8 = 30;

/// `count` blocks of size `/mask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetRequirement {
    pub mask: u8,
    pub count: u32,
}

impl SubnetRequirement {
    /// Check the mask range and count.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_REQUIREMENT_MASK..=MAX_REQUIREMENT_MASK).contains(&self.mask) {
            return Err(PlannerError::InvalidRequirement(format!(
                "masks must be between /{MIN_REQUIREMENT_MASK} and /{MAX_REQUIREMENT_MASK}, got /{}",
                self.mask
            )));
        }
        if self.count == 0 {
            return Err(PlannerError::InvalidRequirement(format!(
                "count for /{} must be at least 1",
                self.mask
            )));
        }
        Ok(())
    }
}

/// Parses `MASK:COUNT`, e.g. `26:2`. A leading `/` on the mask is accepted.
impl FromStr for SubnetRequirement {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PlannerError::InvalidRequirement(format!("expected MASK:COUNT, got '{s}'"));
        let (mask, count) = s.trim().split_once(':').ok_or_else(invalid)?;
        let mask = mask.trim().trim_start_matches('/').parse().map_err(|_| invalid())?;
        let count = count.trim().parse().map_err(|_| invalid())?;
        Ok(SubnetRequirement { mask, count })
    }
}

/// One block produced by the allocator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocatedSubnet {
    pub network: Ipv4Addr,
    pub prefix_length: u8,
    pub first_usable: Ipv4Addr,
    pub last_usable: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    pub usable_host_count: u64,
}

impl AllocatedSubnet {
    /// The block as CIDR.
    pub fn cidr(&self) -> Ipv4 {
        Ipv4 {
            addr: self.network,
            mask: self.prefix_length,
        }
    }
}
