//! Subnet splitting.
//!
//! Carves aligned, non-overlapping blocks out of a private range, largest blocks first.
//! Any failure aborts the whole batch.

use crate::error::{PlannerError, Result};
use crate::models::{
    block_size, broadcast_addr, ip_after_subnet, is_network_address, AllocatedSubnet,
    PrivateRange, SubnetRequirement,
};
use std::net::Ipv4Addr;

/// Address budget for one allocation pass (a /8).
pub const MAX_ALLOCATION_SPACE: u64 = 1 << 24;

/// Base addresses must be the network address of their /24.
const BASE_MASK: u8 = 24;

/// Allocate `requirements` starting at `base`.
///
/// # Arguments
/// * `base` - dotted-quad start address, a private /24 network address
/// * `requirements` - blocks to place; sorted by mask before allocation
///
/// # Returns
/// * `Ok(Vec<AllocatedSubnet>)` - every block, largest first
/// * `Err` - the first failure; no partial result
pub fn allocate(base: &str, requirements: &[SubnetRequirement]) -> Result<Vec<AllocatedSubnet>> {
    let base_addr: Ipv4Addr = base
        .trim()
        .parse()
        .map_err(|_| PlannerError::InvalidBase(base.to_string()))?;
    let range = PrivateRange::of(base_addr).ok_or(PlannerError::PrivateRangeOnly(base_addr))?;
    if !is_network_address(base_addr, BASE_MASK) {
        return Err(PlannerError::InvalidBase(format!(
            "{base_addr} is not a valid /{BASE_MASK} network address"
        )));
    }

    if requirements.is_empty() {
        return Err(PlannerError::InvalidRequirement(
            "add at least one subnet requirement".to_string(),
        ));
    }
    for req in requirements {
        req.validate()?;
    }

    let requested: u64 = requirements
        .iter()
        .map(|r| r.count as u64 * block_size(r.mask))
        .sum();
    if requested > MAX_ALLOCATION_SPACE {
        return Err(PlannerError::CapacityExceeded {
            requested,
            available: MAX_ALLOCATION_SPACE,
        });
    }

    let mut sorted = requirements.to_vec();
    sorted.sort_by_key(|r| r.mask);

    log::info!(
        "#Start allocate() base={base_addr} requirements={} addresses={requested}",
        sorted.len()
    );

    let starting_third_octet = base_addr.octets()[2];
    let mut cursor = base_addr;
    let mut allocated = Vec::new();

    for req in &sorted {
        for _ in 0..req.count {
            if !is_network_address(cursor, req.mask) {
                return Err(PlannerError::Misaligned {
                    addr: cursor,
                    mask: req.mask,
                });
            }

            let subnet = allocated_subnet(cursor, req.mask)?;
            log::debug!("allocated {}/{}", subnet.network, subnet.prefix_length);
            allocated.push(subnet);

            cursor = ip_after_subnet(cursor, req.mask)?;
            if !range.block().contains(cursor) {
                return Err(PlannerError::RangeExhausted(format!(
                    "{cursor} is outside the private range {}",
                    range.block()
                )));
            }
            if cursor.octets()[2] < starting_third_octet {
                return Err(PlannerError::RangeExhausted(format!(
                    "{cursor} wrapped into an already used range"
                )));
            }
        }
    }

    log::info!("Allocated {} subnets", allocated.len());
    Ok(allocated)
}

/// Describe the aligned block `network/mask`.
fn allocated_subnet(network: Ipv4Addr, mask: u8) -> Result<AllocatedSubnet> {
    let broadcast = broadcast_addr(network, mask)?;
    Ok(AllocatedSubnet {
        network,
        prefix_length: mask,
        first_usable: Ipv4Addr::from(u32::from(network) + 1),
        last_usable: Ipv4Addr::from(u32::from(broadcast) - 1),
        broadcast,
        usable_host_count: block_size(mask) - 2,
    })
}
