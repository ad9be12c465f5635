//! Subnet reorganization.
//!
//! Proposes one new subnet per current network, sized to its device count. Groups claim
//! addresses in first-seen order, so reordering the inventory changes the plan.

use super::vlan_assigner::{group_by_network, VlanAssigner};
use crate::error::{PlannerError, Result};
use crate::models::{
    block_size, AddressClass, CapacityInfo, DeviceForVlan, Ipv4, SubnetReorganization, MAX_LENGTH,
};
use std::net::Ipv4Addr;

/// Shifts tried before giving up on a group.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 256;

/// Largest block ever proposed.
const MIN_PROPOSED_MASK: u8 = 24;

/// Smallest prefix holding `device_count` hosts plus network and broadcast, capped at /24.
pub fn required_mask(device_count: usize) -> u8 {
    let needed = (device_count as u64 + 2).next_power_of_two();
    let bits = needed.trailing_zeros() as u8;
    MAX_LENGTH.saturating_sub(bits).max(MIN_PROPOSED_MASK)
}

/// Plans new subnets over the inventory held by a [`VlanAssigner`].
#[derive(Debug)]
pub struct SubnetReorganizer<'a> {
    assigner: &'a VlanAssigner,
}

impl<'a> SubnetReorganizer<'a> {
    pub fn new(assigner: &'a VlanAssigner) -> SubnetReorganizer<'a> {
        SubnetReorganizer { assigner }
    }

    /// Propose new subnets for every network in the assigner's inventory.
    ///
    /// # Returns
    /// * `Ok(Vec<SubnetReorganization>)` - one entry per network, first-seen order
    /// * `Err(AllocationExhausted)` - a group found no free block within the attempt budget
    pub fn reorganize(&self) -> Result<Vec<SubnetReorganization>> {
        let groups = group_by_network(self.assigner.devices());
        log::info!("#Start reorganize() {} network group(s)", groups.len());

        let mut claimed: Vec<Ipv4> = Vec::new();
        let mut plan = Vec::with_capacity(groups.len());

        for (original, devices) in groups {
            let device_count = devices.len();
            let mask = required_mask(device_count);
            let (base, reason) = choose_base(original, device_count);

            let new_subnet = place(base, mask, &claimed)?;
            claimed.push(new_subnet);

            let vlan = self.assigner.assign(devices[0]);
            log::debug!(
                "{original} ({device_count} devices) -> {new_subnet} VLAN {} : {reason}",
                vlan.id
            );

            plan.push(SubnetReorganization {
                original_subnet: original,
                new_subnet,
                device_count,
                vlan: vlan.id,
                vlan_name: vlan.name,
                current_vlan: devices[0].current_vlan,
                devices: devices.into_iter().cloned().collect::<Vec<DeviceForVlan>>(),
                reason,
                capacity_info: CapacityInfo::new(block_size(mask) - 2, device_count as u64),
            });
        }

        Ok(plan)
    }
}

/// Base address for a group, moving one class up when the group outgrows its class.
fn choose_base(original: Ipv4, device_count: usize) -> (Ipv4Addr, String) {
    let class = AddressClass::of(original.lo());
    let capacity = class.host_capacity();

    if device_count as u64 <= capacity {
        return (
            original.lo(),
            "Mask optimization, same range".to_string(),
        );
    }

    let (target, base) = match class {
        AddressClass::C => (AddressClass::B, Ipv4Addr::new(172, 16, 0, 0)),
        AddressClass::B | AddressClass::A => (AddressClass::A, Ipv4Addr::new(10, 0, 0, 0)),
    };
    let reason = format!(
        "Migration from class {class} to class {target}: {device_count} devices exceed the class capacity of {capacity}"
    );
    (base, reason)
}

/// First block `base/mask` not overlapping `claimed`, shifting the third octet on collision.
fn place(base: Ipv4Addr, mask: u8, claimed: &[Ipv4]) -> Result<Ipv4> {
    let mut candidate = Ipv4 { addr: base, mask }.network();

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        if !claimed.iter().any(|c| c.overlaps(&candidate)) {
            return Ok(candidate);
        }
        candidate = shift_third_octet(candidate);
    }

    Err(PlannerError::AllocationExhausted {
        network: Ipv4 { addr: base, mask }.network().to_string(),
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}

/// Same block one step up in the third octet, wrapping 255 to 0.
fn shift_third_octet(cidr: Ipv4) -> Ipv4 {
    let [a, b, c, d] = cidr.addr.octets();
    Ipv4 {
        addr: Ipv4Addr::new(a, b, c.wrapping_add(1), d),
        mask: cidr.mask,
    }
}
