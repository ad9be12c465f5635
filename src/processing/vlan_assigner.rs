//! VLAN assignment and conflict detection.
//!
//! A [`VlanAssigner`] owns one inventory snapshot for one planning pass. Main/extension
//! overflow decisions use the *current* occupancy of that snapshot, while
//! [`VlanAssigner::check_conflicts`] counts *projected* occupancy; the two can disagree on
//! borderline inventories.

use crate::models::{
    catalog_vlan, vlan_id, DeviceForVlan, DeviceType, Ipv4, MigrationStats, NetworkInfo,
    StandardVlan, VlanMigrationResult, MAIN_VLAN_CAPACITY,
};
use itertools::Itertools;
use std::collections::HashMap;

/// Zone whose devices stay in main VLANs.
pub const DEFAULT_PRIMARY_ZONE: &str = "Paris";

/// Zone label used for devices without one when summarising networks.
const UNKNOWN_ZONE: &str = "Unknown";

/// Assigns standard VLANs over one inventory snapshot.
#[derive(Debug, Clone)]
pub struct VlanAssigner {
    devices: Vec<DeviceForVlan>,
    /// Devices per current VLAN id.
    occupancy: HashMap<u16, usize>,
    primary_zone: String,
}

impl VlanAssigner {
    pub fn new(devices: Vec<DeviceForVlan>) -> VlanAssigner {
        let mut assigner = VlanAssigner {
            devices: Vec::new(),
            occupancy: HashMap::new(),
            primary_zone: DEFAULT_PRIMARY_ZONE.to_string(),
        };
        assigner.set_devices(devices);
        assigner
    }

    pub fn with_primary_zone(mut self, zone: &str) -> Self {
        self.primary_zone = zone.to_string();
        self
    }

    /// Replace the inventory wholesale and recount occupancy.
    pub fn set_devices(&mut self, devices: Vec<DeviceForVlan>) {
        self.occupancy = devices
            .iter()
            .filter_map(|d| d.current_vlan)
            .counts();
        self.devices = devices;
        log::debug!(
            "Inventory set: {} devices, occupancy {:?}",
            self.devices.len(),
            self.occupancy
        );
    }

    pub fn devices(&self) -> &[DeviceForVlan] {
        &self.devices
    }

    pub fn primary_zone(&self) -> &str {
        &self.primary_zone
    }

    /// Devices currently in `vlan`.
    pub fn occupancy(&self, vlan: u16) -> usize {
        self.occupancy.get(&vlan).copied().unwrap_or(0)
    }

    fn is_outside_primary_zone(&self, zone: &str) -> bool {
        !zone.eq_ignore_ascii_case(&self.primary_zone)
    }

    /// Suggested VLAN for `device`.
    ///
    /// Families with an extension VLAN go to it when the device sits outside the primary
    /// zone or when the main VLAN is already full by current occupancy.
    pub fn assign(&self, device: &DeviceForVlan) -> &'static StandardVlan {
        self.assign_parts(device.device_type, device.zone.as_deref())
    }

    fn assign_parts(&self, device_type: DeviceType, zone: Option<&str>) -> &'static StandardVlan {
        let family = device_type.vlan_family();
        let main = catalog_vlan(family.main_id());

        let Some(extension_id) = family.extension_id() else {
            return main;
        };
        let extension = catalog_vlan(extension_id);

        if zone
            .filter(|z| !z.is_empty())
            .is_some_and(|z| self.is_outside_primary_zone(z))
        {
            return extension;
        }

        let limit = main.max_devices.unwrap_or(MAIN_VLAN_CAPACITY);
        if self.occupancy(main.id) >= limit {
            log::debug!("VLAN {} full ({limit}), using {}", main.name, extension.name);
            return extension;
        }
        main
    }

    /// Capacity and zone-placement conflicts over the projected assignment.
    pub fn check_conflicts(&self) -> Vec<String> {
        let mut conflicts = Vec::new();

        for (vlan_id, count) in self.projected_usage() {
            let vlan = catalog_vlan(vlan_id);
            if let Some(max) = vlan.max_devices {
                if count > max {
                    conflicts.push(format!(
                        "VLAN {vlan_id} ({}): {count} devices planned, exceeds the limit of {max}",
                        vlan.name
                    ));
                }
            }
        }

        for device in &self.devices {
            let Some(zone) = device.zone.as_deref().filter(|z| !z.is_empty()) else {
                continue;
            };
            if self.is_outside_primary_zone(zone) && !self.assign(device).is_extension {
                conflicts.push(format!(
                    "{} ({zone}) should be in an extension VLAN (_X)",
                    device.name
                ));
            }
        }

        if !conflicts.is_empty() {
            log::warn!("Found {} VLAN conflict(s)", conflicts.len());
        }
        conflicts
    }

    /// True when the other devices already in, or headed for, `vlan` fill its limit.
    pub fn check_device_conflict(&self, device: &DeviceForVlan, vlan: &StandardVlan) -> bool {
        let Some(max) = vlan.max_devices else {
            return false;
        };
        let others = self
            .devices
            .iter()
            .filter(|d| d.id != device.id)
            .filter(|d| d.current_vlan == Some(vlan.id) || self.assign(d).id == vlan.id)
            .count();
        others >= max
    }

    /// Projected device count per VLAN, in first-seen order.
    fn projected_usage(&self) -> Vec<(u16, usize)> {
        let mut usage: Vec<(u16, usize)> = Vec::new();
        for device in &self.devices {
            let id = self.assign(device).id;
            match usage.iter_mut().find(|(v, _)| *v == id) {
                Some((_, count)) => *count += 1,
                None => usage.push((id, 1)),
            }
        }
        usage
    }

    /// Suggestion and conflict flag for every device, in inventory order.
    pub fn migration_plan(&self) -> Vec<VlanMigrationResult> {
        self.devices
            .iter()
            .map(|device| {
                let suggested_vlan = self.assign(device);
                VlanMigrationResult {
                    device: device.clone(),
                    suggested_vlan,
                    has_conflict: self.check_device_conflict(device, suggested_vlan),
                }
            })
            .collect()
    }

    pub fn migration_stats(&self) -> MigrationStats {
        let plan = self.migration_plan();
        MigrationStats {
            total_devices: self.devices.len(),
            devices_to_migrate: plan
                .iter()
                .filter(|r| r.device.current_vlan != Some(r.suggested_vlan.id))
                .count(),
            conflicts_count: plan.iter().filter(|r| r.has_conflict).count(),
            vlan_usage: self.projected_usage(),
        }
    }

    /// Summary per current network, networks in first-seen order.
    pub fn analyze_networks(&self) -> Vec<NetworkInfo> {
        group_by_network(&self.devices)
            .into_iter()
            .map(|(network, devices)| {
                let device_types: Vec<DeviceType> =
                    devices.iter().map(|d| d.device_type).unique().collect();
                let zones: Vec<String> = devices
                    .iter()
                    .map(|d| d.zone.clone().unwrap_or_else(|| UNKNOWN_ZONE.to_string()))
                    .unique()
                    .collect();
                let suggested = self.best_vlan_for_network(&device_types, &zones);

                NetworkInfo {
                    network,
                    prefix_length: network.mask,
                    current_vlan: devices[0].current_vlan.unwrap_or(0),
                    suggested_vlan: suggested.id,
                    device_count: devices.len(),
                    device_types,
                    zones,
                }
            })
            .collect()
    }

    /// One VLAN for a whole network: the type's VLAN when homogeneous, DATA/DATA_X when mixed.
    fn best_vlan_for_network(&self, types: &[DeviceType], zones: &[String]) -> &'static StandardVlan {
        if let [device_type] = types {
            let zone = zones
                .iter()
                .find(|z| !self.is_outside_primary_zone(z))
                .or_else(|| zones.first())
                .map(String::as_str);
            return self.assign_parts(*device_type, zone);
        }

        if zones.iter().any(|z| self.is_outside_primary_zone(z)) {
            catalog_vlan(vlan_id::DATA_X)
        } else {
            catalog_vlan(vlan_id::DATA)
        }
    }
}

/// Devices grouped by declared network, networks in first-seen order.
///
/// Devices without a network are left out.
pub fn group_by_network(devices: &[DeviceForVlan]) -> Vec<(Ipv4, Vec<&DeviceForVlan>)> {
    let mut groups: Vec<(Ipv4, Vec<&DeviceForVlan>)> = Vec::new();
    for device in devices {
        let Some(network) = device.network else {
            continue;
        };
        match groups.iter_mut().find(|(n, _)| *n == network) {
            Some((_, members)) => members.push(device),
            None => groups.push((network, vec![device])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pc(id: usize, zone: &str) -> DeviceForVlan {
        DeviceForVlan::new(&id.to_string(), &format!("PC-{id}"), DeviceType::Pc).with_zone(zone)
    }

    #[test]
    fn test_assign_decision_table() {
        let assigner = VlanAssigner::new(vec![]);
        let expect = [
            (DeviceType::Pc, vlan_id::DATA),
            (DeviceType::Printer, vlan_id::DATA),
            (DeviceType::Workstation, vlan_id::DATA),
            (DeviceType::Wifi, vlan_id::WLAN_DATA),
            (DeviceType::Wireless, vlan_id::WLAN_DATA),
            (DeviceType::Phone, vlan_id::TOIP_USER),
            (DeviceType::Voip, vlan_id::TOIP_USER),
            (DeviceType::Camera, vlan_id::VIDEO),
            (DeviceType::Surveillance, vlan_id::VIDEO),
            (DeviceType::Server, vlan_id::SRV),
            (DeviceType::Iot, vlan_id::IOT),
            (DeviceType::Sensor, vlan_id::IOT),
            (DeviceType::Switch, vlan_id::ADM),
            (DeviceType::Admin, vlan_id::ADM),
        ];
        for (device_type, vlan) in expect {
            let device = DeviceForVlan::new("1", "d", device_type).with_zone("Paris");
            assert_eq!(assigner.assign(&device).id, vlan, "{device_type}");
        }
    }

    #[test]
    fn test_assign_zone_selects_extension() {
        let assigner = VlanAssigner::new(vec![]);
        assert_eq!(assigner.assign(&pc(1, "Paris")).id, vlan_id::DATA);
        assert_eq!(assigner.assign(&pc(1, "paris")).id, vlan_id::DATA);
        assert_eq!(assigner.assign(&pc(1, "Lyon")).id, vlan_id::DATA_X);

        let phone = DeviceForVlan::new("2", "PHONE", DeviceType::Phone).with_zone("Lyon");
        assert_eq!(assigner.assign(&phone).id, vlan_id::TOIP_USER_X);

        // no zone counts as primary
        let wifi = DeviceForVlan::new("3", "WIFI", DeviceType::Wifi);
        assert_eq!(assigner.assign(&wifi).id, vlan_id::WLAN_DATA);

        // families without an extension ignore the zone
        let server = DeviceForVlan::new("4", "SRV", DeviceType::Server).with_zone("Lyon");
        assert_eq!(assigner.assign(&server).id, vlan_id::SRV);
    }

    #[test]
    fn test_assign_empty_zone_is_primary() {
        let device = DeviceForVlan::new("1", "PC-EMPTY", DeviceType::Pc).with_zone("");
        let assigner = VlanAssigner::new(vec![device.clone()]);
        assert_eq!(assigner.assign(&device).id, vlan_id::DATA);
        assert!(assigner.check_conflicts().is_empty());
    }

    #[test]
    fn test_assign_overflow_uses_current_occupancy() {
        let full: Vec<DeviceForVlan> = (0..254)
            .map(|i| pc(i, "Paris").with_current_vlan(vlan_id::DATA))
            .collect();
        let assigner = VlanAssigner::new(full);
        assert_eq!(assigner.assign(&pc(999, "Paris")).id, vlan_id::DATA_X);

        let almost: Vec<DeviceForVlan> = (0..253)
            .map(|i| pc(i, "Paris").with_current_vlan(vlan_id::DATA))
            .collect();
        let assigner = VlanAssigner::new(almost);
        assert_eq!(assigner.assign(&pc(999, "Paris")).id, vlan_id::DATA);
        // Lyon goes to the extension regardless of occupancy
        assert_eq!(assigner.assign(&pc(999, "Lyon")).id, vlan_id::DATA_X);
    }

    #[test]
    fn test_primary_zone_override() {
        let assigner = VlanAssigner::new(vec![]).with_primary_zone("Lyon");
        assert_eq!(assigner.assign(&pc(1, "LYON")).id, vlan_id::DATA);
        assert_eq!(assigner.assign(&pc(1, "Paris")).id, vlan_id::DATA_X);
    }

    #[test]
    fn test_check_conflicts_capacity() {
        let devices: Vec<DeviceForVlan> = (0..260).map(|i| pc(i, "Paris")).collect();
        let assigner = VlanAssigner::new(devices);
        let conflicts = assigner.check_conflicts();
        assert_eq!(
            conflicts,
            vec!["VLAN 2 (DATA): 260 devices planned, exceeds the limit of 254".to_string()]
        );
    }

    #[test]
    fn test_check_conflicts_zone_placement() {
        let devices = vec![
            DeviceForVlan::new("1", "SRV-LYON", DeviceType::Server).with_zone("Lyon"),
            DeviceForVlan::new("2", "PC-LYON", DeviceType::Pc).with_zone("Lyon"),
            DeviceForVlan::new("3", "CAM-PARIS", DeviceType::Camera).with_zone("Paris"),
            DeviceForVlan::new("4", "IOT-NOZONE", DeviceType::Iot),
        ];
        let conflicts = VlanAssigner::new(devices).check_conflicts();
        assert_eq!(
            conflicts,
            vec!["SRV-LYON (Lyon) should be in an extension VLAN (_X)".to_string()]
        );
    }

    #[test]
    fn test_check_device_conflict() {
        let mut devices: Vec<DeviceForVlan> = (0..254).map(|i| pc(i, "Paris")).collect();
        devices.push(pc(254, "Paris"));
        let assigner = VlanAssigner::new(devices);
        let data = catalog_vlan(vlan_id::DATA);
        // 254 other devices projected into DATA
        assert!(assigner.check_device_conflict(&pc(254, "Paris"), data));

        let small = VlanAssigner::new((0..10).map(|i| pc(i, "Paris")).collect());
        assert!(!small.check_device_conflict(&pc(0, "Paris"), data));

        // VLANs without a limit never conflict
        let video = catalog_vlan(vlan_id::VIDEO);
        assert!(!assigner.check_device_conflict(&pc(0, "Paris"), video));
    }

    #[test]
    fn test_migration_plan_and_stats() {
        let devices = vec![
            pc(1, "Paris").with_current_vlan(15),
            pc(2, "Lyon").with_current_vlan(15),
            DeviceForVlan::new("3", "SRV", DeviceType::Server).with_current_vlan(vlan_id::SRV),
        ];
        let assigner = VlanAssigner::new(devices);
        let plan = assigner.migration_plan();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].suggested_vlan.id, vlan_id::DATA);
        assert_eq!(plan[1].suggested_vlan.id, vlan_id::DATA_X);
        assert!(plan.iter().all(|r| !r.has_conflict));

        let stats = assigner.migration_stats();
        assert_eq!(stats.total_devices, 3);
        assert_eq!(stats.devices_to_migrate, 2);
        assert_eq!(stats.conflicts_count, 0);
        assert_eq!(
            stats.vlan_usage,
            vec![(vlan_id::DATA, 1), (vlan_id::DATA_X, 1), (vlan_id::SRV, 1)]
        );
    }

    #[test]
    fn test_set_devices_replaces_inventory() {
        let mut assigner = VlanAssigner::new(
            (0..254)
                .map(|i| pc(i, "Paris").with_current_vlan(vlan_id::DATA))
                .collect(),
        );
        assert_eq!(assigner.occupancy(vlan_id::DATA), 254);
        assigner.set_devices(vec![pc(1, "Paris")]);
        assert_eq!(assigner.occupancy(vlan_id::DATA), 0);
        assert_eq!(assigner.devices().len(), 1);
        assert_eq!(assigner.assign(&pc(2, "Paris")).id, vlan_id::DATA);
    }

    #[test]
    fn test_analyze_networks() {
        let net_a = Ipv4::new("192.168.1.0/24").unwrap();
        let net_b = Ipv4::new("192.168.2.0/24").unwrap();
        let devices = vec![
            pc(1, "Paris").with_network(net_a).with_current_vlan(15),
            DeviceForVlan::new("2", "PRN", DeviceType::Printer)
                .with_zone("Paris")
                .with_network(net_a),
            pc(3, "Lyon").with_network(net_b),
            DeviceForVlan::new("4", "PHONE", DeviceType::Phone)
                .with_zone("Lyon")
                .with_network(net_b),
            DeviceForVlan::new("5", "NONET", DeviceType::Pc),
        ];
        let infos = VlanAssigner::new(devices).analyze_networks();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].network, net_a);
        assert_eq!(infos[0].current_vlan, 15);
        assert_eq!(infos[0].device_types, vec![DeviceType::Pc, DeviceType::Printer]);
        assert_eq!(infos[0].suggested_vlan, vlan_id::DATA);
        assert_eq!(infos[1].suggested_vlan, vlan_id::DATA_X);
        assert_eq!(infos[1].zones, vec!["Lyon".to_string()]);
    }

    #[test]
    fn test_analyze_networks_single_type_prefers_primary_zone() {
        let net = Ipv4::new("10.1.2.0/24").unwrap();
        let devices = vec![
            DeviceForVlan::new("1", "P1", DeviceType::Phone)
                .with_zone("Nice")
                .with_network(net),
            DeviceForVlan::new("2", "P2", DeviceType::Phone)
                .with_zone("Paris")
                .with_network(net),
        ];
        let infos = VlanAssigner::new(devices).analyze_networks();
        assert_eq!(infos[0].suggested_vlan, vlan_id::TOIP_USER);
        assert_eq!(infos[0].current_vlan, 0);
    }

    #[test]
    fn test_analyze_networks_primary_zone_ignores_case() {
        let net = Ipv4::new("10.1.3.0/24").unwrap();
        let devices = vec![
            DeviceForVlan::new("1", "P1", DeviceType::Phone)
                .with_zone("Nice")
                .with_network(net),
            DeviceForVlan::new("2", "P2", DeviceType::Phone)
                .with_zone("PARIS")
                .with_network(net),
        ];
        let infos = VlanAssigner::new(devices).analyze_networks();
        assert_eq!(infos[0].suggested_vlan, vlan_id::TOIP_USER);
    }
}
