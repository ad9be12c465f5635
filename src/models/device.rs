//! Device inventory model.

use super::ipv4::{parse_cidr, Ipv4};
use super::vlan::VlanFamily;
use crate::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Recognized device type tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Pc,
    Printer,
    Workstation,
    Wifi,
    Wireless,
    Phone,
    Voip,
    Camera,
    Surveillance,
    Server,
    Iot,
    Sensor,
    Switch,
    Admin,
}

impl DeviceType {
    pub const ALL: [DeviceType; 14] = [
        DeviceType::Pc,
        DeviceType::Printer,
        DeviceType::Workstation,
        DeviceType::Wifi,
        DeviceType::Wireless,
        DeviceType::Phone,
        DeviceType::Voip,
        DeviceType::Camera,
        DeviceType::Surveillance,
        DeviceType::Server,
        DeviceType::Iot,
        DeviceType::Sensor,
        DeviceType::Switch,
        DeviceType::Admin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Pc => "pc",
            DeviceType::Printer => "printer",
            DeviceType::Workstation => "workstation",
            DeviceType::Wifi => "wifi",
            DeviceType::Wireless => "wireless",
            DeviceType::Phone => "phone",
            DeviceType::Voip => "voip",
            DeviceType::Camera => "camera",
            DeviceType::Surveillance => "surveillance",
            DeviceType::Server => "server",
            DeviceType::Iot => "iot",
            DeviceType::Sensor => "sensor",
            DeviceType::Switch => "switch",
            DeviceType::Admin => "admin",
        }
    }

    /// VLAN family the type is placed in.
    pub fn vlan_family(self) -> VlanFamily {
        match self {
            DeviceType::Pc | DeviceType::Printer | DeviceType::Workstation => VlanFamily::Data,
            DeviceType::Wifi | DeviceType::Wireless => VlanFamily::Wlan,
            DeviceType::Phone | DeviceType::Voip => VlanFamily::Toip,
            DeviceType::Camera | DeviceType::Surveillance => VlanFamily::Video,
            DeviceType::Server => VlanFamily::Server,
            DeviceType::Iot | DeviceType::Sensor => VlanFamily::Iot,
            DeviceType::Switch | DeviceType::Admin => VlanFamily::Admin,
        }
    }
}

impl FromStr for DeviceType {
    type Err = PlannerError;

    /// Case-insensitive match on the type token.
    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_lowercase();
        DeviceType::ALL
            .into_iter()
            .find(|t| t.as_str() == token)
            .ok_or_else(|| PlannerError::InvalidDeviceType(s.to_string()))
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceForVlan {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub current_vlan: Option<u16>,
    pub zone: Option<String>,
    pub network: Option<Ipv4>,
}

impl DeviceForVlan {
    pub fn new(id: &str, name: &str, device_type: DeviceType) -> DeviceForVlan {
        DeviceForVlan {
            id: id.to_string(),
            name: name.to_string(),
            device_type,
            current_vlan: None,
            zone: None,
            network: None,
        }
    }

    pub fn with_zone(mut self, zone: &str) -> Self {
        self.zone = Some(zone.to_string());
        self
    }

    pub fn with_current_vlan(mut self, vlan: u16) -> Self {
        self.current_vlan = Some(vlan);
        self
    }

    pub fn with_network(mut self, network: Ipv4) -> Self {
        self.network = Some(network);
        self
    }

    /// Build a device from a loose key/value row.
    ///
    /// Keys: `id`, `name`, `type`, `currentVlan`, `zone`, `network`. Empty values count as
    /// absent.
    pub fn from_row(row: &HashMap<String, String>) -> Result<DeviceForVlan> {
        let field = |key: &str| {
            row.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let device_type: DeviceType = field("type").unwrap_or_default().parse()?;

        let id = field("id")
            .ok_or_else(|| PlannerError::InvalidDevice(format!("missing id in {row:?}")))?;
        let name = field("name")
            .ok_or_else(|| PlannerError::InvalidDevice(format!("missing name for device {id}")))?;

        let current_vlan = field("currentVlan")
            .map(|v| {
                v.parse::<u16>().map_err(|_| {
                    PlannerError::InvalidDevice(format!("bad currentVlan '{v}' for device {id}"))
                })
            })
            .transpose()?;

        let network = field("network").map(parse_cidr).transpose()?;

        Ok(DeviceForVlan {
            id: id.to_string(),
            name: name.to_string(),
            device_type,
            current_vlan,
            zone: field("zone").map(str::to_string),
            network,
        })
    }
}
