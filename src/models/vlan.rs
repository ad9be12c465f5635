//! Standard VLAN catalog.
//!
//! The catalog is fixed at compile time. Device families map onto it through
//! [`VlanFamily`], so adding a device type forces a decision in the match below.

use serde::Serialize;

/// VLAN ids referenced by the assignment table.
pub mod vlan_id {
    pub const DEFAULT: u16 = 1;
    pub const DATA: u16 = 2;
    pub const DATA_X: u16 = 3;
    pub const WLAN_DATA: u16 = 92;
    pub const WLAN_DATA_X: u16 = 93;
    pub const VIDEO: u16 = 100;
    pub const SRV: u16 = 451;
    pub const IOT: u16 = 461;
    pub const ADM: u16 = 800;
    pub const TOIP_USER: u16 = 810;
    pub const TOIP_USER_X: u16 = 811;
}

/// Device limit of the capacity-checked main VLANs.
pub const MAIN_VLAN_CAPACITY: usize = 254;

/// One entry of the standard VLAN schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardVlan {
    pub id: u16,
    pub name: &'static str,
    pub description: &'static str,
    /// Device limit, only set on main VLANs that have an extension.
    pub max_devices: Option<usize>,
    /// True for the `_X` VLANs.
    pub is_extension: bool,
    pub parent_vlan_id: Option<u16>,
}

const fn plain(id: u16, name: &'static str, description: &'static str) -> StandardVlan {
    StandardVlan {
        id,
        name,
        description,
        max_devices: None,
        is_extension: false,
        parent_vlan_id: None,
    }
}

const fn limited(id: u16, name: &'static str, description: &'static str) -> StandardVlan {
    StandardVlan {
        id,
        name,
        description,
        max_devices: Some(MAIN_VLAN_CAPACITY),
        is_extension: false,
        parent_vlan_id: None,
    }
}

const fn extension(
    id: u16,
    name: &'static str,
    description: &'static str,
    parent: u16,
) -> StandardVlan {
    StandardVlan {
        id,
        name,
        description,
        max_devices: None,
        is_extension: true,
        parent_vlan_id: Some(parent),
    }
}

/// The standard VLAN schema, in catalog order.
pub static STANDARD_VLANS: [StandardVlan; 16] = [
    plain(vlan_id::DEFAULT, "DEFAULT", "Default VLAN, not used"),
    limited(vlan_id::DATA, "DATA", "Wired users and wired printers"),
    extension(
        vlan_id::DATA_X,
        "DATA_X",
        "Wired users and wired printers of another geographic zone",
        vlan_id::DATA,
    ),
    limited(vlan_id::WLAN_DATA, "WLAN_DATA", "Wifi users"),
    extension(
        vlan_id::WLAN_DATA_X,
        "WLAN_DATA_X",
        "Wifi users of another geographic zone",
        vlan_id::WLAN_DATA,
    ),
    plain(vlan_id::VIDEO, "VIDEO", "Video surveillance system"),
    plain(200, "CTRL_ACCES", "Badge readers, gates, connected locks"),
    plain(400, "NATIVE", "Native VLAN on trunk interfaces"),
    plain(vlan_id::SRV, "SRV", "Local servers (production interface)"),
    plain(
        vlan_id::IOT,
        "IOT",
        "Anything not suited to the other existing VLANs",
    ),
    plain(
        vlan_id::ADM,
        "ADM",
        "In-band administration of switches, wifi, ILO/IDRAC, PBX and others",
    ),
    limited(vlan_id::TOIP_USER, "TOIP_USER", "ToIP users"),
    extension(
        vlan_id::TOIP_USER_X,
        "TOIP_USER_X",
        "ToIP users of another geographic zone",
        vlan_id::TOIP_USER,
    ),
    plain(820, "ICO_SIP", "SIP trunk interconnection for ToIP"),
    plain(900, "ICO_WAN", "SD-WAN router interconnection"),
    plain(700, "ICO_INDUS", "Interconnection with the industrial perimeter firewalls"),
];

/// Look up a catalog entry.
pub fn find_vlan(id: u16) -> Option<&'static StandardVlan> {
    STANDARD_VLANS.iter().find(|v| v.id == id)
}

/// Catalog entry for `id`, falling back to IOT for ids outside the catalog.
pub fn catalog_vlan(id: u16) -> &'static StandardVlan {
    find_vlan(id).unwrap_or_else(default_vlan)
}

/// IOT, the catch-all VLAN.
pub fn default_vlan() -> &'static StandardVlan {
    &STANDARD_VLANS[9]
}

/// Groups of device types sharing a main VLAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VlanFamily {
    Data,
    Wlan,
    Toip,
    Video,
    Server,
    Iot,
    Admin,
}

impl VlanFamily {
    /// Main VLAN id of the family.
    pub fn main_id(self) -> u16 {
        match self {
            VlanFamily::Data => vlan_id::DATA,
            VlanFamily::Wlan => vlan_id::WLAN_DATA,
            VlanFamily::Toip => vlan_id::TOIP_USER,
            VlanFamily::Video => vlan_id::VIDEO,
            VlanFamily::Server => vlan_id::SRV,
            VlanFamily::Iot => vlan_id::IOT,
            VlanFamily::Admin => vlan_id::ADM,
        }
    }

    /// Overflow VLAN, for the families that have one.
    pub fn extension_id(self) -> Option<u16> {
        match self {
            VlanFamily::Data => Some(vlan_id::DATA_X),
            VlanFamily::Wlan => Some(vlan_id::WLAN_DATA_X),
            VlanFamily::Toip => Some(vlan_id::TOIP_USER_X),
            VlanFamily::Video
            | VlanFamily::Server
            | VlanFamily::Iot
            | VlanFamily::Admin => None,
        }
    }
}
