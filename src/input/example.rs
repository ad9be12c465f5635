//! Example inventories, written in the same CSV shape the importer reads.

const IPS_HEADER: &str = "Site,IP";

const IP_ROWS: [(&str, &str); 7] = [
    ("Paris", ""),
    ("", "192.168.0.0/21"),
    ("", "172.16.0.0/18"),
    ("", "192.168.3.0/24"),
    ("Lyon", ""),
    ("", "10.0.0.0/24"),
    ("", "10.0.1.0/24"),
];

const DEVICES_HEADER: &str = "name,type,zone,currentVlan,network,id";

// name, type, zone, currentVlan, network
const DEVICE_ROWS: [(&str, &str, &str, &str, &str); 20] = [
    ("PC-PARIS-001", "pc", "Paris", "15", "192.168.1.0/24"),
    ("PC-PARIS-002", "pc", "Paris", "15", "192.168.1.0/24"),
    ("PRINTER-PARIS-001", "printer", "Paris", "20", "192.168.1.0/24"),
    ("PC-LYON-001", "pc", "Lyon", "15", "192.168.2.0/24"),
    ("PRINTER-LYON-001", "printer", "Lyon", "20", "192.168.2.0/24"),
    ("PHONE-LYON-001", "phone", "Lyon", "30", "192.168.2.0/24"),
    ("SERVER-MARSEILLE-001", "server", "Marseille", "451", "172.16.0.0/16"),
    ("PC-MARSEILLE-001", "pc", "Marseille", "15", "172.16.1.0/24"),
    ("PRINTER-MARSEILLE-001", "printer", "Marseille", "20", "172.16.1.0/24"),
    ("IOT-MARSEILLE-001", "iot", "Marseille", "461", "172.16.2.0/24"),
    ("SWITCH-NICE-001", "switch", "Nice", "800", "10.0.0.0/8"),
    ("CAMERA-NICE-001", "camera", "Nice", "100", "10.1.0.0/16"),
    ("IOT-NICE-001", "iot", "Nice", "461", "10.1.1.0/24"),
    ("PHONE-NICE-001", "phone", "Nice", "30", "10.1.2.0/24"),
    ("WIFI-PARIS-001", "wifi", "Paris", "92", "192.168.3.0/26"),
    ("WIFI-PARIS-002", "wifi", "Paris", "92", "192.168.3.64/26"),
    ("PC-OVERLAP-001", "pc", "Paris", "15", "192.168.4.0/25"),
    ("PRINTER-OVERLAP-001", "printer", "Paris", "20", "192.168.4.128/25"),
    ("UNKNOWN-ZONE-001", "iot", "", "461", "192.168.6.0/24"),
    ("UNKNOWN-ZONE-002", "pc", "", "15", "192.168.6.0/24"),
];

/// Devices on the simulated large network.
const BIG_NETWORK_SIZE: usize = 50;

/// Example `{Site, IP}` inventory.
pub fn example_ips_csv() -> String {
    let mut lines = vec![IPS_HEADER.to_string()];
    lines.extend(IP_ROWS.iter().map(|(site, ip)| format!("{site},{ip}")));
    lines.join("\n") + "\n"
}

/// Example device inventory, ids numbered from 1 in row order.
pub fn example_devices_csv() -> String {
    let mut rows: Vec<(String, &str, &str, &str, &str)> = DEVICE_ROWS
        .iter()
        .map(|(name, t, zone, vlan, net)| (name.to_string(), *t, *zone, *vlan, *net))
        .collect();
    rows.extend((1..=BIG_NETWORK_SIZE).map(|i| {
        (
            format!("PC-BIGNETWORK-{i}"),
            "pc",
            "Paris",
            "15",
            "192.168.5.0/24",
        )
    }));
    rows.push(("NEW-DEVICE-001".to_string(), "pc", "Paris", "15", "192.168.255.0/24"));
    rows.push(("NEW-DEVICE-002".to_string(), "printer", "Paris", "20", "192.168.254.0/24"));

    let mut lines = vec![DEVICES_HEADER.to_string()];
    lines.extend(
        rows.iter()
            .enumerate()
            .map(|(i, (name, t, zone, vlan, net))| format!("{name},{t},{zone},{vlan},{net},{}", i + 1)),
    );
    lines.join("\n") + "\n"
}
