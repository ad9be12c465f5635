//! Typed records from loose rows.

use super::rows::Row;
use crate::error::PlannerError;
use crate::models::{DeviceForVlan, IpRecord, UNASSIGNED_SITE};

const SITE_KEYS: [&str; 3] = ["Site", "SITE", "site"];
const IP_KEYS: [&str; 4] = ["IP", "ip", "IPv4", "Adresse"];

/// First non-empty value among `keys`.
fn first_value<'r>(row: &'r Row, keys: &[&str]) -> Option<&'r str> {
    keys.iter()
        .filter_map(|k| row.get(*k))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

/// Convert `{Site?, IP}` rows into [`IpRecord`]s.
///
/// A row with a site sets the current site for the rows that follow. A row carrying an
/// IP is recorded under the current site, or under [`UNASSIGNED_SITE`] before any site.
pub fn ip_records_from_rows(rows: &[Row]) -> Vec<IpRecord> {
    let mut current_site: Option<String> = None;
    let mut records = Vec::new();

    for row in rows {
        if let Some(site) = first_value(row, &SITE_KEYS) {
            current_site = Some(site.to_string());
        }
        if let Some(ip) = first_value(row, &IP_KEYS) {
            records.push(IpRecord {
                site: current_site
                    .clone()
                    .unwrap_or_else(|| UNASSIGNED_SITE.to_string()),
                ip: ip.to_string(),
            });
        }
    }
    records
}

/// Map rows to devices, dropping and logging the rejected ones.
pub fn devices_from_rows(rows: &[Row]) -> (Vec<DeviceForVlan>, Vec<PlannerError>) {
    let mut devices = Vec::new();
    let mut rejected = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        match DeviceForVlan::from_row(row) {
            Ok(device) => devices.push(device),
            Err(e) => {
                log::warn!("Skipping device row {}: {e}", i + 1);
                rejected.push(e);
            }
        }
    }
    log::info!(
        "Loaded {} devices, {} rows rejected",
        devices.len(),
        rejected.len()
    );
    (devices, rejected)
}
