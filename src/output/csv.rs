//! CSV tables for analysis, allocation and VLAN planning results.

use crate::error::Result;
use crate::models::{
    AllocatedSubnet, AnalysisResult, SubnetReorganization, VlanMigrationResult, STANDARD_VLANS,
};
use std::io::Write;

/// Header row plus data rows, all as display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// The table as CSV text, one line per row.
    pub fn to_csv(&self) -> String {
        let mut out = csv_line(self.header.iter().copied());
        for row in &self.rows {
            out.push_str(&csv_line(row.iter().map(String::as_str)));
        }
        out
    }
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut line = fields.map(escape_csv_field).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

/// Quote a field when it holds a comma or a double quote.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains(',') || input.contains('"') {
        // excel does not like spaces after the comma between fields, so none are added
        let escaped = input.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        input.to_string()
    }
}

fn vlan_cell(vlan: Option<u16>) -> String {
    vlan.map(|v| v.to_string()).unwrap_or_default()
}

pub fn analysis_table(results: &[AnalysisResult]) -> Table {
    Table {
        header: vec![
            "Site",
            "Input",
            "Network",
            "Mask",
            "Broadcast",
            "First usable",
            "Last usable",
            "Gateway",
            "Role",
        ],
        rows: results
            .iter()
            .map(|r| {
                vec![
                    r.site.clone(),
                    r.input_address.clone(),
                    format!("{}/{}", r.network, r.prefix_length),
                    r.subnet_mask.clone(),
                    r.broadcast.to_string(),
                    r.first_usable.to_string(),
                    r.last_usable.to_string(),
                    r.gateway.to_string(),
                    format!("{:?}", r.input_role),
                ]
            })
            .collect(),
    }
}

pub fn allocation_table(subnets: &[AllocatedSubnet]) -> Table {
    Table {
        header: vec!["Subnet", "First usable", "Last usable", "Broadcast", "Hosts"],
        rows: subnets
            .iter()
            .map(|s| {
                vec![
                    s.cidr().to_string(),
                    s.first_usable.to_string(),
                    s.last_usable.to_string(),
                    s.broadcast.to_string(),
                    s.usable_host_count.to_string(),
                ]
            })
            .collect(),
    }
}

/// Migration plan in the export layout.
pub fn migration_table(plan: &[VlanMigrationResult]) -> Table {
    Table {
        header: vec![
            "Name",
            "Type",
            "Zone",
            "Current VLAN",
            "Suggested VLAN",
            "VLAN name",
            "Description",
            "Conflict",
        ],
        rows: plan
            .iter()
            .map(|m| {
                vec![
                    m.device.name.clone(),
                    m.device.device_type.to_string(),
                    m.device.zone.clone().unwrap_or_default(),
                    vlan_cell(m.device.current_vlan),
                    m.suggested_vlan.id.to_string(),
                    m.suggested_vlan.name.to_string(),
                    m.suggested_vlan.description.to_string(),
                    if m.has_conflict { "Yes" } else { "No" }.to_string(),
                ]
            })
            .collect(),
    }
}

pub fn reorganization_table(plan: &[SubnetReorganization]) -> Table {
    Table {
        header: vec![
            "Current subnet",
            "New subnet",
            "Devices",
            "Current VLAN",
            "VLAN",
            "VLAN name",
            "Total",
            "Available",
            "Reason",
        ],
        rows: plan
            .iter()
            .map(|r| {
                vec![
                    r.original_subnet.to_string(),
                    r.new_subnet.to_string(),
                    r.device_count.to_string(),
                    vlan_cell(r.current_vlan),
                    r.vlan.to_string(),
                    r.vlan_name.to_string(),
                    r.capacity_info.total.to_string(),
                    r.capacity_info.available.to_string(),
                    r.reason.clone(),
                ]
            })
            .collect(),
    }
}

/// The standard VLAN schema.
pub fn catalog_table() -> Table {
    Table {
        header: vec!["ID", "Name", "Description", "Max devices", "Extension of"],
        rows: STANDARD_VLANS
            .iter()
            .map(|v| {
                vec![
                    v.id.to_string(),
                    v.name.to_string(),
                    v.description.to_string(),
                    v.max_devices.map(|m| m.to_string()).unwrap_or_default(),
                    vlan_cell(v.parent_vlan_id),
                ]
            })
            .collect(),
    }
}

/// Write `table` to `writer` behind a timestamped comment line.
pub fn export_csv<W: Write>(table: &Table, mut writer: W) -> Result<()> {
    let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(writer, "# vlan-subnet-planner export {stamp}")?;
    writer.write_all(table.to_csv().as_bytes())?;
    log::info!("Exported {} rows", table.rows.len());
    Ok(())
}
