//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use super::csv::Table;
use crate::models::{MigrationStats, SiteGroup};
use colored::Colorize;

/// Quote a table cell and right-align it to `width`. Cells wider than the column are
/// never cut.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let cell = value.to_string();
    let quoted = format!("\"{cell}\"");
    if quoted.len() >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Compact host count, e.g. `16.78M`, `1.0K`, `254`.
pub fn format_capacity(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.2}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// One aligned line per row, columns sized to their widest quoted value.
pub fn table_lines(table: &Table) -> Vec<String> {
    let widths: Vec<usize> = table
        .header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            table
                .rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|v| v.len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
                + 2
        })
        .collect();

    let line = |fields: Vec<String>| {
        fields
            .iter()
            .zip(&widths)
            .map(|(f, w)| format_field(f, *w))
            .collect::<Vec<_>>()
            .join(",")
    };

    std::iter::once(line(table.header.iter().map(|h| h.to_string()).collect()))
        .chain(table.rows.iter().map(|r| line(r.clone())))
        .collect()
}

pub fn print_table(table: &Table) {
    for line in table_lines(table) {
        println!("{line}");
    }
}

pub fn print_title(title: &str) {
    println!();
    println!("#{}#", title.bold());
}

pub fn print_conflicts(conflicts: &[String]) {
    if conflicts.is_empty() {
        println!("{}", "No conflicts".green());
        return;
    }
    for conflict in conflicts {
        println!("#{}# {conflict}", "CONFLICT".on_red());
    }
}

pub fn print_stats(stats: &MigrationStats) {
    println!(
        "devices={} to_migrate={} conflicts={}",
        stats.total_devices,
        stats.devices_to_migrate,
        if stats.conflicts_count > 0 {
            stats.conflicts_count.to_string().red()
        } else {
            stats.conflicts_count.to_string().normal()
        }
    );
    for (vlan, count) in &stats.vlan_usage {
        println!("{},{}", format_field(vlan, 6), format_field(count, 6));
    }
}

/// Results per site, with the usable host count of each block.
pub fn print_site_groups(groups: &[SiteGroup]) {
    for group in groups {
        print_title(&group.site);
        for r in &group.results {
            let hosts = format_capacity(
                u64::from(u32::from(r.last_usable)) - u64::from(u32::from(r.first_usable)) + 1,
            );
            println!(
                "{},{},{},{},{}",
                format_field(format!("{}/{}", r.network, r.prefix_length), 20),
                format_field(&r.subnet_mask, 17),
                format_field(format!("{}-{}", r.first_usable, r.last_usable), 33),
                format_field(format!("{}_gw", r.gateway), 20),
                format_field(format!("{hosts}_hosts"), 14),
            );
        }
    }
}
