//! Output formatting for planning results.
//!
//! This module handles formatting and outputting results:
//! - [`csv`] - CSV tables and file export
//! - [`terminal`] - aligned terminal output with colors

mod csv;
mod terminal;

pub use csv::{
    allocation_table, analysis_table, catalog_table, escape_csv_field, export_csv,
    migration_table, reorganization_table, Table,
};
pub use terminal::{
    format_capacity, format_field, print_conflicts, print_site_groups, print_stats,
    print_table, print_title, table_lines,
};
