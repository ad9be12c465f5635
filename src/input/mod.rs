//! Input glue.
//!
//! - [`rows`] - loading loose key/value rows from JSON or CSV files
//! - [`records`] - turning rows into IP records and devices
//! - [`example`] - example inventories for the `example` command

mod example;
mod records;
mod rows;

pub use example::{example_devices_csv, example_ips_csv};
pub use records::{devices_from_rows, ip_records_from_rows};
pub use rows::{read_rows, rows_from_csv, rows_from_json, Row};
