//! Command line arguments and dispatch.

use crate::config::Config;
use crate::error::PlannerError;
use crate::input::{
    devices_from_rows, example_devices_csv, example_ips_csv, ip_records_from_rows, read_rows,
};
use crate::models::SubnetRequirement;
use crate::output::{
    allocation_table, analysis_table, catalog_table, export_csv, migration_table,
    print_conflicts, print_site_groups, print_stats, print_table, print_title,
    reorganization_table, Table,
};
use crate::processing::{allocate, analyze, analyze_records, group_by_site};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "vlan-subnet-planner", version, about = "IPv4 subnet and VLAN planning.")]
pub struct Cli {
    #[clap(long, global = true, help = "Print results as JSON.")]
    pub json: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[clap(about = "Analyse one or more CIDR addresses.")]
    Analyze {
        #[clap(required = true, help = "Addresses such as 192.168.1.10/24.")]
        cidrs: Vec<String>,
    },

    #[clap(about = "Analyse a Site/IP inventory file (.csv or .json).")]
    Import {
        file: PathBuf,

        #[clap(long, help = "Write the analysis results as CSV to this path.")]
        export: Option<PathBuf>,
    },

    #[clap(about = "Split a private base network into aligned subnets.")]
    Split {
        #[clap(long, help = "Base /24 network address, defaults to PLANNER_DEFAULT_BASE.")]
        base: Option<String>,

        #[clap(long = "req", required = true, help = "Requirement as MASK:COUNT, e.g. 26:2.")]
        requirements: Vec<SubnetRequirement>,

        #[clap(long, help = "Write the allocated subnets as CSV to this path.")]
        export: Option<PathBuf>,
    },

    #[clap(about = "Plan VLANs and subnets for a device inventory file (.csv or .json).")]
    Vlan {
        file: PathBuf,

        #[clap(long, help = "Write the migration plan as CSV to this path.")]
        export: Option<PathBuf>,
    },

    #[clap(about = "Show the standard VLAN catalog.")]
    Catalog,

    #[clap(about = "Print an example inventory as CSV.")]
    Example {
        #[clap(value_enum)]
        kind: ExampleKind,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExampleKind {
    Devices,
    Ips,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn show(json: bool, table: &Table) {
    if !json {
        print_table(table);
    }
}

fn path_str(path: &std::path::Path) -> Result<&str, PlannerError> {
    path.to_str()
        .ok_or_else(|| PlannerError::UnsupportedInput(path.display().to_string()))
}

fn write_export(path: &std::path::Path, table: &Table) -> Result<(), Box<dyn Error>> {
    let writer = BufWriter::new(File::create(path)?);
    export_csv(table, writer)?;
    log::info!("Export written to {}", path.display());
    Ok(())
}

/// Execute one parsed command.
pub fn run(cli: Cli, config: &Config) -> Result<(), Box<dyn Error>> {
    log::info!("#Start run() {:?}", cli.command);
    match cli.command {
        Command::Analyze { cidrs } => {
            let mut results = Vec::new();
            for cidr in &cidrs {
                match analyze(cidr) {
                    Ok(result) => results.push(result),
                    Err(e) => {
                        log::warn!("Skipping {cidr}: {e}");
                        eprintln!("#{}# {e}", "ERROR".on_red());
                    }
                }
            }
            if cli.json {
                print_json(&results)?;
            }
            show(cli.json, &analysis_table(&results));
        }

        Command::Import { file, export } => {
            let rows = read_rows(path_str(&file)?)?;
            let bulk = analyze_records(&ip_records_from_rows(&rows));
            for (ip, e) in &bulk.rejected {
                eprintln!("#{}# {ip}: {e}", "SKIPPED".on_yellow());
            }
            if let Some(path) = export {
                write_export(&path, &analysis_table(&bulk.results))?;
            }
            let groups = group_by_site(bulk.results);
            if cli.json {
                print_json(&groups)?;
            } else {
                print_site_groups(&groups);
            }
        }

        Command::Split {
            base,
            requirements,
            export,
        } => {
            let base = base.unwrap_or_else(|| config.default_base.clone());
            let subnets = allocate(&base, &requirements)?;
            if let Some(path) = export {
                write_export(&path, &allocation_table(&subnets))?;
            }
            if cli.json {
                print_json(&subnets)?;
            }
            show(cli.json, &allocation_table(&subnets));
        }

        Command::Vlan { file, export } => {
            let rows = read_rows(path_str(&file)?)?;
            let (devices, rejected) = devices_from_rows(&rows);
            for e in &rejected {
                eprintln!("#{}# {e}", "SKIPPED".on_yellow());
            }
            let plan = crate::plan_vlans(devices, &config.primary_zone)?;

            if let Some(path) = export {
                write_export(&path, &migration_table(&plan.migration))?;
            }

            if cli.json {
                print_json(&plan)?;
            } else {
                print_title("Migration plan");
                print_table(&migration_table(&plan.migration));
                print_title("Conflicts");
                print_conflicts(&plan.conflicts);
                print_title("Statistics");
                print_stats(&plan.stats);
                print_title("Reorganization");
                print_table(&reorganization_table(&plan.reorganization));
            }
        }

        Command::Catalog => {
            if cli.json {
                print_json(&crate::models::STANDARD_VLANS[..])?;
            }
            show(cli.json, &catalog_table());
        }

        Command::Example { kind } => match kind {
            ExampleKind::Devices => print!("{}", example_devices_csv()),
            ExampleKind::Ips => print!("{}", example_ips_csv()),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_split() {
        let cli = Cli::try_parse_from([
            "vlan-subnet-planner",
            "split",
            "--base",
            "10.110.10.0",
            "--req",
            "26:2",
            "--req",
            "/28:4",
        ])
        .unwrap();
        match cli.command {
            Command::Split {
                base,
                requirements,
                export,
            } => {
                assert_eq!(base.as_deref(), Some("10.110.10.0"));
                assert!(export.is_none());
                assert_eq!(requirements.len(), 2);
                assert_eq!(requirements[1], SubnetRequirement { mask: 28, count: 4 });
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_import_export() {
        let cli = Cli::try_parse_from([
            "vlan-subnet-planner",
            "import",
            "ips.csv",
            "--export",
            "analysis.csv",
        ])
        .unwrap();
        match cli.command {
            Command::Import { file, export } => {
                assert_eq!(file, PathBuf::from("ips.csv"));
                assert_eq!(export, Some(PathBuf::from("analysis.csv")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_requirement() {
        assert!(Cli::try_parse_from(["vlan-subnet-planner", "split", "--req", "26"]).is_err());
    }

    #[test]
    fn test_parse_global_json_and_example() {
        let cli = Cli::try_parse_from(["vlan-subnet-planner", "example", "ips", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Example { kind: ExampleKind::Ips }));
    }

    #[test]
    fn test_run_split_uses_config_base() {
        let cli = Cli::try_parse_from(["vlan-subnet-planner", "--json", "split", "--req", "24:1"])
            .unwrap();
        assert!(run(cli, &Config::default()).is_ok());

        let bad = Config {
            default_base: "8.8.8.0".to_string(),
            ..Config::default()
        };
        let cli = Cli::try_parse_from(["vlan-subnet-planner", "split", "--req", "24:1"]).unwrap();
        assert!(run(cli, &bad).is_err());
    }
}
