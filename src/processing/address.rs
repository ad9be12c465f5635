//! Single-address and bulk CIDR analysis.

use crate::error::{PlannerError, Result};
use crate::models::{dotted_mask, parse_cidr, AddressRole, AnalysisResult, IpRecord, SiteGroup};
use std::net::Ipv4Addr;

/// Analyse one `a.b.c.d/n` string.
///
/// First and last usable are network+1 and broadcast-1. When the input address is exactly
/// one of them, `input_role` reports it as the first usable host or the gateway; the values
/// themselves do not move. /31 follows RFC 3021 (both addresses usable) and /32 is a single
/// host.
///
/// # Examples
/// ```
/// use vlan_subnet_planner::processing::analyze;
/// let result = analyze("192.168.1.0/24").unwrap();
/// assert_eq!(result.subnet_mask, "255.255.255.0");
/// assert_eq!(result.gateway.to_string(), "192.168.1.254");
/// ```
pub fn analyze(text: &str) -> Result<AnalysisResult> {
    let cidr = parse_cidr(text)?;
    let input = u32::from(cidr.addr);
    let network = u32::from(cidr.lo());
    let broadcast = u32::from(cidr.hi());

    let (first, last) = match cidr.mask {
        32 => (network, network),
        31 => (network, broadcast),
        _ => (network + 1, broadcast - 1),
    };

    let input_role = if input == network {
        AddressRole::Network
    } else if input == broadcast {
        AddressRole::Broadcast
    } else if input == first {
        AddressRole::FirstUsable
    } else if input == last {
        AddressRole::Gateway
    } else {
        AddressRole::Host
    };

    let result = AnalysisResult {
        input_address: text.trim().to_string(),
        prefix_length: cidr.mask,
        network: Ipv4Addr::from(network),
        broadcast: Ipv4Addr::from(broadcast),
        subnet_mask: dotted_mask(cidr.mask),
        first_usable: Ipv4Addr::from(first),
        last_usable: Ipv4Addr::from(last),
        gateway: Ipv4Addr::from(last),
        input_role,
        site: String::new(),
    };
    log::debug!("analyze({text}) -> {result:?}");
    Ok(result)
}

/// Outcome of a bulk analysis: good rows and the rows that were skipped.
#[derive(Debug, Default)]
pub struct BulkAnalysis {
    pub results: Vec<AnalysisResult>,
    pub rejected: Vec<(String, PlannerError)>,
}

/// Analyse every record, tagging each result with its site.
///
/// Bad rows are logged and skipped, never fatal.
pub fn analyze_records(records: &[IpRecord]) -> BulkAnalysis {
    let mut bulk = BulkAnalysis::default();
    for record in records {
        match analyze(&record.ip) {
            Ok(mut result) => {
                result.site = record.site.clone();
                bulk.results.push(result);
            }
            Err(e) => {
                log::warn!("Skipping IP '{}' for site '{}': {e}", record.ip, record.site);
                bulk.rejected.push((record.ip.clone(), e));
            }
        }
    }
    log::info!(
        "Analysed {} IP records, {} skipped",
        bulk.results.len(),
        bulk.rejected.len()
    );
    bulk
}

/// Group results by site, sites in first-seen order.
pub fn group_by_site(results: Vec<AnalysisResult>) -> Vec<SiteGroup> {
    let mut groups: Vec<SiteGroup> = Vec::new();
    for result in results {
        match groups.iter_mut().find(|g| g.site == result.site) {
            Some(group) => group.results.push(result),
            None => groups.push(SiteGroup {
                site: result.site.clone(),
                results: vec![result],
            }),
        }
    }
    groups
}
