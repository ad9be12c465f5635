//! Error types for the planner.
//!
//! Address math and the allocator fail fast with one of these; bulk paths log and skip the
//! offending item instead.

use std::net::Ipv4Addr;
use thiserror::Error;

/// Error type for planning operations
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Malformed or out-of-range CIDR text
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Device type token is not one of the recognized types
    #[error("Invalid device type: {0}")]
    InvalidDeviceType(String),

    /// Device record is missing a required field or carries a bad value
    #[error("Invalid device record: {0}")]
    InvalidDevice(String),

    /// Base address does not parse or is not a /24 network address
    #[error("Invalid base address: {0}")]
    InvalidBase(String),

    /// Base address outside 10/8, 172.16/12 and 192.168/16
    #[error("Only private addresses are allowed (10.x.x.x, 172.16-31.x.x, 192.168.x.x): {0}")]
    PrivateRangeOnly(Ipv4Addr),

    /// Subnet requirement outside the accepted range
    #[error("Invalid subnet requirement: {0}")]
    InvalidRequirement(String),

    /// Block would not start on a boundary for its prefix
    #[error("Misaligned network: {addr} is not a /{mask} network address")]
    Misaligned { addr: Ipv4Addr, mask: u8 },

    /// Aggregate requested space exceeds the working budget
    #[error("Requirements need {requested} addresses, only {available} available")]
    CapacityExceeded { requested: u64, available: u64 },

    /// Allocation cursor left the private range or wrapped into used space
    #[error("Address range exhausted: {0}")]
    RangeExhausted(String),

    /// No free non-overlapping block found within the attempt budget
    #[error("No free subnet for {network} after {attempts} attempts")]
    AllocationExhausted { network: String, attempts: usize },

    /// Input file with an extension we cannot read
    #[error("Unsupported input file: {0}")]
    UnsupportedInput(String),

    /// File read error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parse or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PlannerError::InvalidAddress("999.1.1.1/24".to_string()).to_string(),
            "Invalid address: 999.1.1.1/24"
        );
        assert_eq!(
            PlannerError::Misaligned {
                addr: Ipv4Addr::new(10, 0, 0, 64),
                mask: 24
            }
            .to_string(),
            "Misaligned network: 10.0.0.64 is not a /24 network address"
        );
    }
}
