//! Runtime settings read from the environment (and `.env` via dotenv).

use crate::processing::DEFAULT_PRIMARY_ZONE;
use std::env;

pub const LOG_CONFIG_VAR: &str = "PLANNER_LOG_CONFIG";
pub const PRIMARY_ZONE_VAR: &str = "PLANNER_PRIMARY_ZONE";
pub const DEFAULT_BASE_VAR: &str = "PLANNER_DEFAULT_BASE";

pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
pub const DEFAULT_BASE: &str = "10.110.10.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the log4rs configuration file.
    pub log_config: String,
    /// Zone whose devices get main VLANs.
    pub primary_zone: String,
    /// Base network for `split` when none is given.
    pub default_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_config: DEFAULT_LOG_CONFIG.to_string(),
            primary_zone: DEFAULT_PRIMARY_ZONE.to_string(),
            default_base: DEFAULT_BASE.to_string(),
        }
    }
}

impl Config {
    /// Read settings from the process environment, falling back to defaults for
    /// unset or blank variables. Call `dotenv::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Config {
        let defaults = Config::default();
        let read = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        Config {
            log_config: read(LOG_CONFIG_VAR, defaults.log_config),
            primary_zone: read(PRIMARY_ZONE_VAR, defaults.primary_zone),
            default_base: read(DEFAULT_BASE_VAR, defaults.default_base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.primary_zone, "Paris");
        assert_eq!(config.default_base, "10.110.10.0");
    }

    #[test]
    fn test_config_overrides() {
        let vars: HashMap<&str, &str> = [(PRIMARY_ZONE_VAR, " Lyon "), (DEFAULT_BASE_VAR, "")]
            .into_iter()
            .collect();
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.primary_zone, "Lyon");
        assert_eq!(config.default_base, DEFAULT_BASE);
        assert_eq!(config.log_config, DEFAULT_LOG_CONFIG);
    }
}
