//! Configuration from the environment.

use anyhow::{Context, Result};
use typesafe_id::IdOrder;

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub default_order: IdOrder,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`, which returns the value of a variable if set.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let log_level = lookup("TYPEID_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let default_order = match lookup("TYPEID_DEFAULT_ORDER") {
            Some(value) => value
                .parse()
                .context("invalid TYPEID_DEFAULT_ORDER")?,
            None => IdOrder::default(),
        };

        Ok(Self {
            log_level,
            default_order,
        })
    }
}
