//! Configuration loaded from environment variables.

use crate::errors::{IndexerError, Result};

/// `getEvents` accepts at most this many contract ids per filter.
pub const MAX_CONTRACT_IDS: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint (e.g. https://soroban-testnet.stellar.org)
    pub rpc_url: String,
    /// Launchpad and locker contract addresses (Strkey format)
    pub contract_ids: Vec<String>,
    /// Path to the SQLite database file
    pub database_url: String,
    /// Port for the REST API server
    pub api_port: u16,
    /// How often (in seconds) to poll the RPC for new events
    pub poll_interval_secs: u64,
    /// Maximum number of events to fetch per RPC request
    pub events_per_page: u32,
    /// Ledger to start from if no cursor is saved
    pub start_ledger: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing optional keys fall back
    /// to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let contract_ids = lookup("CONTRACT_IDS").ok_or_else(|| {
            IndexerError::Config("CONTRACT_IDS environment variable is required".to_string())
        })?;

        Ok(Config {
            rpc_url: var("RPC_URL", "https://soroban-testnet.stellar.org"),
            contract_ids: parse_contract_ids(&contract_ids)?,
            database_url: var("DATABASE_URL", "sqlite:./launchpad_events.db"),
            api_port: parse(&var("API_PORT", "3001"), "API_PORT")?,
            poll_interval_secs: parse(&var("POLL_INTERVAL_SECS", "5"), "POLL_INTERVAL_SECS")?,
            events_per_page: parse(&var("EVENTS_PER_PAGE", "100"), "EVENTS_PER_PAGE")?,
            start_ledger: parse(&var("START_LEDGER", "0"), "START_LEDGER")?,
        })
    }
}

fn parse<T: std::str::FromStr>(value: &str, key: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| IndexerError::Config(format!("Invalid {key}: {value}")))
}

/// Split a comma-separated contract list, dropping blanks and duplicates.
pub fn parse_contract_ids(raw: &str) -> Result<Vec<String>> {
    let mut ids: Vec<String> = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }

    if ids.is_empty() {
        return Err(IndexerError::Config(
            "CONTRACT_IDS must name at least one contract".to_string(),
        ));
    }
    if ids.len() > MAX_CONTRACT_IDS {
        return Err(IndexerError::Config(format!(
            "CONTRACT_IDS names {} contracts; at most {MAX_CONTRACT_IDS} are supported",
            ids.len()
        )));
    }
    Ok(ids)
}
