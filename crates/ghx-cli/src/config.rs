//! CLI configuration management

use crate::output::Report;
use crate::CliError;
use ghx_ledger::{LedgerConfig, DEFAULT_BLOCK_TIME};
use ghx_primitives::Timestamp;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration, stored as TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Gas price applied when a call has no override
    #[serde(default)]
    pub gas_price: Option<u64>,
    /// Gas limit applied when a call has no override
    #[serde(default)]
    pub gas_limit: Option<u64>,
    /// Genesis time of the simulated ledger
    #[serde(default)]
    pub start_time: Option<Timestamp>,
    /// Seconds the simulated clock advances per transaction
    #[serde(default = "default_block_time")]
    pub block_time: u64,
}

fn default_block_time() -> u64 {
    DEFAULT_BLOCK_TIME
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gas_price: None,
            gas_limit: None,
            start_time: None,
            block_time: default_block_time(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ghx"))
    }

    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load config from `path` (or the default path), falling back to
    /// defaults when the file does not exist
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save config to `path` (or the default path)
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, CliError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(Self::default_path)
            .ok_or_else(|| CliError::Config("Cannot determine config path".to_string()))?;

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Simulated ledger settings starting at `genesis_time`
    pub fn ledger_config(&self, genesis_time: Timestamp) -> LedgerConfig {
        let defaults = LedgerConfig::default();
        LedgerConfig {
            genesis_time,
            block_time: self.block_time,
            default_gas_price: self
                .gas_price
                .map(u128::from)
                .unwrap_or(defaults.default_gas_price),
            default_gas_limit: self.gas_limit.unwrap_or(defaults.default_gas_limit),
            min_gas_limit: defaults.min_gas_limit,
        }
    }
}

impl Report for Config {
    fn render(&self) -> String {
        let or_default =
            |v: Option<u64>| v.map_or_else(|| "default".to_string(), |v| v.to_string());
        format!(
            "Gas Price: {}\nGas Limit: {}\nStart Time: {}\nBlock Time: {}s",
            or_default(self.gas_price),
            or_default(self.gas_limit),
            or_default(self.start_time),
            self.block_time
        )
    }
}
