//! Configuration for the node calculator
//!
//! Everything is optional. A missing config file means built-in defaults;
//! command-line flags override whatever the file sets.

use anyhow::{Context, Result};
use node_rewards::TierTable;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// =============================================================================
// File-based Configuration (calculator.toml)
// =============================================================================

/// Configuration loaded from calculator.toml
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// ETH price lookup settings
#[derive(Debug, Default, Deserialize)]
pub struct PricingConfig {
    /// CoinGecko demo API key (the public endpoint works without one)
    #[serde(default)]
    pub coingecko_api_key: Option<String>,
    /// Price used when the API is unreachable
    #[serde(default)]
    pub fallback_eth_price: Option<f64>,
    /// Fixed price; skips the API entirely
    #[serde(default)]
    pub eth_price: Option<f64>,
}

/// Tier dataset location
#[derive(Debug, Default, Deserialize)]
pub struct DataConfig {
    /// JSON export to use instead of the bundled dataset
    #[serde(default)]
    pub tier_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub rewards: RewardsDefaults,
    #[serde(default)]
    pub year_one: YearOneDefaults,
}

/// Default inputs for the `rewards` command
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RewardsDefaults {
    pub current_tier: Option<u32>,
    pub purchase_tier: Option<u32>,
    pub expected_fdv: Option<f64>,
    pub exchange: Option<String>,
    pub monthly_volume: Option<f64>,
    pub fee_percentage: Option<f64>,
    pub show_advanced: Option<bool>,
}

/// Default inputs for the `year-one` command
#[derive(Debug, Default, Clone, Deserialize)]
pub struct YearOneDefaults {
    pub current_tier: Option<u32>,
    pub quantity: Option<u32>,
    pub expected_fdv: Option<f64>,
    pub nodes_sold_year1: Option<u64>,
    pub exchange: Option<String>,
    pub monthly_volume: Option<f64>,
    pub fee_percentage: Option<f64>,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse {}. Check for:\n\
                 - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
                 - Incorrect data types (strings vs numbers)",
                path.display()
            )
        })
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        info!("Loading config from {}", path.display());
        Self::load(path)
    }

    /// Tier dataset named in the config, or the bundled one
    pub fn tier_table(&self) -> Result<TierTable> {
        match &self.data.tier_file {
            Some(path) => {
                info!("Loading tier dataset from {}", path.display());
                TierTable::load(path).context("Failed to load tier dataset from config [data].tier_file")
            }
            None => TierTable::bundled().context("Bundled tier dataset is invalid"),
        }
    }
}
