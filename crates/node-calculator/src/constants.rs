//! Constants for the command-line calculator
//!
//! Protocol constants live in `node_rewards::constants`; this module only
//! holds what the price lookup and file handling need.

// =============================================================================
// API Endpoints
// =============================================================================

/// CoinGecko API base URL
pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko current ETH price endpoint
pub const COINGECKO_ETH_SIMPLE_PRICE: &str = "/simple/price?ids=ethereum&vs_currencies=usd";

// =============================================================================
// Price Lookup
// =============================================================================

/// Fallback ETH price if the API fails
pub const FALLBACK_ETH_PRICE: f64 = 3500.0;

/// Attempts before giving up on the price API
pub const PRICE_FETCH_MAX_RETRIES: u32 = 3;

/// Per-request timeout (seconds)
pub const PRICE_FETCH_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// File Names
// =============================================================================

/// Default config file path
pub const CONFIG_FILENAME: &str = "calculator.toml";
