//! Exchange volume presets
//!
//! Monthly spot volume and average taker fee for real exchanges, used as
//! benchmarks for what the protocol's own exchange could do. `Custom` is a
//! sentinel meaning the caller supplies volume and fee itself.

use serde::Serialize;

/// Name of the user-supplied exchange entry
pub const CUSTOM_EXCHANGE: &str = "Custom";

/// A benchmark exchange
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Exchange {
    pub name: &'static str,
    /// Monthly trading volume (USD)
    pub monthly_volume_usd: f64,
    /// Fee on a 0-100 scale, so 0.30 means 0.30%
    pub fee_percent: f64,
}

const fn exchange(name: &'static str, monthly_volume_usd: f64, fee_percent: f64) -> Exchange {
    Exchange {
        name,
        monthly_volume_usd,
        fee_percent,
    }
}

/// Presets ordered by monthly volume
pub static EXCHANGES: [Exchange; 16] = [
    exchange("Binance", 624_881_131_654.0, 0.100),
    exchange("Bybit", 123_850_127_092.0, 0.050),
    exchange("OKX", 98_243_165_806.0, 0.125),
    exchange("Coinbase", 85_995_559_262.0, 0.130),
    exchange("Gate", 69_714_224_483.0, 0.200),
    exchange("Uniswap", 61_524_304_906.0, 0.300),
    exchange("Bitget", 57_740_714_435.0, 0.100),
    exchange("MEXC", 46_025_939_519.0, 0.030),
    exchange("Crypto.com", 39_589_251_158.0, 0.130),
    exchange("PancakeSwap", 14_697_194_758.0, 0.250),
    exchange("Orca", 12_310_495_208.0, 0.300),
    exchange("Curve", 7_836_449_596.0, 0.300),
    exchange("Raydium", 4_878_196_208.0, 0.250),
    exchange("Meteora", 2_796_671_672.0, 0.300),
    exchange("Aerodrome", 1_638_539_660.0, 0.300),
    exchange("Thruster", 1_421_691_995.0, 0.300),
];

/// Look up a preset by exact name. `Custom` is not a preset.
pub fn find_exchange(name: &str) -> Option<&'static Exchange> {
    EXCHANGES.iter().find(|e| e.name == name)
}

/// Selectable names: `Custom` first, then every preset
pub fn exchange_names() -> Vec<&'static str> {
    std::iter::once(CUSTOM_EXCHANGE)
        .chain(EXCHANGES.iter().map(|e| e.name))
        .collect()
}

/// What picking an exchange name means for volume and fee
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExchangeSelection {
    Preset(&'static Exchange),
    /// Volume and fee stay whatever the caller set
    Custom,
}

impl ExchangeSelection {
    /// Unknown names are treated like `Custom`
    pub fn parse(name: &str) -> Self {
        match find_exchange(name) {
            Some(exchange) => ExchangeSelection::Preset(exchange),
            None => ExchangeSelection::Custom,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ExchangeSelection::Custom)
    }

    /// Volume and fee after switching to this selection from `current`
    pub fn apply(&self, current: (f64, f64)) -> (f64, f64) {
        match self {
            ExchangeSelection::Preset(exchange) => (exchange.monthly_volume_usd, exchange.fee_percent),
            ExchangeSelection::Custom => current,
        }
    }
}
