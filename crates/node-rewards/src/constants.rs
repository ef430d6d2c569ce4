//! Protocol and presentation constants shared by both calculators
//!
//! Tier pricing, supply and the emission schedule come from the dataset.
//! Everything here is fixed by the node sale terms or by the input controls.

// =============================================================================
// Reward Schedule
// =============================================================================

/// Number of years the base emission schedule runs for
pub const EMISSION_YEARS: u32 = 5;

/// Total token supply used when the dataset does not carry one
pub const DEFAULT_TOTAL_SUPPLY: f64 = 1_000_000_000.0;

/// Share of trading-fee revenue paid out to node holders.
/// The other 20% of fees (10% burn, 10% treasury) never reach nodes.
pub const VALIDATOR_FEE_SHARE: f64 = 0.10;

/// Months per year
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Days per month (flat 30-day convention, not calendar accurate)
pub const DAYS_PER_MONTH: f64 = 30.0;

// =============================================================================
// Input Ranges
// These mirror the bounds of the original input controls. The calculators
// accept anything; callers that sanitize user input use these.
// =============================================================================

/// Lowest selectable current tier
pub const MIN_TIER: u32 = 1;

/// Highest selectable current tier
pub const MAX_TIER: u32 = 50;

/// Fewest nodes a wallet can buy
pub const MIN_QUANTITY: u32 = 1;

/// Most nodes a wallet can buy
pub const MAX_QUANTITY: u32 = 10;

/// Lowest adjustable monthly exchange volume (USD)
pub const MIN_MONTHLY_VOLUME: f64 = 1_000_000_000.0;

/// Highest adjustable monthly exchange volume (USD)
pub const MAX_MONTHLY_VOLUME: f64 = 800_000_000_000.0;

/// Lowest adjustable exchange fee (percent)
pub const MIN_FEE_PERCENT: f64 = 0.01;

/// Highest adjustable exchange fee (percent)
pub const MAX_FEE_PERCENT: f64 = 0.30;

// =============================================================================
// Defaults
// =============================================================================

/// FDV preselected by the five-year calculator
pub const DEFAULT_FDV: f64 = 2_000_000_000.0;

/// FDV preselected by the Year 1 calculator
pub const DEFAULT_FDV_YEAR_ONE: f64 = 50_000_000.0;

/// Nodes-sold assumption preselected by the Year 1 calculator
pub const DEFAULT_NODES_SOLD_YEAR_ONE: u64 = 2000;

/// Exchange preselected by the five-year calculator
pub const DEFAULT_EXCHANGE: &str = "Uniswap";

/// Exchange preselected by the Year 1 calculator
pub const DEFAULT_EXCHANGE_YEAR_ONE: &str = "Meteora";
