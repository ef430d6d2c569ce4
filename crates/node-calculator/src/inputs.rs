//! Calculator inputs from command-line flags and config defaults
//!
//! Precedence is flag, then config file, then the calculators' own defaults.
//! This is also where user input gets sanitized; the calculators accept any
//! value.

use anyhow::{Result, bail};
use clap::Args;
use node_rewards::constants::{
    MAX_FEE_PERCENT, MAX_MONTHLY_VOLUME, MAX_QUANTITY, MAX_TIER, MIN_FEE_PERCENT, MIN_MONTHLY_VOLUME,
    MIN_QUANTITY, MIN_TIER,
};
use node_rewards::{CUSTOM_EXCHANGE, CalculatorInputs, CalculatorV2Inputs, TierTable, exchange_names, find_exchange};
use std::path::PathBuf;
use tracing::warn;

use crate::config::{RewardsDefaults, YearOneDefaults};

/// Flags for the five-year calculator
#[derive(Args, Debug, Default)]
pub struct RewardsArgs {
    /// Tier currently being sold (1-50)
    #[arg(long)]
    pub current_tier: Option<u32>,

    /// Tier your node was bought at
    #[arg(long)]
    pub purchase_tier: Option<u32>,

    /// Expected fully diluted valuation (USD)
    #[arg(long)]
    pub fdv: Option<f64>,

    /// Exchange to benchmark fee revenue against, or "Custom"
    #[arg(long)]
    pub exchange: Option<String>,

    /// Monthly exchange volume in USD (Custom exchange or --advanced)
    #[arg(long)]
    pub monthly_volume: Option<f64>,

    /// Average exchange fee in percent, e.g. 0.3 (Custom exchange or --advanced)
    #[arg(long)]
    pub fee_percent: Option<f64>,

    /// Allow volume and fee overrides on a preset exchange
    #[arg(long)]
    pub advanced: bool,

    /// Use this ETH price instead of fetching one
    #[arg(long)]
    pub eth_price: Option<f64>,

    /// Do not call the price API; use the fallback price
    #[arg(long)]
    pub offline: bool,

    /// Also write results to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

/// Flags for the Year 1 calculator
#[derive(Args, Debug, Default)]
pub struct YearOneArgs {
    /// Tier currently being sold; sets the USD price per node
    #[arg(long)]
    pub tier: Option<u32>,

    /// Nodes to buy (1-10)
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Expected fully diluted valuation (USD)
    #[arg(long)]
    pub fdv: Option<f64>,

    /// Nodes expected to be sold in Year 1
    #[arg(long)]
    pub nodes_sold: Option<u64>,

    /// Exchange to benchmark fee revenue against, or "Custom"
    #[arg(long)]
    pub exchange: Option<String>,

    /// Monthly exchange volume in USD (Custom exchange only)
    #[arg(long)]
    pub monthly_volume: Option<f64>,

    /// Average exchange fee in percent (Custom exchange only)
    #[arg(long)]
    pub fee_percent: Option<f64>,

    /// Also write results to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

// =============================================================================
// Input Assembly
// =============================================================================

/// Build five-year calculator inputs
pub fn rewards_inputs(args: &RewardsArgs, defaults: &RewardsDefaults, table: &TierTable) -> Result<CalculatorInputs> {
    let base = CalculatorInputs::default();

    let exchange = args
        .exchange
        .clone()
        .or_else(|| defaults.exchange.clone())
        .unwrap_or_else(|| base.selected_exchange.clone());
    check_exchange(&exchange)?;

    let current_tier = clamp_tier(args.current_tier.or(defaults.current_tier).unwrap_or(base.current_tier));
    let purchase_tier = args.purchase_tier.or(defaults.purchase_tier).unwrap_or(base.purchase_tier);
    warn_unknown_tier("Current tier", current_tier, &table.current_tier_options());
    warn_unknown_tier("Purchase tier", purchase_tier, &table.purchase_tier_options());

    let inputs = CalculatorInputs {
        current_tier,
        purchase_tier,
        expected_fdv: check_fdv(args.fdv.or(defaults.expected_fdv).unwrap_or(base.expected_fdv))?,
        show_advanced: args.advanced || defaults.show_advanced.unwrap_or(false),
        ..base
    }
    .with_exchange(&exchange);

    let (monthly_volume, fee_percentage) = apply_volume_overrides(
        inputs.volume_adjustable(),
        (inputs.monthly_volume, inputs.fee_percentage),
        args.monthly_volume.or(defaults.monthly_volume),
        args.fee_percent.or(defaults.fee_percentage),
    )?;

    Ok(CalculatorInputs {
        monthly_volume,
        fee_percentage,
        ..inputs
    })
}

/// Build Year 1 calculator inputs
pub fn year_one_inputs(args: &YearOneArgs, defaults: &YearOneDefaults, table: &TierTable) -> Result<CalculatorV2Inputs> {
    let base = CalculatorV2Inputs::default();

    let exchange = args
        .exchange
        .clone()
        .or_else(|| defaults.exchange.clone())
        .unwrap_or_else(|| base.selected_exchange.clone());
    check_exchange(&exchange)?;

    let current_tier = args.tier.or(defaults.current_tier).unwrap_or(base.current_tier);
    warn_unknown_tier("Tier", current_tier, &table.purchase_tier_options());

    let quantity = args.quantity.or(defaults.quantity).unwrap_or(base.quantity);
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
        warn!(
            "Quantity {} outside {}-{} per wallet, clamping",
            quantity, MIN_QUANTITY, MAX_QUANTITY
        );
    }

    let inputs = CalculatorV2Inputs {
        current_tier,
        expected_fdv: check_fdv(args.fdv.or(defaults.expected_fdv).unwrap_or(base.expected_fdv))?,
        nodes_sold_year1: args
            .nodes_sold
            .or(defaults.nodes_sold_year1)
            .unwrap_or(base.nodes_sold_year1),
        ..base
    }
    .with_quantity(quantity)
    .with_exchange(&exchange);

    // No advanced toggle here: only Custom takes overrides
    let adjustable = exchange == CUSTOM_EXCHANGE;
    let (monthly_volume, fee_percentage) = apply_volume_overrides(
        adjustable,
        (inputs.monthly_volume, inputs.fee_percentage),
        args.monthly_volume.or(defaults.monthly_volume),
        args.fee_percent.or(defaults.fee_percentage),
    )?;

    Ok(CalculatorV2Inputs {
        monthly_volume,
        fee_percentage,
        ..inputs
    })
}

// =============================================================================
// Sanitization
// =============================================================================

fn check_exchange(name: &str) -> Result<()> {
    if name != CUSTOM_EXCHANGE && find_exchange(name).is_none() {
        bail!(
            "Unknown exchange '{}'. Available: {}",
            name,
            exchange_names().join(", ")
        );
    }
    Ok(())
}

fn check_fdv(fdv: f64) -> Result<f64> {
    if !fdv.is_finite() || fdv < 0.0 {
        bail!("FDV must be a non-negative number, got {}", fdv);
    }
    Ok(fdv)
}

fn clamp_tier(tier: u32) -> u32 {
    let clamped = tier.clamp(MIN_TIER, MAX_TIER);
    if clamped != tier {
        warn!("Current tier {} outside {}-{}, using {}", tier, MIN_TIER, MAX_TIER, clamped);
    }
    clamped
}

/// The calculators treat missing tiers as zero; make that visible
fn warn_unknown_tier(label: &str, tier: u32, known: &[u32]) {
    if !known.contains(&tier) {
        warn!("{} {} is not in the tier dataset; dependent figures will be 0", label, tier);
    }
}

/// Apply volume/fee overrides when the selection allows them, clamped to
/// the adjustable ranges
fn apply_volume_overrides(
    adjustable: bool,
    current: (f64, f64),
    monthly_volume: Option<f64>,
    fee_percent: Option<f64>,
) -> Result<(f64, f64)> {
    if monthly_volume.is_none() && fee_percent.is_none() {
        return Ok(current);
    }

    if !adjustable {
        bail!(
            "Monthly volume and fee can only be set for the {} exchange \
             (or with --advanced on the rewards command)",
            CUSTOM_EXCHANGE
        );
    }

    let volume = match monthly_volume {
        Some(v) => clamp_range("Monthly volume", v, MIN_MONTHLY_VOLUME, MAX_MONTHLY_VOLUME)?,
        None => current.0,
    };
    let fee = match fee_percent {
        Some(f) => clamp_range("Fee percent", f, MIN_FEE_PERCENT, MAX_FEE_PERCENT)?,
        None => current.1,
    };

    Ok((volume, fee))
}

fn clamp_range(label: &str, value: f64, min: f64, max: f64) -> Result<f64> {
    if value.is_nan() {
        bail!("{} must be a number", label);
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!("{} {} outside {}-{}, using {}", label, value, min, max, clamped);
    }
    Ok(clamped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TierTable {
        TierTable::bundled().unwrap()
    }

    #[test]
    fn test_rewards_defaults() {
        let inputs = rewards_inputs(&RewardsArgs::default(), &RewardsDefaults::default(), &table()).unwrap();
        assert_eq!(inputs, CalculatorInputs::default());
    }

    #[test]
    fn test_flags_override_config() {
        let defaults = RewardsDefaults {
            current_tier: Some(5),
            purchase_tier: Some(3),
            exchange: Some("Binance".to_string()),
            ..Default::default()
        };
        let args = RewardsArgs {
            current_tier: Some(8),
            ..Default::default()
        };

        let inputs = rewards_inputs(&args, &defaults, &table()).unwrap();
        assert_eq!(inputs.current_tier, 8);
        assert_eq!(inputs.purchase_tier, 3);
        assert_eq!(inputs.selected_exchange, "Binance");
        assert_eq!(inputs.monthly_volume, 624_881_131_654.0);
    }

    #[test]
    fn test_overrides_rejected_on_preset() {
        let args = RewardsArgs {
            exchange: Some("Uniswap".to_string()),
            monthly_volume: Some(5e9),
            ..Default::default()
        };
        assert!(rewards_inputs(&args, &RewardsDefaults::default(), &table()).is_err());

        let advanced = RewardsArgs {
            advanced: true,
            ..args
        };
        let inputs = rewards_inputs(&advanced, &RewardsDefaults::default(), &table()).unwrap();
        assert_eq!(inputs.selected_exchange, "Uniswap");
        assert_eq!(inputs.monthly_volume, 5e9);
        assert_eq!(inputs.fee_percentage, 0.300);
    }

    #[test]
    fn test_custom_overrides_are_clamped() {
        let args = YearOneArgs {
            exchange: Some("Custom".to_string()),
            monthly_volume: Some(1e15),
            fee_percent: Some(0.1),
            ..Default::default()
        };
        let inputs = year_one_inputs(&args, &YearOneDefaults::default(), &table()).unwrap();
        assert_eq!(inputs.monthly_volume, MAX_MONTHLY_VOLUME);
        assert_eq!(inputs.fee_percentage, 0.1);
    }

    #[test]
    fn test_custom_without_overrides_keeps_values() {
        let args = YearOneArgs {
            exchange: Some("Custom".to_string()),
            ..Default::default()
        };
        let inputs = year_one_inputs(&args, &YearOneDefaults::default(), &table()).unwrap();
        assert_eq!(inputs.monthly_volume, CalculatorV2Inputs::default().monthly_volume);
    }

    #[test]
    fn test_year_one_sanitization() {
        let args = YearOneArgs {
            quantity: Some(40),
            ..Default::default()
        };
        let inputs = year_one_inputs(&args, &YearOneDefaults::default(), &table()).unwrap();
        assert_eq!(inputs.quantity, MAX_QUANTITY);

        let unknown = YearOneArgs {
            exchange: Some("Kraken".to_string()),
            ..Default::default()
        };
        assert!(year_one_inputs(&unknown, &YearOneDefaults::default(), &table()).is_err());

        let negative = YearOneArgs {
            fdv: Some(-1.0),
            ..Default::default()
        };
        assert!(year_one_inputs(&negative, &YearOneDefaults::default(), &table()).is_err());
    }

    #[test]
    fn test_current_tier_clamped_to_slider_range() {
        let args = RewardsArgs {
            current_tier: Some(0),
            ..Default::default()
        };
        let inputs = rewards_inputs(&args, &RewardsDefaults::default(), &table()).unwrap();
        assert_eq!(inputs.current_tier, MIN_TIER);
    }
}
