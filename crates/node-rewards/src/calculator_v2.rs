//! Year 1 projection for a USD purchase of one or more nodes
//!
//! Unlike the five-year calculator the emission pool is shared over an
//! assumed number of nodes sold in Year 1 rather than the cumulative count
//! of a tier, and every figure scales with the number of nodes owned.

use serde::Serialize;

use crate::constants::{self, MONTHS_PER_YEAR, VALIDATOR_FEE_SHARE};
use crate::exchanges::{self, ExchangeSelection};
use crate::tiers::TierTable;

/// Inputs to the Year 1 calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorV2Inputs {
    pub current_tier: u32,
    /// Nodes owned, 1-10 per wallet
    pub quantity: u32,
    pub expected_fdv: f64,
    /// Nodes assumed to share the Year 1 pool
    pub nodes_sold_year1: u64,
    pub selected_exchange: String,
    pub monthly_volume: f64,
    pub fee_percentage: f64,
}

impl Default for CalculatorV2Inputs {
    fn default() -> Self {
        let (monthly_volume, fee_percentage) = exchanges::find_exchange(constants::DEFAULT_EXCHANGE_YEAR_ONE)
            .map(|e| (e.monthly_volume_usd, e.fee_percent))
            .unwrap_or_default();

        Self {
            current_tier: constants::MIN_TIER,
            quantity: constants::MIN_QUANTITY,
            expected_fdv: constants::DEFAULT_FDV_YEAR_ONE,
            nodes_sold_year1: constants::DEFAULT_NODES_SOLD_YEAR_ONE,
            selected_exchange: constants::DEFAULT_EXCHANGE_YEAR_ONE.to_string(),
            monthly_volume,
            fee_percentage,
        }
    }
}

impl CalculatorV2Inputs {
    /// Switch exchange; see [`crate::CalculatorInputs::with_exchange`]
    pub fn with_exchange(self, name: &str) -> Self {
        let (monthly_volume, fee_percentage) =
            ExchangeSelection::parse(name).apply((self.monthly_volume, self.fee_percentage));

        Self {
            selected_exchange: name.to_string(),
            monthly_volume,
            fee_percentage,
            ..self
        }
    }

    /// Set the node count, kept within the per-wallet limit
    pub fn with_quantity(self, quantity: u32) -> Self {
        Self {
            quantity: quantity.clamp(constants::MIN_QUANTITY, constants::MAX_QUANTITY),
            ..self
        }
    }
}

/// Output of the Year 1 calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorV2Results {
    pub total_investment: f64,
    pub year1_base_rewards: f64,
    pub year1_fee_rewards: f64,
    pub year1_total_rewards: f64,
    pub base_reward_per_node: f64,
    pub fee_reward_per_node: f64,
    pub year1_tokens_per_node: f64,
    pub year1_total_tokens: f64,
    /// Percent
    pub year1_apy: f64,
}

/// Project Year 1 rewards for `inputs.quantity` nodes
pub fn calculate_rewards_v2(table: &TierTable, inputs: &CalculatorV2Inputs) -> CalculatorV2Results {
    let quantity = f64::from(inputs.quantity);
    let nodes_sold = inputs.nodes_sold_year1 as f64;

    let price_per_node = table.purchase_price_usd(inputs.current_tier);
    let total_investment = price_per_node * quantity;

    let dollar_per_token = inputs.expected_fdv / table.total_supply();

    // Base rewards: the Year 1 emission pool split over every node sold
    let tokens_per_node = if inputs.nodes_sold_year1 > 0 {
        table.yearly_reward_pool(1) / nodes_sold
    } else {
        0.0
    };
    let base_reward_per_node = tokens_per_node * dollar_per_token;
    let year1_base_rewards = base_reward_per_node * quantity;
    let year1_total_tokens = tokens_per_node * quantity;

    // Fee rewards: node holders' share of a year of trading fees
    let yearly_revenue = inputs.monthly_volume * MONTHS_PER_YEAR * (inputs.fee_percentage / 100.0);
    let validator_share = yearly_revenue * VALIDATOR_FEE_SHARE;
    let fee_reward_per_node = if inputs.nodes_sold_year1 > 0 {
        validator_share / nodes_sold
    } else {
        0.0
    };
    let year1_fee_rewards = fee_reward_per_node * quantity;

    let year1_total_rewards = year1_base_rewards + year1_fee_rewards;

    let year1_apy = if total_investment > 0.0 {
        year1_total_rewards / total_investment * 100.0
    } else {
        0.0
    };

    CalculatorV2Results {
        total_investment,
        year1_base_rewards,
        year1_fee_rewards,
        year1_total_rewards,
        base_reward_per_node,
        fee_reward_per_node,
        year1_tokens_per_node: tokens_per_node,
        year1_total_tokens,
        year1_apy,
    }
}
