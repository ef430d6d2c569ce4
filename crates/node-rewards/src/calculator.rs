//! Five-year reward projection for a node bought with ETH
//!
//! Base rewards come from the yearly emission pool split evenly over every
//! node sold up to the current tier. Fee rewards are the node holders' share
//! of an exchange's trading fees, split the same way. Both are converted to
//! USD through the expected FDV.
//!
//! Every division by a zero denominator yields 0 instead of an error so the
//! result is always displayable.

use serde::Serialize;

use crate::constants::{self, DAYS_PER_MONTH, MONTHS_PER_YEAR, VALIDATOR_FEE_SHARE};
use crate::exchanges::{self, ExchangeSelection};
use crate::tiers::TierTable;

/// Inputs to the five-year calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorInputs {
    /// Tier currently being sold; sets how many nodes share rewards
    pub current_tier: u32,
    /// Tier the node was bought at; sets the purchase price
    pub purchase_tier: u32,
    pub expected_fdv: f64,
    pub selected_exchange: String,
    /// USD per month
    pub monthly_volume: f64,
    /// 0-100 scale
    pub fee_percentage: f64,
    /// Volume and fee may be edited for preset exchanges
    pub show_advanced: bool,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        let (monthly_volume, fee_percentage) = exchanges::find_exchange(constants::DEFAULT_EXCHANGE)
            .map(|e| (e.monthly_volume_usd, e.fee_percent))
            .unwrap_or_default();

        Self {
            current_tier: constants::MIN_TIER,
            purchase_tier: constants::MIN_TIER,
            expected_fdv: constants::DEFAULT_FDV,
            selected_exchange: constants::DEFAULT_EXCHANGE.to_string(),
            monthly_volume,
            fee_percentage,
            show_advanced: false,
        }
    }
}

impl CalculatorInputs {
    /// Switch exchange. A preset overwrites volume and fee with its own
    /// values; `Custom` keeps the current ones.
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

    /// Whether volume and fee are caller-controlled
    pub fn volume_adjustable(&self) -> bool {
        self.show_advanced || ExchangeSelection::parse(&self.selected_exchange).is_custom()
    }
}

/// Base reward for one node in one year of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearProjection {
    pub year: u32,
    pub tokens_per_node: f64,
    pub reward_usd: f64,
}

/// Output of the five-year calculator. USD unless named `_tokens`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorResults {
    // Token emission rewards
    pub daily_reward: f64,
    pub monthly_reward: f64,
    pub yearly_reward: f64,
    pub lifetime_reward: f64,

    // Token amounts
    pub daily_tokens: f64,
    pub monthly_tokens: f64,
    pub yearly_tokens: f64,
    pub lifetime_tokens: f64,

    // Fee rewards
    pub daily_fee_revenue: f64,
    pub monthly_fee_revenue: f64,
    pub yearly_fee_revenue: f64,

    // Combined totals
    pub total_daily_reward: f64,
    pub total_monthly_reward: f64,
    pub total_yearly_reward: f64,

    pub purchase_price: f64,
    /// Year 1 return on the purchase price, percent
    pub yearly_apy: f64,

    pub cumulative_keys: u64,
    pub eth_price: f64,

    /// Years 1 through 5
    pub schedule: Vec<YearProjection>,
}

/// Project rewards for one node over the emission schedule
pub fn calculate_rewards(table: &TierTable, inputs: &CalculatorInputs, eth_price: f64) -> CalculatorResults {
    let cumulative_keys = table.cumulative_keys(inputs.current_tier);
    let purchase_price = table.purchase_price_eth(inputs.purchase_tier) * eth_price;

    let dollar_per_reward_unit = inputs.expected_fdv / table.total_supply();

    let schedule: Vec<YearProjection> = (1..=constants::EMISSION_YEARS)
        .map(|year| {
            let pool = table.yearly_reward_pool(year);
            let tokens_per_node = if pool != 0.0 && cumulative_keys > 0 {
                pool / cumulative_keys as f64
            } else {
                0.0
            };

            YearProjection {
                year,
                tokens_per_node,
                reward_usd: tokens_per_node * dollar_per_reward_unit,
            }
        })
        .collect();

    // Year 1 breakdown
    let yearly_reward = schedule.first().map(|y| y.reward_usd).unwrap_or(0.0);
    let yearly_tokens = schedule.first().map(|y| y.tokens_per_node).unwrap_or(0.0);
    let monthly_reward = yearly_reward / MONTHS_PER_YEAR;
    let daily_reward = monthly_reward / DAYS_PER_MONTH;
    let monthly_tokens = yearly_tokens / MONTHS_PER_YEAR;
    let daily_tokens = monthly_tokens / DAYS_PER_MONTH;

    let lifetime_reward: f64 = schedule.iter().map(|y| y.reward_usd).sum();
    let lifetime_tokens: f64 = schedule.iter().map(|y| y.tokens_per_node).sum();

    // Fee rewards
    let monthly_revenue = inputs.monthly_volume * (inputs.fee_percentage / 100.0);
    let validator_share = monthly_revenue * VALIDATOR_FEE_SHARE;
    let monthly_fee_revenue = if cumulative_keys > 0 {
        validator_share / cumulative_keys as f64
    } else {
        0.0
    };
    let daily_fee_revenue = monthly_fee_revenue / DAYS_PER_MONTH;
    let yearly_fee_revenue = monthly_fee_revenue * MONTHS_PER_YEAR;

    let total_daily_reward = daily_reward + daily_fee_revenue;
    let total_monthly_reward = monthly_reward + monthly_fee_revenue;
    let total_yearly_reward = yearly_reward + yearly_fee_revenue;

    let yearly_apy = if purchase_price > 0.0 {
        total_yearly_reward / purchase_price * 100.0
    } else {
        0.0
    };

    CalculatorResults {
        daily_reward,
        monthly_reward,
        yearly_reward,
        lifetime_reward,
        daily_tokens,
        monthly_tokens,
        yearly_tokens,
        lifetime_tokens,
        daily_fee_revenue,
        monthly_fee_revenue,
        yearly_fee_revenue,
        total_daily_reward,
        total_monthly_reward,
        total_yearly_reward,
        purchase_price,
        yearly_apy,
        cumulative_keys,
        eth_price,
        schedule,
    }
}
