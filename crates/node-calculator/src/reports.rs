//! Report output (console tables, JSON and CSV)

use anyhow::{Context, Result};
use chrono::Utc;
use csv::Writer;
use node_rewards::{
    CalculatorInputs, CalculatorResults, CalculatorV2Inputs, CalculatorV2Results, EXCHANGES, TierTable,
    format_billions, format_currency, format_number, format_percentage,
};
use serde::Serialize;
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::prices::EthPrice;

/// Render rows as a console table
fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

// =============================================================================
// JSON
// =============================================================================

/// JSON envelope for calculator output
#[derive(Serialize)]
struct JsonReport<'a, I: Serialize, R: Serialize> {
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    eth_price: Option<&'a EthPrice>,
    inputs: &'a I,
    results: &'a R,
}

pub fn rewards_json(inputs: &CalculatorInputs, results: &CalculatorResults, price: &EthPrice) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now().to_rfc3339(),
        eth_price: Some(price),
        inputs,
        results,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn year_one_json(inputs: &CalculatorV2Inputs, results: &CalculatorV2Results) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now().to_rfc3339(),
        eth_price: None,
        inputs,
        results,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Pretty JSON for any listing
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

// =============================================================================
// Five-Year Calculator
// =============================================================================

#[derive(Tabled)]
struct PeriodRow {
    #[tabled(rename = "Period")]
    period: &'static str,
    #[tabled(rename = "Base Reward")]
    base: String,
    #[tabled(rename = "Tokens")]
    tokens: String,
    #[tabled(rename = "Fee Reward")]
    fee: String,
    #[tabled(rename = "Total")]
    total: String,
}

#[derive(Tabled)]
struct YearRow {
    #[tabled(rename = "Year")]
    year: u32,
    #[tabled(rename = "Tokens / Node")]
    tokens: String,
    #[tabled(rename = "Base Reward")]
    reward: String,
}

pub fn rewards_table(inputs: &CalculatorInputs, results: &CalculatorResults, price: &EthPrice) -> String {
    let periods = [
        PeriodRow {
            period: "Daily",
            base: format_currency(results.daily_reward, 2),
            tokens: format_number(results.daily_tokens),
            fee: format_currency(results.daily_fee_revenue, 2),
            total: format_currency(results.total_daily_reward, 2),
        },
        PeriodRow {
            period: "Monthly",
            base: format_currency(results.monthly_reward, 1),
            tokens: format_number(results.monthly_tokens),
            fee: format_currency(results.monthly_fee_revenue, 1),
            total: format_currency(results.total_monthly_reward, 1),
        },
        PeriodRow {
            period: "Yearly",
            base: format_currency(results.yearly_reward, 0),
            tokens: format_number(results.yearly_tokens),
            fee: format_currency(results.yearly_fee_revenue, 0),
            total: format_currency(results.total_yearly_reward, 0),
        },
        PeriodRow {
            period: "Lifetime",
            base: format_currency(results.lifetime_reward, 0),
            tokens: format_number(results.lifetime_tokens),
            fee: "-".to_string(),
            total: "-".to_string(),
        },
    ];

    let years = results.schedule.iter().map(|y| YearRow {
        year: y.year,
        tokens: format_number(y.tokens_per_node),
        reward: format_currency(y.reward_usd, 0),
    });

    let mut out = String::new();
    out.push_str(&format!(
        "Tier {} (purchased at tier {}) · FDV {} · {} ({} B/mo, {:.2}% fee)\n\n",
        inputs.current_tier,
        inputs.purchase_tier,
        format_currency(inputs.expected_fdv, 0),
        inputs.selected_exchange,
        format_billions(inputs.monthly_volume),
        inputs.fee_percentage,
    ));
    out.push_str(&format!(
        "Total Year 1 Rewards: {}\n\n",
        format_currency(results.total_yearly_reward, 0)
    ));
    out.push_str(&table(periods));
    out.push_str("\n\nEmission schedule (per node)\n");
    out.push_str(&table(years));
    out.push_str(&format!(
        "\n\nPurchase Price:  {}\nYear 1 APY:      {}\nCumulative Keys: {}\nETH Price:       {} ({})\n",
        format_currency(results.purchase_price, 0),
        format_percentage(results.yearly_apy),
        format_number(results.cumulative_keys as f64),
        format_currency(price.usd, 0),
        price.source,
    ));
    out
}

pub fn write_rewards_csv(path: &Path, results: &CalculatorResults) -> Result<()> {
    let mut wtr = Writer::from_path(path).with_context(|| format!("Failed to create {}", path.display()))?;

    wtr.write_record(["Metric", "Value"])?;
    let metrics = [
        ("Daily_Reward_USD", results.daily_reward),
        ("Monthly_Reward_USD", results.monthly_reward),
        ("Yearly_Reward_USD", results.yearly_reward),
        ("Lifetime_Reward_USD", results.lifetime_reward),
        ("Daily_Tokens", results.daily_tokens),
        ("Monthly_Tokens", results.monthly_tokens),
        ("Yearly_Tokens", results.yearly_tokens),
        ("Lifetime_Tokens", results.lifetime_tokens),
        ("Daily_Fee_USD", results.daily_fee_revenue),
        ("Monthly_Fee_USD", results.monthly_fee_revenue),
        ("Yearly_Fee_USD", results.yearly_fee_revenue),
        ("Total_Daily_USD", results.total_daily_reward),
        ("Total_Monthly_USD", results.total_monthly_reward),
        ("Total_Yearly_USD", results.total_yearly_reward),
        ("Purchase_Price_USD", results.purchase_price),
        ("Yearly_APY_Percent", results.yearly_apy),
        ("Cumulative_Keys", results.cumulative_keys as f64),
        ("ETH_Price_USD", results.eth_price),
    ];
    for (name, value) in metrics {
        wtr.write_record([name, &format!("{:.6}", value)])?;
    }
    for year in &results.schedule {
        wtr.write_record([&format!("Year_{}_Tokens", year.year), &format!("{:.6}", year.tokens_per_node)])?;
        wtr.write_record([&format!("Year_{}_Reward_USD", year.year), &format!("{:.6}", year.reward_usd)])?;
    }

    wtr.flush()?;
    Ok(())
}

// =============================================================================
// Year 1 Calculator
// =============================================================================

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn metric(metric: &'static str, value: String) -> MetricRow {
    MetricRow { metric, value }
}

pub fn year_one_table(inputs: &CalculatorV2Inputs, results: &CalculatorV2Results) -> String {
    let rows = [
        metric("Total Investment", format_currency(results.total_investment, 2)),
        metric("Year 1 Base Rewards", format_currency(results.year1_base_rewards, 0)),
        metric("Year 1 Fee Rewards", format_currency(results.year1_fee_rewards, 0)),
        metric("Year 1 Total Rewards", format_currency(results.year1_total_rewards, 0)),
        metric("Base Reward / Node", format_currency(results.base_reward_per_node, 2)),
        metric("Fee Reward / Node", format_currency(results.fee_reward_per_node, 2)),
        metric("Tokens / Node", format_number(results.year1_tokens_per_node)),
        metric("Total Tokens", format_number(results.year1_total_tokens)),
        metric("Year 1 APY", format_percentage(results.year1_apy)),
    ];

    format!(
        "Tier {} · {} node(s) · FDV {} · {} nodes sold in Year 1 · {} ({} B/mo, {:.2}% fee)\n\n{}\n",
        inputs.current_tier,
        inputs.quantity,
        format_currency(inputs.expected_fdv, 0),
        format_number(inputs.nodes_sold_year1 as f64),
        inputs.selected_exchange,
        format_billions(inputs.monthly_volume),
        inputs.fee_percentage,
        table(rows),
    )
}

pub fn write_year_one_csv(path: &Path, results: &CalculatorV2Results) -> Result<()> {
    let mut wtr = Writer::from_path(path).with_context(|| format!("Failed to create {}", path.display()))?;

    wtr.write_record(["Metric", "Value"])?;
    let metrics = [
        ("Total_Investment_USD", results.total_investment),
        ("Year1_Base_Rewards_USD", results.year1_base_rewards),
        ("Year1_Fee_Rewards_USD", results.year1_fee_rewards),
        ("Year1_Total_Rewards_USD", results.year1_total_rewards),
        ("Base_Reward_Per_Node_USD", results.base_reward_per_node),
        ("Fee_Reward_Per_Node_USD", results.fee_reward_per_node),
        ("Year1_Tokens_Per_Node", results.year1_tokens_per_node),
        ("Year1_Total_Tokens", results.year1_total_tokens),
        ("Year1_APY_Percent", results.year1_apy),
    ];
    for (name, value) in metrics {
        wtr.write_record([name, &format!("{:.6}", value)])?;
    }

    wtr.flush()?;
    Ok(())
}

// =============================================================================
// Listings
// =============================================================================

#[derive(Tabled)]
struct TierRow {
    #[tabled(rename = "Tier")]
    tier: u32,
    #[tabled(rename = "Keys")]
    keys: String,
    #[tabled(rename = "Cumulative Keys")]
    cumulative: String,
    #[tabled(rename = "Price (ETH)")]
    eth: String,
    #[tabled(rename = "Price (USD)")]
    usd: String,
}

pub fn tiers_table(tiers: &TierTable) -> String {
    table(tiers.tier_prices().map(|p| TierRow {
        tier: p.tier,
        keys: format_number(p.keys as f64),
        cumulative: format_number(tiers.cumulative_keys(p.tier) as f64),
        eth: format!("{:.4}", p.unit_price_eth),
        usd: format_currency(p.unit_price_usd, 2),
    }))
}

#[derive(Tabled)]
struct ExchangeRow {
    #[tabled(rename = "Exchange")]
    name: &'static str,
    #[tabled(rename = "Monthly Volume ($B)")]
    volume: String,
    #[tabled(rename = "Fee")]
    fee: String,
}

pub fn exchanges_table() -> String {
    table(EXCHANGES.iter().map(|e| ExchangeRow {
        name: e.name,
        volume: format_billions(e.monthly_volume_usd),
        fee: format!("{:.3}%", e.fee_percent),
    }))
}

#[derive(Tabled)]
struct EmissionRow {
    #[tabled(rename = "Year")]
    year: u32,
    #[tabled(rename = "Token Pool")]
    pool: String,
    #[tabled(rename = "Share of Supply")]
    share: String,
}

/// Emission schedule with supply and FDV presets, for JSON output
#[derive(Serialize)]
pub struct ScheduleListing {
    pub total_supply: f64,
    pub total_emissions: f64,
    pub years: Vec<(u32, f64)>,
    pub fdv_presets: Vec<f64>,
}

impl ScheduleListing {
    pub fn new(tiers: &TierTable) -> Self {
        Self {
            total_supply: tiers.total_supply(),
            total_emissions: tiers.total_emissions(),
            years: tiers.emission_schedule().collect(),
            fdv_presets: tiers.expected_fdv_options().to_vec(),
        }
    }
}

pub fn schedule_table(listing: &ScheduleListing) -> String {
    let share = |pool: f64| {
        if listing.total_supply > 0.0 {
            format_percentage(pool / listing.total_supply * 100.0)
        } else {
            format_percentage(0.0)
        }
    };

    let rows = listing.years.iter().map(|(year, pool)| EmissionRow {
        year: *year,
        pool: format_number(*pool),
        share: share(*pool),
    });

    let fdvs: Vec<String> = listing.fdv_presets.iter().map(|f| format_currency(*f, 0)).collect();

    format!(
        "{}\n\nTotal supply:    {}\nTotal emissions: {} ({})\nFDV presets:     {}\n",
        table(rows),
        format_number(listing.total_supply),
        format_number(listing.total_emissions),
        share(listing.total_emissions),
        fdvs.join(", "),
    )
}
