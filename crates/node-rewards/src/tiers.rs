//! Tier dataset and lookups
//!
//! The dataset is a spreadsheet export: one JSON array where every row may
//! carry up to four unrelated records side by side (tier pricing, the
//! cumulative key count for a current tier, an FDV preset, a year of the
//! emission schedule). Which record a row holds is only visible from which
//! optional columns are present, so rows are split into typed tables once
//! at load time and every lookup goes through those.
//!
//! All lookups return 0 for keys that are not in the dataset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::constants;
use crate::error::{DataError, Result};

/// Dataset compiled into the crate
const BUNDLED_DATASET: &str = include_str!("../data/tiers.json");

// =============================================================================
// Raw Rows
// =============================================================================

/// One row of the exported spreadsheet. Unknown columns are ignored.
#[derive(Debug, Clone, Deserialize)]
struct TierRow {
    #[serde(rename = "Tier")]
    tier: Option<u32>,
    #[serde(rename = "Keys")]
    keys: Option<Cell>,
    // Column name is misspelled in the source sheet
    #[serde(rename = "Comulative Keys")]
    cumulative_keys: Option<Cell>,
    #[serde(rename = "Unit Price")]
    unit_price: Option<Cell>,
    #[serde(rename = "USD Price")]
    usd_price: Option<Cell>,
    #[serde(rename = "Current Tier")]
    current_tier: Option<u32>,
    #[serde(rename = "Purchase Tier")]
    purchase_tier: Option<u32>,
    #[serde(rename = "Expected FDV")]
    expected_fdv: Option<Cell>,
    #[serde(rename = "Total Supply")]
    total_supply: Option<Cell>,
    #[serde(rename = "Year")]
    year: Option<u32>,
    #[serde(rename = "Total Rewards per Year")]
    total_rewards_per_year: Option<Cell>,
}

/// A value cell. Spreadsheet exports mix numbers, numeric text and
/// placeholders like "N/A" in the same column.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Cell {
    Number(f64),
    Text(String),
    /// Booleans, objects and anything else a sheet can export
    Other(#[allow(dead_code)] serde::de::IgnoredAny),
}

impl Cell {
    /// Finite numeric value, if the cell holds one
    fn number(&self) -> Option<f64> {
        let value = match self {
            Cell::Number(n) => *n,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Non-negative whole count; fractions are truncated
    fn count(&self) -> Option<u64> {
        self.number().filter(|v| *v >= 0.0).map(|v| v as u64)
    }
}

/// Numeric value of an optional cell, 0 when absent or not a number
fn number_or_zero(cell: &Option<Cell>) -> f64 {
    cell.as_ref().and_then(Cell::number).unwrap_or(0.0)
}

fn count_or_zero(cell: &Option<Cell>) -> u64 {
    cell.as_ref().and_then(Cell::count).unwrap_or(0)
}

// =============================================================================
// Typed Tables
// =============================================================================

/// Pricing for nodes bought at a given tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierPrice {
    pub tier: u32,
    /// Nodes sold at this tier
    pub keys: u64,
    pub unit_price_eth: f64,
    pub unit_price_usd: f64,
}

/// Immutable lookup tables built from the tier dataset
#[derive(Debug, Clone)]
pub struct TierTable {
    /// Keyed by purchase tier
    prices: BTreeMap<u32, TierPrice>,
    /// Keyed by current tier
    cumulative_keys: BTreeMap<u32, u64>,
    /// Sorted, distinct
    fdv_presets: Vec<f64>,
    /// Keyed by year
    emissions: BTreeMap<u32, f64>,
    total_supply: f64,
}

impl TierTable {
    /// Build the table from the dataset compiled into the crate
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    /// Load a dataset of the same shape from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parse a JSON array of spreadsheet rows
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rows: Vec<TierRow> = serde_json::from_str(json)?;
        if rows.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(Self::from_rows(&rows))
    }

    /// Split rows into typed tables. When two rows share a key the first wins.
    fn from_rows(rows: &[TierRow]) -> Self {
        let mut prices = BTreeMap::new();
        let mut cumulative_keys = BTreeMap::new();
        let mut fdv_presets = Vec::new();
        let mut emissions = BTreeMap::new();
        let mut total_supply = None;

        for row in rows {
            if let Some(purchase_tier) = row.purchase_tier {
                prices.entry(purchase_tier).or_insert_with(|| TierPrice {
                    tier: row.tier.unwrap_or(purchase_tier),
                    keys: count_or_zero(&row.keys),
                    unit_price_eth: number_or_zero(&row.unit_price),
                    unit_price_usd: number_or_zero(&row.usd_price),
                });
            }

            if let Some(current_tier) = row.current_tier {
                cumulative_keys
                    .entry(current_tier)
                    .or_insert(count_or_zero(&row.cumulative_keys));
            }

            // Non-numeric FDV cells are skipped
            if let Some(fdv) = row.expected_fdv.as_ref().and_then(Cell::number) {
                fdv_presets.push(fdv);
            }

            // A zero supply cell counts as absent
            if total_supply.is_none() {
                total_supply = row.total_supply.as_ref().and_then(Cell::number).filter(|v| *v != 0.0);
            }

            if let Some(year) = row.year {
                emissions
                    .entry(year)
                    .or_insert(number_or_zero(&row.total_rewards_per_year));
            }
        }

        fdv_presets.sort_by(|a, b| a.total_cmp(b));
        fdv_presets.dedup();

        Self {
            prices,
            cumulative_keys,
            fdv_presets,
            emissions,
            total_supply: total_supply.unwrap_or(constants::DEFAULT_TOTAL_SUPPLY),
        }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Nodes sold up to and including `tier`
    pub fn cumulative_keys(&self, tier: u32) -> u64 {
        self.cumulative_keys.get(&tier).copied().unwrap_or(0)
    }

    /// Unit price in ETH for a node bought at `tier`
    pub fn purchase_price_eth(&self, tier: u32) -> f64 {
        self.prices.get(&tier).map(|p| p.unit_price_eth).unwrap_or(0.0)
    }

    /// Unit price in USD for a node bought at `tier`
    pub fn purchase_price_usd(&self, tier: u32) -> f64 {
        self.prices.get(&tier).map(|p| p.unit_price_usd).unwrap_or(0.0)
    }

    /// Tokens emitted to all nodes during `year`. 0 outside the schedule.
    pub fn yearly_reward_pool(&self, year: u32) -> f64 {
        self.emissions.get(&year).copied().unwrap_or(0.0)
    }

    pub fn total_supply(&self) -> f64 {
        self.total_supply
    }

    // =========================================================================
    // Option Lists
    // =========================================================================

    pub fn current_tier_options(&self) -> Vec<u32> {
        self.cumulative_keys.keys().copied().collect()
    }

    pub fn purchase_tier_options(&self) -> Vec<u32> {
        self.prices.keys().copied().collect()
    }

    pub fn expected_fdv_options(&self) -> &[f64] {
        &self.fdv_presets
    }

    /// Pricing rows in tier order
    pub fn tier_prices(&self) -> impl Iterator<Item = &TierPrice> {
        self.prices.values()
    }

    /// (year, token pool) pairs in year order
    pub fn emission_schedule(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.emissions.iter().map(|(year, pool)| (*year, *pool))
    }

    /// Sum of every scheduled yearly pool
    pub fn total_emissions(&self) -> f64 {
        self.emissions.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Denormalized rows in the shape the spreadsheet export produces
    const SAMPLE: &str = r#"[
        {"Tier": 1, "Keys": 100, "Comulative Keys": 100, "Unit Price": "0.2", "USD Price": 700,
         "Current Tier": 1, "Purchase Tier": 1, "Expected FDV": 500000000, "Total Supply": 2000000000,
         "Year": 1, "Total Rewards per Year": 1000000},
        {"Tier": 2, "Keys": 50, "Comulative Keys": 150, "Unit Price": "n/a", "USD Price": 800,
         "Current Tier": 2, "Purchase Tier": 2, "Expected FDV": 100000000, "__EMPTY_2": 7,
         "Year": 2, "Total Rewards per Year": 500000},
        {"Tier": 3, "Keys": 50, "Comulative Keys": 200, "Unit Price": 0.3,
         "Current Tier": 3, "Purchase Tier": 3, "Expected FDV": 500000000},
        {"Current Tier": 1, "Comulative Keys": 999, "Purchase Tier": 1, "Unit Price": "9.9"}
    ]"#;

    fn sample() -> TierTable {
        TierTable::from_json_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_lookups_by_present_column() {
        let table = sample();
        assert_eq!(table.cumulative_keys(2), 150);
        assert_eq!(table.purchase_price_eth(1), 0.2);
        assert_eq!(table.purchase_price_usd(2), 800.0);
        assert_eq!(table.yearly_reward_pool(2), 500_000.0);
        assert_eq!(table.total_supply(), 2_000_000_000.0);
    }

    #[test]
    fn test_first_row_wins() {
        let table = sample();
        assert_eq!(table.cumulative_keys(1), 100);
        assert_eq!(table.purchase_price_eth(1), 0.2);
    }

    #[test]
    fn test_missing_keys_return_zero() {
        let table = sample();
        assert_eq!(table.cumulative_keys(42), 0);
        assert_eq!(table.purchase_price_eth(42), 0.0);
        assert_eq!(table.purchase_price_usd(42), 0.0);
        assert_eq!(table.yearly_reward_pool(6), 0.0);
    }

    #[test]
    fn test_unparseable_and_numeric_unit_price() {
        let table = sample();
        assert_eq!(table.purchase_price_eth(2), 0.0);
        assert_eq!(table.purchase_price_eth(3), 0.3);
        // Row exists but has no USD column
        assert_eq!(table.purchase_price_usd(3), 0.0);
    }

    #[test]
    fn test_text_in_numeric_columns() {
        let table = TierTable::from_json_str(
            r#"[
                {"Current Tier": 1, "Comulative Keys": 10, "Expected FDV": "N/A"},
                {"Purchase Tier": 1, "Unit Price": "0.25", "USD Price": "TBD", "Keys": "-",
                 "Expected FDV": "75000000", "Total Supply": "unknown"},
                {"Year": 1, "Total Rewards per Year": "", "Expected FDV": null},
                {"Current Tier": 2, "Comulative Keys": true}
            ]"#,
        )
        .unwrap();

        assert_eq!(table.cumulative_keys(1), 10);
        assert_eq!(table.cumulative_keys(2), 0);
        assert_eq!(table.purchase_price_eth(1), 0.25);
        assert_eq!(table.purchase_price_usd(1), 0.0);
        assert_eq!(table.tier_prices().next().map(|p| p.keys), Some(0));
        assert_eq!(table.yearly_reward_pool(1), 0.0);
        assert_eq!(table.expected_fdv_options(), &[75_000_000.0]);
        assert_eq!(table.total_supply(), constants::DEFAULT_TOTAL_SUPPLY);
    }

    #[test]
    fn test_option_lists_sorted_and_distinct() {
        let table = sample();
        assert_eq!(table.current_tier_options(), vec![1, 2, 3]);
        assert_eq!(table.purchase_tier_options(), vec![1, 2, 3]);
        assert_eq!(table.expected_fdv_options(), &[100_000_000.0, 500_000_000.0]);
    }

    #[test]
    fn test_total_supply_defaults_when_absent() {
        let table = TierTable::from_json_str(r#"[{"Current Tier": 1, "Comulative Keys": 10}]"#).unwrap();
        assert_eq!(table.total_supply(), constants::DEFAULT_TOTAL_SUPPLY);

        let zero = TierTable::from_json_str(r#"[{"Total Supply": 0}, {"Total Supply": 5}]"#).unwrap();
        assert_eq!(zero.total_supply(), 5.0);
    }

    #[test]
    fn test_empty_and_malformed_datasets() {
        assert!(matches!(TierTable::from_json_str("[]"), Err(DataError::Empty)));
        assert!(matches!(TierTable::from_json_str("{\"Tier\": 1}"), Err(DataError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = TierTable::load(file.path()).unwrap();
        assert_eq!(table.cumulative_keys(3), 200);

        let missing = TierTable::load(Path::new("/nonexistent/tiers.json"));
        assert!(matches!(missing, Err(DataError::Io { .. })));
    }

    #[test]
    fn test_bundled_dataset() {
        let table = TierTable::bundled().unwrap();

        assert_eq!(table.current_tier_options().len(), 50);
        assert_eq!(table.purchase_tier_options().first(), Some(&1));
        assert_eq!(table.total_supply(), 1_000_000_000.0);
        assert!(table.expected_fdv_options().contains(&2_000_000_000.0));
        assert!(table.expected_fdv_options().contains(&50_000_000.0));

        // Cumulative keys never decrease from one tier to the next
        let tiers = table.current_tier_options();
        for pair in tiers.windows(2) {
            assert!(table.cumulative_keys(pair[1]) >= table.cumulative_keys(pair[0]));
        }

        // Five-year halving schedule distributing 20% of supply
        let schedule: Vec<_> = table.emission_schedule().collect();
        assert_eq!(schedule.len(), constants::EMISSION_YEARS as usize);
        for pair in schedule.windows(2) {
            assert!((pair[1].1 / pair[0].1 - 0.5).abs() < 1e-6);
        }
        assert!((table.total_emissions() - 0.2 * table.total_supply()).abs() < 1.0);
    }
}
