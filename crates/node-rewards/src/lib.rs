//! Node reward projections
//!
//! Estimates what a validator node earns from token emissions and from a
//! share of exchange trading fees, for a given tier, FDV and exchange
//! volume. Two calculators are provided:
//!
//! - [`calculate_rewards`]: one node bought in ETH, projected over the
//!   five-year emission schedule.
//! - [`calculate_rewards_v2`]: several nodes bought in USD, Year 1 only.
//!
//! Both are pure functions over an immutable [`TierTable`]. Missing data and
//! zero denominators produce zeros, never errors.

pub mod calculator;
pub mod calculator_v2;
pub mod constants;
pub mod error;
pub mod exchanges;
pub mod format;
pub mod tiers;

pub use calculator::{CalculatorInputs, CalculatorResults, YearProjection, calculate_rewards};
pub use calculator_v2::{CalculatorV2Inputs, CalculatorV2Results, calculate_rewards_v2};
pub use error::{DataError, Result};
pub use exchanges::{CUSTOM_EXCHANGE, EXCHANGES, Exchange, ExchangeSelection, exchange_names, find_exchange};
pub use format::{format_billions, format_currency, format_number, format_percentage};
pub use tiers::{TierPrice, TierTable};
