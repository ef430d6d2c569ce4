//! Node Reward Calculator
//!
//! Projects what a validator node earns from token emissions and from its
//! share of exchange trading fees, for a chosen tier, FDV and exchange.

mod config;
mod constants;
mod inputs;
mod prices;
mod reports;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use node_rewards::{EXCHANGES, TierTable, calculate_rewards, calculate_rewards_v2};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use config::FileConfig;
use inputs::{RewardsArgs, YearOneArgs};
use prices::PriceOptions;

#[derive(Parser, Debug)]
#[command(name = "node-calculator")]
#[command(about = "Project validator node rewards from emissions and exchange fees")]
struct Args {
    /// Config file (optional)
    #[arg(short, long, default_value = constants::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Five-year projection for one node bought with ETH
    Rewards(RewardsArgs),

    /// Year 1 projection for up to 10 nodes bought with USD
    YearOne(YearOneArgs),

    /// List tier prices and cumulative node counts
    Tiers,

    /// List exchange volume presets
    Exchanges,

    /// Show the emission schedule, total supply and FDV presets
    Schedule,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let file_config = FileConfig::load_or_default(&args.config)?;
    let table = file_config.tier_table()?;
    debug!(
        "Loaded {} tiers, {} emission years",
        table.purchase_tier_options().len(),
        table.emission_schedule().count()
    );

    match args.command {
        Command::Rewards(ref rewards) => run_rewards(rewards, &file_config, &table, args.format).await,
        Command::YearOne(ref year_one) => run_year_one(year_one, &file_config, &table, args.format),
        Command::Tiers => {
            let out = match args.format {
                OutputFormat::Table => reports::tiers_table(&table),
                OutputFormat::Json => reports::to_json(&table.tier_prices().collect::<Vec<_>>())?,
            };
            println!("{}", out);
            Ok(())
        }
        Command::Exchanges => {
            let out = match args.format {
                OutputFormat::Table => reports::exchanges_table(),
                OutputFormat::Json => reports::to_json(&EXCHANGES)?,
            };
            println!("{}", out);
            Ok(())
        }
        Command::Schedule => {
            let listing = reports::ScheduleListing::new(&table);
            let out = match args.format {
                OutputFormat::Table => reports::schedule_table(&listing),
                OutputFormat::Json => reports::to_json(&listing)?,
            };
            println!("{}", out);
            Ok(())
        }
    }
}

/// Run the five-year calculator
async fn run_rewards(args: &RewardsArgs, file_config: &FileConfig, table: &TierTable, format: OutputFormat) -> Result<()> {
    let inputs = inputs::rewards_inputs(args, &file_config.defaults.rewards, table)?;

    let price_options = PriceOptions {
        fixed_price: args.eth_price.or(file_config.pricing.eth_price),
        fallback_price: file_config.pricing.fallback_eth_price,
        api_key: file_config.pricing.coingecko_api_key.clone(),
        offline: args.offline,
    };
    let eth_price = prices::resolve_eth_price(&price_options).await;
    info!("ETH price: ${:.2} ({})", eth_price.usd, eth_price.source);

    let results = calculate_rewards(table, &inputs, eth_price.usd);

    let out = match format {
        OutputFormat::Table => reports::rewards_table(&inputs, &results, &eth_price),
        OutputFormat::Json => reports::rewards_json(&inputs, &results, &eth_price)?,
    };
    println!("{}", out);

    if let Some(path) = &args.csv {
        reports::write_rewards_csv(path, &results)
            .with_context(|| format!("Failed to write CSV report to {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}

/// Run the Year 1 calculator
fn run_year_one(args: &YearOneArgs, file_config: &FileConfig, table: &TierTable, format: OutputFormat) -> Result<()> {
    let inputs = inputs::year_one_inputs(args, &file_config.defaults.year_one, table)?;
    let results = calculate_rewards_v2(table, &inputs);

    let out = match format {
        OutputFormat::Table => reports::year_one_table(&inputs, &results),
        OutputFormat::Json => reports::year_one_json(&inputs, &results)?,
    };
    println!("{}", out);

    if let Some(path) = &args.csv {
        reports::write_year_one_csv(path, &results)
            .with_context(|| format!("Failed to write CSV report to {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}
