//! Current ETH price from the CoinGecko API
//!
//! The five-year calculator prices nodes in ETH. A failed lookup is never
//! fatal: the calculator runs with the fallback price and says so.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::constants;

/// CoinGecko simple price response
#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    ethereum: Option<EthereumPrice>,
}

#[derive(Debug, Deserialize)]
struct EthereumPrice {
    usd: f64,
}

/// Where the ETH price used in a calculation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Live CoinGecko price
    Api,
    /// Set on the command line or in the config file
    Fixed,
    /// API unavailable or skipped
    Fallback,
}

impl std::fmt::Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceSource::Api => write!(f, "CoinGecko"),
            PriceSource::Fixed => write!(f, "fixed"),
            PriceSource::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EthPrice {
    pub usd: f64,
    pub source: PriceSource,
}

/// How to obtain the ETH price
#[derive(Debug, Clone, Default)]
pub struct PriceOptions {
    pub fixed_price: Option<f64>,
    pub fallback_price: Option<f64>,
    pub api_key: Option<String>,
    /// Skip the API and use the fallback
    pub offline: bool,
}

impl PriceOptions {
    fn fallback(&self) -> EthPrice {
        EthPrice {
            usd: self.fallback_price.unwrap_or(constants::FALLBACK_ETH_PRICE),
            source: PriceSource::Fallback,
        }
    }
}

/// Pick the ETH price for this run: fixed, fetched, or fallback
pub async fn resolve_eth_price(options: &PriceOptions) -> EthPrice {
    if let Some(usd) = options.fixed_price {
        return EthPrice {
            usd,
            source: PriceSource::Fixed,
        };
    }

    if options.offline {
        debug!("Offline mode, using fallback ETH price");
        return options.fallback();
    }

    match fetch_current_eth_price(options.api_key.as_deref()).await {
        Ok(usd) if usd > 0.0 => EthPrice {
            usd,
            source: PriceSource::Api,
        },
        Ok(usd) => {
            warn!("CoinGecko returned an unusable ETH price ({}), using fallback", usd);
            options.fallback()
        }
        Err(e) => {
            let fallback = options.fallback();
            warn!("Failed to fetch ETH price: {}", e);
            warn!("Using fallback price of ${:.2}", fallback.usd);
            fallback
        }
    }
}

/// Outcome of one request that did not produce a price
enum AttemptError {
    /// Network trouble, rate limiting or a server error; worth another try
    Transient(anyhow::Error),
    /// The API answered with a body we cannot use
    Permanent(anyhow::Error),
}

/// Fetch current ETH price with retry logic
pub async fn fetch_current_eth_price(api_key: Option<&str>) -> Result<f64> {
    let url = format!(
        "{}{}",
        constants::COINGECKO_API_BASE,
        constants::COINGECKO_ETH_SIMPLE_PRICE
    );
    fetch_eth_price_from(&url, api_key).await
}

async fn fetch_eth_price_from(url: &str, api_key: Option<&str>) -> Result<f64> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(constants::PRICE_FETCH_TIMEOUT_SECS))
        .build()?;

    let max_retries = constants::PRICE_FETCH_MAX_RETRIES;
    let mut last_error = anyhow::anyhow!("No ETH price request was made");

    for attempt in 0..max_retries {
        if attempt > 0 {
            let delay = Duration::from_secs(2u64.pow(attempt));
            debug!("Retrying ETH price fetch in {:?}", delay);
            sleep(delay).await;
        }

        match request_eth_price(&client, url, api_key).await {
            Ok(price) => return Ok(price),
            Err(AttemptError::Permanent(e)) => return Err(e),
            Err(AttemptError::Transient(e)) => {
                debug!("ETH price attempt {} failed: {}", attempt + 1, e);
                last_error = e;
            }
        }
    }

    Err(last_error.context(format!("ETH price unavailable after {} attempts", max_retries)))
}

async fn request_eth_price(client: &reqwest::Client, url: &str, api_key: Option<&str>) -> Result<f64, AttemptError> {
    let mut request = client.get(url).header("Accept", "application/json");
    if let Some(key) = api_key {
        request = request.header("x-cg-demo-api-key", key);
    }

    let response = request
        .send()
        .await
        .map_err(|e| AttemptError::Transient(anyhow::anyhow!("Request failed: {}", e)))?;

    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(AttemptError::Transient(anyhow::anyhow!("Rate limited (429)")));
    }
    if !status.is_success() {
        return Err(AttemptError::Transient(anyhow::anyhow!(
            "CoinGecko API returned status: {}",
            status
        )));
    }

    match response.json::<SimplePriceResponse>().await {
        Ok(data) => parse_eth_price(data).map_err(AttemptError::Permanent),
        Err(e) if e.is_decode() => Err(AttemptError::Permanent(anyhow::anyhow!("Parse error: {}", e))),
        Err(e) => Err(AttemptError::Transient(anyhow::anyhow!("Failed to read response: {}", e))),
    }
}

fn parse_eth_price(data: SimplePriceResponse) -> Result<f64> {
    data.ethereum
        .map(|e| e.usd)
        .ok_or_else(|| anyhow::anyhow!("No ETH price in response"))
}
