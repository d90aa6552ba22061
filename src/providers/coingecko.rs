//! CoinGecko price fetcher implementation

use crate::{
    constants::{
        COINGECKO_API_URL, COINGECKO_SIMPLE_PRICE_ENDPOINT, REQUEST_TIMEOUT_SECS, TRACKED_ASSETS,
        USER_AGENT, VS_CURRENCY,
    },
    error::FetchError,
    provider::PriceFetcher,
    types::{Asset, PriceQuote},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use std::time::Duration;

/// CoinGecko simple price response: asset id -> { currency -> price }
type CoinGeckoResponse = Map<String, Value>;

/// CoinGecko price fetcher
pub struct CoinGeckoFetcher {
    client: Client,
    url: String,
}

impl CoinGeckoFetcher {
    /// Creates a fetcher against the public CoinGecko API
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(COINGECKO_API_URL)
    }

    /// Creates a fetcher that sends the same query to another API root
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Creates a fetcher with a custom request timeout
    pub(crate) fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: build_url(base_url, TRACKED_ASSETS),
        })
    }

    /// Full request URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Builds the CoinGecko API URL for fetching prices
fn build_url(base_url: &str, assets: &[Asset]) -> String {
    let ids = assets
        .iter()
        .map(|a| a.coingecko_id())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{}{}?ids={}&vs_currencies={}",
        base_url.trim_end_matches('/'),
        COINGECKO_SIMPLE_PRICE_ENDPOINT,
        ids,
        VS_CURRENCY
    )
}

/// Decodes a response body into a quote
///
/// Both assets must be present with a numeric price; anything else in the
/// body is ignored.
fn parse_quote(body: &str) -> Result<PriceQuote, FetchError> {
    let response: CoinGeckoResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::malformed(format!("Failed to parse CoinGecko response: {}", e)))?;

    let price = |asset: Asset| {
        response
            .get(asset.coingecko_id())
            .and_then(|entry| entry.get(VS_CURRENCY))
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                FetchError::malformed(format!(
                    "No numeric {} price for {}",
                    VS_CURRENCY,
                    asset.coingecko_id()
                ))
            })
    };

    Ok(PriceQuote::new(
        price(Asset::Bitcoin)?,
        price(Asset::Ethereum)?,
    ))
}

#[async_trait]
impl PriceFetcher for CoinGeckoFetcher {
    async fn fetch(&self) -> Result<PriceQuote, FetchError> {
        tracing::debug!(url = %self.url, "Fetching prices from CoinGecko");

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("CoinGecko rate limit exceeded");
        }
        if status != StatusCode::OK {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let quote = parse_quote(&body)?;

        tracing::debug!(
            bitcoin_usd = quote.bitcoin_usd(),
            ethereum_usd = quote.ethereum_usd(),
            "Successfully fetched prices from CoinGecko"
        );

        Ok(quote)
    }

    fn provider_name(&self) -> &'static str {
        "coingecko"
    }
}
