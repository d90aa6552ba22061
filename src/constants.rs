//! Constants for the crypto price panel
//!
//! All configuration is centralized here. There is no config file and no
//! environment lookup; the panel runs with these compile-time constants.

use crate::types::Asset;

/// How often the periodic tick starts a new fetch cycle (in seconds)
pub const REFRESH_INTERVAL_SECS: u64 = 60;

/// Fixed wait before a retry attempt after a failed fetch (in seconds)
pub const RETRY_DELAY_SECS: u64 = 5;

/// Retries allowed within one tick interval before the panel shows the
/// terminal failure text
pub const MAX_RETRIES: u32 = 3;

/// HTTP request timeout when fetching prices (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Assets shown on the panel, in display order
pub const TRACKED_ASSETS: &[Asset] = &[Asset::Bitcoin, Asset::Ethereum];

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko API endpoint for simple price queries
pub const COINGECKO_SIMPLE_PRICE_ENDPOINT: &str = "/simple/price";

/// Quote currency requested from CoinGecko
pub const VS_CURRENCY: &str = "usd";

/// User agent for HTTP requests
pub const USER_AGENT: &str = "crypto-price-panel/0.1.0";

/// Panel text before the first fetch completes
pub const LOADING_TEXT: &str = "Loading...";

/// Panel text while a retry is scheduled
pub const RETRYING_TEXT: &str = "Retrying...";

/// Panel text when the payload could not be decoded
pub const INVALID_RESPONSE_TEXT: &str = "Invalid response";

/// Panel text for transport/status failures and exhausted retries
pub const FETCH_FAILED_TEXT: &str = "Failed to fetch prices";
