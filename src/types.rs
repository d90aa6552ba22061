//! Types for the crypto price panel

use crate::constants::{
    FETCH_FAILED_TEXT, INVALID_RESPONSE_TEXT, LOADING_TEXT, RETRYING_TEXT, TRACKED_ASSETS,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Assets shown on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    /// Bitcoin
    Bitcoin,
    /// Ethereum
    Ethereum,
}

impl Asset {
    /// Get the CoinGecko ID for this asset
    pub fn coingecko_id(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "bitcoin",
            Asset::Ethereum => "ethereum",
        }
    }

    /// Glyph used as the price prefix on the panel
    pub fn glyph(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "₿",
            Asset::Ethereum => "Ξ",
        }
    }
}

/// One paired price reading for bitcoin and ethereum in US dollars
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceQuote {
    bitcoin_usd: f64,
    ethereum_usd: f64,
}

impl PriceQuote {
    pub fn new(bitcoin_usd: f64, ethereum_usd: f64) -> Self {
        Self {
            bitcoin_usd,
            ethereum_usd,
        }
    }

    pub fn bitcoin_usd(&self) -> f64 {
        self.bitcoin_usd
    }

    pub fn ethereum_usd(&self) -> f64 {
        self.ethereum_usd
    }

    /// Price in USD for a single asset
    pub fn price(&self, asset: Asset) -> f64 {
        match asset {
            Asset::Bitcoin => self.bitcoin_usd,
            Asset::Ethereum => self.ethereum_usd,
        }
    }
}

/// Formats a USD amount as whole dollars with US thousands grouping
///
/// Rounds half away from zero, so `3210.5` becomes `$3,211`.
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Text pushed to the display surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayText {
    /// Before the first cycle completes
    Loading,
    /// A successfully fetched quote
    Quote(PriceQuote),
    /// A retry is scheduled
    Retrying,
    /// The payload could not be decoded
    InvalidResponse,
    /// Transport or status failure, or retries exhausted
    FetchFailed,
}

impl DisplayText {
    /// Whether the display should carry the error style for this text
    pub fn is_error(&self) -> bool {
        !matches!(self, DisplayText::Loading | DisplayText::Quote(_))
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayText::Loading => f.write_str(LOADING_TEXT),
            DisplayText::Quote(quote) => {
                for (i, asset) in TRACKED_ASSETS.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{} {}", asset.glyph(), format_usd(quote.price(*asset)))?;
                }
                Ok(())
            }
            DisplayText::Retrying => f.write_str(RETRYING_TEXT),
            DisplayText::InvalidResponse => f.write_str(INVALID_RESPONSE_TEXT),
            DisplayText::FetchFailed => f.write_str(FETCH_FAILED_TEXT),
        }
    }
}

/// Update controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    /// Waiting for the next tick
    Idle,
    /// A fetch is in flight
    Fetching,
    /// A one-shot retry is scheduled
    RetryPending,
    /// Retries exhausted; waiting for the next tick
    Failed,
    /// Shut down, terminal
    Stopped,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerState::Idle => "idle",
            ControllerState::Fetching => "fetching",
            ControllerState::RetryPending => "retry_pending",
            ControllerState::Failed => "failed",
            ControllerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Point-in-time view of an update controller
#[derive(Debug, Clone, Serialize)]
pub struct ControllerStatus {
    /// Current state
    pub state: ControllerState,
    /// Failures since the last success or tick
    pub retry_count: u32,
    /// Most recent successful quote
    pub last_quote: Option<PriceQuote>,
    /// Most recent failure, cleared on success
    pub last_error: Option<String>,
    /// When the last successful quote arrived
    pub last_updated: Option<DateTime<Utc>>,
}

impl ControllerStatus {
    pub(crate) fn new() -> Self {
        Self {
            state: ControllerState::Idle,
            retry_count: 0,
            last_quote: None,
            last_error: None,
            last_updated: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd_grouping_and_rounding() {
        assert_eq!(format_usd(65432.10), "$65,432");
        assert_eq!(format_usd(3210.99), "$3,211");
        assert_eq!(format_usd(999.49), "$999");
        assert_eq!(format_usd(999.5), "$1,000");
        assert_eq!(format_usd(1234567.0), "$1,234,567");
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(-0.2), "$0");
        assert_eq!(format_usd(-1500.0), "-$1,500");
    }

    #[test]
    fn test_quote_renders_panel_text() {
        let quote = PriceQuote::new(65432.10, 3210.99);
        assert_eq!(
            DisplayText::Quote(quote).to_string(),
            "₿ $65,432 | Ξ $3,211"
        );
    }

    #[test]
    fn test_status_texts() {
        assert_eq!(DisplayText::Loading.to_string(), "Loading...");
        assert_eq!(DisplayText::Retrying.to_string(), "Retrying...");
        assert_eq!(DisplayText::InvalidResponse.to_string(), "Invalid response");
        assert_eq!(DisplayText::FetchFailed.to_string(), "Failed to fetch prices");

        assert!(!DisplayText::Loading.is_error());
        assert!(!DisplayText::Quote(PriceQuote::new(1.0, 2.0)).is_error());
        assert!(DisplayText::Retrying.is_error());
        assert!(DisplayText::FetchFailed.is_error());
    }

    #[test]
    fn test_asset_ids() {
        assert_eq!(Asset::Bitcoin.coingecko_id(), "bitcoin");
        assert_eq!(Asset::Ethereum.coingecko_id(), "ethereum");

        let quote = PriceQuote::new(10.0, 20.0);
        assert_eq!(quote.price(Asset::Bitcoin), 10.0);
        assert_eq!(quote.price(Asset::Ethereum), 20.0);
    }

    #[test]
    fn test_status_serializes_for_hosts() {
        for state in [
            ControllerState::Idle,
            ControllerState::Fetching,
            ControllerState::RetryPending,
            ControllerState::Failed,
            ControllerState::Stopped,
        ] {
            assert_eq!(
                serde_json::to_value(state).unwrap(),
                serde_json::Value::String(state.to_string())
            );
        }
        assert_eq!(ControllerState::RetryPending.to_string(), "retry_pending");

        let mut status = ControllerStatus::new();
        status.state = ControllerState::RetryPending;
        status.retry_count = 2;
        status.last_quote = Some(PriceQuote::new(65432.1, 3210.99));
        status.last_error = Some("HTTP error: status 500".to_string());

        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({
                "state": "retry_pending",
                "retry_count": 2,
                "last_quote": { "bitcoin_usd": 65432.1, "ethereum_usd": 3210.99 },
                "last_error": "HTTP error: status 500",
                "last_updated": null,
            })
        );
        assert_eq!(
            serde_json::to_value(Asset::Ethereum).unwrap(),
            serde_json::json!("ethereum")
        );
    }
}
