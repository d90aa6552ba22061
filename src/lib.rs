//! # Crypto Price Panel
//!
//! Core of a desktop panel indicator that shows live bitcoin and ethereum
//! prices from the CoinGecko API, e.g. `₿ $65,432 | Ξ $3,211`.
//!
//! The host (a desktop shell, or the bundled terminal binary) supplies a
//! [`DisplaySurface`] and calls [`PriceIndicator::enable`] /
//! [`PriceIndicator::disable`] from its lifecycle hooks. Everything else is
//! handled here:
//!
//! ```text
//! PriceIndicator::enable()
//!     ↓
//! UpdateController (tick every 60s, retry every 5s, max 3 retries)
//!     ↓
//! PriceFetcher (CoinGecko)
//!     ↓
//! DisplaySurface (set_text / set_error_style)
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use crypto_price_panel::{CoinGeckoFetcher, PriceIndicator, TerminalDisplay};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut indicator = PriceIndicator::new(
//!     Arc::new(CoinGeckoFetcher::new()?),
//!     Arc::new(TerminalDisplay::new()),
//! );
//! indicator.enable();
//! tokio::signal::ctrl_c().await?;
//! indicator.disable();
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! There is no runtime configuration. Endpoint, intervals and retry budget
//! are compile-time constants in the `constants` module.

pub mod constants;
pub mod controller;
pub mod display;
pub mod error;
pub mod indicator;
pub mod provider;
pub mod providers;
pub mod types;

// Re-export commonly used types
pub use controller::{ControllerConfig, UpdateController};
pub use display::{DisplaySurface, TerminalDisplay};
pub use error::FetchError;
pub use indicator::PriceIndicator;
pub use provider::PriceFetcher;
pub use providers::CoinGeckoFetcher;
pub use types::{Asset, ControllerState, ControllerStatus, DisplayText, PriceQuote};
