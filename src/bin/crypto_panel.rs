//! Terminal host for the crypto price panel
//!
//! Renders the panel text as a status line on stdout until Ctrl-C.
//! Log output goes to stderr; set `RUST_LOG` to change the level.

use crypto_price_panel::{CoinGeckoFetcher, PriceIndicator, TerminalDisplay};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let fetcher = Arc::new(CoinGeckoFetcher::new()?);
    tracing::info!(url = fetcher.url(), "Crypto price panel initialized");

    let mut indicator = PriceIndicator::new(fetcher, Arc::new(TerminalDisplay::new()));
    indicator.enable();

    tokio::signal::ctrl_c().await?;

    indicator.disable();
    println!();
    Ok(())
}
