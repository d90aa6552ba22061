//! Fetcher abstraction for pulling a quote from an external API

use crate::{error::FetchError, types::PriceQuote};
use async_trait::async_trait;

/// Trait for price fetchers
///
/// One call performs one request and either returns a complete quote or a
/// classified failure, never both. Implementations keep no state between
/// calls beyond their HTTP client.
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    /// Fetches the current bitcoin/ethereum quote
    ///
    /// # Returns
    /// The decoded quote, or the classified reason the fetch failed
    async fn fetch(&self) -> Result<PriceQuote, FetchError>;

    /// Returns the name of this fetcher's data source
    fn provider_name(&self) -> &'static str;
}
