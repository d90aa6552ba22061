//! Price fetcher implementations

pub mod coingecko;

pub use coingecko::CoinGeckoFetcher;
