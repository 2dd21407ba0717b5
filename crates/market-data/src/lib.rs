//! # market-data
//!
//! Resolves free-text crypto mentions to exchange trading pairs ([`SymbolResolver`]) and fetches the
//! latest close price for a pair ([`MarketDataFetcher`]) through an [`ExchangeClient`]
//! ([`BinanceClient`] in production).

mod binance;
mod candle;
mod config;
mod error;
mod fetcher;
mod symbols;

pub use binance::{market_id, BinanceClient, DEFAULT_BINANCE_API_URL};
pub use candle::Candle;
pub use config::ExchangeConfig;
pub use error::{ExchangeError, FetchFailed};
pub use fetcher::{ExchangeClient, MarketDataFetcher, MarketQuote, QUOTE_INTERVAL};
pub use symbols::{CryptoSymbolMap, SymbolResolver};
