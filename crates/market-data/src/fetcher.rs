//! Latest-price lookup: one one-minute candle per request, close price as the current price.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::candle::Candle;
use crate::error::{ExchangeError, FetchFailed};

/// Candle interval used for quotes.
pub const QUOTE_INTERVAL: &str = "1m";

/// Exchange collaborator: recent OHLCV candles for a trading pair, oldest first.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    async fn fetch_recent_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> Result<Vec<Candle>, ExchangeError>;
}

/// Price snapshot for one trading pair. Built per fetch, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub symbol: String,
    pub close_price: f64,
}

/// Fetches quotes through an [`ExchangeClient`]. Single attempt; every failure becomes [`FetchFailed`].
#[derive(Clone)]
pub struct MarketDataFetcher {
    exchange: Arc<dyn ExchangeClient>,
}

impl MarketDataFetcher {
    pub fn new(exchange: Arc<dyn ExchangeClient>) -> Self {
        Self { exchange }
    }

    #[instrument(skip(self))]
    pub async fn fetch_quote(&self, symbol: &str) -> Result<MarketQuote, FetchFailed> {
        let result = self
            .exchange
            .fetch_recent_candles(symbol, QUOTE_INTERVAL, 1)
            .await
            .and_then(|candles| {
                candles
                    .last()
                    .map(|c| c.close)
                    .ok_or_else(|| ExchangeError::NoData(symbol.to_string()))
            });

        match result {
            Ok(close_price) => {
                info!(symbol = %symbol, close_price = close_price, "Fetched market quote");
                Ok(MarketQuote {
                    symbol: symbol.to_string(),
                    close_price,
                })
            }
            Err(source) => {
                warn!(symbol = %symbol, error = %source, "Error fetching market data");
                Err(FetchFailed {
                    symbol: symbol.to_string(),
                    source,
                })
            }
        }
    }
}
