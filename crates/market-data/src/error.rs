use thiserror::Error;

/// Failure talking to the exchange.
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Exchange API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid trading pair: {0}")]
    InvalidSymbol(String),

    #[error("Malformed exchange response: {0}")]
    Malformed(String),

    #[error("No candles returned for {0}")]
    NoData(String),
}

/// A quote could not be obtained for `symbol`. Callers treat this as "no data available".
#[derive(Error, Debug)]
#[error("Failed to fetch market data for {symbol}: {source}")]
pub struct FetchFailed {
    pub symbol: String,
    #[source]
    pub source: ExchangeError,
}
