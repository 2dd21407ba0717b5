//! Binance spot REST client for klines (OHLCV candles).
//!
//! Endpoint: `GET /api/v3/klines?symbol=BTCUSDT&interval=1m&limit=1`. Public market data, so requests are
//! unsigned; the API key is sent in `X-MBX-APIKEY` when configured.
//! Requests go through a client-side rate limiter; there is no retry and no explicit timeout.

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::candle::Candle;
use crate::config::ExchangeConfig;
use crate::error::ExchangeError;
use crate::fetcher::ExchangeClient;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

pub const DEFAULT_BINANCE_API_URL: &str = "https://api.binance.com";
pub(crate) const DEFAULT_REQUESTS_PER_SECOND: u32 = 20;

const KLINES_PATH: &str = "/api/v3/klines";
const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Error body returned by Binance on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    msg: String,
}

/// Converts a `BASE/QUOTE` trading pair into the Binance market id (`BTC/USDT` → `BTCUSDT`).
pub fn market_id(pair: &str) -> Result<String, ExchangeError> {
    let valid = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric());
    match pair.split_once('/') {
        Some((base, quote)) if valid(base) && valid(quote) => {
            Ok(format!("{}{}", base, quote).to_ascii_uppercase())
        }
        _ => Err(ExchangeError::InvalidSymbol(pair.to_string())),
    }
}

fn rate_limiter(per_second: u32) -> SharedRateLimiter {
    let quota = Quota::per_second(NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN));
    Arc::new(RateLimiter::direct(quota))
}

fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(e) => format!("{} (code {})", e.msg, e.code),
        Err(_) => body.trim().to_string(),
    }
}

/// Binance REST client.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl BinanceClient {
    /// Client against the public Binance API with the default rate limit.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BINANCE_API_URL.to_string(),
            api_key: api_key.into(),
            rate_limiter: rate_limiter(DEFAULT_REQUESTS_PER_SECOND),
        }
    }

    pub fn from_config(config: &ExchangeConfig) -> Self {
        Self::new(config.api_key.clone())
            .with_base_url(config.base_url.clone())
            .with_rate_limit(config.requests_per_second)
    }

    /// Overrides the API root (e.g. testnet or a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.rate_limiter = rate_limiter(requests_per_second);
        self
    }
}

#[async_trait]
impl ExchangeClient for BinanceClient {
    #[instrument(skip(self))]
    async fn fetch_recent_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> Result<Vec<Candle>, ExchangeError> {
        let market = market_id(symbol)?;
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, KLINES_PATH);
        let limit = limit.to_string();
        let mut request = self.client.get(&url).query(&[
            ("symbol", market.as_str()),
            ("interval", interval),
            ("limit", limit.as_str()),
        ]);
        if !self.api_key.is_empty() {
            request = request.header(API_KEY_HEADER, self.api_key.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), body_len = body.len(), "Binance klines response");

        if !status.is_success() {
            return Err(ExchangeError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let rows: Vec<Vec<Value>> = serde_json::from_str(&body)
            .map_err(|e| ExchangeError::Malformed(format!("klines body: {}", e)))?;
        rows.iter().map(|row| Candle::from_row(row)).collect()
    }
}
