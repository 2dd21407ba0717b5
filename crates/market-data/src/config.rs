//! Exchange credentials and endpoint, loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

use crate::binance::{DEFAULT_BINANCE_API_URL, DEFAULT_REQUESTS_PER_SECOND};

/// Exchange config. Market-data endpoints are unsigned, so `api_secret` is only validated and carried.
#[derive(Clone)]
pub struct ExchangeConfig {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
    pub requests_per_second: u32,
}

impl ExchangeConfig {
    /// BINANCE_API_KEY and BINANCE_SECRET are required; BINANCE_API_URL and BINANCE_RATE_LIMIT_PER_SEC are optional.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("BINANCE_API_KEY").context("BINANCE_API_KEY not set")?;
        let api_secret = env::var("BINANCE_SECRET").context("BINANCE_SECRET not set")?;
        let base_url =
            env::var("BINANCE_API_URL").unwrap_or_else(|_| DEFAULT_BINANCE_API_URL.to_string());
        let requests_per_second = env::var("BINANCE_RATE_LIMIT_PER_SEC")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|n: &u32| *n > 0)
            .unwrap_or(DEFAULT_REQUESTS_PER_SECOND);
        Ok(Self {
            api_key,
            api_secret,
            base_url,
            requests_per_second,
        })
    }
}

impl std::fmt::Debug for ExchangeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeConfig")
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .field("base_url", &self.base_url)
            .field("requests_per_second", &self.requests_per_second)
            .finish()
    }
}
