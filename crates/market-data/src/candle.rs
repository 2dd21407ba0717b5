//! OHLCV candle as returned by the exchange kline endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ExchangeError;

/// One aggregated price bar. `open_time` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Builds a candle from a kline row `[time, open, high, low, close, volume, ...]`.
    /// Prices may be JSON strings (Binance) or numbers; trailing fields are ignored.
    pub fn from_row(row: &[Value]) -> Result<Self, ExchangeError> {
        if row.len() < 6 {
            return Err(ExchangeError::Malformed(format!(
                "kline row has {} fields, expected at least 6",
                row.len()
            )));
        }
        let open_time = row[0]
            .as_i64()
            .ok_or_else(|| ExchangeError::Malformed(format!("open time is not an integer: {}", row[0])))?;
        Ok(Self {
            open_time,
            open: number_field(&row[1], "open")?,
            high: number_field(&row[2], "high")?,
            low: number_field(&row[3], "low")?,
            close: number_field(&row[4], "close")?,
            volume: number_field(&row[5], "volume")?,
        })
    }
}

fn number_field(value: &Value, name: &str) -> Result<f64, ExchangeError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ExchangeError::Malformed(format!("{} is not a number: {}", name, value)))
}
