//! [`BinanceClient`] against a local mockito server: request shape, candle parsing and error mapping.
//! No network access; the client is pointed at the mock via `with_base_url`.

use market_data::{BinanceClient, ExchangeClient, ExchangeError, MarketDataFetcher};
use mockito::Matcher;
use std::sync::Arc;

const KLINE_BODY: &str = r#"[
    [1700000000000, "3000.10", "3001.00", "2999.50", "3000.50", "12.5",
     1700000059999, "37500.0", 42, "6.0", "18000.0", "0"]
]"#;

fn klines_query(symbol: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("symbol".into(), symbol.into()),
        Matcher::UrlEncoded("interval".into(), "1m".into()),
        Matcher::UrlEncoded("limit".into(), "1".into()),
    ])
}

/// **Test: one-minute kline request carries market id, interval, limit and API key header; close is parsed.**
#[tokio::test]
async fn fetches_latest_candle_with_api_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/klines")
        .match_query(klines_query("ETHUSDT"))
        .match_header("x-mbx-apikey", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(KLINE_BODY)
        .create_async()
        .await;

    let client = BinanceClient::new("test-key").with_base_url(server.url());
    let candles = client
        .fetch_recent_candles("ETH/USDT", "1m", 1)
        .await
        .expect("klines");

    mock.assert_async().await;
    assert_eq!(candles.len(), 1);
    assert_eq!(candles[0].close, 3000.5);
}

/// **Test: fetcher over the HTTP client yields a quote with the close price.**
#[tokio::test]
async fn fetcher_returns_quote_from_http_client() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v3/klines")
        .match_query(klines_query("ETHUSDT"))
        .with_status(200)
        .with_body(KLINE_BODY)
        .create_async()
        .await;

    let client = BinanceClient::new("").with_base_url(server.url());
    let fetcher = MarketDataFetcher::new(Arc::new(client));

    let quote = fetcher.fetch_quote("ETH/USDT").await.expect("quote");

    assert_eq!(quote.symbol, "ETH/USDT");
    assert_eq!(quote.close_price, 3000.5);
}

/// **Test: Binance error body becomes `ExchangeError::Api` with status and message.**
#[tokio::test]
async fn unknown_symbol_maps_to_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"code":-1121,"msg":"Invalid symbol."}"#)
        .create_async()
        .await;

    let client = BinanceClient::new("k").with_base_url(server.url());
    let err = client
        .fetch_recent_candles("FOO/USDT", "1m", 1)
        .await
        .unwrap_err();

    match err {
        ExchangeError::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("Invalid symbol."));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// **Test: non-JSON success body is reported as malformed, and the fetcher wraps it as FetchFailed.**
#[tokio::test]
async fn malformed_body_is_fetch_failed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = BinanceClient::new("k").with_base_url(format!("{}/", server.url()));
    let fetcher = MarketDataFetcher::new(Arc::new(client));

    let err = fetcher.fetch_quote("BTC/USDT").await.unwrap_err();

    assert_eq!(err.symbol, "BTC/USDT");
    assert!(matches!(err.source, ExchangeError::Malformed(_)));
    assert!(err.to_string().contains("BTC/USDT"));
}

/// **Test: an invalid pair is rejected before any request is made.**
#[tokio::test]
async fn invalid_pair_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = BinanceClient::new("k").with_base_url(server.url());
    let err = client
        .fetch_recent_candles("BTCUSDT", "1m", 1)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::InvalidSymbol(_)));
    mock.assert_async().await;
}
