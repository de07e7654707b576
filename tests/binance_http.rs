// tests/binance_http.rs
//
// BinanceClient against a local HTTP server serving canned exchange responses.

mod common;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{ Json, Router };
use serde_json::{ json, Value };

use symbol_browser::{ BinanceClient, ExchangeClient, ExchangeError, SortBy, SymbolBrowser };

fn exchange_info() -> Value {
    json!({
        "timezone": "UTC",
        "serverTime": 1_700_000_000_000_i64,
        "rateLimits": [
            { "rateLimitType": "REQUEST_WEIGHT", "interval": "MINUTE", "intervalNum": 1, "limit": 6000 }
        ],
        "exchangeFilters": [],
        "symbols": [
            {
                "symbol": "BTCUSDT", "status": "TRADING", "baseAsset": "BTC", "quoteAsset": "USDT",
                "filters": [
                    { "filterType": "PRICE_FILTER", "minPrice": "0.01", "maxPrice": "1000000.00", "tickSize": "0.01" },
                    { "filterType": "MAX_NUM_ORDERS", "maxNumOrders": 200 }
                ]
            },
            { "symbol": "ETHUSDT", "status": "TRADING", "baseAsset": "ETH", "quoteAsset": "USDT", "filters": [] },
            { "symbol": "ETHBTC", "status": "TRADING", "baseAsset": "ETH", "quoteAsset": "BTC", "filters": [] }
        ]
    })
}

async fn avg_price(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    match params.get("symbol").map(String::as_str) {
        Some("BTCUSDT") => (StatusCode::OK, Json(json!({ "mins": 5, "price": "67012.34000000", "closeTime": 1 }))),
        Some("ETHBTC") => (StatusCode::OK, Json(json!({ "mins": 5, "price": "0.05123000" }))),
        _ => (StatusCode::BAD_REQUEST, Json(json!({ "code": -1121, "msg": "Invalid symbol." }))),
    }
}

async fn serve() -> SocketAddr {
    let app = Router::new()
        .route("/api/v3/exchangeInfo", get(|| async { Json(exchange_info()) }))
        .route("/api/v3/avgPrice", get(avg_price))
        .route("/api/v3/ping", get(|| async { Json(json!({})) }))
        .route("/broken/v3/exchangeInfo", get(|| async { "<html>maintenance</html>" }))
        .route("/broken/v3/avgPrice", get(|| async { Json(json!({ "mins": 5, "price": "abc" })) }))
        .route("/down/v3/exchangeInfo", get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream down") }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, prefix: &str) -> BinanceClient {
    BinanceClient::new(&format!("http://{}/{}/", addr, prefix), "v3", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetches_and_decodes_exchange_info() {
    let addr = serve().await;
    let info = client(addr, "api").fetch_catalog().await.unwrap();

    assert_eq!(info.timezone, "UTC");
    assert_eq!(info.rate_limits.len(), 1);
    let ids: Vec<&str> = info.symbols
        .iter()
        .map(|s| s.symbol.as_str())
        .collect();
    assert_eq!(ids, vec!["BTCUSDT", "ETHUSDT", "ETHBTC"]);
    assert_eq!(info.symbols[0].filter("MAX_NUM_ORDERS").unwrap().max_num_orders, Some(200));
}

#[tokio::test]
async fn fetches_average_price_by_symbol_query() {
    let addr = serve().await;
    let price = client(addr, "api").fetch_average_price("BTCUSDT").await.unwrap();
    assert!((price - 67012.34).abs() < 1e-9);
}

#[tokio::test]
async fn api_errors_carry_exchange_message() {
    let addr = serve().await;
    let err = client(addr, "api").fetch_average_price("NOPE").await.unwrap_err();

    match &err {
        ExchangeError::Status { status, body } => {
            assert_eq!(*status, reqwest::StatusCode::BAD_REQUEST);
            assert_eq!(body, "Invalid symbol. (code -1121)");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn plain_error_bodies_are_kept_verbatim() {
    let addr = serve().await;
    let err = client(addr, "down").fetch_catalog().await.unwrap_err();
    assert!(matches!(err, ExchangeError::Status { ref body, .. } if body == "upstream down"));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let addr = serve().await;
    let err = client(addr, "broken").fetch_catalog().await.unwrap_err();
    assert!(err.is_decode(), "{err}");
}

#[tokio::test]
async fn non_numeric_price_is_a_decode_error() {
    let addr = serve().await;
    let err = client(addr, "broken").fetch_average_price("BTCUSDT").await.unwrap_err();
    assert!(err.is_decode(), "{err}");
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let addr = common::closed_port().await;
    let c = client(addr, "api");

    let err = c.fetch_catalog().await.unwrap_err();
    assert!(err.is_transport(), "{err}");

    assert!(!c.ping().await.unwrap());
}

#[tokio::test]
async fn ping_reports_reachable_exchange() {
    let addr = serve().await;
    assert!(client(addr, "api").ping().await.unwrap());
}

#[tokio::test]
async fn browser_over_http() {
    let addr = serve().await;
    let mut browser = SymbolBrowser::new(Arc::new(client(addr, "api")));

    browser.refresh_catalog();
    browser.settle().await;
    assert_eq!(browser.view().filtered_count, 3);

    browser.set_search_term("ETH");
    browser.sort_symbols(SortBy::Symbol);
    assert_eq!(browser.view().symbols(), vec!["ETHBTC", "ETHUSDT"]);

    browser.fetch_price("ETHBTC");
    browser.fetch_price("ETHUSDT");
    browser.settle().await;

    let view = browser.view();
    assert_eq!(view.rows[0].average_price, Some(0.05123));
    assert_eq!(view.rows[1].average_price, None);
    assert_eq!(view.error_message, None);
}
