// tests/common/mod.rs
//
// Scripted in-memory exchange client shared by the integration tests.

#![allow(dead_code)]

use std::collections::{ HashMap, VecDeque };
use std::sync::{ Arc, Mutex };
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use symbol_browser::exchange::error::{ ExchangeError, Result };
use symbol_browser::{ ExchangeClient, ExchangeInfo, Symbol };

/// Scripted answer to one `fetch_catalog` call
pub enum CatalogReply {
    Ok(ExchangeInfo),
    /// Body that does not decode
    Malformed,
    /// Real connection-refused error from reqwest
    Unreachable,
    /// The fetch itself panics
    Panic,
}

struct PriceReply {
    price: f64,
    delay: Duration,
    panic: bool,
}

/// Exchange client that replays scripted answers
#[derive(Default)]
pub struct ScriptedClient {
    catalogs: Mutex<VecDeque<(CatalogReply, Option<Arc<Notify>>)>>,
    prices: Mutex<HashMap<String, VecDeque<PriceReply>>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_catalog(&self, reply: CatalogReply) -> &Self {
        self.catalogs.lock().unwrap().push_back((reply, None));
        self
    }

    /// Queue a catalog reply that is held back until the returned gate is notified
    pub fn push_gated_catalog(&self, reply: CatalogReply) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.catalogs.lock().unwrap().push_back((reply, Some(gate.clone())));
        gate
    }

    pub fn push_price(&self, symbol: &str, price: f64) -> &Self {
        self.push_delayed_price(symbol, price, Duration::ZERO)
    }

    pub fn push_delayed_price(&self, symbol: &str, price: f64, delay: Duration) -> &Self {
        self.prices
            .lock()
            .unwrap()
            .entry(symbol.to_string())
            .or_default()
            .push_back(PriceReply { price, delay, panic: false });
        self
    }

    /// Queue a price fetch for `symbol` that panics instead of answering
    pub fn push_panicking_price(&self, symbol: &str) -> &Self {
        self.prices
            .lock()
            .unwrap()
            .entry(symbol.to_string())
            .or_default()
            .push_back(PriceReply { price: 0.0, delay: Duration::ZERO, panic: true });
        self
    }
}

#[async_trait]
impl ExchangeClient for ScriptedClient {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn fetch_catalog(&self) -> Result<ExchangeInfo> {
        let next = self.catalogs.lock().unwrap().pop_front();
        let (reply, gate) = next.expect("no catalog reply scripted");

        if let Some(gate) = gate {
            gate.notified().await;
        }

        match reply {
            CatalogReply::Ok(info) => Ok(info),
            CatalogReply::Malformed => {
                Err(ExchangeError::from(serde_json::from_str::<ExchangeInfo>("{}").unwrap_err()))
            }
            CatalogReply::Unreachable => Err(connection_refused().await),
            CatalogReply::Panic => panic!("scripted catalog panic"),
        }
    }

    async fn fetch_average_price(&self, symbol: &str) -> Result<f64> {
        let next = self.prices
            .lock()
            .unwrap()
            .get_mut(symbol)
            .and_then(|q| q.pop_front());

        match next {
            Some(reply) => {
                tokio::time::sleep(reply.delay).await;
                if reply.panic {
                    panic!("scripted price panic for {}", symbol);
                }
                Ok(reply.price)
            }
            None => Err(ExchangeError::Status {
                status: reqwest::StatusCode::BAD_REQUEST,
                body: "Invalid symbol. (code -1121)".to_string(),
            }),
        }
    }

    async fn ping(&self) -> Result<bool> {
        Ok(true)
    }
}

/// A genuine transport error: connect to a port nobody listens on
pub async fn connection_refused() -> ExchangeError {
    let addr = closed_port().await;
    let err = reqwest::Client::new()
        .get(format!("http://{}/", addr))
        .send().await
        .expect_err("nothing should be listening");
    ExchangeError::from(err)
}

/// Address of a port that was bound and released
pub async fn closed_port() -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn snapshot(ids: &[&str]) -> ExchangeInfo {
    ExchangeInfo {
        timezone: "UTC".to_string(),
        server_time: 1_700_000_000_000,
        symbols: ids
            .iter()
            .map(|id| {
                let (base, quote) = split_pair(id);
                Symbol::new(id, base, quote)
            })
            .collect(),
        ..Default::default()
    }
}

pub fn numbered_snapshot(n: usize) -> ExchangeInfo {
    let ids: Vec<String> = (0..n).map(|i| format!("C{:03}USDT", i)).collect();
    let refs: Vec<&str> = ids
        .iter()
        .map(|s| s.as_str())
        .collect();
    snapshot(&refs)
}

fn split_pair(id: &str) -> (&str, &str) {
    for quote in ["USDT", "BTC", "ETH", "BNB"] {
        if let Some(base) = id.strip_suffix(quote) {
            if !base.is_empty() {
                return (base, quote);
            }
        }
    }
    (id, "")
}
