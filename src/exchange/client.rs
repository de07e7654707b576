use async_trait::async_trait;

use crate::exchange::error::Result;
use crate::models::exchange_info::ExchangeInfo;

/// Exchange client trait for the public market-data calls the browser needs.
///
/// One attempt per call: no retries and no caching at this layer.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Get the name of the exchange
    fn name(&self) -> &str;

    /// Fetch the full exchange metadata snapshot
    async fn fetch_catalog(&self) -> Result<ExchangeInfo>;

    /// Fetch the current average price for one symbol
    async fn fetch_average_price(&self, symbol: &str) -> Result<f64>;

    /// Check if the exchange is reachable
    async fn ping(&self) -> Result<bool>;
}
