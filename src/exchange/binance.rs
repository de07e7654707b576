use async_trait::async_trait;
use reqwest::{ Client as HttpClient, Url };
use serde::de::DeserializeOwned;
use tracing::{ debug, error, info };
use std::time::{ Duration, Instant };

use crate::config::Config;
use crate::exchange::client::ExchangeClient;
use crate::exchange::error::{ ExchangeError, Result };
use crate::models::avg_price::{ ApiErrorBody, AveragePrice };
use crate::models::exchange_info::ExchangeInfo;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com/api/";
pub const DEFAULT_API_VERSION: &str = "v3";

/// Binance public REST client.
///
/// Owns its own connection pool; construct one per session and share it through
/// `Arc<dyn ExchangeClient>`.
#[derive(Debug, Clone)]
pub struct BinanceClient {
    /// Pooled HTTP client
    http: HttpClient,

    /// `{base}/{version}/`, always with a trailing slash
    api_url: Url,
}

impl BinanceClient {
    /// Create a new Binance client against `base_url` + `version`
    pub fn new(base_url: &str, version: &str, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .tcp_nodelay(true)
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            http,
            api_url: Self::api_url(base_url, version)?,
        })
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.base_url, &config.api_version, config.request_timeout)
    }

    /// Join base and version into a directory-style URL
    fn api_url(base_url: &str, version: &str) -> Result<Url> {
        let base = Url::parse(&with_trailing_slash(base_url))?;
        Ok(base.join(&with_trailing_slash(version.trim_matches('/')))?)
    }

    /// URL of an endpoint under the versioned path
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.api_url.join(path.trim_start_matches('/'))?)
    }

    /// URL for the average price of one symbol
    pub fn avg_price_url(&self, symbol: &str) -> Result<Url> {
        let mut url = self.endpoint("avgPrice")?;
        url.query_pairs_mut().append_pair("symbol", symbol);
        Ok(url)
    }

    /// GET `url` and decode the body as `T`.
    ///
    /// The body is read as text first so a broken connection is reported as a
    /// transport error and a malformed body as a decode error.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let start = Instant::now();

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(api) => format!("{} (code {})", api.msg, api.code),
                Err(_) => body,
            };
            error!(%url, %status, "Binance API error: {}", message);
            return Err(ExchangeError::Status { status, body: message });
        }

        let decoded = serde_json::from_str(&body)?;
        debug!(%url, bytes = body.len(), elapsed = ?start.elapsed(), "Decoded response");

        Ok(decoded)
    }
}

#[async_trait]
impl ExchangeClient for BinanceClient {
    fn name(&self) -> &str {
        "Binance"
    }

    async fn fetch_catalog(&self) -> Result<ExchangeInfo> {
        let start = Instant::now();
        let url = self.endpoint("exchangeInfo")?;

        let info: ExchangeInfo = self.get_json(url).await?;

        info!("Fetched {} symbols from Binance in {:.2?}", info.symbols.len(), start.elapsed());

        Ok(info)
    }

    async fn fetch_average_price(&self, symbol: &str) -> Result<f64> {
        let url = self.avg_price_url(symbol)?;

        let avg: AveragePrice = self.get_json(url).await?;

        debug!(symbol, price = avg.price, mins = ?avg.mins, "Fetched average price");

        Ok(avg.price)
    }

    async fn ping(&self) -> Result<bool> {
        let url = self.endpoint("ping")?;

        let response = self.http.get(url).timeout(Duration::from_secs(2)).send().await;

        match response {
            Ok(res) => Ok(res.status().is_success()),
            Err(e) => {
                debug!("Ping failed: {}", e);
                Ok(false)
            }
        }
    }
}

fn with_trailing_slash(s: &str) -> String {
    if s.ends_with('/') { s.to_string() } else { format!("{}/", s) }
}
