use serde::Deserialize;

use crate::utils::serde_helpers::deserialize_decimal_str;

/// Decoded `GET /api/v3/avgPrice` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AveragePrice {
    /// Averaging window in minutes
    #[serde(default)]
    pub mins: Option<u32>,

    #[serde(deserialize_with = "deserialize_decimal_str")]
    pub price: f64,

    /// Last trade time in unix milliseconds
    #[serde(default)]
    pub close_time: Option<i64>,
}

/// Error body Binance returns alongside non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}
