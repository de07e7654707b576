use std::fmt;
use serde::{ Deserialize, Serialize };

/// A tradable pair as listed by `exchangeInfo`.
///
/// Only `symbol`, `base_asset` and `quote_asset` drive the list; the rest is carried
/// through untouched for display. Fields other than the identifier and asset pair
/// default when absent so older or newer payload shapes still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub symbol: String,
    #[serde(default)]
    pub status: String,
    pub base_asset: String,
    #[serde(default)]
    pub base_asset_precision: u32,
    pub quote_asset: String,
    #[serde(default)]
    pub quote_precision: u32,
    #[serde(default)]
    pub quote_asset_precision: u32,
    #[serde(default)]
    pub base_commission_precision: u32,
    #[serde(default)]
    pub quote_commission_precision: u32,
    #[serde(default)]
    pub order_types: Vec<String>,
    #[serde(default)]
    pub iceberg_allowed: bool,
    #[serde(default)]
    pub oco_allowed: bool,
    #[serde(default)]
    pub quote_order_qty_market_allowed: bool,
    #[serde(default)]
    pub allow_trailing_stop: bool,
    #[serde(default)]
    pub cancel_replace_allowed: bool,
    #[serde(default)]
    pub is_spot_trading_allowed: bool,
    #[serde(default)]
    pub is_margin_trading_allowed: bool,
    #[serde(default)]
    pub filters: Vec<SymbolFilter>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub default_self_trade_prevention_mode: Option<String>,
    #[serde(default)]
    pub allowed_self_trade_prevention_modes: Vec<String>,
}

impl Symbol {
    /// Minimal symbol with only the fields the list works on
    pub fn new(symbol: &str, base_asset: &str, quote_asset: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            status: "TRADING".to_string(),
            base_asset: base_asset.to_string(),
            base_asset_precision: 8,
            quote_asset: quote_asset.to_string(),
            quote_precision: 8,
            quote_asset_precision: 8,
            base_commission_precision: 8,
            quote_commission_precision: 8,
            order_types: Vec::new(),
            iceberg_allowed: false,
            oco_allowed: false,
            quote_order_qty_market_allowed: false,
            allow_trailing_stop: false,
            cancel_replace_allowed: false,
            is_spot_trading_allowed: true,
            is_margin_trading_allowed: false,
            filters: Vec::new(),
            permissions: Vec::new(),
            default_self_trade_prevention_mode: None,
            allowed_self_trade_prevention_modes: Vec::new(),
        }
    }

    #[inline]
    pub fn is_trading(&self) -> bool {
        self.status == "TRADING"
    }

    /// Case-insensitive substring match on the identifier.
    /// `needle` must already be lowercased.
    #[inline]
    pub fn matches(&self, needle: &str) -> bool {
        self.symbol.to_lowercase().contains(needle)
    }

    /// Look up a filter by its `filterType`
    pub fn filter(&self, filter_type: &str) -> Option<&SymbolFilter> {
        self.filters.iter().find(|f| f.filter_type == filter_type)
    }
}

impl fmt::Display for Symbol {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base_asset, self.quote_asset)
    }
}

/// Exchange-defined trading constraint attached to a symbol.
///
/// Each `filterType` uses a different subset of fields, so every type-specific
/// field is optional. Unknown filter types decode fine and keep their discriminator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolFilter {
    pub filter_type: String,

    // PRICE_FILTER
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub tick_size: Option<String>,

    // LOT_SIZE / MARKET_LOT_SIZE
    pub min_qty: Option<String>,
    pub max_qty: Option<String>,
    pub step_size: Option<String>,

    // ICEBERG_PARTS
    pub limit: Option<i64>,

    // TRAILING_DELTA
    pub min_trailing_above_delta: Option<i64>,
    pub max_trailing_above_delta: Option<i64>,
    pub min_trailing_below_delta: Option<i64>,
    pub max_trailing_below_delta: Option<i64>,

    // PERCENT_PRICE_BY_SIDE
    pub bid_multiplier_up: Option<String>,
    pub bid_multiplier_down: Option<String>,
    pub ask_multiplier_up: Option<String>,
    pub ask_multiplier_down: Option<String>,
    pub avg_price_mins: Option<i64>,

    // NOTIONAL
    pub min_notional: Option<String>,
    pub apply_min_to_market: Option<bool>,
    pub max_notional: Option<String>,
    pub apply_max_to_market: Option<bool>,

    // MAX_NUM_ORDERS / MAX_NUM_ALGO_ORDERS
    pub max_num_orders: Option<i64>,
    pub max_num_algo_orders: Option<i64>,
}
