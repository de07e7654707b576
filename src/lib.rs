//! Binance symbol browser.
//!
//! Fetches `exchangeInfo` and per-symbol average prices from the public REST API
//! and exposes them as a searchable, sortable, paginated list. The terminal
//! front-end in `app` is one consumer; anything that can hold a
//! [`orchestrator::SymbolBrowser`] and read its [`orchestrator::PageView`] can be another.

pub mod app;
pub mod cache;
pub mod config;
pub mod enums;
pub mod exchange;
pub mod models;
pub mod orchestrator;
pub mod pipeline;
pub mod utils;

use std::time::Duration;

pub use cache::price_cache::PriceCache;
pub use enums::sort::{ SortBy, SortOrder };
pub use exchange::{ binance::BinanceClient, client::ExchangeClient, error::ExchangeError };
pub use models::{ exchange_info::ExchangeInfo, symbol::Symbol };
pub use orchestrator::{ FetchEvent, FetchOutcome, PageView, SymbolBrowser };
pub use pipeline::list::{ SymbolList, PAGE_SIZE };

/// Upper bound for the startup reachability check
pub const PING_TIMEOUT: Duration = Duration::from_secs(5);
