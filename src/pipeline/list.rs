// src/pipeline/list.rs
//
// Filter -> sort -> paginate over the current catalog snapshot.

use std::cmp::Ordering;
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::cache::price_cache::PriceCache;
use crate::enums::sort::{ SortBy, SortOrder };
use crate::models::exchange_info::ExchangeInfo;
use crate::models::symbol::Symbol;
use super::view_state::ViewState;

/// Rows per page
pub const PAGE_SIZE: usize = 25;

/// Symbol catalog, price cache and view state, plus the derived page.
///
/// The filtered list is never stored: every read recomputes it from the full
/// catalog so it always reflects the latest sort and prices.
#[derive(Debug, Clone, Default)]
pub struct SymbolList {
    catalog: Option<ExchangeInfo>,
    prices: PriceCache,
    state: ViewState,
}

impl SymbolList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list already holding `catalog`
    pub fn with_catalog(catalog: ExchangeInfo) -> Self {
        let mut list = Self::new();
        list.replace_catalog(catalog);
        list
    }

    #[inline]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[inline]
    pub fn catalog(&self) -> Option<&ExchangeInfo> {
        self.catalog.as_ref()
    }

    /// Full catalog in its current (possibly sorted) order
    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        self.catalog
            .as_ref()
            .map(|c| c.symbols.as_slice())
            .unwrap_or(&[])
    }

    /// Size of the unfiltered catalog
    #[inline]
    pub fn total_count(&self) -> usize {
        self.symbols().len()
    }

    #[inline]
    pub fn prices(&self) -> &PriceCache {
        &self.prices
    }

    /// Swap in a new snapshot wholesale.
    ///
    /// Sort flags and the page index are left as they were; the new symbols keep
    /// the exchange's order until the next sort.
    pub fn replace_catalog(&mut self, catalog: ExchangeInfo) {
        debug!(symbols = catalog.symbols.len(), "Replacing catalog snapshot");
        self.catalog = Some(catalog);
    }

    /// Record a fetched price; re-applies the current order when sorted by price
    pub fn set_price(&mut self, symbol: &str, price: f64) {
        self.prices.set(symbol, price);

        if self.state.sort_by == SortBy::AveragePrice {
            self.resort();
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.state.loading = loading;
    }

    pub fn set_error(&mut self, message: Option<String>) {
        self.state.error_message = message;
    }

    // ---------------------------------------------------------------------
    // Filter
    // ---------------------------------------------------------------------

    #[inline]
    pub fn search_term(&self) -> &str {
        &self.state.search_term
    }

    /// Set the search term and jump back to the first page
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        self.state.current_page = 0;
    }

    /// Symbols whose identifier contains the search term, case-insensitively,
    /// in catalog order
    pub fn filtered(&self) -> Vec<&Symbol> {
        if self.state.search_term.is_empty() {
            return self.symbols().iter().collect();
        }

        let needle = self.state.search_term.to_lowercase();
        self.symbols()
            .iter()
            .filter(|s| s.matches(&needle))
            .collect()
    }

    #[inline]
    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    // ---------------------------------------------------------------------
    // Sort
    // ---------------------------------------------------------------------

    #[inline]
    pub fn sort_by(&self) -> SortBy {
        self.state.sort_by
    }

    #[inline]
    pub fn sort_order(&self) -> SortOrder {
        self.state.sort_order
    }

    /// Header indicator for `criteria`: the stored flag on the active column,
    /// `Unset` everywhere else
    pub fn sort_indicator(&self, criteria: SortBy) -> SortOrder {
        if self.state.sort_by == criteria { self.state.sort_order } else { SortOrder::Unset }
    }

    /// Sort the whole catalog by `by`, toggling direction on repeated calls.
    ///
    /// A new column (or the first sort of the session) shows ascending and primes
    /// the flag to `Descending`; the next call on the same column shows descending
    /// and flips the flag back to `Ascending`.
    pub fn sort_symbols(&mut self, by: SortBy) {
        let ascending =
            self.state.sort_order == SortOrder::Ascending ||
            self.state.sort_order == SortOrder::Unset ||
            self.state.sort_by != by;

        self.apply_sort(by, !ascending);

        self.state.sort_order = if ascending { SortOrder::Descending } else { SortOrder::Ascending };
        self.state.sort_by = by;
    }

    /// Re-apply the order currently on screen without touching the toggle
    pub fn resort(&mut self) {
        let descending = match self.state.sort_order {
            SortOrder::Unset => {
                return;
            }
            // flag holds the next direction, so the screen shows the opposite
            SortOrder::Ascending => true,
            SortOrder::Descending => false,
        };

        self.apply_sort(self.state.sort_by, descending);
    }

    fn apply_sort(&mut self, by: SortBy, descending: bool) {
        let prices = &self.prices;
        let Some(catalog) = self.catalog.as_mut() else {
            return;
        };

        // sort_by is stable, so equal keys keep their relative order either way
        if descending {
            catalog.symbols.sort_by(|a, b| compare(by, prices, a, b).reverse());
        } else {
            catalog.symbols.sort_by(|a, b| compare(by, prices, a, b));
        }

        debug!(?by, descending, symbols = catalog.symbols.len(), "Sorted catalog");
    }

    // ---------------------------------------------------------------------
    // Paginate
    // ---------------------------------------------------------------------

    #[inline]
    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    /// Rows of the current page; empty when the page lies past the filtered data
    pub fn page(&self) -> Vec<&Symbol> {
        let filtered = self.filtered();

        let start = self.state.current_page.saturating_mul(PAGE_SIZE);
        let end = start.saturating_add(PAGE_SIZE).min(filtered.len());

        if start >= end {
            return Vec::new();
        }

        filtered[start..end].to_vec()
    }

    /// Advance one page.
    ///
    /// The bound is taken from the unfiltered catalog size, so with a search active
    /// this can step onto empty pages.
    pub fn next_page(&mut self) {
        if self.state.current_page < self.total_count() / PAGE_SIZE {
            self.state.current_page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.state.current_page > 0 {
            self.state.current_page -= 1;
        }
    }

    #[inline]
    pub fn can_go_previous(&self) -> bool {
        self.state.current_page > 0
    }

    /// Next is offered only while the current page is full
    #[inline]
    pub fn can_go_next(&self) -> bool {
        self.page().len() >= PAGE_SIZE
    }
}

/// Ascending comparator for one column. A missing price compares as 0.
fn compare(by: SortBy, prices: &PriceCache, a: &Symbol, b: &Symbol) -> Ordering {
    match by {
        SortBy::Symbol => a.symbol.cmp(&b.symbol),
        SortBy::BaseAsset => a.base_asset.cmp(&b.base_asset),
        SortBy::QuoteAsset => a.quote_asset.cmp(&b.quote_asset),
        SortBy::AveragePrice => {
            let pa = OrderedFloat(prices.price_or_zero(&a.symbol));
            let pb = OrderedFloat(prices.price_or_zero(&b.symbol));
            pa.cmp(&pb)
        }
    }
}
