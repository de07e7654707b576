use crate::enums::sort::{ SortBy, SortOrder };
use crate::pipeline::list::SymbolList;

/// One rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct PageRow {
    pub symbol: String,
    pub base_asset: String,
    pub quote_asset: String,
    /// `None` until a price has been fetched for this symbol
    pub average_price: Option<f64>,
}

impl PageRow {
    /// Price as displayed, a missing price shows as 0
    #[inline]
    pub fn display_price(&self) -> f64 {
        self.average_price.unwrap_or(0.0)
    }
}

/// Owned snapshot of everything the presentation layer reads
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub revision: u64,
    pub rows: Vec<PageRow>,
    pub filtered_count: usize,
    pub total_count: usize,
    pub current_page: usize,
    pub search_term: String,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub loading: bool,
    pub error_message: Option<String>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl PageView {
    pub fn from_list(list: &SymbolList, revision: u64) -> Self {
        let rows = list
            .page()
            .into_iter()
            .map(|s| PageRow {
                symbol: s.symbol.clone(),
                base_asset: s.base_asset.clone(),
                quote_asset: s.quote_asset.clone(),
                average_price: list.prices().get(&s.symbol),
            })
            .collect();

        let state = list.state();

        Self {
            revision,
            rows,
            filtered_count: list.filtered_count(),
            total_count: list.total_count(),
            current_page: state.current_page,
            search_term: state.search_term.clone(),
            sort_by: state.sort_by,
            sort_order: state.sort_order,
            loading: state.loading,
            error_message: state.error_message.clone(),
            can_go_previous: list.can_go_previous(),
            can_go_next: list.can_go_next(),
        }
    }

    /// Header indicator for `column`
    pub fn indicator(&self, column: SortBy) -> SortOrder {
        if self.sort_by == column { self.sort_order } else { SortOrder::Unset }
    }

    /// Identifiers on the current page, in display order
    pub fn symbols(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|r| r.symbol.as_str())
            .collect()
    }
}
