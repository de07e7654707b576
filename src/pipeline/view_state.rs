use crate::enums::sort::{ SortBy, SortOrder };

/// User-facing list state.
///
/// `current_page` goes back to 0 whenever the search term is set; go through
/// [`crate::pipeline::list::SymbolList::set_search_term`] rather than writing the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub search_term: String,
    pub current_page: usize,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub loading: bool,
    pub error_message: Option<String>,
}
