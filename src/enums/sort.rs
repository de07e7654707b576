use strum_macros::{ Display, EnumIter, EnumString };

/// Column the symbol list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortBy {
    #[default]
    Symbol,
    #[strum(serialize = "base", serialize = "baseasset")]
    BaseAsset,
    #[strum(serialize = "quote", serialize = "quoteasset")]
    QuoteAsset,
    #[strum(serialize = "price", serialize = "averageprice")]
    AveragePrice,
}

impl SortBy {
    /// Column header title
    pub fn title(&self) -> &'static str {
        match self {
            SortBy::Symbol => "Symbol",
            SortBy::BaseAsset => "Base Asset",
            SortBy::QuoteAsset => "Quote Asset",
            SortBy::AveragePrice => "Average Price",
        }
    }
}

/// Sort direction flag.
///
/// This is the state the *next* click acts on, not the order currently on screen:
/// after an ascending sort the flag reads `Descending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum SortOrder {
    Ascending,
    Descending,
    #[default]
    Unset,
}

impl SortOrder {
    /// Arrow shown next to a column header
    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
            SortOrder::Unset => "↕",
        }
    }
}
