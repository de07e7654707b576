pub mod browser;
pub mod view;

pub use browser::{ FetchEvent, FetchOutcome, SymbolBrowser };
pub use view::{ PageRow, PageView };
