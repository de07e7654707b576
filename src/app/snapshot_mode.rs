use std::sync::Arc;

use crate::{
    config::Config,
    enums::sort::SortBy,
    exchange::binance::BinanceClient,
    orchestrator::{ FetchOutcome, SymbolBrowser },
    utils::console::print_page,
};
use anyhow::{ bail, Context, Result };
use tracing::info;

/// One-shot listing: load the catalog, apply an optional search and print the
/// first page sorted by symbol
pub fn run_snapshot_mode(config: Config, search: Option<String>) -> Result<()> {
    let client = Arc::new(
        BinanceClient::from_config(&config).context("Failed to create Binance client")?
    );

    let rt = tokio::runtime::Builder
        ::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    rt.block_on(async move {
        let mut browser = SymbolBrowser::new(client);

        browser.refresh_catalog();
        for outcome in browser.settle().await {
            if let FetchOutcome::CatalogFailed { message } = outcome {
                bail!(message);
            }
        }

        if let Some(term) = search {
            info!("Filtering by {:?}", term);
            browser.set_search_term(term);
        }
        browser.sort_symbols(SortBy::Symbol);

        print_page(&browser.view());
        Ok(())
    })
}
