use std::sync::Arc;
use tokio::sync::{ mpsc, watch };
use tracing::{ debug, error, info, warn };

use crate::enums::sort::SortBy;
use crate::exchange::client::ExchangeClient;
use crate::exchange::error::ExchangeError;
use crate::models::exchange_info::ExchangeInfo;
use crate::pipeline::list::SymbolList;
use crate::pipeline::view_state::ViewState;
use super::view::PageView;

/// Completion of a spawned fetch, queued for the owning context
#[derive(Debug)]
pub enum FetchEvent {
    Catalog(Result<ExchangeInfo, ExchangeError>),
    Price {
        symbol: String,
        result: Result<f64, ExchangeError>,
    },
}

/// What applying a [`FetchEvent`] did to the state
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    CatalogLoaded {
        symbols: usize,
    },
    CatalogFailed {
        message: String,
    },
    PriceUpdated {
        symbol: String,
        price: f64,
    },
    PriceFailed {
        symbol: String,
    },
}

/// Drives the symbol list and the fetches feeding it.
///
/// Fetches run on spawned tokio tasks and only ever report back through the
/// event queue; every state change happens on `&mut self`, so whoever owns the
/// browser is the single writer. Spawning requires a running tokio runtime.
pub struct SymbolBrowser {
    client: Arc<dyn ExchangeClient>,
    list: SymbolList,

    events_tx: mpsc::UnboundedSender<FetchEvent>,
    events_rx: mpsc::UnboundedReceiver<FetchEvent>,
    /// Fetches spawned but not yet applied
    in_flight: usize,

    revision: watch::Sender<u64>,
}

impl SymbolBrowser {
    pub fn new(client: Arc<dyn ExchangeClient>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (revision, _) = watch::channel(0);

        Self {
            client,
            list: SymbolList::new(),
            events_tx,
            events_rx,
            in_flight: 0,
            revision,
        }
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    #[inline]
    pub fn list(&self) -> &SymbolList {
        &self.list
    }

    #[inline]
    pub fn state(&self) -> &ViewState {
        self.list.state()
    }

    /// Current revision; bumps after every mutation
    #[inline]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Change notification: the receiver sees the revision after every mutation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Snapshot of the current page and indicators
    pub fn view(&self) -> PageView {
        PageView::from_list(&self.list, self.revision())
    }

    #[inline]
    pub fn pending_fetches(&self) -> usize {
        self.in_flight
    }

    // ---------------------------------------------------------------------
    // User actions
    // ---------------------------------------------------------------------

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.list.set_search_term(term);
        self.bump();
    }

    pub fn sort_symbols(&mut self, by: SortBy) {
        self.list.sort_symbols(by);
        self.bump();
    }

    pub fn next_page(&mut self) {
        self.list.next_page();
        self.bump();
    }

    pub fn previous_page(&mut self) {
        self.list.previous_page();
        self.bump();
    }

    /// Start a catalog refresh; returns immediately with the loading flag set
    pub fn refresh_catalog(&mut self) {
        self.list.set_loading(true);
        self.bump();

        let client = self.client.clone();
        info!("Refreshing catalog from {}", client.name());

        self.spawn_fetch(async move { client.fetch_catalog().await }, FetchEvent::Catalog);
    }

    /// Start an average price fetch for one symbol.
    ///
    /// No loading state and no de-duplication: concurrent fetches for the same
    /// symbol are all applied, the last to complete wins.
    pub fn fetch_price(&mut self, symbol: &str) {
        let client = self.client.clone();
        let symbol = symbol.to_string();
        debug!(%symbol, "Fetching average price");

        let requested = symbol.clone();
        self.spawn_fetch(
            async move { client.fetch_average_price(&requested).await },
            move |result| FetchEvent::Price { symbol, result }
        );
    }

    /// Run `fetch` on its own task and queue its completion.
    ///
    /// The fetch is joined from a second task, so a panic still produces an
    /// event (as [`ExchangeError::Task`]) and `in_flight` always drains.
    fn spawn_fetch<T, F, E>(&mut self, fetch: F, into_event: E)
        where
            T: Send + 'static,
            F: Future<Output = Result<T, ExchangeError>> + Send + 'static,
            E: FnOnce(Result<T, ExchangeError>) -> FetchEvent + Send + 'static
    {
        let tx = self.events_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let result = match tokio::spawn(fetch).await {
                Ok(result) => result,
                Err(e) => Err(ExchangeError::from(e)),
            };
            // receiver lives as long as the browser; a closed channel means it is gone
            let _ = tx.send(into_event(result));
        });
    }

    // ---------------------------------------------------------------------
    // Completions
    // ---------------------------------------------------------------------

    /// Wait for the next fetch to complete and apply it.
    ///
    /// Returns `None` straight away when nothing is in flight.
    pub async fn process_next(&mut self) -> Option<FetchOutcome> {
        if self.in_flight == 0 {
            return None;
        }

        let event = self.events_rx.recv().await?;
        Some(self.apply(event))
    }

    /// Apply every completion already queued, without waiting
    pub fn drain_events(&mut self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            outcomes.push(self.apply(event));
        }
        outcomes
    }

    /// Wait until every spawned fetch has been applied
    pub async fn settle(&mut self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.process_next().await {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Apply one completion to the state
    pub fn apply(&mut self, event: FetchEvent) -> FetchOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        let outcome = match event {
            FetchEvent::Catalog(Ok(snapshot)) => {
                let symbols = snapshot.symbols.len();
                self.list.replace_catalog(snapshot);
                self.list.set_error(None);
                self.list.set_loading(false);
                info!("✓ Catalog loaded with {} symbols", symbols);
                FetchOutcome::CatalogLoaded { symbols }
            }
            FetchEvent::Catalog(Err(e)) => {
                let message = format!("Failed to fetch data: {}", e);
                error!("{}", message);
                self.list.set_error(Some(message.clone()));
                self.list.set_loading(false);
                FetchOutcome::CatalogFailed { message }
            }
            FetchEvent::Price { symbol, result: Ok(price) } => {
                self.list.set_price(&symbol, price);
                debug!(%symbol, price, "Average price cached");
                FetchOutcome::PriceUpdated { symbol, price }
            }
            FetchEvent::Price { symbol, result: Err(e) } => {
                // not surfaced to the user, diagnostics only
                warn!(%symbol, "Failed to fetch average price for {}: {}", symbol, e);
                return FetchOutcome::PriceFailed { symbol };
            }
        };

        self.bump();
        outcome
    }

    fn bump(&mut self) {
        self.revision.send_modify(|rev| {
            *rev += 1;
        });
    }
}
