use std::sync::Arc;

use crate::{
    app::command::Command,
    config::Config,
    exchange::{ binance::BinanceClient, client::ExchangeClient },
    orchestrator::SymbolBrowser,
    utils::console::{ print_banner, print_config, print_help, print_page, print_snapshot_info },
    PING_TIMEOUT,
};
use anyhow::{ Context, Result };
use colored::*;
use tokio::io::{ AsyncBufReadExt, BufReader };
use tokio::runtime::Runtime;
use tracing::{ debug, info, warn };

pub fn run_interactive_mode(config: Config) -> Result<()> {
    print_banner();
    print_config(&config);

    // Initialize exchange api client with proper error handling
    let client = Arc::new(
        BinanceClient::from_config(&config).context("Failed to create Binance client")?
    );

    info!("Connected to exchange: {}", client.name());

    // Create a runtime for async operations
    let rt = tokio::runtime::Builder
        ::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    let result = rt.block_on(session(client));
    shut_down(rt);
    result
}

/// Drop the runtime without joining its blocking pool.
///
/// The stdin reader sits in a blocking read that cannot be cancelled; a plain
/// drop would wait for the next line of input.
fn shut_down(rt: Runtime) {
    debug!("Shutting down runtime");
    rt.shutdown_background();
}

async fn session(client: Arc<BinanceClient>) -> Result<()> {
    // Reachability is only a diagnostic; the refresh reports real failures
    match tokio::time::timeout(PING_TIMEOUT, client.ping()).await {
        Ok(Ok(true)) => info!("✓ Exchange is operational"),
        _ => warn!("Exchange did not answer ping"),
    }

    let mut browser = SymbolBrowser::new(client);
    let mut revisions = browser.subscribe();

    print_help();
    browser.refresh_catalog();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read from stdin")? {
                    Some(line) => {
                        if !handle_line(&mut browser, &line) {
                            break;
                        }
                    }
                    None => break,
                }
            }
            Some(outcome) = browser.process_next(), if browser.pending_fetches() > 0 => {
                debug!(?outcome, "Fetch applied");
            }
            Ok(()) = revisions.changed() => {
                print_page(&browser.view());
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Run one command; `false` means quit
fn handle_line(browser: &mut SymbolBrowser, line: &str) -> bool {
    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            println!("{}", e.to_string().red());
            return true;
        }
    };

    debug!(?command, "Command");

    match command {
        Command::Search(term) => browser.set_search_term(term),
        Command::Clear => browser.set_search_term(""),
        Command::Sort(column) => browser.sort_symbols(column),
        Command::Next => browser.next_page(),
        Command::Prev => browser.previous_page(),
        Command::Price(symbol) => browser.fetch_price(&symbol),
        Command::Refresh => browser.refresh_catalog(),
        Command::Info =>
            match browser.list().catalog() {
                Some(snapshot) => print_snapshot_info(snapshot),
                None => println!("No catalog loaded yet"),
            }
        Command::Help => print_help(),
        Command::Quit => {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{ Duration, Instant };

    #[test]
    fn shut_down_does_not_wait_for_blocked_reads() {
        let rt = tokio::runtime::Builder::new_multi_thread().worker_threads(1).build().unwrap();

        // stands in for a stdin read nobody will answer
        rt.spawn_blocking(|| std::thread::sleep(Duration::from_secs(10)));

        let start = Instant::now();
        shut_down(rt);
        assert!(start.elapsed() < Duration::from_secs(2));
    }
}
