use crate::config::Config;
use crate::enums::sort::SortBy;
use crate::models::exchange_info::ExchangeInfo;
use crate::orchestrator::view::PageView;
use crate::pipeline::list::PAGE_SIZE;
use colored::*;
use figlet_rs::FIGfont;
use strum::IntoEnumIterator;
use tracing::info;

const COLUMN_WIDTH: usize = 18;

pub fn print_config(config: &Config) {
    let json = serde_json::to_string_pretty(config).unwrap_or_default();

    info!("\n{}: \n{}", String::from("[CONFIG]").blue().underline(), json);
}

/// Figlet rendering of the app name, plain text if the font fails to load
pub fn banner() -> String {
    let font = FIGfont::standard().ok();

    font.as_ref()
        .and_then(|f| f.convert("Symbol Browser"))
        .map(|figure| figure.to_string())
        .unwrap_or_else(|| "Symbol Browser".to_string())
}

pub fn print_banner() {
    println!("{}", banner().cyan());
}

pub fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  search <term>     filter symbols (case-insensitive)");
    println!("  clear             clear the search");
    println!("  sort <column>     symbol | base | quote | price (repeat to reverse)");
    println!("  next / prev       change page");
    println!("  price <SYMBOL>    fetch the average price of one symbol");
    println!("  refresh           reload exchange info");
    println!("  info              show snapshot metadata");
    println!("  help              this message");
    println!("  quit              exit");
}

/// Render the current page as a table
pub fn render_page(view: &PageView) -> String {
    let mut out = String::new();

    if view.loading {
        out.push_str(&format!("{}\n", "Updating...".yellow()));
        return out;
    }

    if let Some(error) = &view.error_message {
        out.push_str(&format!("{} {}\n", "Error:".red().bold(), error));
        if view.total_count == 0 {
            return out;
        }
    }

    if !view.search_term.is_empty() {
        out.push_str(&format!("Search: {}\n", view.search_term.green()));
    }

    let header = SortBy::iter()
        .map(|column| {
            let title = format!("{} {}", column.title(), view.indicator(column).arrow());
            format!("{:<width$}", title, width = COLUMN_WIDTH)
        })
        .collect::<String>();
    out.push_str(&format!("{}\n", header.bold()));

    for row in &view.rows {
        let price = match row.average_price {
            Some(p) => format!("{}", p),
            None => "0".dimmed().to_string(),
        };
        out.push_str(
            &format!(
                "{:<w$}{:<w$}{:<w$}{:<w$}\n",
                row.symbol,
                row.base_asset,
                row.quote_asset,
                price,
                w = COLUMN_WIDTH
            )
        );
    }

    let prev = if view.can_go_previous { "←" } else { " " };
    let next = if view.can_go_next { "→" } else { " " };
    out.push_str(
        &format!(
            "{} page {} {}   {}\n",
            prev,
            view.current_page + 1,
            next,
            format!("Symbols: {}", view.filtered_count).dimmed()
        )
    );

    out
}

pub fn print_page(view: &PageView) {
    print!("{}", render_page(view));
}

/// Snapshot metadata: timezone, server time and rate limits
pub fn print_snapshot_info(info: &ExchangeInfo) {
    let server_time = info
        .server_time_utc()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| info.server_time.to_string());

    println!("{} {}", "Timezone:".bold(), info.timezone);
    println!("{} {}", "Server time:".bold(), server_time);
    println!("{} {}", "Symbols:".bold(), info.symbols.len());
    for limit in &info.rate_limits {
        println!(
            "  {} {} per {} {}",
            limit.rate_limit_type,
            limit.limit,
            limit.interval_num,
            limit.interval.to_lowercase()
        );
    }
    println!("{} {} rows", "Page size:".bold(), PAGE_SIZE);
}
