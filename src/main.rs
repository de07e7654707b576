// for the quick data allocation on memory
#[global_allocator]
static ALLOC: rpmalloc::RpMalloc = rpmalloc::RpMalloc;

use anyhow::{ Context, Result };
use symbol_browser::{ app, config::Config, utils::logging };

// Define command line arguments enum
#[derive(Debug)]
enum Command {
    Interactive,
    /// `list [search]`: print the first page and exit
    List(Option<String>),
}

fn main() -> Result<()> {
    // Parse command line arguments
    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("list") => Command::List(args.next()),
        _ => Command::Interactive,
    };

    // Load configuration with helpful error messages
    let config = Config::from_env().context("Failed to load configuration from environment")?;

    // Initialize logging system
    logging
        ::init_logging(config.log_level, config.debug, &config.log_config)
        .context("Failed to initialize logging system")?;

    match command {
        Command::Interactive => app::interactive_mode::run_interactive_mode(config)?,
        Command::List(search) => app::snapshot_mode::run_snapshot_mode(config, search)?,
    }

    Ok(())
}
