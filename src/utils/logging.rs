use std::io;
use std::path::Path;
use std::sync::OnceLock;
use chrono::Local;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{ fmt, prelude::*, EnvFilter, filter::LevelFilter };
use tracing_appender::rolling::{ RollingFileAppender, Rotation };
use tracing_appender::non_blocking::WorkerGuard;

use crate::config::{ LogConfig, LogRotation };

// Writer guards; dropping them stops the background writer threads
struct LogGuards {
    _file_guard: WorkerGuard,
    _console_guard: Option<WorkerGuard>,
}

static LOG_GUARDS: OnceLock<LogGuards> = OnceLock::new();

/// Initialize the logging system with non-blocking file and optional console output
pub fn init_logging(level: Level, debug: bool, log_config: &LogConfig) -> io::Result<()> {
    // Create log directory if it doesn't exist
    if !log_config.directory.exists() {
        std::fs::create_dir_all(&log_config.directory)?;
    }

    let filename = format!("{}_{}.log", log_config.filename_prefix, Local::now().format("%Y%m%d"));

    let rotation = match log_config.rotation {
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    };

    let file_appender = RollingFileAppender::new(rotation, &log_config.directory, filename);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt
        ::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::CLOSE);

    // RUST_LOG directives win over the configured level
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    // Console output only in debug mode; stdout is the user interface otherwise
    let console_guard = if debug {
        let (console_writer, console_guard) = tracing_appender::non_blocking(io::stderr());

        let console_layer = fmt
            ::layer()
            .with_writer(console_writer)
            .with_ansi(true)
            .with_target(true)
            .compact();

        tracing_subscriber
            ::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .try_init()
            .map_err(io::Error::other)?;

        Some(console_guard)
    } else {
        tracing_subscriber::registry().with(filter).with(file_layer).try_init().map_err(io::Error::other)?;

        None
    };

    let _ = LOG_GUARDS.set(LogGuards {
        _file_guard: file_guard,
        _console_guard: console_guard,
    });

    // Clean up old log files if max_files is specified
    if let Some(max_files) = log_config.max_files {
        if let Err(e) = cleanup_old_logs(&log_config.directory, &log_config.filename_prefix, max_files) {
            tracing::warn!("Failed to clean up old log files: {}", e);
        }
    }

    tracing::info!(
        log_dir = %log_config.directory.display(),
        log_prefix = %log_config.filename_prefix,
        "Asynchronous logging initialized at level: {:?}",
        level
    );

    Ok(())
}

/// Keep only the newest `max_files` log files with the given prefix
fn cleanup_old_logs(log_dir: &Path, prefix: &str, max_files: usize) -> io::Result<()> {
    let mut entries = std::fs
        ::read_dir(log_dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if path.is_file() && path.file_name()?.to_string_lossy().starts_with(prefix) {
                let modified = entry.metadata().ok()?.modified().ok()?;
                return Some((path, modified));
            }
            None
        })
        .collect::<Vec<_>>();

    if entries.len() > max_files {
        // newest first
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        for (path, _) in entries.iter().skip(max_files) {
            std::fs::remove_file(path)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{ Duration, SystemTime };

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("symbol_browser_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn cleanup_keeps_newest_matching_files() {
        let dir = scratch_dir("cleanup");
        let now = SystemTime::now();

        for (i, name) in ["app_1.log", "app_2.log", "app_3.log"].iter().enumerate() {
            let path = dir.join(name);
            fs::write(&path, b"x").unwrap();
            let file = fs::File::options().write(true).open(&path).unwrap();
            file.set_modified(now - Duration::from_secs(100 * (3 - i as u64))).unwrap();
        }
        fs::write(dir.join("other.txt"), b"x").unwrap();

        cleanup_old_logs(&dir, "app_", 2).unwrap();

        assert!(!dir.join("app_1.log").exists());
        assert!(dir.join("app_2.log").exists());
        assert!(dir.join("app_3.log").exists());
        assert!(dir.join("other.txt").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
