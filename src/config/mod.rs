use anyhow::{ Context, Result };
use dotenv::dotenv;
use serde::{ Deserialize, Serialize };
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use strum_macros::EnumString;
use tracing::Level;

use crate::exchange::binance::{ DEFAULT_API_VERSION, DEFAULT_BASE_URL };
use crate::utils::serde_helpers::{ serialize_level, deserialize_level };

const ENV_PREFIX: &str = "SB_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub debug: bool,

    pub base_url: String,
    pub api_version: String,
    pub request_timeout: Duration,

    #[serde(serialize_with = "serialize_level", deserialize_with = "deserialize_level")]
    pub log_level: Level,
    pub log_config: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub directory: PathBuf,
    pub filename_prefix: String,
    pub rotation: LogRotation,
    pub max_files: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            filename_prefix: "symbol_browser".to_string(),
            rotation: LogRotation::Daily,
            max_files: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout: Duration::from_secs(10),
            log_level: Level::INFO,
            log_config: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load from the process environment, reading `.env` first if there is one
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenv() {
            println!("✅ Loaded .env file from: {}", path.display());
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; keys are given without the `SB_` prefix
    pub fn from_lookup<F>(lookup: F) -> Result<Self> where F: Fn(&str) -> Option<String> {
        let get = |key: &str| lookup(&format!("{}{}", ENV_PREFIX, key));
        let defaults = Config::default();

        // Parse DEBUG
        let debug = parse_or(&get, "DEBUG", defaults.debug)?;

        // REST endpoint
        let base_url = get("BASE_URL").unwrap_or(defaults.base_url);
        let api_version = get("API_VERSION").unwrap_or(defaults.api_version);

        // Parse REQUEST_TIMEOUT_SECS
        let timeout_secs: u64 = parse_or(
            &get,
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs()
        )?;

        // Parse LOG_LEVEL
        let log_level = match get("LOG_LEVEL") {
            Some(raw) =>
                raw
                    .parse::<Level>()
                    .with_context(|| format!("Failed to parse {}LOG_LEVEL: {}", ENV_PREFIX, raw))?,
            None => defaults.log_level,
        };

        // Set up logging configuration
        let log_rotation = parse_or(&get, "LOG_ROTATION", defaults.log_config.rotation)?;
        let max_files = parse_opt::<usize, _>(&get, "LOG_MAX_FILES")?;

        let log_config = LogConfig {
            directory: get("LOG_DIRECTORY").map(PathBuf::from).unwrap_or(defaults.log_config.directory),
            filename_prefix: get("LOG_FILENAME_PREFIX").unwrap_or(
                defaults.log_config.filename_prefix
            ),
            rotation: log_rotation,
            max_files,
        };

        Ok(Config {
            debug,
            base_url,
            api_version,
            request_timeout: Duration::from_secs(timeout_secs),
            log_level,
            log_config,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
    where T: FromStr, T::Err: std::error::Error + Send + Sync + 'static, G: Fn(&str) -> Option<String>
{
    match get(key) {
        Some(raw) =>
            raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("Failed to parse {}{} environment variable", ENV_PREFIX, key)),
        None => Ok(default),
    }
}

fn parse_opt<T, G>(get: &G, key: &str) -> Result<Option<T>>
    where T: FromStr, T::Err: std::error::Error + Send + Sync + 'static, G: Fn(&str) -> Option<String>
{
    get(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Failed to parse {}{} environment variable", ENV_PREFIX, key))
        })
        .transpose()
}
