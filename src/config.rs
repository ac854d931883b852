use std::path::PathBuf;

const DEFAULT_DATABASE_URL: &str = "sqlite://souschef.db";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_LOG_FILE: &str = "souschef.log";

/// Runtime settings, read from `SOUSCHEF_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    /// env_logger filter, e.g. "debug" or "souschef=trace"
    pub log_filter: String,
    /// The terminal belongs to the UI, so logs go here
    pub log_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            database_url: value("SOUSCHEF_DATABASE_URL", DEFAULT_DATABASE_URL),
            log_filter: value("SOUSCHEF_LOG", DEFAULT_LOG_FILTER),
            log_file: PathBuf::from(value("SOUSCHEF_LOG_FILE", DEFAULT_LOG_FILE)),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
