use std::path::PathBuf;

use clap::Parser;
use ticketing_core::log_feed::DEFAULT_LOG_CAPACITY;

/// Where the backend API lives unless told otherwise.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, Parser)]
#[command(name = "ticketing-tui", version)]
#[command(about = "Terminal control panel for the ticketing simulation backend")]
pub struct Settings {
    /// Base URL of the backend API.
    #[arg(long, env = "TICKETING_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Milliseconds between UI ticks. Backend updates are applied on every tick.
    #[arg(long, env = "TICKETING_TICK_RATE_MS", default_value_t = 100)]
    pub tick_rate_ms: u64,

    /// Number of log lines kept in the panel. 0 keeps everything.
    #[arg(long, env = "TICKETING_LOG_CAPACITY", default_value_t = DEFAULT_LOG_CAPACITY)]
    pub log_capacity: usize,

    /// File the diagnostic log is written to. The terminal belongs to the UI.
    #[arg(long, env = "TICKETING_LOG_FILE", default_value = "ticketing-tui.log")]
    pub log_file: PathBuf,

    /// Diagnostic log level.
    #[arg(long, env = "TICKETING_LOG_LEVEL", default_value_t = log::LevelFilter::Info)]
    pub log_level: log::LevelFilter,

    /// Connect timeout for backend requests in milliseconds. No timeout when unset.
    #[arg(long, env = "TICKETING_CONNECT_TIMEOUT_MS")]
    pub connect_timeout_ms: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            tick_rate_ms: 100,
            log_capacity: DEFAULT_LOG_CAPACITY,
            log_file: PathBuf::from("ticketing-tui.log"),
            log_level: log::LevelFilter::Info,
            connect_timeout_ms: None,
        }
    }
}
