// config.rs: Process configuration, parsed once at startup and passed down

use clap::Parser;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://lyrics.db";

/// Application configuration from CLI
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Config {
    /// SQLite database URL (e.g. "sqlite://lyrics.db").
    /// If empty, the DATABASE_URL env var (or .env file) will be used as a fallback.
    #[arg(long, default_value = "")]
    pub database_url: String,
    /// Address the HTTP server listens on
    #[arg(long, default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,
    /// Maximum number of pooled database connections
    #[arg(long, default_value_t = 8)]
    pub max_connections: u32,
    /// Seconds a request waits for a free database connection
    #[arg(long, default_value_t = 5)]
    pub acquire_timeout_secs: u64,
    /// Create the tables and full-text index if missing (opens the database read-write)
    #[arg(long)]
    pub init_schema: bool,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long)]
    pub debug_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            max_connections: 8,
            acquire_timeout_secs: 5,
            init_schema: false,
            debug_log: false,
        }
    }
}

impl Config {
    /// Parse the command line and resolve the database URL fallback chain.
    pub fn load() -> Self {
        let mut cfg = Config::parse();
        dotenvy::dotenv().ok();
        database_url_from_env_if_empty(&mut cfg, std::env::var("DATABASE_URL").ok());
        cfg
    }
}

fn database_url_from_env_if_empty(cfg: &mut Config, env_value: Option<String>) {
    if !cfg.database_url.trim().is_empty() {
        return;
    }
    cfg.database_url = env_value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
}
