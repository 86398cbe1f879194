// logging.rs: tracing subscriber setup

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default directives when RUST_LOG is not set.
pub fn default_directives(debug: bool) -> &'static str {
    if debug {
        "debug,sqlx=warn"
    } else {
        "info,sqlx=warn"
    }
}

/// Install the global subscriber. RUST_LOG overrides the defaults.
pub fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
