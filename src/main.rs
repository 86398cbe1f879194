use lyricdb::api;
use lyricdb::config::Config;
use lyricdb::logging::init_logging;
use lyricdb::lyrics::TrackStore;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cfg = Config::load();
    init_logging(cfg.debug_log);

    let store = match TrackStore::connect(&cfg).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(database = %cfg.database_url, error = %e, "Failed to open track store");
            return Err(e.into());
        }
    };

    let listener = tokio::net::TcpListener::bind(cfg.bind).await?;
    tracing::info!(addr = %cfg.bind, "HTTP server listening");

    api::serve(listener, store, shutdown_signal()).await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
