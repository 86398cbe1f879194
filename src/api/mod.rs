//! HTTP boundary.
//!
//! Maps requests onto [`TrackStore`] lookups and lookup outcomes onto status
//! codes. No matching logic lives here beyond parameter validation.

pub mod error;
pub mod handlers;

use axum::routing::get;
use axum::{Extension, Router};
use std::future::Future;
use tokio::net::TcpListener;

use crate::lyrics::TrackStore;
use handlers::{handle_get_by_id, handle_get_by_tuple, handle_health, handle_root, handle_search};

pub fn router(store: TrackStore) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/get/:id", get(handle_get_by_id))
        .route(
            "/get/:artist_name/:track_name/:album_name/:duration",
            get(handle_get_by_tuple),
        )
        .route("/tracks", get(handle_search))
        .layer(Extension(store))
}

/// Serve until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, store: TrackStore, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await
}
