use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::{Extension, Json};
use serde_json::{Value, json};

use super::error::{ApiError, TRACK_NOT_FOUND, TUPLE_NOT_FOUND};
use crate::lyrics::query::parse_integer;
use crate::lyrics::{SearchParams, SearchQuery, TrackLyrics, TrackStore, TupleQuery};

pub async fn handle_root() -> Json<Value> {
    Json(json!({ "message": "Welcome to LyricDB." }))
}

pub async fn handle_health(
    Extension(store): Extension<TrackStore>,
) -> Result<Json<Value>, ApiError> {
    let result = store.ping().await?;
    Ok(Json(json!({ "status": "ok", "result": result })))
}

/// `GET /get/{id}`
pub async fn handle_get_by_id(
    Extension(store): Extension<TrackStore>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<TrackLyrics>, ApiError> {
    let Path(id) = path?;
    let id = parse_integer("id", &id)?;
    store
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(TRACK_NOT_FOUND))
}

/// `GET /get/{artist_name}/{track_name}/{album_name}/{duration}`
pub async fn handle_get_by_tuple(
    Extension(store): Extension<TrackStore>,
    path: Result<Path<(String, String, String, String)>, PathRejection>,
) -> Result<Json<TrackLyrics>, ApiError> {
    let Path((artist_name, track_name, album_name, duration)) = path?;
    let duration = parse_integer("duration", &duration)?;
    let query = TupleQuery::new(&artist_name, &track_name, &album_name, duration);
    store
        .find_by_tuple(&query)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(TUPLE_NOT_FOUND))
}

/// `GET /tracks?q=&keyword=&track_name=&artist_name=&album_name=`
pub async fn handle_search(
    Extension(store): Extension<TrackStore>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<TrackLyrics>>, ApiError> {
    let Query(params) = query?;
    params.check_lengths()?;
    let query = SearchQuery::from_params(&params)?;
    Ok(Json(store.search(&query).await?))
}
