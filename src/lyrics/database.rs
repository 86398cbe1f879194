//! SQLite-backed track store.
//!
//! Runs the lookups built in [`crate::lyrics::query`] against the corpus.
//!
//! # Connection discipline
//!
//! Every operation acquires one connection from the pool and holds it only
//! for that call. The `PoolConnection` guard returns it on drop, so it is
//! released on every exit path: a row, no row, a storage error, or the
//! request future being cancelled.
//!
//! # Outcomes
//!
//! ```text
//! find_by_id / find_by_tuple   Ok(Some(row)) | Ok(None) = not found | Err(Database)
//! search                       Ok(rows, possibly empty)             | Err(Database)
//! ```
//!
//! An `Err(Database)` is logged once at ERROR with the lookup's inputs,
//! whichever step failed: acquiring the connection, running the query or
//! decoding a row.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::config::Config;
use crate::lyrics::query::{SEARCH_RESULT_LIMIT, SearchQuery, TupleQuery};
use crate::lyrics::schema::ensure_schema;
use crate::lyrics::types::{LookupError, Lyrics, Track, TrackLyrics};

const SELECT_COLUMNS: &str = r#"
SELECT
    t.id,
    t.name,
    t.artist_name,
    t.album_name,
    t.duration,
    l.instrumental,
    l.plain_lyrics,
    l.synced_lyrics
"#;

const BY_ID: &str = r#"
FROM tracks t
LEFT JOIN lyrics l ON l.id = t.last_lyrics_id
WHERE t.id = ?1
"#;

const BY_TUPLE: &str = r#"
FROM tracks t
LEFT JOIN lyrics l ON l.id = t.last_lyrics_id
WHERE
    t.artist_name_lower = ?1 AND
    t.name_lower = ?2 AND
    t.album_name_lower = ?3 AND
    t.duration BETWEEN ?4 AND ?5
ORDER BY t.id ASC
LIMIT 1
"#;

const BY_FULL_TEXT: &str = r#"
FROM tracks_fts
JOIN tracks t ON t.id = tracks_fts.rowid
LEFT JOIN lyrics l ON l.id = t.last_lyrics_id
WHERE tracks_fts MATCH ?1
ORDER BY tracks_fts.rank, t.id ASC
LIMIT ?2
"#;

/// Read-only access to tracks and their current lyrics.
#[derive(Debug, Clone)]
pub struct TrackStore {
    pool: SqlitePool,
}

impl TrackStore {
    /// Open the pool described by `config`.
    ///
    /// Without `init_schema` the database must already exist and is opened
    /// read-only; with it, the file is created if needed and the schema ensured.
    pub async fn connect(config: &Config) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .read_only(!config.init_schema)
            .create_if_missing(config.init_schema);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await?;

        if config.init_schema {
            ensure_schema(&pool).await?;
        }

        tracing::info!(
            database = %config.database_url,
            max_connections = config.max_connections,
            read_only = !config.init_schema,
            "Opened track store"
        );
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Trivial round-trip used by the health endpoint.
    pub async fn ping(&self) -> Result<i64, LookupError> {
        let value = async {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_scalar::<_, i64>("SELECT 1")
                .fetch_one(&mut *conn)
                .await
        }
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Health check query failed"))?;
        Ok(value)
    }

    /// Strategy (a): look a track up by identifier.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<TrackLyrics>, LookupError> {
        let found = async {
            let mut conn = self.pool.acquire().await?;
            let sql = format!("{SELECT_COLUMNS}{BY_ID}");
            let row = sqlx::query(&sql).bind(id).fetch_optional(&mut *conn).await?;
            row.as_ref().map(track_lyrics_from_row).transpose()
        }
        .await
        .inspect_err(|e| tracing::error!(id, error = %e, "Identifier lookup failed"))?;

        tracing::debug!(id, found = found.is_some(), "Identifier lookup");
        Ok(found)
    }

    /// Strategy (b): normalized artist/track/album plus a duration window.
    ///
    /// Several rows may fall inside the window; the lowest id wins.
    pub async fn find_by_tuple(
        &self,
        query: &TupleQuery,
    ) -> Result<Option<TrackLyrics>, LookupError> {
        let (low, high) = query.duration_window();
        let found = async {
            let mut conn = self.pool.acquire().await?;
            let sql = format!("{SELECT_COLUMNS}{BY_TUPLE}");
            let row = sqlx::query(&sql)
                .bind(&query.artist_name)
                .bind(&query.track_name)
                .bind(&query.album_name)
                .bind(low)
                .bind(high)
                .fetch_optional(&mut *conn)
                .await?;
            row.as_ref().map(track_lyrics_from_row).transpose()
        }
        .await
        .inspect_err(|e| {
            tracing::error!(
                artist = %query.artist_name,
                track = %query.track_name,
                album = %query.album_name,
                duration = query.duration,
                error = %e,
                "Tuple lookup failed"
            )
        })?;

        tracing::debug!(
            artist = %query.artist_name,
            track = %query.track_name,
            album = %query.album_name,
            duration = query.duration,
            found = found.is_some(),
            "Tuple lookup"
        );
        Ok(found)
    }

    /// Strategy (c): conjunctive full-text search, at most `SEARCH_RESULT_LIMIT` rows.
    ///
    /// No match is an empty list, never an error.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<TrackLyrics>, LookupError> {
        let expression = query.match_expression();
        if expression.is_empty() {
            tracing::debug!(tokens = ?query.tokens(), "Search has no indexable tokens");
            return Ok(Vec::new());
        }

        let results = async {
            let mut conn = self.pool.acquire().await?;
            let sql = format!("{SELECT_COLUMNS}{BY_FULL_TEXT}");
            let rows = sqlx::query(&sql)
                .bind(&expression)
                .bind(SEARCH_RESULT_LIMIT)
                .fetch_all(&mut *conn)
                .await?;
            rows.iter()
                .map(track_lyrics_from_row)
                .collect::<Result<Vec<_>, _>>()
        }
        .await
        .inspect_err(|e| tracing::error!(%expression, error = %e, "Search query failed"))?;

        tracing::debug!(%expression, results = results.len(), "Search");
        Ok(results)
    }
}

/// Map a joined row, defaulting NULL metadata and absent lyrics.
fn track_lyrics_from_row(row: &SqliteRow) -> Result<TrackLyrics, sqlx::Error> {
    let track = Track {
        id: row.try_get("id")?,
        name: row.try_get::<Option<String>, _>("name")?.unwrap_or_default(),
        artist_name: row
            .try_get::<Option<String>, _>("artist_name")?
            .unwrap_or_default(),
        album_name: row
            .try_get::<Option<String>, _>("album_name")?
            .unwrap_or_default(),
        duration: row.try_get::<Option<i64>, _>("duration")?.unwrap_or_default(),
    };
    let lyrics = Lyrics::from_columns(
        row.try_get("instrumental")?,
        row.try_get("plain_lyrics")?,
        row.try_get("synced_lyrics")?,
    );
    Ok(TrackLyrics { track, lyrics })
}
