//! Storage schema the lookup service reads from.
//!
//! The corpus is written by a separate ingestion process; the service only
//! creates this layout when started with `--init-schema` (and in tests).

use sqlx::SqlitePool;

const CREATE_LYRICS: &str = r#"
CREATE TABLE IF NOT EXISTS lyrics (
    id              INTEGER PRIMARY KEY,
    plain_lyrics    TEXT,
    synced_lyrics   TEXT,
    instrumental    INTEGER NOT NULL DEFAULT 0,
    track_id        INTEGER
)
"#;

const CREATE_TRACKS: &str = r#"
CREATE TABLE IF NOT EXISTS tracks (
    id                  INTEGER PRIMARY KEY,
    name                TEXT,
    name_lower          TEXT,
    artist_name         TEXT,
    artist_name_lower   TEXT,
    album_name          TEXT,
    album_name_lower    TEXT,
    duration            INTEGER,
    last_lyrics_id      INTEGER REFERENCES lyrics(id)
)
"#;

const CREATE_TUPLE_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_tracks_tuple
    ON tracks(artist_name_lower, name_lower, album_name_lower, duration)
"#;

// One `surface` column per track: "name artist album" of the normalized columns.
const CREATE_FTS: &str = r#"
CREATE VIRTUAL TABLE IF NOT EXISTS tracks_fts USING fts5(
    surface,
    tokenize = 'unicode61 remove_diacritics 2'
)
"#;

const CREATE_FTS_INSERT_TRIGGER: &str = r#"
CREATE TRIGGER IF NOT EXISTS tracks_fts_ai AFTER INSERT ON tracks BEGIN
    INSERT INTO tracks_fts(rowid, surface) VALUES (
        new.id,
        COALESCE(new.name_lower, '') || ' ' ||
        COALESCE(new.artist_name_lower, '') || ' ' ||
        COALESCE(new.album_name_lower, '')
    );
END
"#;

const CREATE_FTS_DELETE_TRIGGER: &str = r#"
CREATE TRIGGER IF NOT EXISTS tracks_fts_ad AFTER DELETE ON tracks BEGIN
    DELETE FROM tracks_fts WHERE rowid = old.id;
END
"#;

const CREATE_FTS_UPDATE_TRIGGER: &str = r#"
CREATE TRIGGER IF NOT EXISTS tracks_fts_au AFTER UPDATE ON tracks BEGIN
    DELETE FROM tracks_fts WHERE rowid = old.id;
    INSERT INTO tracks_fts(rowid, surface) VALUES (
        new.id,
        COALESCE(new.name_lower, '') || ' ' ||
        COALESCE(new.artist_name_lower, '') || ' ' ||
        COALESCE(new.album_name_lower, '')
    );
END
"#;

/// Create tables, the tuple index and the full-text surface if they are missing.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in [
        CREATE_LYRICS,
        CREATE_TRACKS,
        CREATE_TUPLE_INDEX,
        CREATE_FTS,
        CREATE_FTS_INSERT_TRIGGER,
        CREATE_FTS_DELETE_TRIGGER,
        CREATE_FTS_UPDATE_TRIGGER,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("Schema ready");
    Ok(())
}
