#![allow(dead_code)]

use lyricdb::lyrics::TrackStore;
use lyricdb::lyrics::schema::ensure_schema;
use lyricdb::text_utils::normalize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::time::Duration;
use tempfile::TempDir;

pub const GENERAL_TAYLOR_PLAIN: &str = "General Taylor gained the day\n(Walk him along, John, carry him along)\nWell General Taylor gained the day\n(Carry him to his burying ground)";
pub const GENERAL_TAYLOR_SYNCED: &str = "[00:01.56] General Taylor gained the day\n[00:03.97] (Walk him along, John, carry him along)\n[00:07.85] Well General Taylor gained the day\n[00:11.42] (Carry him to his burying ground)";

/// Track row to insert; normalized columns are derived on insert.
pub struct TrackFixture<'a> {
    pub id: i64,
    pub name: Option<&'a str>,
    pub artist_name: Option<&'a str>,
    pub album_name: Option<&'a str>,
    pub duration: i64,
    pub lyrics: Option<LyricsFixture<'a>>,
}

pub struct LyricsFixture<'a> {
    pub plain: Option<&'a str>,
    pub synced: Option<&'a str>,
    pub instrumental: bool,
}

impl<'a> TrackFixture<'a> {
    pub fn new(id: i64, name: &'a str, artist_name: &'a str, album_name: &'a str, duration: i64) -> Self {
        Self {
            id,
            name: Some(name),
            artist_name: Some(artist_name),
            album_name: Some(album_name),
            duration,
            lyrics: Some(LyricsFixture {
                plain: Some("la la la"),
                synced: Some("[00:01.00] la la la"),
                instrumental: false,
            }),
        }
    }

    pub fn without_lyrics(mut self) -> Self {
        self.lyrics = None;
        self
    }

    pub fn with_lyrics(mut self, lyrics: LyricsFixture<'a>) -> Self {
        self.lyrics = Some(lyrics);
        self
    }
}

/// A schema-initialized database in a temporary directory.
pub struct TestDb {
    pub store: TrackStore,
    _dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        Self::with_max_connections(4).await
    }

    pub async fn with_max_connections(max_connections: u32) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = SqliteConnectOptions::new()
            .filename(dir.path().join("lyrics.db"))
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(2))
            .connect_with(options)
            .await
            .expect("open sqlite");
        ensure_schema(&pool).await.expect("schema");
        Self {
            store: TrackStore::from_pool(pool),
            _dir: dir,
        }
    }

    pub async fn insert(&self, track: TrackFixture<'_>) {
        let pool = self.store.pool();
        let lyrics_id = match &track.lyrics {
            Some(lyrics) => {
                // Lyrics ids are offset so they never coincide with track ids.
                let lyrics_id = track.id + 1_000_000;
                sqlx::query(
                    "INSERT INTO lyrics (id, plain_lyrics, synced_lyrics, instrumental, track_id) VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .bind(lyrics_id)
                .bind(lyrics.plain)
                .bind(lyrics.synced)
                .bind(lyrics.instrumental)
                .bind(track.id)
                .execute(pool)
                .await
                .expect("insert lyrics");
                Some(lyrics_id)
            }
            None => None,
        };

        sqlx::query(
            "INSERT INTO tracks (id, name, name_lower, artist_name, artist_name_lower, album_name, album_name_lower, duration, last_lyrics_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(track.id)
        .bind(track.name)
        .bind(track.name.map(normalize))
        .bind(track.artist_name)
        .bind(track.artist_name.map(normalize))
        .bind(track.album_name)
        .bind(track.album_name.map(normalize))
        .bind(track.duration)
        .bind(lyrics_id)
        .execute(pool)
        .await
        .expect("insert track");
    }

    /// The catalog used by the end-to-end scenarios.
    pub async fn with_catalog() -> Self {
        let db = Self::new().await;
        db.insert(
            TrackFixture::new(99, "General Taylor", "The Longest Johns", "Between Wind And Water", 197)
                .with_lyrics(LyricsFixture {
                    plain: Some(GENERAL_TAYLOR_PLAIN),
                    synced: Some(GENERAL_TAYLOR_SYNCED),
                    instrumental: false,
                }),
        )
        .await;
        db.insert(TrackFixture::new(2, "Wildest Dreams", "Taylor Swift", "1989 (Deluxe)", 220))
            .await;
        db.insert(TrackFixture::new(3, "Shake It Off", "Taylor Swift", "1989", 219))
            .await;
        db.insert(TrackFixture::new(4, "Taylor", "Jack Johnson", "In Between Dreams", 233))
            .await;
        db.insert(
            TrackFixture::new(5, "Don't Stop Me Now", "Queen", "Jazz", 209).with_lyrics(
                LyricsFixture {
                    plain: None,
                    synced: None,
                    instrumental: true,
                },
            ),
        )
        .await;
        db.insert(TrackFixture::new(6, "Halo", "Beyoncé", "I Am... Sasha Fierce", 261).without_lyrics())
            .await;
        db
    }
}
