use serde::Serialize;
use thiserror::Error;

/// Track metadata as exposed by the lookup endpoints.
///
/// Columns that are NULL in storage come back as empty strings / zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Track {
    pub id: i64,
    pub name: String,
    pub artist_name: String,
    pub album_name: String,
    /// Duration in whole seconds.
    pub duration: i64,
}

/// The current lyrics record of a track.
///
/// A track without a lyrics row is represented by `Lyrics::default()`:
/// empty texts and `instrumental == false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lyrics {
    pub instrumental: bool,
    pub plain_lyrics: String,
    pub synced_lyrics: String,
}

impl Lyrics {
    /// Build from the nullable columns of a LEFT JOIN.
    pub fn from_columns(
        instrumental: Option<bool>,
        plain_lyrics: Option<String>,
        synced_lyrics: Option<String>,
    ) -> Self {
        Self {
            instrumental: instrumental.unwrap_or(false),
            plain_lyrics: plain_lyrics.unwrap_or_default(),
            synced_lyrics: synced_lyrics.unwrap_or_default(),
        }
    }
}

/// One lookup result, serialized flat:
/// `{id, name, artist_name, album_name, duration, instrumental, plain_lyrics, synced_lyrics}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackLyrics {
    #[serde(flatten)]
    pub track: Track,
    #[serde(flatten)]
    pub lyrics: Lyrics,
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
    #[error("either `q` or `track_name` must be provided")]
    MissingSearchTerm,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LookupError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LookupError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}
