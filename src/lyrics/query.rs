//! Query construction for the three lookup strategies.
//!
//! Everything here is pure: raw request parameters go in, normalized lookup
//! descriptions come out. `database.rs` turns them into SQL.
//!
//! - **Identifier**: [`parse_integer`] validates the path parameter.
//! - **Exact tuple**: [`TupleQuery`] normalizes artist/track/album and carries
//!   the duration tolerance window.
//! - **Full text**: [`SearchQuery`] picks the token source (keyword, else the
//!   structured fields) and renders a conjunctive FTS5 expression.

use serde::Deserialize;

use crate::lyrics::types::LookupError;
use crate::text_utils::{normalize, prepare_optional, tokens};

/// Stored and queried durations may differ by this many seconds in either direction.
pub const DURATION_TOLERANCE_SECS: i64 = 2;

/// Upper bound on rows returned by a search.
pub const SEARCH_RESULT_LIMIT: i64 = 20;

/// Maximum length (in characters) of any search parameter.
pub const MAX_PARAM_CHARS: usize = 50;

/// Parse an integer path parameter (`id`, `duration`).
pub fn parse_integer(field: &'static str, raw: &str) -> Result<i64, LookupError> {
    raw.parse::<i64>()
        .map_err(|_| LookupError::invalid(field, format!("expected an integer, got {raw:?}")))
}

// ============================================================================
// Exact tuple lookup
// ============================================================================

/// Normalized (artist, track, album, duration) lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleQuery {
    pub artist_name: String,
    pub track_name: String,
    pub album_name: String,
    pub duration: i64,
}

impl TupleQuery {
    pub fn new(artist_name: &str, track_name: &str, album_name: &str, duration: i64) -> Self {
        Self {
            artist_name: normalize(artist_name),
            track_name: normalize(track_name),
            album_name: normalize(album_name),
            duration,
        }
    }

    /// Inclusive `(low, high)` bounds a stored duration must fall within.
    pub fn duration_window(&self) -> (i64, i64) {
        (
            self.duration.saturating_sub(DURATION_TOLERANCE_SECS),
            self.duration.saturating_add(DURATION_TOLERANCE_SECS),
        )
    }
}

// ============================================================================
// Full-text search
// ============================================================================

/// Query string of the search endpoint, exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub keyword: Option<String>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
}

impl SearchParams {
    /// `q` and `keyword` are aliases; `q` wins when both are sent.
    pub fn keyword(&self) -> Option<&str> {
        self.q.as_deref().or(self.keyword.as_deref())
    }

    /// Every supplied parameter must be 1..=MAX_PARAM_CHARS characters long.
    pub fn check_lengths(&self) -> Result<(), LookupError> {
        let fields = [
            ("q", &self.q),
            ("keyword", &self.keyword),
            ("track_name", &self.track_name),
            ("artist_name", &self.artist_name),
            ("album_name", &self.album_name),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                let len = value.chars().count();
                if len == 0 || len > MAX_PARAM_CHARS {
                    return Err(LookupError::invalid(
                        field,
                        format!("must be between 1 and {MAX_PARAM_CHARS} characters"),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// A conjunctive full-text query: every token must be present in a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    tokens: Vec<String>,
}

impl SearchQuery {
    /// Choose the token source and normalize it.
    ///
    /// With a keyword, only the keyword is searched. Without one, the tokens of
    /// `track_name`, `artist_name` and `album_name` (whichever are present) are
    /// concatenated in that order. Neither keyword nor track name is a
    /// [`LookupError::MissingSearchTerm`], even if artist or album were given.
    pub fn from_params(params: &SearchParams) -> Result<Self, LookupError> {
        let keyword = prepare_optional(params.keyword());
        let track_name = prepare_optional(params.track_name.as_deref());

        let text = match (keyword, track_name) {
            (Some(keyword), _) => keyword,
            (None, Some(track_name)) => [
                Some(track_name),
                prepare_optional(params.artist_name.as_deref()),
                prepare_optional(params.album_name.as_deref()),
            ]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" "),
            (None, None) => return Err(LookupError::MissingSearchTerm),
        };

        Ok(Self {
            tokens: tokens(&text).map(str::to_string).collect(),
        })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Render the FTS5 `MATCH` expression: quoted tokens joined with `AND`.
    ///
    /// Tokens without a single alphanumeric character cannot appear in the
    /// index and are left out. An empty string means nothing can match.
    pub fn match_expression(&self) -> String {
        self.tokens
            .iter()
            .filter(|t| t.chars().any(char::is_alphanumeric))
            .map(|t| quote_term(t))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

/// Quote a term as an FTS5 string so operators and quotes in user input stay literal.
fn quote_term(term: &str) -> String {
    format!("\"{}\"", term.replace('"', "\"\""))
}
