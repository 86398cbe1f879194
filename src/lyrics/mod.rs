// lyrics/mod.rs - track and lyrics lookup: query construction, schema, storage
pub mod database;
pub mod query;
pub mod schema;
pub mod types;

pub use database::TrackStore;
pub use query::{SearchParams, SearchQuery, TupleQuery};
pub use types::{LookupError, Lyrics, Track, TrackLyrics};
