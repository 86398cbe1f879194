//! Read-only lookup service for song tracks and their lyrics.
//!
//! Three request shapes are supported: by identifier, by exact
//! (artist, track, album, duration) tuple with a ±2 second duration window,
//! and conjunctive keyword search over a full-text index.

pub mod api;
pub mod config;
pub mod logging;
pub mod lyrics;
pub mod text_utils;
