//! Song types

use super::ids::SongId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default album/genre value when a tag is absent
pub const UNSPECIFIED: &str = "Unspecified";

/// A catalogued song
///
/// Canonical record owned by the catalog. Transient playback state
/// (votes, playing flags) lives on the playback side's wrapper types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Unique identifier, assigned in insertion order
    pub id: SongId,

    /// File path, unique within the catalog
    pub path: PathBuf,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name ("Unspecified" when untagged)
    pub album: String,

    /// Genre name ("Unspecified" when untagged)
    pub genre: String,
}

/// Tag fields extracted from an audio file
///
/// All fields are optional; resolution against the file path fills in
/// whatever the tags left blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongMetadata {
    /// Track title from the tag
    pub title: Option<String>,

    /// Artist name from the tag
    pub artist: Option<String>,

    /// Album name from the tag
    pub album: Option<String>,

    /// Genre name from the tag
    pub genre: Option<String>,
}

impl SongMetadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }
}
