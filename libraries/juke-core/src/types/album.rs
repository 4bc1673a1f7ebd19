//! Album types

use super::ids::AlbumId;
use serde::{Deserialize, Serialize};

/// An album, deduplicated by (name, artist)
///
/// The artist participates in the dedup key because two artists may
/// release albums sharing a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub artist: String,
}
