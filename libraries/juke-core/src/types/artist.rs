//! Artist types

use super::ids::ArtistId;
use serde::{Deserialize, Serialize};

/// An artist, deduplicated by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
}
