//! Genre types

use super::ids::GenreId;
use serde::{Deserialize, Serialize};

/// A music genre, deduplicated by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}
