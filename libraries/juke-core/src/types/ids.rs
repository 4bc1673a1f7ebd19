//! ID types for Juke entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Song identifier, assigned in insertion order by the catalog
pub type SongId = i64;

/// Artist identifier
pub type ArtistId = i64;

/// Album identifier
pub type AlbumId = i64;

/// Genre identifier
pub type GenreId = i64;

/// Opaque session identity supplied by the collaborator layer
///
/// The core assigns it no meaning beyond vote deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identity of one playback attempt
///
/// A fresh token is minted every time output is started. Completion
/// signals carry the token of the attempt that produced them, so a
/// signal from an already-replaced output is recognisable as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaybackToken(u64);

impl PlaybackToken {
    /// Create a token from a generation counter value
    pub fn new(generation: u64) -> Self {
        Self(generation)
    }

    /// Get the generation counter value
    pub fn generation(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlaybackToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_from_string() {
        let id = SessionId::new("sess-123");
        assert_eq!(id.as_str(), "sess-123");
    }

    #[test]
    fn playback_tokens_compare_by_generation() {
        assert_eq!(PlaybackToken::new(3), PlaybackToken::new(3));
        assert_ne!(PlaybackToken::new(3), PlaybackToken::new(4));
    }
}
