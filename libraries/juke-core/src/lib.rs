//! Juke Core
//!
//! Shared types, traits, and error handling for the Juke jukebox core.
//!
//! This crate defines:
//! - **Domain Types**: `Song`, `Artist`, `Album`, `Genre` and their ids
//! - **Core Traits**: `MetadataReader`, `AudioOutput`
//! - **Error Handling**: Unified `JukeError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use juke_core::types::{Song, SessionId, UNSPECIFIED};
//! use std::path::PathBuf;
//!
//! let song = Song {
//!     id: 1,
//!     path: PathBuf::from("/music/Artist - Title.mp3"),
//!     title: "Title".to_string(),
//!     artist: "Artist".to_string(),
//!     album: UNSPECIFIED.to_string(),
//!     genre: UNSPECIFIED.to_string(),
//! };
//!
//! let session = SessionId::new("cookie-abc123");
//! assert_eq!(song.id, 1);
//! assert_eq!(session.as_str(), "cookie-abc123");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{JukeError, Result};
pub use traits::{AudioOutput, MetadataReader};
pub use types::{
    Album, AlbumId, Artist, ArtistId, Genre, GenreId, PlaybackToken, SessionId, Song, SongId,
    SongMetadata, UNSPECIFIED,
};
