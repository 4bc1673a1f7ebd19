//! Domain types for Juke

mod album;
mod artist;
mod genre;
mod ids;
mod song;

pub use album::Album;
pub use artist::Artist;
pub use genre::Genre;
pub use ids::{AlbumId, ArtistId, GenreId, PlaybackToken, SessionId, SongId};
pub use song::{Song, SongMetadata, UNSPECIFIED};
