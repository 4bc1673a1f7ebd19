//! In-memory catalog of indexed songs, artists, albums, and genres

use crate::reader::ResolvedMetadata;
use juke_core::{Album, AlbumId, Artist, ArtistId, Genre, GenreId, Song, SongId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Filter for song lookups
///
/// All populated fields must match for a song to be returned. Matches
/// are case-sensitive exact comparisons.
#[derive(Debug, Clone, Default)]
pub struct SongQuery {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub path: Option<PathBuf>,
}

/// Filter for artist lookups
#[derive(Debug, Clone, Default)]
pub struct ArtistQuery {
    pub name: Option<String>,
}

/// Filter for album lookups
#[derive(Debug, Clone, Default)]
pub struct AlbumQuery {
    pub name: Option<String>,
    pub artist: Option<String>,
}

/// Filter for genre lookups
#[derive(Debug, Clone, Default)]
pub struct GenreQuery {
    pub name: Option<String>,
}

/// Deduplicating in-memory index of the music collection
///
/// Entities receive sequential ids starting at 1. Artists and genres
/// are deduplicated by name; albums by (name, artist). Re-inserting a
/// path already in the index returns the existing song id.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    songs: Vec<Song>,
    artists: Vec<Artist>,
    albums: Vec<Album>,
    genres: Vec<Genre>,

    artist_ids: HashMap<String, ArtistId>,
    album_ids: HashMap<(String, String), AlbumId>,
    genre_ids: HashMap<String, GenreId>,
    path_ids: HashMap<PathBuf, SongId>,

    next_song_id: SongId,
    next_artist_id: ArtistId,
    next_album_id: AlbumId,
    next_genre_id: GenreId,
}

impl CatalogIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            next_song_id: 1,
            next_artist_id: 1,
            next_album_id: 1,
            next_genre_id: 1,
            ..Default::default()
        }
    }

    /// Insert a song, deduplicating its artist, album, and genre
    ///
    /// Returns the id assigned to the song, or the existing id when the
    /// path was already indexed.
    pub fn insert(&mut self, path: PathBuf, metadata: ResolvedMetadata) -> SongId {
        if let Some(&existing) = self.path_ids.get(&path) {
            return existing;
        }

        let ResolvedMetadata {
            title,
            artist,
            album,
            genre,
        } = metadata;

        self.intern_artist(&artist);
        self.intern_album(&album, &artist);
        self.intern_genre(&genre);

        let id = self.next_song_id;
        self.next_song_id += 1;

        self.path_ids.insert(path.clone(), id);
        self.songs.push(Song {
            id,
            path,
            title,
            artist,
            album,
            genre,
        });

        id
    }

    fn intern_artist(&mut self, name: &str) -> ArtistId {
        if let Some(&id) = self.artist_ids.get(name) {
            return id;
        }
        let id = self.next_artist_id;
        self.next_artist_id += 1;
        self.artist_ids.insert(name.to_string(), id);
        self.artists.push(Artist {
            id,
            name: name.to_string(),
        });
        id
    }

    fn intern_album(&mut self, name: &str, artist: &str) -> AlbumId {
        let key = (name.to_string(), artist.to_string());
        if let Some(&id) = self.album_ids.get(&key) {
            return id;
        }
        let id = self.next_album_id;
        self.next_album_id += 1;
        self.album_ids.insert(key, id);
        self.albums.push(Album {
            id,
            name: name.to_string(),
            artist: artist.to_string(),
        });
        id
    }

    fn intern_genre(&mut self, name: &str) -> GenreId {
        if let Some(&id) = self.genre_ids.get(name) {
            return id;
        }
        let id = self.next_genre_id;
        self.next_genre_id += 1;
        self.genre_ids.insert(name.to_string(), id);
        self.genres.push(Genre {
            id,
            name: name.to_string(),
        });
        id
    }

    /// Look up a song by id
    pub fn song_by_id(&self, id: SongId) -> Option<Song> {
        self.songs
            .binary_search_by_key(&id, |s| s.id)
            .ok()
            .map(|idx| self.songs[idx].clone())
    }

    /// Look up an artist by id
    pub fn artist_by_id(&self, id: ArtistId) -> Option<Artist> {
        self.artists
            .binary_search_by_key(&id, |a| a.id)
            .ok()
            .map(|idx| self.artists[idx].clone())
    }

    /// Look up an album by id
    pub fn album_by_id(&self, id: AlbumId) -> Option<Album> {
        self.albums
            .binary_search_by_key(&id, |a| a.id)
            .ok()
            .map(|idx| self.albums[idx].clone())
    }

    /// Look up a genre by id
    pub fn genre_by_id(&self, id: GenreId) -> Option<Genre> {
        self.genres
            .binary_search_by_key(&id, |g| g.id)
            .ok()
            .map(|idx| self.genres[idx].clone())
    }

    /// Look up a song by path
    pub fn song_by_path(&self, path: &Path) -> Option<Song> {
        self.path_ids
            .get(path)
            .and_then(|&id| self.song_by_id(id))
    }

    /// All songs matching the query, in insertion order
    pub fn songs_matching(&self, query: &SongQuery) -> Vec<Song> {
        self.songs
            .iter()
            .filter(|s| {
                query.title.as_ref().map_or(true, |t| &s.title == t)
                    && query.artist.as_ref().map_or(true, |a| &s.artist == a)
                    && query.album.as_ref().map_or(true, |a| &s.album == a)
                    && query.genre.as_ref().map_or(true, |g| &s.genre == g)
                    && query.path.as_ref().map_or(true, |p| &s.path == p)
            })
            .cloned()
            .collect()
    }

    /// All artists matching the query, in insertion order
    pub fn artists_matching(&self, query: &ArtistQuery) -> Vec<Artist> {
        self.artists
            .iter()
            .filter(|a| query.name.as_ref().map_or(true, |n| &a.name == n))
            .cloned()
            .collect()
    }

    /// All albums matching the query, in insertion order
    pub fn albums_matching(&self, query: &AlbumQuery) -> Vec<Album> {
        self.albums
            .iter()
            .filter(|a| {
                query.name.as_ref().map_or(true, |n| &a.name == n)
                    && query.artist.as_ref().map_or(true, |ar| &a.artist == ar)
            })
            .cloned()
            .collect()
    }

    /// All genres matching the query, in insertion order
    pub fn genres_matching(&self, query: &GenreQuery) -> Vec<Genre> {
        self.genres
            .iter()
            .filter(|g| query.name.as_ref().map_or(true, |n| &g.name == n))
            .cloned()
            .collect()
    }

    /// Snapshot of all songs
    pub fn songs(&self) -> Vec<Song> {
        self.songs.clone()
    }

    /// Snapshot of all artists
    pub fn artists(&self) -> Vec<Artist> {
        self.artists.clone()
    }

    /// Snapshot of all albums
    pub fn albums(&self) -> Vec<Album> {
        self.albums.clone()
    }

    /// Snapshot of all genres
    pub fn genres(&self) -> Vec<Genre> {
        self.genres.clone()
    }

    /// Number of indexed songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the index holds no songs
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(title: &str, artist: &str, album: &str, genre: &str) -> ResolvedMetadata {
        ResolvedMetadata {
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            genre: genre.to_string(),
        }
    }

    #[test]
    fn ids_start_at_one_and_increment() {
        let mut index = CatalogIndex::new();
        let a = index.insert(
            PathBuf::from("/m/a.mp3"),
            meta("A", "X", "Alb", "Rock"),
        );
        let b = index.insert(
            PathBuf::from("/m/b.mp3"),
            meta("B", "Y", "Alb2", "Jazz"),
        );
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[test]
    fn artists_are_deduplicated_by_name() {
        let mut index = CatalogIndex::new();
        index.insert(PathBuf::from("/m/a.mp3"), meta("A", "X", "Alb", "Rock"));
        index.insert(PathBuf::from("/m/b.mp3"), meta("B", "X", "Alb", "Rock"));
        index.insert(PathBuf::from("/m/c.mp3"), meta("C", "Y", "Alb", "Rock"));
        assert_eq!(index.artists().len(), 2);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn albums_are_deduplicated_per_artist() {
        let mut index = CatalogIndex::new();
        index.insert(PathBuf::from("/m/a.mp3"), meta("A", "X", "Greatest", "Rock"));
        index.insert(PathBuf::from("/m/b.mp3"), meta("B", "Y", "Greatest", "Rock"));
        // Same album name under different artists stays two albums
        assert_eq!(index.albums().len(), 2);
    }

    #[test]
    fn genres_are_deduplicated() {
        let mut index = CatalogIndex::new();
        index.insert(PathBuf::from("/m/a.mp3"), meta("A", "X", "Alb", "Rock"));
        index.insert(PathBuf::from("/m/b.mp3"), meta("B", "Y", "Alb", "Rock"));
        assert_eq!(index.genres().len(), 1);
    }

    #[test]
    fn reinserting_same_path_returns_existing_id() {
        let mut index = CatalogIndex::new();
        let first = index.insert(PathBuf::from("/m/a.mp3"), meta("A", "X", "Alb", "Rock"));
        let again = index.insert(PathBuf::from("/m/a.mp3"), meta("A2", "X2", "Alb2", "Pop"));
        assert_eq!(first, again);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn song_lookup_by_id() {
        let mut index = CatalogIndex::new();
        index.insert(PathBuf::from("/m/a.mp3"), meta("A", "X", "Alb", "Rock"));
        let id = index.insert(PathBuf::from("/m/b.mp3"), meta("B", "Y", "Alb", "Rock"));
        let song = index.song_by_id(id).unwrap();
        assert_eq!(song.title, "B");
        assert!(index.song_by_id(99).is_none());
    }

    #[test]
    fn entity_lookups_by_id() {
        let mut index = CatalogIndex::new();
        index.insert(PathBuf::from("/m/a.mp3"), meta("A", "X", "Alb", "Rock"));

        assert_eq!(index.artist_by_id(1).map(|a| a.name), Some("X".to_string()));
        assert_eq!(
            index.album_by_id(1).map(|a| a.name),
            Some("Alb".to_string())
        );
        assert_eq!(
            index.genre_by_id(1).map(|g| g.name),
            Some("Rock".to_string())
        );
        assert!(index.artist_by_id(2).is_none());
    }

    #[test]
    fn query_matches_all_populated_fields() {
        let mut index = CatalogIndex::new();
        index.insert(PathBuf::from("/m/a.mp3"), meta("A", "X", "Alb", "Rock"));
        index.insert(PathBuf::from("/m/b.mp3"), meta("B", "X", "Alb", "Jazz"));
        index.insert(PathBuf::from("/m/c.mp3"), meta("C", "Y", "Alb", "Rock"));

        let by_artist = index.songs_matching(&SongQuery {
            artist: Some("X".to_string()),
            ..Default::default()
        });
        assert_eq!(by_artist.len(), 2);

        let by_artist_and_genre = index.songs_matching(&SongQuery {
            artist: Some("X".to_string()),
            genre: Some("Rock".to_string()),
            ..Default::default()
        });
        assert_eq!(by_artist_and_genre.len(), 1);
        assert_eq!(by_artist_and_genre[0].title, "A");

        let empty = index.songs_matching(&SongQuery::default());
        assert_eq!(empty.len(), 3);
    }

    #[test]
    fn album_query_filters_by_artist() {
        let mut index = CatalogIndex::new();
        index.insert(PathBuf::from("/m/a.mp3"), meta("A", "X", "Greatest", "Rock"));
        index.insert(PathBuf::from("/m/b.mp3"), meta("B", "Y", "Greatest", "Rock"));

        let albums = index.albums_matching(&AlbumQuery {
            name: Some("Greatest".to_string()),
            artist: Some("Y".to_string()),
        });
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].artist, "Y");
    }
}
