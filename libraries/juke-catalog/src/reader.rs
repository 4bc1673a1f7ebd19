//! Metadata reader implementation using lofty

use crate::error::CatalogError;
use juke_core::{MetadataReader, SongMetadata, UNSPECIFIED};
use lofty::TaggedFileExt;
use std::path::Path;

/// Metadata reader using the lofty library
pub struct LoftyMetadataReader;

impl LoftyMetadataReader {
    /// Create a new metadata reader
    pub fn new() -> Self {
        Self
    }

    /// Extract metadata from lofty tag
    fn extract_from_tag(tag: &lofty::Tag) -> SongMetadata {
        let mut metadata = SongMetadata::new();

        for item in tag.items() {
            match item.key() {
                lofty::ItemKey::TrackTitle => {
                    metadata.title = item.value().text().map(|s| s.to_string());
                }
                lofty::ItemKey::TrackArtist => {
                    metadata.artist = item.value().text().map(|s| s.to_string());
                }
                lofty::ItemKey::AlbumTitle => {
                    metadata.album = item.value().text().map(|s| s.to_string());
                }
                lofty::ItemKey::Genre => {
                    metadata.genre = item.value().text().map(|s| s.to_string());
                }
                _ => {}
            }
        }

        metadata
    }
}

impl Default for LoftyMetadataReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataReader for LoftyMetadataReader {
    fn read(&self, path: &Path) -> juke_core::Result<SongMetadata> {
        if !path.exists() {
            return Err(CatalogError::FileNotFound(path.display().to_string()).into());
        }

        let tagged_file = lofty::read_from_path(path)
            .map_err(CatalogError::Parse)
            .map_err(juke_core::JukeError::from)?;

        // Primary tag first, any tag second, empty metadata last
        let metadata = if let Some(primary) = tagged_file.primary_tag() {
            Self::extract_from_tag(primary)
        } else if let Some(first) = tagged_file.tags().first() {
            Self::extract_from_tag(first)
        } else {
            SongMetadata::new()
        };

        Ok(metadata)
    }
}

/// Tag fields after filename-heuristic fallback, ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
}

/// Fill unset tag fields from the file path
///
/// Title falls back to the text after the last "-" of the path (or the
/// bare file name when there is none); artist falls back to the path
/// segment immediately before that "-". Album and genre default to
/// "Unspecified".
pub fn resolve(path: &Path, metadata: SongMetadata) -> ResolvedMetadata {
    let title = metadata
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| title_from_path(path));
    let artist = metadata
        .artist
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| artist_from_path(path));
    let album = metadata
        .album
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| UNSPECIFIED.to_string());
    let genre = metadata
        .genre
        .filter(|g| !g.trim().is_empty())
        .unwrap_or_else(|| UNSPECIFIED.to_string());

    ResolvedMetadata {
        title,
        artist,
        album,
        genre,
    }
}

/// Guess the title from the file path
///
/// Everything after the last "-" when the path contains one, otherwise
/// the bare file name. The extension is stripped either way.
fn title_from_path(path: &Path) -> String {
    let full = path.to_string_lossy();

    let raw = match full.rsplit_once('-') {
        Some((_, after)) => after.to_string(),
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    strip_extension(raw.trim(), path).trim().to_string()
}

/// Guess the artist from the file path
///
/// The segment between the last "/" or "-" preceding the final "-" and
/// that final "-" itself; empty when the path has no "-" at all.
fn artist_from_path(path: &Path) -> String {
    let full = path.to_string_lossy();

    match full.rsplit_once('-') {
        Some((before, _)) => before
            .rsplit(['-', '/'])
            .next()
            .unwrap_or("")
            .trim()
            .to_string(),
        None => String::new(),
    }
}

/// Drop the path's extension suffix from `name`, if present
fn strip_extension<'a>(name: &'a str, path: &Path) -> &'a str {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if let Some(stripped) = name.strip_suffix(ext) {
            return stripped.strip_suffix('.').unwrap_or(stripped);
        }
    }
    name
}
