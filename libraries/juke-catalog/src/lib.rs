//! Juke Catalog
//!
//! Metadata extraction and catalog indexing for the Juke jukebox.
//!
//! The crate walks a music directory, reads tags with [lofty], fills
//! gaps with filename heuristics, and builds a deduplicated in-memory
//! [`CatalogIndex`] of songs, artists, albums, and genres.
//!
//! # Example
//!
//! ```rust,no_run
//! use juke_catalog::{CatalogIndex, LoftyMetadataReader, Scanner};
//! use std::path::Path;
//! use std::sync::{Arc, Mutex};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let index = Arc::new(Mutex::new(CatalogIndex::new()));
//! let scanner = Scanner::new(LoftyMetadataReader::new(), Arc::clone(&index));
//! let stats = scanner.scan(Path::new("/music"), None).await?;
//! println!("indexed {} songs", stats.songs_indexed);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod index;
pub mod reader;
pub mod scanner;

pub use error::{CatalogError, Result};
pub use index::{AlbumQuery, ArtistQuery, CatalogIndex, GenreQuery, SongQuery};
pub use reader::{resolve, LoftyMetadataReader, ResolvedMetadata};
pub use scanner::{ScanConfig, ScanProgress, ScanStats, Scanner};
