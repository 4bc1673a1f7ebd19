//! Directory scanning and catalog population

use crate::error::{CatalogError, Result};
use crate::index::CatalogIndex;
use crate::reader::resolve;
use juke_core::{JukeError, MetadataReader, SongMetadata};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Cap on files open for tag reading at once
    pub max_open_files: usize,
    /// Indexed-progress events are sent once per this many insertions
    pub progress_batch: usize,
    /// File extensions considered audio, compared case-insensitively
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_open_files: 40,
            progress_batch: 400,
            extensions: vec!["mp3".to_string()],
        }
    }
}

/// Scan progress events
#[derive(Debug, Clone)]
pub enum ScanProgress {
    /// Scan started, file discovery finished
    Started {
        /// Number of candidate audio files found
        total_files: usize,
    },
    /// A batch of songs was indexed
    Indexed {
        /// Songs indexed so far
        songs_indexed: usize,
    },
    /// Scan completed
    Completed {
        /// Final statistics
        stats: ScanStats,
    },
}

/// Statistics from a completed scan
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Candidate audio files discovered on disk
    pub files_discovered: usize,
    /// Songs inserted into the index
    pub songs_indexed: usize,
    /// Files skipped because they could not be read
    pub files_failed: usize,
    /// Per-file failure details
    pub errors: Vec<(PathBuf, String)>,
}

/// Asynchronous catalog scanner
///
/// Walks a directory tree, reads tags concurrently under an open-file
/// throttle, and inserts the results into a shared [`CatalogIndex`].
/// The index mutex is only held for individual insertions, never
/// across an await point.
pub struct Scanner<R: MetadataReader + 'static> {
    reader: Arc<R>,
    index: Arc<Mutex<CatalogIndex>>,
    config: ScanConfig,
}

impl<R: MetadataReader + 'static> Scanner<R> {
    /// Create a scanner with default configuration
    pub fn new(reader: R, index: Arc<Mutex<CatalogIndex>>) -> Self {
        Self::with_config(reader, index, ScanConfig::default())
    }

    /// Create a scanner with custom configuration
    pub fn with_config(reader: R, index: Arc<Mutex<CatalogIndex>>, config: ScanConfig) -> Self {
        Self {
            reader: Arc::new(reader),
            index,
            config,
        }
    }

    /// Scan `root` recursively and index every matching audio file
    ///
    /// Tag reads run concurrently, bounded by
    /// [`ScanConfig::max_open_files`]. Files whose tags cannot be
    /// parsed are still indexed with filename-derived metadata; files
    /// that cannot be opened at all are skipped and recorded in the
    /// returned [`ScanStats`].
    ///
    /// # Errors
    /// Returns an error if `root` does not exist or a worker task
    /// panics.
    pub async fn scan(
        &self,
        root: &Path,
        progress_tx: Option<mpsc::Sender<ScanProgress>>,
    ) -> Result<ScanStats> {
        if !root.exists() {
            return Err(CatalogError::FileNotFound(root.display().to_string()));
        }

        let files = self.discover(root);
        let mut stats = ScanStats {
            files_discovered: files.len(),
            ..Default::default()
        };

        info!(root = %root.display(), files = files.len(), "starting catalog scan");
        send_progress(
            &progress_tx,
            ScanProgress::Started {
                total_files: files.len(),
            },
        )
        .await;

        let semaphore = Arc::new(Semaphore::new(self.config.max_open_files));
        let mut handles = Vec::with_capacity(files.len());

        for path in files {
            let semaphore = Arc::clone(&semaphore);
            let reader = Arc::clone(&self.reader);
            let handle = tokio::spawn(async move {
                // Permit bounds how many files are open at once
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| CatalogError::Task(e.to_string()))?;
                let read_path = path.clone();
                let result = tokio::task::spawn_blocking(move || reader.read(&read_path))
                    .await
                    .map_err(|e| CatalogError::Task(e.to_string()))?;
                Ok::<(PathBuf, juke_core::Result<SongMetadata>), CatalogError>((path, result))
            });
            handles.push(handle);
        }

        let mut since_progress = 0usize;
        for handle in handles {
            let (path, read_result) = handle
                .await
                .map_err(|e| CatalogError::Task(e.to_string()))??;

            let metadata = match read_result {
                Ok(metadata) => metadata,
                Err(JukeError::Io(e)) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable file");
                    stats.files_failed += 1;
                    stats.errors.push((path, e.to_string()));
                    continue;
                }
                Err(e) => {
                    // Unparseable tags still get indexed from the
                    // filename alone
                    debug!(path = %path.display(), error = %e, "falling back to filename metadata");
                    SongMetadata::new()
                }
            };

            let resolved = resolve(&path, metadata);
            {
                let mut index = self.index.lock().unwrap_or_else(|e| e.into_inner());
                index.insert(path, resolved);
            }
            stats.songs_indexed += 1;
            since_progress += 1;

            if since_progress >= self.config.progress_batch {
                since_progress = 0;
                send_progress(
                    &progress_tx,
                    ScanProgress::Indexed {
                        songs_indexed: stats.songs_indexed,
                    },
                )
                .await;
            }
        }

        info!(
            indexed = stats.songs_indexed,
            failed = stats.files_failed,
            "catalog scan complete"
        );
        send_progress(
            &progress_tx,
            ScanProgress::Completed {
                stats: stats.clone(),
            },
        )
        .await;

        Ok(stats)
    }

    /// Walk the tree and collect files with a matching extension
    fn discover(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map_or(false, |ext| {
                        let lower = ext.to_lowercase();
                        self.config.extensions.iter().any(|want| want == &lower)
                    })
            })
            .map(|e| e.into_path())
            .collect()
    }
}

async fn send_progress(tx: &Option<mpsc::Sender<ScanProgress>>, event: ScanProgress) {
    if let Some(tx) = tx {
        // A dropped receiver only means nobody is watching
        let _ = tx.send(event).await;
    }
}
