//! Core traits for Juke

use crate::error::Result;
use crate::types::{PlaybackToken, SongMetadata};
use std::path::Path;

/// Metadata reader trait
///
/// Implementers extract tag fields from audio files. Fields that a tag
/// does not carry stay `None`; path-based fallbacks are the caller's
/// concern.
pub trait MetadataReader: Send + Sync {
    /// Read metadata from an audio file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn read(&self, path: &Path) -> Result<SongMetadata>;
}

/// Audio output trait
///
/// Abstracts decode + device output behind start/stop semantics. The
/// sequencer needs nothing more from the playback backend.
///
/// # Completion contract
///
/// For every successful `start`, the implementor must deliver exactly
/// one completion signal carrying the same token, whether the track
/// ended naturally, errored mid-stream, or was forced down by `stop`.
/// The sequencer compares tokens and ignores signals from outputs it
/// has already replaced, so late or duplicate deliveries for stale
/// tokens are harmless.
pub trait AudioOutput: Send {
    /// Begin playing the file at `path`, tagging the attempt with `token`
    ///
    /// Any previously started output is expected to be torn down first.
    ///
    /// # Errors
    /// Returns an error if the device or file cannot be opened
    fn start(&mut self, path: &Path, token: PlaybackToken) -> Result<()>;

    /// Force the active output to end
    ///
    /// Must be tolerated when nothing is playing or the active output
    /// already completed; in those cases it does nothing.
    ///
    /// # Errors
    /// Returns an error if the device fails to shut down
    fn stop(&mut self) -> Result<()>;
}
