//! Playback-specific errors

use thiserror::Error;

/// Result type alias using `PlaybackError`
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Playback error types
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// Audio output device failure
    #[error("Audio output error: {0}")]
    Output(String),
}

impl From<PlaybackError> for juke_core::JukeError {
    fn from(err: PlaybackError) -> Self {
        juke_core::JukeError::audio(err.to_string())
    }
}
