//! Core error types for Juke

use thiserror::Error;

/// Result type alias using `JukeError`
pub type Result<T> = std::result::Result<T, JukeError>;

/// Core error type for Juke
///
/// The per-crate error types bridge into this through `From` impls;
/// variants exist only for the failures the crates actually produce.
#[derive(Error, Debug)]
pub enum JukeError {
    /// Audio output errors
    #[error("Audio error: {0}")]
    Audio(String),

    /// Metadata parsing errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl JukeError {
    /// Create an audio error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_through_question_mark() {
        fn read() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/juke")?)
        }
        assert!(matches!(read(), Err(JukeError::Io(_))));
    }

    #[test]
    fn serde_errors_convert() {
        let err = serde_json::from_str::<i64>("not json").unwrap_err();
        assert!(matches!(JukeError::from(err), JukeError::Serialization(_)));
    }

    #[test]
    fn constructors_produce_matching_variants() {
        assert!(matches!(JukeError::audio("busy"), JukeError::Audio(_)));
        assert!(matches!(
            JukeError::metadata("bad tag"),
            JukeError::Metadata(_)
        ));
    }
}
