//! Catalog-specific errors

use thiserror::Error;

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog error types
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File or directory not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A scan worker task failed
    #[error("Scan task failed: {0}")]
    Task(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Tag parsing error
    #[error("Tag parsing error: {0}")]
    Parse(#[from] lofty::error::LoftyError),
}

impl From<CatalogError> for juke_core::JukeError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Io(e) => juke_core::JukeError::Io(e),
            other => juke_core::JukeError::metadata(other.to_string()),
        }
    }
}
