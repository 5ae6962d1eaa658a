//! Error types for the image compressor.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.
//! Only [`ValidationError`] and [`OptimizerError::NoImagesFound`] ever abort a batch;
//! everything else is contained per file and rendered into the result's `reason`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Pre-flight validation errors. A batch never starts when one of these is raised.
#[derive(Error, Debug, Serialize, PartialEq)]
pub enum ValidationError {
    /// No destination folder was given
    #[error("Destination path is required")]
    MissingDestination,
    /// Neither a source folder nor an explicit file list was given
    #[error("Either source path or files array is required")]
    NoSource,
    /// Target format outside the supported set
    #[error("Unsupported target format: {0}")]
    UnsupportedFormat(String),
    /// Maximum size outside the accepted bounds
    #[error("Maximum size must be between 10 and 10000 KB (got {0})")]
    SizeOutOfRange(u32),
    /// Path-related validation error
    #[error("Path error: {0}")]
    Path(#[from] PathError),
}

/// File path errors.
#[derive(Error, Debug, Serialize, PartialEq)]
pub enum PathError {
    /// Path does not exist
    #[error("Not found: {0}")]
    NotFound(PathBuf),
    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotDirectory(PathBuf),
    /// IO error accessing the path
    #[error("IO error: {0}")]
    IO(String),
}

/// Main error type for the compressor.
///
/// All errors are converted to this type before being returned to the caller.
#[derive(Error, Debug, Serialize)]
pub enum OptimizerError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Enumeration produced no candidate files
    #[error("No supported image files found in {0}")]
    NoImagesFound(PathBuf),

    /// Target format the codec cannot produce
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Input bytes could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Encoder rejected the image or its options
    #[error("Encode error: {0}")]
    Encode(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Blocking work failed outside the codec (e.g. a panicked task)
    #[error("Processing error: {0}")]
    Processing(String),
}

/// Convenience result type for compressor operations.
pub type OptimizerResult<T> = Result<T, OptimizerError>;

// Helper methods for error creation
impl OptimizerError {
    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }

    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }

    pub fn unsupported_format<T: Into<String>>(msg: T) -> Self {
        Self::UnsupportedFormat(msg.into())
    }
}

// Helper methods for validation error creation
impl ValidationError {
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotFound(path.into()))
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotDirectory(path.into()))
    }
}

// Convert std::io::Error to OptimizerError
impl From<io::Error> for OptimizerError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert io::Error to PathError
impl From<io::Error> for PathError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert PathError to OptimizerError
impl From<PathError> for OptimizerError {
    fn from(err: PathError) -> Self {
        Self::Validation(ValidationError::Path(err))
    }
}
