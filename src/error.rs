//! Error types for room conversion and wall annotation

use std::path::PathBuf;
use thiserror::Error;

/// Error raised while converting room images or patching bitsydata.
///
/// Every variant aborts the current run; nothing is retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BitsyError {
    /// An expected frame image does not exist
    #[error("Missing frame image '{}'", path.display())]
    MissingAsset { path: PathBuf },
    /// The raster is not a supported two-tone PNG, or a sample fell outside it
    #[error("Unsupported image '{}': {message}", path.display())]
    ImageFormat { path: PathBuf, message: String },
    /// A tile block in bitsydata text is missing its expected structure
    #[error("Malformed tile record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },
    /// Generic I/O failure on open/read/write
    #[error("Failed to access '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A tile was built with a frame count other than 1 or 2
    #[error("Tile must have 1 or 2 frames, got {0}")]
    InvalidFrameCount(usize),
}

impl BitsyError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess { path: path.into(), source }
    }

    pub(crate) fn image_format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ImageFormat { path: path.into(), message: message.into() }
    }

    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord { line, message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, BitsyError>;
