use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening or mutating a review session.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The base path chosen by the user does not exist.
    #[error("Base path {path} does not exist")]
    MissingBasePath {
        /// Path that was requested.
        path: PathBuf,
    },
    /// A required dataset folder is absent under the base path.
    #[error("Required folder {path} is missing")]
    MissingFolder {
        /// Folder that was expected.
        path: PathBuf,
    },
    /// The reference folder produced no identifiers.
    #[error("No samples found in {path}")]
    NoSamples {
        /// Reference folder that was listed.
        path: PathBuf,
    },
    /// Reading, writing or listing a file failed.
    #[error("Storage error at {path}: {source}")]
    Storage {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Encoding a captured image failed.
    #[error("Failed to encode image {path}: {source}")]
    Encode {
        /// Destination path of the image.
        path: PathBuf,
        /// Underlying image error.
        source: image::ImageError,
    },
    /// Formatting the flag timestamp failed.
    #[error("Failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

impl ReviewError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}
