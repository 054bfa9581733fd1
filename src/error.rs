/// Error types for the photo gallery
///
/// Every fallible operation in the crate returns `error::Result`.
/// The navigation core itself never fails; errors only come from
/// building a gallery (loading manifests, scanning folders) and from
/// the presentation support code (settings, thumbnails).
use std::path::PathBuf;

use thiserror::Error;

use crate::state::data::PhotoId;

#[derive(Debug, Error)]
pub enum Error {
    /// A gallery must contain at least one photo
    #[error("gallery contains no photos")]
    EmptyGallery,

    /// Two photos in the same gallery share an id
    #[error("duplicate photo id {0}")]
    DuplicatePhotoId(PhotoId),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The gallery manifest is not valid JSON or misses required fields
    #[error("invalid gallery manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings: {0}")]
    Settings(#[source] serde_json::Error),

    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    /// A background task panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(String),

    #[error("invalid arguments: {0}")]
    Args(String),
}

impl Error {
    /// Wrap an I/O error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Args(err.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
