use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid annotation file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Download failed: {0}")]
    Http(String),

    #[error("Could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("No image is open")]
    NoImage,
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<ureq::Error> for StoreError {
    fn from(error: ureq::Error) -> Self {
        StoreError::Http(error.to_string())
    }
}
