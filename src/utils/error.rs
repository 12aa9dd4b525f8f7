use crate::core::drag_drop::ListId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to enumerate {path}: {source}")]
    EnumerationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Index {index} out of range for {list} list (len {len})")]
    InvalidIndex { list: ListId, index: usize, len: usize },

    #[error("Drag payload is stale: {list} list changed at index {index}")]
    StalePayload { list: ListId, index: usize },

    #[error("Logging error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
