//! Error types for feed fetching.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid feed url {url}: {detail}")]
    InvalidUrl { url: String, detail: String },
}
