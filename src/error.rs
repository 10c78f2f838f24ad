//! Errors for reading article text. Selection itself never fails.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlackoutError {
    /// Failed to read an article file.
    #[error("failed to read article {path}: {source}")]
    ArticleRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read article text from stdin.
    #[error("failed to read article from stdin: {0}")]
    StdinRead(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BlackoutError>;
