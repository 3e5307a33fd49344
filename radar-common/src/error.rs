//! Common error types for the radar tools

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for radar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the radar tools
#[derive(Error, Debug)]
pub enum Error {
    /// Query or connection failure against the staging database
    #[error("Data source error: {0}")]
    DataSource(#[from] sqlx::Error),

    /// Output artifact could not be created, written or committed
    #[error("Failed to write output {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap an I/O failure on the output artifact at `path`
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::OutputWrite {
            path: path.into(),
            source,
        }
    }
}
