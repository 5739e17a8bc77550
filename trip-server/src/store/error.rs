//! Transit data store error types.

use std::path::PathBuf;

/// Errors that can occur when loading or querying transit data.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required feed file does not exist
    #[error("missing feed file: {}", .0.display())]
    MissingFile(PathBuf),

    /// Reading or decoding a feed file failed
    #[error("failed to read {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A record was decoded but holds an unusable value
    #[error("invalid data in {file}: {message}")]
    InvalidData { file: String, message: String },

    /// The backing store could not answer a query
    #[error("query failed: {0}")]
    Query(String),
}
