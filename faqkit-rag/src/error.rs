//! Error types for the `faqkit-rag` crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the FAQ retrieval pipeline.
#[derive(Debug, Error)]
pub enum RagError {
    /// A document or artifact could not be read or written.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No persisted vector index exists at the given path.
    #[error("vector index not found at {} (build the index first)", path.display())]
    IndexNotFound {
        /// The index directory that was probed.
        path: PathBuf,
    },

    /// The embedding provider call failed.
    #[error("embedding error: {message}")]
    Embedding {
        /// A description of the failure.
        message: String,
    },

    /// The language model call failed or returned unusable output.
    #[error("generation error: {message}")]
    Generation {
        /// A description of the failure.
        message: String,
    },

    /// The persisted index could not be encoded or decoded.
    #[error("index store error: {message}")]
    Store {
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A convenience result type for pipeline operations.
pub type Result<T> = std::result::Result<T, RagError>;
