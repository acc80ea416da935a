//! Error types for the `chatdocs-engine` crate.
//!
//! Each variant is scoped to the single request or ingestion that raised
//! it: a failed query never invalidates the active index, and a failed
//! re-ingestion never invalidates the prior one.

use thiserror::Error;

/// Errors that can occur while analyzing or querying a document.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The uploaded document could not be read (corrupt, encrypted, or not
    /// a PDF). Ingestion aborts; the prior index is untouched.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Embedding or storage failed while building the index. The build is
    /// atomic: a partial index is never exposed for search.
    #[error("Indexing error: {0}")]
    Indexing(String),

    /// A query arrived before any document was indexed. Detected before
    /// any embedding or retrieval work begins.
    #[error("no document has been indexed yet")]
    NoDocumentIndexed,

    /// Similarity search failed against the active index.
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// The language model call failed.
    #[error("Generation error: {0}")]
    Generation(String),

    /// Another document analysis is already in flight; only one ingestion
    /// may run at a time.
    #[error("another document analysis is already in progress")]
    IngestInProgress,

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
