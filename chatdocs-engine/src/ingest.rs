//! Ingestion lifecycle types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The pipeline stage in which work (or a failure) occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngestStage {
    /// Converting document bytes to per-page text.
    Extracting,
    /// Splitting page texts into chunks.
    Chunking,
    /// Embedding chunks and writing them to the vector store.
    Indexing,
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestStage::Extracting => f.write_str("extracting"),
            IngestStage::Chunking => f.write_str("chunking"),
            IngestStage::Indexing => f.write_str("indexing"),
        }
    }
}

/// Observable state of the ingestion pipeline.
///
/// `Idle -> Extracting -> Chunking -> Indexing -> Ready`, with `Failed`
/// reachable from any non-terminal state. The display layer polls this
/// for its in-progress indicator. A `Failed` state describes the last
/// analysis attempt only; it never invalidates a previously built index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngestState {
    /// No analysis has been requested yet.
    Idle,
    /// Extracting text from the uploaded bytes.
    Extracting,
    /// Chunking the extracted text.
    Chunking,
    /// Embedding chunks and building the index.
    Indexing,
    /// The most recent analysis completed and its index is active.
    Ready,
    /// The most recent analysis failed at the given stage.
    Failed {
        /// The stage that raised the failure.
        stage: IngestStage,
    },
}

/// Outcome of a completed document analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSummary {
    /// Identifier of the ingested document.
    pub document_id: String,
    /// Number of pages of extracted text.
    pub pages: usize,
    /// Number of chunks built and indexed. Zero signals a document with
    /// no extractable text — a non-fatal condition.
    pub chunk_count: usize,
    /// Collection the chunks were written to.
    pub collection: String,
}
