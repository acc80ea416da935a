//! Data types for documents, chunks, and search results.

use serde::{Deserialize, Serialize};

/// A source document as an ordered sequence of page texts.
///
/// Produced by the upload boundary's text extraction and consumed once by
/// ingestion; no raw document content is retained after the index is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// Extracted text, one entry per page in page order.
    pub pages: Vec<String>,
    /// Optional URI pointing to the original source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
}

/// A contiguous text window of a [`Document`] with its vector embedding.
///
/// Chunks are immutable after creation and owned by the index that holds
/// them. Chunk IDs are generated as `{document_id}_{chunk_index}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk.
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// The vector embedding for this chunk's text. Empty until the
    /// pipeline attaches one.
    pub embedding: Vec<f32>,
    /// 1-based page on which this chunk starts.
    pub page: usize,
    /// Position of the chunk in the document's chunk sequence.
    pub chunk_index: usize,
    /// The ID of the parent [`Document`].
    pub document_id: String,
}

/// A retrieved [`Chunk`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}
