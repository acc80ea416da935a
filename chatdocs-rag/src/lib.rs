//! # chatdocs-rag
//!
//! Retrieval core for ChatDocs: turning a document into searchable chunks,
//! embedding them, and finding the most relevant chunks for a query.
//!
//! ## Overview
//!
//! The crate is built around three capability boundaries:
//!
//! - [`Chunker`] — splits a document's page texts into overlapping windows
//! - [`EmbeddingProvider`] — maps text to a fixed-dimension vector
//! - [`VectorStore`] — stores (chunk, vector) pairs and searches by similarity
//!
//! [`RagPipeline`] composes the three: ingestion is chunk → embed → store,
//! retrieval is embed → search. The same provider instance embeds both the
//! indexed chunks and the query, so index and query always live in one
//! embedding space.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chatdocs_rag::{
//!     Document, InMemoryVectorStore, RagConfig, RagPipeline, SlidingWindowChunker,
//! };
//!
//! let config = RagConfig::builder().chunk_size(1000).chunk_overlap(200).top_k(3).build()?;
//! let pipeline = RagPipeline::builder()
//!     .config(config)
//!     .embedding_provider(Arc::new(my_embedder))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .chunker(Arc::new(SlidingWindowChunker::new(1000, 200)))
//!     .build()?;
//!
//! pipeline.create_collection("docs").await?;
//! pipeline.index_document("docs", &document).await?;
//! let results = pipeline.retrieve("docs", "what does the contract say?").await?;
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod inmemory;
#[cfg(feature = "openai")]
pub mod openai;
pub mod pipeline;
pub mod vectorstore;

pub use chunking::{Chunker, SlidingWindowChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Chunk, Document, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use inmemory::InMemoryVectorStore;
#[cfg(feature = "openai")]
pub use openai::OpenAIEmbeddingProvider;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use vectorstore::VectorStore;
