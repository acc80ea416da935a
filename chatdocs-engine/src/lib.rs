//! # chatdocs-engine
//!
//! Session orchestration for ChatDocs: upload a PDF, index its contents,
//! and answer natural-language questions from that document's content
//! alone, with the retrieved source chunks returned alongside each answer.
//!
//! ## Overview
//!
//! [`ChatEngine`] wires the retrieval core (`chatdocs-rag`) to the
//! language-model capability (`chatdocs-model`) and the upload boundary:
//!
//! - [`TextExtractor`] / [`PdfExtractor`] — PDF bytes → per-page text
//! - [`ChatEngine::analyze_document`] — extract → chunk → embed → index,
//!   atomically swapping the session's single active index
//! - [`ChatEngine::answer`] — retrieve top chunks, compose a grounded
//!   prompt, and invoke the language model once
//! - [`ChatHistory`] — append-only conversation turns for the display layer
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chatdocs_engine::{ChatEngine, PdfExtractor};
//! use chatdocs_model::GroqClient;
//! use chatdocs_rag::{InMemoryVectorStore, RagConfig, RagPipeline, SlidingWindowChunker};
//!
//! let config = RagConfig::default(); // 1000-char chunks, 200 overlap, top 3
//! let pipeline = RagPipeline::builder()
//!     .config(config.clone())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .chunker(Arc::new(SlidingWindowChunker::new(config.chunk_size, config.chunk_overlap)))
//!     .build()?;
//!
//! let engine = ChatEngine::builder()
//!     .rag_pipeline(Arc::new(pipeline))
//!     .extractor(Arc::new(PdfExtractor::new()))
//!     .language_model(Arc::new(GroqClient::from_env()?))
//!     .build()?;
//!
//! engine.analyze_document("report.pdf", &pdf_bytes).await?;
//! let answer = engine.answer("What does the report conclude?").await?;
//! println!("{}", answer.answer);
//! for chunk in &answer.context {
//!     println!("  source (page {}): {}", chunk.page, chunk.text);
//! }
//! ```

pub mod composer;
pub mod engine;
pub mod error;
pub mod extract;
pub mod history;
pub mod ingest;
pub mod session;

pub use composer::{AnswerComposer, GroundedAnswer};
pub use engine::{ChatEngine, ChatEngineBuilder};
pub use error::{EngineError, Result};
pub use extract::{PdfExtractor, TextExtractor};
pub use history::{ChatHistory, ConversationTurn, Role};
pub use ingest::{IngestStage, IngestState, IngestSummary};
pub use session::{ActiveIndex, IndexSlot};
