//! The ChatDocs session engine.
//!
//! [`ChatEngine`] owns one logical session: a single active document index
//! and the conversation around it. `analyze_document` runs the blocking,
//! one-shot ingestion pipeline; `answer` runs the query pipeline against
//! whatever index is active.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chatdocs_model::LanguageModel;
use chatdocs_rag::{Document, RagPipeline};
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use crate::composer::{AnswerComposer, GroundedAnswer};
use crate::error::{EngineError, Result};
use crate::extract::TextExtractor;
use crate::history::{ChatHistory, ConversationTurn, Role};
use crate::ingest::{IngestStage, IngestState, IngestSummary};
use crate::session::{ActiveIndex, IndexSlot};

/// Default base name for vector store collections.
const DEFAULT_COLLECTION: &str = "chatdocs";

/// One logical session: upload → index → grounded Q&A.
///
/// Construct one via [`ChatEngine::builder()`].
pub struct ChatEngine {
    pipeline: Arc<RagPipeline>,
    extractor: Arc<dyn TextExtractor>,
    composer: AnswerComposer,
    collection_base: String,
    slot: IndexSlot,
    ingest_gate: Mutex<()>,
    state: RwLock<IngestState>,
    history: RwLock<ChatHistory>,
    generation: AtomicU64,
}

impl ChatEngine {
    /// Create a new [`ChatEngineBuilder`].
    pub fn builder() -> ChatEngineBuilder {
        ChatEngineBuilder::default()
    }

    /// Analyze an uploaded document: extract → chunk → embed → index.
    ///
    /// Blocking and one-shot: the call returns only once the new index is
    /// active or the pipeline has failed. On success the previous index
    /// (if any) is discarded in favor of the new one; on failure at any
    /// stage the previous index stays usable. A second analysis arriving
    /// while one is in flight is rejected with
    /// [`EngineError::IngestInProgress`].
    ///
    /// A `chunk_count` of zero in the returned summary signals a document
    /// with no extractable text — a non-fatal condition.
    pub async fn analyze_document(&self, name: &str, data: &[u8]) -> Result<IngestSummary> {
        let _gate = self.ingest_gate.try_lock().map_err(|_| EngineError::IngestInProgress)?;

        self.set_state(IngestState::Extracting).await;
        info!(document = name, bytes = data.len(), "analyzing document");

        let pages = match self.extractor.extract(data) {
            Ok(pages) => pages,
            Err(e) => return self.fail(IngestStage::Extracting, e).await,
        };
        info!(document = name, page_count = pages.len(), "extracted document text");

        self.set_state(IngestState::Chunking).await;
        let document = Document { id: name.to_string(), pages, source_uri: None };
        let page_count = document.pages.len();
        let chunks = self.pipeline.chunk_document(&document);
        if chunks.is_empty() {
            warn!(document = name, "document has no extractable text");
        }

        self.set_state(IngestState::Indexing).await;
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let collection = format!("{}-{generation}", self.collection_base);

        if let Err(e) = self.pipeline.create_collection(&collection).await {
            return self.fail(IngestStage::Indexing, EngineError::Indexing(format!("{e}"))).await;
        }

        let chunks = match self.pipeline.index_chunks(&collection, chunks).await {
            Ok(chunks) => chunks,
            Err(e) => {
                // Tear down the staging collection; the previously active
                // index is untouched.
                if let Err(cleanup) = self.pipeline.delete_collection(&collection).await {
                    warn!(%collection, error = %cleanup, "failed to drop staging collection");
                }
                return self
                    .fail(IngestStage::Indexing, EngineError::Indexing(format!("{e}")))
                    .await;
            }
        };

        let displaced = self
            .slot
            .swap(ActiveIndex {
                collection: collection.clone(),
                generation,
                document_id: document.id.clone(),
                chunk_count: chunks.len(),
            })
            .await;
        self.set_state(IngestState::Ready).await;
        info!(document = name, %collection, chunk_count = chunks.len(), "document indexed");

        if let Some(old) = displaced {
            if let Err(e) = self.pipeline.delete_collection(&old.collection).await {
                warn!(collection = %old.collection, error = %e, "failed to drop displaced collection");
            }
        }

        Ok(IngestSummary {
            document_id: document.id,
            pages: page_count,
            chunk_count: chunks.len(),
            collection,
        })
    }

    /// Answer a question from the active document's content alone.
    ///
    /// Fails with [`EngineError::NoDocumentIndexed`] before any embedding
    /// or retrieval work if no index is active. Retrieval runs under the
    /// slot's read guard, so a concurrent re-ingestion swap lands either
    /// before or after the query, never mid-flight.
    pub async fn answer(&self, query: &str) -> Result<GroundedAnswer> {
        let guard = self.slot.read().await;
        let Some(active) = guard.as_ref() else {
            return Err(EngineError::NoDocumentIndexed);
        };

        self.history.write().await.push(Role::User, query);

        let results = self.pipeline.retrieve(&active.collection, query).await.map_err(|e| {
            error!(collection = %active.collection, error = %e, "retrieval failed");
            EngineError::Retrieval(format!("{e}"))
        })?;
        drop(guard);

        let chunks: Vec<_> = results.into_iter().map(|r| r.chunk).collect();
        let answer = self.composer.compose(query, chunks).await?;

        self.history.write().await.push(Role::Assistant, answer.answer.clone());
        Ok(answer)
    }

    /// Current state of the ingestion pipeline.
    pub async fn ingest_state(&self) -> IngestState {
        *self.state.read().await
    }

    /// Snapshot of the active index, if any.
    pub async fn active_index(&self) -> Option<ActiveIndex> {
        self.slot.current().await
    }

    /// The conversation so far, in append order.
    pub async fn history(&self) -> Vec<ConversationTurn> {
        self.history.read().await.turns().to_vec()
    }

    async fn set_state(&self, next: IngestState) {
        *self.state.write().await = next;
    }

    async fn fail<T>(&self, stage: IngestStage, err: EngineError) -> Result<T> {
        error!(%stage, error = %err, "document analysis failed");
        self.set_state(IngestState::Failed { stage }).await;
        Err(err)
    }
}

/// Builder for constructing a [`ChatEngine`].
///
/// The pipeline, extractor, and language model are required; the
/// collection base name defaults to `chatdocs`.
#[derive(Default)]
pub struct ChatEngineBuilder {
    pipeline: Option<Arc<RagPipeline>>,
    extractor: Option<Arc<dyn TextExtractor>>,
    language_model: Option<Arc<dyn LanguageModel>>,
    collection: Option<String>,
}

impl ChatEngineBuilder {
    /// Set the retrieval pipeline.
    pub fn rag_pipeline(mut self, pipeline: Arc<RagPipeline>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Set the document text extractor.
    pub fn extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Set the language model used for answer composition.
    pub fn language_model(mut self, llm: Arc<dyn LanguageModel>) -> Self {
        self.language_model = Some(llm);
        self
    }

    /// Set the base name for vector store collections; each analysis
    /// appends its generation number to it.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection = Some(name.into());
        self
    }

    /// Build the [`ChatEngine`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if any required field is missing.
    pub fn build(self) -> Result<ChatEngine> {
        let pipeline = self
            .pipeline
            .ok_or_else(|| EngineError::Config("rag_pipeline is required".to_string()))?;
        let extractor = self
            .extractor
            .ok_or_else(|| EngineError::Config("extractor is required".to_string()))?;
        let language_model = self
            .language_model
            .ok_or_else(|| EngineError::Config("language_model is required".to_string()))?;

        Ok(ChatEngine {
            pipeline,
            extractor,
            composer: AnswerComposer::new(language_model),
            collection_base: self.collection.unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            slot: IndexSlot::new(),
            ingest_gate: Mutex::new(()),
            state: RwLock::new(IngestState::Idle),
            history: RwLock::new(ChatHistory::new()),
            generation: AtomicU64::new(0),
        })
    }
}
