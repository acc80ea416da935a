//! End-to-end engine behavior with stub capabilities: ingestion lifecycle,
//! single-slot index semantics, and grounded answering.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chatdocs_engine::{
    ChatEngine, EngineError, IngestStage, IngestState, PdfExtractor, Role, TextExtractor,
};
use chatdocs_model::{LanguageModel, MockLlm};
use chatdocs_rag::{
    EmbeddingProvider, InMemoryVectorStore, RagConfig, RagError, RagPipeline,
    SlidingWindowChunker,
};

// ── Stub capabilities ──────────────────────────────────────────────

/// Hands back fixed page texts regardless of the uploaded bytes.
struct PlainTextExtractor {
    pages: Vec<String>,
}

impl PlainTextExtractor {
    fn new(pages: &[&str]) -> Self {
        Self { pages: pages.iter().map(|p| p.to_string()).collect() }
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, _data: &[u8]) -> chatdocs_engine::Result<Vec<String>> {
        Ok(self.pages.clone())
    }
}

/// Extractor whose pages can be swapped between analyze calls.
struct SwappableExtractor {
    pages: std::sync::Mutex<Vec<String>>,
}

impl SwappableExtractor {
    fn new() -> Self {
        Self { pages: std::sync::Mutex::new(Vec::new()) }
    }

    fn set(&self, pages: &[&str]) {
        *self.pages.lock().unwrap() = pages.iter().map(|p| p.to_string()).collect();
    }
}

impl TextExtractor for SwappableExtractor {
    fn extract(&self, _data: &[u8]) -> chatdocs_engine::Result<Vec<String>> {
        Ok(self.pages.lock().unwrap().clone())
    }
}

/// Fails every extraction, as a corrupt upload would.
struct FailingExtractor;

impl TextExtractor for FailingExtractor {
    fn extract(&self, _data: &[u8]) -> chatdocs_engine::Result<Vec<String>> {
        Err(EngineError::Extraction("unreadable document".to_string()))
    }
}

/// Deterministic hash embedder with a call counter, a failure switch, and
/// an optional gate that blocks every embed until released.
struct TestEmbedder {
    dimensions: usize,
    calls: AtomicUsize,
    fail: AtomicBool,
    gate: Option<Arc<tokio::sync::Mutex<()>>>,
}

impl TestEmbedder {
    fn new(dimensions: usize) -> Self {
        Self { dimensions, calls: AtomicUsize::new(0), fail: AtomicBool::new(false), gate: None }
    }

    fn with_gate(mut self, gate: Arc<tokio::sync::Mutex<()>>) -> Self {
        self.gate = Some(gate);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmbeddingProvider for TestEmbedder {
    async fn embed(&self, text: &str) -> chatdocs_rag::Result<Vec<f32>> {
        if let Some(gate) = &self.gate {
            let _released = gate.lock().await;
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(RagError::EmbeddingError {
                provider: "stub".to_string(),
                message: "embedder offline".to_string(),
            });
        }
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut emb = vec![0.0f32; self.dimensions];
        for (i, v) in emb.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            emb.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(emb)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Answers from the `<context>` block alone: reports whether the word
/// "refund" appears in the context it was handed.
struct ContextProbeLlm;

#[async_trait]
impl LanguageModel for ContextProbeLlm {
    async fn generate(&self, prompt: &str) -> chatdocs_model::Result<String> {
        let context = prompt
            .split("<context>")
            .nth(1)
            .and_then(|rest| rest.split("</context>").next())
            .unwrap_or("");
        if context.contains("refund") {
            Ok("The refund window is 30 days.".to_string())
        } else {
            Ok("I don't know: the provided context does not mention that.".to_string())
        }
    }

    fn name(&self) -> &str {
        "context-probe"
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn build_pipeline(embedder: Arc<dyn EmbeddingProvider>) -> Arc<RagPipeline> {
    let config = RagConfig::builder().chunk_size(50).chunk_overlap(10).top_k(3).build().unwrap();
    Arc::new(
        RagPipeline::builder()
            .config(config)
            .embedding_provider(embedder)
            .vector_store(Arc::new(InMemoryVectorStore::new()))
            .chunker(Arc::new(SlidingWindowChunker::new(50, 10)))
            .build()
            .unwrap(),
    )
}

fn build_engine(
    extractor: Arc<dyn TextExtractor>,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LanguageModel>,
) -> ChatEngine {
    ChatEngine::builder()
        .rag_pipeline(build_pipeline(embedder))
        .extractor(extractor)
        .language_model(llm)
        .collection("test")
        .build()
        .unwrap()
}

// ── Query pipeline ─────────────────────────────────────────────────

#[tokio::test]
async fn query_before_any_ingest_is_rejected_without_embedding_work() {
    let embedder = Arc::new(TestEmbedder::new(8));
    let engine = build_engine(
        Arc::new(PlainTextExtractor::new(&["some text"])),
        embedder.clone(),
        Arc::new(MockLlm::new("unused")),
    );

    let err = engine.answer("anything?").await.unwrap_err();
    assert!(matches!(err, EngineError::NoDocumentIndexed));
    assert_eq!(embedder.calls(), 0);
    assert!(engine.history().await.is_empty());
}

#[tokio::test]
async fn analyze_then_answer_returns_grounded_answer_with_sources() {
    let engine = build_engine(
        Arc::new(PlainTextExtractor::new(&["The warranty lasts two years from purchase."])),
        Arc::new(TestEmbedder::new(8)),
        Arc::new(MockLlm::new("Two years.")),
    );

    let summary = engine.analyze_document("manual.pdf", b"raw bytes").await.unwrap();
    assert_eq!(summary.document_id, "manual.pdf");
    assert_eq!(summary.pages, 1);
    assert!(summary.chunk_count > 0);
    assert_eq!(engine.ingest_state().await, IngestState::Ready);

    let answer = engine.answer("How long is the warranty?").await.unwrap();
    assert_eq!(answer.answer, "Two years.");
    assert!(!answer.context.is_empty());
    assert!(answer.context.iter().all(|c| c.document_id == "manual.pdf"));
    assert!(answer.context.iter().all(|c| c.page == 1));
}

#[tokio::test]
async fn small_index_returns_all_available_chunks() {
    // 80 identical chars split as 50 + 40 with overlap 10: exactly 2 chunks.
    let text = "x".repeat(80);
    let engine = build_engine(
        Arc::new(PlainTextExtractor::new(&[&text])),
        Arc::new(TestEmbedder::new(8)),
        Arc::new(MockLlm::new("ok")),
    );

    let summary = engine.analyze_document("doc.pdf", b"bytes").await.unwrap();
    assert_eq!(summary.chunk_count, 2);

    // top_k is 3, index holds 2: both come back, no error, no padding.
    let answer = engine.answer("anything").await.unwrap();
    assert_eq!(answer.context.len(), 2);
}

#[tokio::test]
async fn unanswerable_question_is_reported_as_absent_from_context() {
    let engine = build_engine(
        Arc::new(PlainTextExtractor::new(&[
            "Shipping takes five business days. Support is available around the clock.",
        ])),
        Arc::new(TestEmbedder::new(8)),
        Arc::new(ContextProbeLlm),
    );
    engine.analyze_document("faq.pdf", b"bytes").await.unwrap();

    // The question mentions refunds but the indexed document never does;
    // the probe model only sees the context block, not the question.
    let answer = engine.answer("What is the refund window?").await.unwrap();
    assert!(answer.answer.contains("does not mention"));
}

#[tokio::test]
async fn answerable_question_is_answered_from_context() {
    let engine = build_engine(
        Arc::new(PlainTextExtractor::new(&["Our refund window is 30 days from purchase."])),
        Arc::new(TestEmbedder::new(8)),
        Arc::new(ContextProbeLlm),
    );
    engine.analyze_document("policy.pdf", b"bytes").await.unwrap();

    let answer = engine.answer("What is the refund window?").await.unwrap();
    assert_eq!(answer.answer, "The refund window is 30 days.");
}

#[tokio::test]
async fn prompt_embeds_context_verbatim_and_ends_with_the_question() {
    let llm = Arc::new(MockLlm::new("ok"));
    let engine = build_engine(
        Arc::new(PlainTextExtractor::new(&["The warranty lasts two years."])),
        Arc::new(TestEmbedder::new(8)),
        llm.clone(),
    );
    engine.analyze_document("manual.pdf", b"bytes").await.unwrap();
    engine.answer("How long is the warranty?").await.unwrap();

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert!(prompt.contains("just say that you don't know"));
    assert!(prompt.contains("<context>"));
    assert!(prompt.contains("The warranty lasts two years."));
    assert!(prompt.ends_with("Question: How long is the warranty?"));
}

#[tokio::test]
async fn history_grows_by_one_user_and_one_assistant_turn_per_answer() {
    let engine = build_engine(
        Arc::new(PlainTextExtractor::new(&["Some document text for the index."])),
        Arc::new(TestEmbedder::new(8)),
        Arc::new(MockLlm::new("an answer")),
    );
    engine.analyze_document("doc.pdf", b"bytes").await.unwrap();
    engine.answer("first question?").await.unwrap();

    let history = engine.history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].content, "first question?");
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[1].content, "an answer");
}

// ── Ingestion pipeline ─────────────────────────────────────────────

#[tokio::test]
async fn failed_first_ingestion_leaves_no_index() {
    let embedder = Arc::new(TestEmbedder::new(8));
    embedder.set_failing(true);
    let engine = build_engine(
        Arc::new(PlainTextExtractor::new(&["content that will fail to embed"])),
        embedder,
        Arc::new(MockLlm::new("unused")),
    );

    let err = engine.analyze_document("doc.pdf", b"bytes").await.unwrap_err();
    assert!(matches!(err, EngineError::Indexing(_)));
    assert_eq!(engine.ingest_state().await, IngestState::Failed { stage: IngestStage::Indexing });
    assert!(engine.active_index().await.is_none());

    let err = engine.answer("anything?").await.unwrap_err();
    assert!(matches!(err, EngineError::NoDocumentIndexed));
}

#[tokio::test]
async fn failed_reingestion_keeps_the_prior_index_usable() {
    let embedder = Arc::new(TestEmbedder::new(8));
    let extractor = Arc::new(SwappableExtractor::new());
    extractor.set(&["The first document is about gardening."]);
    let engine = build_engine(extractor.clone(), embedder.clone(), Arc::new(MockLlm::new("ok")));

    engine.analyze_document("first.pdf", b"bytes").await.unwrap();

    extractor.set(&["The second document is about sailing."]);
    embedder.set_failing(true);
    let err = engine.analyze_document("second.pdf", b"bytes").await.unwrap_err();
    assert!(matches!(err, EngineError::Indexing(_)));
    assert_eq!(engine.ingest_state().await, IngestState::Failed { stage: IngestStage::Indexing });

    // The first document's index survived the failed re-ingestion.
    let active = engine.active_index().await.unwrap();
    assert_eq!(active.document_id, "first.pdf");
    assert_eq!(active.generation, 1);

    embedder.set_failing(false);
    let answer = engine.answer("what is it about?").await.unwrap();
    assert!(answer.context.iter().all(|c| c.document_id == "first.pdf"));
}

#[tokio::test]
async fn reanalyzing_replaces_the_previous_index() {
    let extractor = Arc::new(SwappableExtractor::new());
    let pipeline = build_pipeline(Arc::new(TestEmbedder::new(8)));
    let engine = ChatEngine::builder()
        .rag_pipeline(pipeline.clone())
        .extractor(extractor.clone())
        .language_model(Arc::new(MockLlm::new("ok")))
        .collection("test")
        .build()
        .unwrap();

    extractor.set(&["Cats sleep for most of the day."]);
    engine.analyze_document("cats.pdf", b"bytes").await.unwrap();

    extractor.set(&["Rust programs are memory safe."]);
    engine.analyze_document("rust.pdf", b"bytes").await.unwrap();

    let active = engine.active_index().await.unwrap();
    assert_eq!(active.document_id, "rust.pdf");
    assert_eq!(active.generation, 2);
    assert_eq!(active.collection, "test-2");

    // Queries see only the new document.
    let answer = engine.answer("what do you know?").await.unwrap();
    assert!(!answer.context.is_empty());
    assert!(answer.context.iter().all(|c| c.document_id == "rust.pdf"));

    // The displaced collection was dropped from the store.
    assert!(pipeline.retrieve("test-1", "anything").await.is_err());
}

#[tokio::test]
async fn concurrent_ingestion_is_rejected_not_queued() {
    let gate = Arc::new(tokio::sync::Mutex::new(()));
    let embedder = Arc::new(TestEmbedder::new(8).with_gate(gate.clone()));
    let engine = Arc::new(build_engine(
        Arc::new(PlainTextExtractor::new(&["enough text to produce at least one chunk"])),
        embedder,
        Arc::new(MockLlm::new("ok")),
    ));

    let held = gate.lock().await;
    let background = tokio::spawn({
        let engine = engine.clone();
        async move { engine.analyze_document("first.pdf", b"bytes").await }
    });

    // Wait for the background analysis to reach the gated embedding stage.
    tokio::time::timeout(Duration::from_secs(5), async {
        while engine.ingest_state().await != IngestState::Indexing {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("background ingestion never reached the indexing stage");

    let err = engine.analyze_document("second.pdf", b"bytes").await.unwrap_err();
    assert!(matches!(err, EngineError::IngestInProgress));

    drop(held);
    let summary = background.await.unwrap().unwrap();
    assert_eq!(summary.document_id, "first.pdf");
    assert_eq!(engine.ingest_state().await, IngestState::Ready);
}

#[tokio::test]
async fn extraction_failure_reports_its_stage() {
    let engine = build_engine(
        Arc::new(FailingExtractor),
        Arc::new(TestEmbedder::new(8)),
        Arc::new(MockLlm::new("unused")),
    );
    assert_eq!(engine.ingest_state().await, IngestState::Idle);

    let err = engine.analyze_document("broken.pdf", b"bytes").await.unwrap_err();
    assert!(matches!(err, EngineError::Extraction(_)));
    assert_eq!(
        engine.ingest_state().await,
        IngestState::Failed { stage: IngestStage::Extracting }
    );
    assert!(engine.active_index().await.is_none());
}

#[tokio::test]
async fn empty_document_indexes_without_error() {
    let engine = build_engine(
        Arc::new(PlainTextExtractor::new(&[""])),
        Arc::new(TestEmbedder::new(8)),
        Arc::new(MockLlm::new("I don't know.")),
    );

    let summary = engine.analyze_document("blank.pdf", b"bytes").await.unwrap();
    assert_eq!(summary.chunk_count, 0);
    assert_eq!(engine.ingest_state().await, IngestState::Ready);

    // Queries run against the empty index; the model sees no context.
    let answer = engine.answer("what does it say?").await.unwrap();
    assert!(answer.context.is_empty());
    assert_eq!(answer.answer, "I don't know.");
}

// ── Upload boundary ────────────────────────────────────────────────

#[test]
fn pdf_extractor_rejects_non_pdf_bytes() {
    let err = PdfExtractor::new().extract(b"hello, not a pdf").unwrap_err();
    assert!(matches!(err, EngineError::Extraction(_)));
}

#[test]
fn pdf_magic_bytes_are_sniffed() {
    assert!(PdfExtractor::is_pdf(b"%PDF-1.4"));
    assert!(!PdfExtractor::is_pdf(b"Not a PDF"));
    assert!(!PdfExtractor::is_pdf(b"%PD"));
}
