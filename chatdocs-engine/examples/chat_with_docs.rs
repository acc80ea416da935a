//! # ChatDocs Demo
//!
//! Walks the full upload → index → ask workflow with deterministic stub
//! capabilities so it runs with **zero API keys**: a plain-text extractor
//! stands in for PDF extraction, a hash-based embedder for the embedding
//! model, and `MockLlm` for the language model.
//!
//! Run: `cargo run --example chat_with_docs`

use std::sync::Arc;

use chatdocs_engine::{ChatEngine, TextExtractor};
use chatdocs_model::MockLlm;
use chatdocs_rag::{
    EmbeddingProvider, InMemoryVectorStore, RagConfig, RagPipeline, SlidingWindowChunker,
};

// ---------------------------------------------------------------------------
// Stub capabilities — deterministic, offline
// ---------------------------------------------------------------------------

/// Treats the uploaded bytes as UTF-8 text and splits pages on form feeds.
struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, data: &[u8]) -> chatdocs_engine::Result<Vec<String>> {
        let text = String::from_utf8_lossy(data);
        Ok(text.split('\u{0c}').map(|page| page.trim().to_string()).collect())
    }
}

/// Deterministic embedding: hash the text bytes, then generate a
/// normalised vector whose direction depends on the content.
struct MockEmbeddingProvider {
    dimensions: usize,
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> chatdocs_rag::Result<Vec<f32>> {
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut emb = vec![0.0f32; self.dimensions];
        for (i, v) in emb.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        // L2-normalise so cosine similarity is just the dot product.
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

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // -- 1. Build the retrieval pipeline ----------------------------------
    // chunk_size=200 keeps chunks small for this demo; overlap=50 ensures
    // context is shared between adjacent chunks; top_k=3 returns the three
    // most relevant chunks per question.
    let config = RagConfig::builder().chunk_size(200).chunk_overlap(50).top_k(3).build()?;
    let pipeline = RagPipeline::builder()
        .config(config)
        .embedding_provider(Arc::new(MockEmbeddingProvider { dimensions: 64 }))
        .vector_store(Arc::new(InMemoryVectorStore::new()))
        .chunker(Arc::new(SlidingWindowChunker::new(200, 50)))
        .build()?;

    // -- 2. Build the engine -----------------------------------------------
    // Swap PlainTextExtractor for PdfExtractor and MockLlm for
    // GroqClient::from_env() to run against real capabilities.
    let engine = ChatEngine::builder()
        .rag_pipeline(Arc::new(pipeline))
        .extractor(Arc::new(PlainTextExtractor))
        .language_model(Arc::new(MockLlm::new(
            "Returns are accepted within 30 days of delivery.",
        )))
        .collection("demo")
        .build()?;

    // -- 3. Upload and analyze a document ----------------------------------
    let upload = "Orders ship within two business days.\n\n\
                  Returns are accepted within 30 days of delivery. Items must \
                  be unused and in their original packaging.\u{0c}\
                  Support is available by email around the clock. Phone support \
                  operates on weekdays from 9am to 5pm.";

    let summary = engine.analyze_document("policy.txt", upload.as_bytes()).await?;
    println!(
        "Indexed {} ({} pages, {} chunks)\n",
        summary.document_id, summary.pages, summary.chunk_count
    );

    // -- 4. Ask questions ---------------------------------------------------
    let questions = ["What is the return policy?", "When does phone support operate?"];

    for question in &questions {
        let answer = engine.answer(question).await?;
        println!("Q: {question}");
        println!("A: {}", answer.answer);
        for (i, chunk) in answer.context.iter().enumerate() {
            let preview: String = chunk.text.chars().take(60).collect();
            println!("   source {} (page {}): {preview}…", i + 1, chunk.page);
        }
        println!();
    }

    // -- 5. The conversation history is kept for display --------------------
    println!("history: {} turns", engine.history().await.len());

    Ok(())
}
