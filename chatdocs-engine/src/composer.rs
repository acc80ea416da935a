//! Grounded answer composition.

use std::sync::Arc;

use chatdocs_model::LanguageModel;
use chatdocs_rag::Chunk;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{EngineError, Result};

/// Instruction prefix for the grounded prompt: answer only from the given
/// context, state unknown otherwise, never fabricate.
const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant for question-answering tasks.\n\
Use the following pieces of retrieved context to answer the question.\n\
If the answer is not in the context, just say that you don't know.\n\
Don't try to make up an answer.";

/// An answer together with the chunks it was grounded on.
///
/// The display layer reads `chunk.text` and `chunk.page` from `context`
/// to render source evidence alongside the answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundedAnswer {
    /// The raw model output.
    pub answer: String,
    /// The retrieved chunks handed to the model, in rank order.
    pub context: Vec<Chunk>,
}

/// Composes a grounded prompt from retrieved chunks and invokes the
/// language model exactly once — no retries, no query reformulation.
pub struct AnswerComposer {
    llm: Arc<dyn LanguageModel>,
}

impl AnswerComposer {
    /// Create a composer backed by the given language model.
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    /// Build the single prompt: instruction, delimited context block with
    /// the chunk texts verbatim, then the literal question.
    pub fn build_prompt(query: &str, chunks: &[Chunk]) -> String {
        let context = chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join("\n\n");
        format!("{SYSTEM_INSTRUCTION}\n\n<context>\n{context}\n</context>\n\nQuestion: {query}")
    }

    /// Compose an answer for `query` grounded in `chunks`.
    ///
    /// The input chunks are echoed back as `context` for display.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Generation`] if the model call fails; the
    /// call is not retried.
    pub async fn compose(&self, query: &str, chunks: Vec<Chunk>) -> Result<GroundedAnswer> {
        let prompt = Self::build_prompt(query, &chunks);

        let answer = self.llm.generate(&prompt).await.map_err(|e| {
            error!(model = self.llm.name(), error = %e, "language model call failed");
            EngineError::Generation(format!("{e}"))
        })?;

        info!(model = self.llm.name(), context_chunks = chunks.len(), "composed answer");
        Ok(GroundedAnswer { answer, context: chunks })
    }
}
