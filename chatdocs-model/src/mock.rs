//! Mock language model for tests and demos.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::language_model::LanguageModel;

/// A deterministic [`LanguageModel`] that returns a canned response and
/// records every prompt it receives.
///
/// # Example
///
/// ```rust,ignore
/// use chatdocs_model::{LanguageModel, MockLlm};
///
/// let llm = MockLlm::new("canned answer");
/// let answer = llm.generate("a prompt").await?;
/// assert_eq!(answer, "canned answer");
/// assert_eq!(llm.prompts(), vec!["a prompt".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct MockLlm {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    /// Create a mock that answers every prompt with `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self { response: response.into(), prompts: Mutex::new(Vec::new()) }
    }

    /// All prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl LanguageModel for MockLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).push(prompt.to_string());
        Ok(self.response.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
