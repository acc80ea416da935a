//! Groq chat-completions client.
//!
//! Groq serves an OpenAI-compatible API; this client calls the
//! `/chat/completions` endpoint directly over `reqwest`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{ModelError, Result};
use crate::language_model::LanguageModel;

/// The default Groq API base.
const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// The default chat model.
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// The default sampling temperature. Kept low: answers are meant to stay
/// grounded in the supplied context.
const DEFAULT_TEMPERATURE: f32 = 0.1;

/// A [`LanguageModel`] backed by the Groq chat-completions API.
///
/// # Configuration
///
/// - `model` — defaults to `llama-3.3-70b-versatile`.
/// - `temperature` — defaults to 0.1.
/// - `base_url` — any OpenAI-compatible endpoint via
///   [`with_base_url`](Self::with_base_url).
/// - `api_key` — from the constructor or the `GROQ_API_KEY` environment
///   variable.
///
/// # Example
///
/// ```rust,ignore
/// use chatdocs_model::{GroqClient, LanguageModel};
///
/// let model = GroqClient::new("gsk_...")?;
/// let text = model.generate("Say hello.").await?;
/// ```
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl std::fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl GroqClient {
    /// Create a new client with the given API key and default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ModelError::ConfigError("API key must not be empty".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: GROQ_API_BASE.into(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    /// Create a new client using the `GROQ_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| {
            ModelError::ConfigError("GROQ_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Point the client at a different OpenAI-compatible base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn generation_error(&self, message: impl Into<String>) -> ModelError {
        ModelError::GenerationError { provider: "Groq".into(), message: message.into() }
    }
}

// ── API request/response types ─────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ── LanguageModel implementation ───────────────────────────────────

#[async_trait]
impl LanguageModel for GroqClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(provider = "Groq", model = %self.model, prompt_len = prompt.len(), "generating");

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Groq", error = %e, "request failed");
                self.generation_error(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = "Groq", %status, "API error");
            return Err(self.generation_error(format!("API returned {status}: {detail}")));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(provider = "Groq", error = %e, "failed to parse response");
            self.generation_error(format!("failed to parse response: {e}"))
        })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| self.generation_error("API returned no choices"))
    }

    fn name(&self) -> &str {
        &self.model
    }
}
