//! Language model capability trait.

use async_trait::async_trait;

use crate::error::Result;

/// A language model invoked with a fully composed prompt.
///
/// The contract is one blocking request/response exchange. Implementations
/// add no retries and no timeout; callers impose their own policy around
/// the call.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// A human-readable name for the backing model, used in logs and errors.
    fn name(&self) -> &str;
}
