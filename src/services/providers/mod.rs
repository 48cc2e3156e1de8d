/// Language-model provider abstraction
///
/// Both model operations the service needs (chat completion for the
/// ideal-podcast profile, embeddings for vector queries) sit behind one
/// trait so handlers and tests can swap the backend.
use crate::error::AppResult;

pub mod openai;

pub use openai::OpenAiProvider;

#[async_trait::async_trait]
pub trait ModelProvider: Send + Sync {
    /// Single-shot chat completion at temperature 0.
    ///
    /// Returns the raw assistant text; callers own any JSON parsing.
    async fn complete(&self, prompt: &str) -> AppResult<String>;

    /// Embeds one text into a vector comparable with the precomputed index
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
