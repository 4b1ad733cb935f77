//! Chat model trait for text generation.

use async_trait::async_trait;

use crate::error::Result;

/// A single chat completion request: one system instruction, one user
/// message, and bounded sampling parameters.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// The system instruction.
    pub system: String,
    /// The user message.
    pub user: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate; `None` uses the provider default.
    pub max_tokens: Option<u32>,
}

/// A chat model that produces one completion per request.
///
/// Implementations wrap a specific LLM backend. Completions are
/// non-streaming: every caller in this pipeline needs the full text
/// before it can proceed (answer assembly, JSON score parsing).
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Produce a completion for the request.
    ///
    /// A call is a single attempt; callers decide whether to retry.
    async fn complete(&self, request: &ChatRequest) -> Result<String>;

    /// Return the model identifier (e.g. `gpt-4o-mini`).
    fn name(&self) -> &str;
}
