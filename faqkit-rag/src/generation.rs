//! Answer generation from retrieved context.

use std::sync::Arc;

use tracing::debug;

use crate::config::RagConfig;
use crate::error::{RagError, Result};
use crate::llm::{ChatModel, ChatRequest};

/// System instruction pinning the model to the provided context.
const SYSTEM_INSTRUCTION: &str = "You are a helpful HR support assistant. \
    Answer the question using only the provided context.";

/// Generates a natural-language answer from a question and its
/// retrieved context chunks.
pub struct AnswerGenerator {
    chat: Arc<dyn ChatModel>,
    temperature: f32,
    max_tokens: u32,
}

impl AnswerGenerator {
    /// Create a generator using the pipeline's sampling parameters.
    pub fn new(chat: Arc<dyn ChatModel>, config: &RagConfig) -> Self {
        Self { chat, temperature: config.temperature, max_tokens: config.max_tokens }
    }

    /// Generate an answer from the question and context chunks.
    ///
    /// Chunks are joined in retrieval order. The answer is not verified
    /// against the context here; the evaluator provides that downstream
    /// check.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Generation`] if the model call fails or the
    /// completion is empty. A call is a single attempt.
    pub async fn generate(&self, question: &str, context_chunks: &[String]) -> Result<String> {
        let request = ChatRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            user: user_prompt(question, context_chunks),
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
        };

        debug!(model = self.chat.name(), chunk_count = context_chunks.len(), "generating answer");
        let answer = self.chat.complete(&request).await?;

        if answer.trim().is_empty() {
            return Err(RagError::Generation { message: "model returned an empty answer".into() });
        }

        Ok(answer)
    }
}

/// Assemble the user message: context block, then the question.
fn user_prompt(question: &str, context_chunks: &[String]) -> String {
    let context = context_chunks.join("\n\n");
    format!("Context: {context}\n\nQuestion: {question}\n\nAnswer:")
}
