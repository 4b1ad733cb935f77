//! LLM-judged answer quality scoring.
//!
//! The evaluator asks a second model to score a question/answer/chunks
//! triple against a fixed rubric and parses the strictly structured
//! response. Evaluation is a best-effort diagnostic: a provider failure
//! or a malformed response never reaches the caller as an error, it
//! becomes an all-zero [`EvaluationResult`] carrying the failure
//! description in `reason`.

use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::config::RagConfig;
use crate::document::EvaluationResult;
use crate::error::{RagError, Result};
use crate::llm::{ChatModel, ChatRequest};

const JUDGE_SYSTEM_INSTRUCTION: &str = "You are an expert RAG evaluator. Return JSON only.";

/// Scores answer quality with a judge model.
pub struct Evaluator {
    chat: Arc<dyn ChatModel>,
    temperature: f32,
}

impl Evaluator {
    /// Create an evaluator using the pipeline's judge temperature.
    pub fn new(chat: Arc<dyn ChatModel>, config: &RagConfig) -> Self {
        Self { chat, temperature: config.judge_temperature }
    }

    /// Score the answer on chunk relevance (0–3), accuracy (0–4), and
    /// completeness (0–3), with an overall score in [0, 10].
    ///
    /// Never fails: any judge error or malformed response yields the
    /// zero-scored sentinel with the failure description in `reason`.
    /// A call is a single attempt.
    pub async fn evaluate(
        &self,
        question: &str,
        answer: &str,
        chunks: &[String],
    ) -> EvaluationResult {
        match self.judge(question, answer, chunks).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "evaluation failed; returning zero scores");
                EvaluationResult::failed(e.to_string())
            }
        }
    }

    async fn judge(&self, question: &str, answer: &str, chunks: &[String]) -> Result<EvaluationResult> {
        let request = ChatRequest {
            system: JUDGE_SYSTEM_INSTRUCTION.to_string(),
            user: rubric_prompt(question, answer, chunks),
            temperature: self.temperature,
            max_tokens: None,
        };

        let raw = self.chat.complete(&request).await?;
        parse_evaluation(&raw)
    }
}

/// Build the scoring rubric prompt.
fn rubric_prompt(question: &str, answer: &str, chunks: &[String]) -> String {
    let chunks_text = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| format!("Chunk {}: {chunk}", i + 1))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Evaluate this answer (0-10):\n\n\
         Question: {question}\n\
         Chunks: {chunks_text}\n\
         Answer: {answer}\n\n\
         Score on:\n\
         1. Chunk Relevance (0-3): Are chunks relevant?\n\
         2. Answer Accuracy (0-4): Is answer correct?\n\
         3. Completeness (0-3): Does it fully answer?\n\n\
         Return JSON: {{\"score\": 0-10, \"chunk_relevance_score\": 0-3, \
         \"answer_accuracy_score\": 0-4, \"completeness_score\": 0-3, \
         \"reason\": \"explanation\"}}"
    )
}

/// The judge's response before clamping. Every field is required; a
/// missing field fails the parse and thereby the whole evaluation.
#[derive(Deserialize)]
struct RawEvaluation {
    score: i64,
    chunk_relevance_score: i64,
    answer_accuracy_score: i64,
    completeness_score: i64,
    reason: String,
}

/// Parse the judge's JSON, tolerating a markdown code fence around it,
/// and clamp every score into its rubric range.
fn parse_evaluation(raw: &str) -> Result<EvaluationResult> {
    let json = strip_code_fence(raw);
    let parsed: RawEvaluation = serde_json::from_str(json).map_err(|e| RagError::Generation {
        message: format!("judge returned malformed JSON: {e}"),
    })?;

    Ok(EvaluationResult {
        score: parsed.score.clamp(0, 10) as u8,
        chunk_relevance_score: parsed.chunk_relevance_score.clamp(0, 3) as u8,
        answer_accuracy_score: parsed.answer_accuracy_score.clamp(0, 4) as u8,
        completeness_score: parsed.completeness_score.clamp(0, 3) as u8,
        reason: parsed.reason,
    })
}

/// Strip a surrounding ``` fence (with optional language tag) if present.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.split_once('\n').map_or(rest, |(_, body)| body);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
