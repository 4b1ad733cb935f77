//! Data types for documents, chunks, and pipeline results.

use serde::{Deserialize, Serialize};

/// A source document read once at index build time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The UTF-8 text content of the document.
    pub text: String,
}

impl Document {
    /// Create a new document from its identifier and text content.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// A segment of a [`Document`] with its vector embedding.
///
/// Chunks are produced once by the splitter and are immutable afterwards;
/// the embedding is attached during the index build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier, `{document_id}_{chunk_index}`.
    pub id: String,
    /// The ID of the parent [`Document`].
    pub document_id: String,
    /// Position of this chunk within the document's chunk sequence.
    pub chunk_index: usize,
    /// The text content of the chunk.
    pub text: String,
    /// The vector embedding for this chunk's text. Empty until indexed.
    pub embedding: Vec<f32>,
}

/// A retrieved [`Chunk`] paired with a similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The cosine similarity score (higher is more relevant).
    pub score: f32,
}

/// The result of answering one question through the query pipeline.
///
/// Field names are the external JSON contract of the query CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// The question as asked.
    pub user_question: String,
    /// The generated answer.
    pub system_answer: String,
    /// The retrieved context chunks, most similar first.
    pub chunks_related: Vec<String>,
}

/// Quality scores for one question/answer/chunks triple.
///
/// `score` is always within `[0, 10]`; the sub-scores are clamped into
/// their rubric ranges. A failed evaluation is represented by all-zero
/// scores with the failure description in `reason`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationResult {
    /// Overall quality score, 0–10.
    pub score: u8,
    /// Relevance of the retrieved chunks to the question, 0–3.
    pub chunk_relevance_score: u8,
    /// Factual accuracy of the answer against the chunks, 0–4.
    pub answer_accuracy_score: u8,
    /// Whether the answer fully addresses the question, 0–3.
    pub completeness_score: u8,
    /// The judge's explanation, or the failure description.
    pub reason: String,
}

impl EvaluationResult {
    /// The sentinel result for a failed evaluation: all scores zero,
    /// with the failure description in `reason`.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            score: 0,
            chunk_relevance_score: 0,
            answer_accuracy_score: 0,
            completeness_score: 0,
            reason: reason.into(),
        }
    }
}
