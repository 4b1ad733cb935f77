//! # faqkit-rag
//!
//! Retrieval-augmented question answering over a single FAQ document,
//! with an LLM-judged answer evaluator.
//!
//! The pipeline is deliberately small: a recursive chunker splits the
//! document, an OpenAI-compatible provider embeds the chunks, a
//! brute-force cosine index persists them to disk, and each query
//! retrieves the top-k chunks and conditions a chat model's answer on
//! them. A separate judge call scores answer quality on a fixed rubric.
//!
//! ```text
//! build:  document ──▶ chunk ──▶ embed ──▶ VectorIndex ──▶ disk
//! query:  question ──▶ embed ──▶ search ──▶ prompt ──▶ answer
//! judge:  (question, answer, chunks) ──▶ rubric ──▶ scores
//! ```
//!
//! Everything runs sequentially; there is one in-flight provider call
//! at a time and no shared mutable state.

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod eval;
pub mod generation;
pub mod index;
pub mod llm;
pub mod openai;
pub mod pipeline;
pub mod retriever;

pub use chunking::RecursiveChunker;
pub use config::{ProviderConfig, RagConfig};
pub use document::{Chunk, Document, EvaluationResult, QueryResult, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use eval::Evaluator;
pub use generation::AnswerGenerator;
pub use index::{IndexMeta, VectorIndex};
pub use llm::{ChatModel, ChatRequest};
pub use openai::{OpenAIChatModel, OpenAIEmbeddingProvider};
pub use pipeline::{IndexBuilder, QueryPipeline, MIN_RECOMMENDED_CHUNKS};
pub use retriever::Retriever;
