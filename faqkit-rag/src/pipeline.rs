//! Index build and query orchestration.
//!
//! [`IndexBuilder`] runs the build-time flow (read → chunk → embed →
//! persist); [`QueryPipeline`] composes the retriever and the answer
//! generator into the per-question flow. Both fail whole: an error in
//! any step propagates and no partial artifact or result is produced.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::chunking::RecursiveChunker;
use crate::config::RagConfig;
use crate::document::{Document, QueryResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::generation::AnswerGenerator;
use crate::index::{IndexMeta, VectorIndex};
use crate::retriever::Retriever;

/// Below this chunk count the source document is probably too small for
/// meaningful retrieval; the build warns but proceeds.
pub const MIN_RECOMMENDED_CHUNKS: usize = 20;

/// Builds and persists the vector index from a source document.
pub struct IndexBuilder {
    config: RagConfig,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl IndexBuilder {
    /// Create a builder with the given chunking configuration.
    pub fn new(config: RagConfig, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { config, embedder }
    }

    /// Build the index from `document_path` and persist it under
    /// `output_dir`, overwriting any prior index there.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Io`] if the document cannot be read,
    /// [`RagError::Embedding`] if the provider call fails, and
    /// [`RagError::Store`]/[`RagError::Io`] if persisting fails.
    pub async fn build(&self, document_path: &Path, output_dir: &Path) -> Result<IndexMeta> {
        let text = std::fs::read_to_string(document_path)
            .map_err(|source| RagError::Io { path: document_path.to_path_buf(), source })?;
        info!(chars = text.len(), path = %document_path.display(), "loaded document");

        let document = Document::new("faq", text);
        let chunker = RecursiveChunker::new(self.config.chunk_size, self.config.chunk_overlap);
        let mut chunks = chunker.chunk(&document);
        info!(chunk_count = chunks.len(), "split document");

        if chunks.len() < MIN_RECOMMENDED_CHUNKS {
            warn!(
                chunk_count = chunks.len(),
                minimum = MIN_RECOMMENDED_CHUNKS,
                "document produced few chunks; retrieval quality may suffer"
            );
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(RagError::Embedding {
                message: format!(
                    "provider returned {} embeddings for {} chunks",
                    embeddings.len(),
                    chunks.len()
                ),
            });
        }
        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        let index =
            VectorIndex::new(self.embedder.model_name(), self.embedder.dimensions(), chunks);
        index.save(output_dir)?;

        Ok(index.meta().clone())
    }
}

/// Answers questions by composing retrieval and generation.
pub struct QueryPipeline {
    retriever: Retriever,
    generator: AnswerGenerator,
}

impl QueryPipeline {
    /// Create a pipeline from an opened retriever and a generator.
    pub fn new(retriever: Retriever, generator: AnswerGenerator) -> Self {
        Self { retriever, generator }
    }

    /// Answer one question using the `k` most similar chunks.
    ///
    /// Returns the question, the generated answer, and the context
    /// chunks as one atomic result; if retrieval or generation fails the
    /// whole call fails.
    pub async fn answer_question(&self, question: &str, k: usize) -> Result<QueryResult> {
        let results = self.retriever.retrieve(question, k).await?;
        let chunks: Vec<String> = results.into_iter().map(|r| r.chunk.text).collect();

        let answer = self.generator.generate(question, &chunks).await?;
        info!(answer_chars = answer.len(), "answered question");

        Ok(QueryResult {
            user_question: question.to_string(),
            system_answer: answer,
            chunks_related: chunks,
        })
    }
}
