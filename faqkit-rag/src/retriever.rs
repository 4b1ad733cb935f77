//! Top-k chunk retrieval against a persisted index.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::document::SearchResult;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::index::VectorIndex;

/// Retrieves the most similar stored chunks for a query.
///
/// The index is loaded read-only when the retriever is opened and never
/// mutated afterwards.
pub struct Retriever {
    index: VectorIndex,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("index", &self.index)
            .field("embedder", &self.embedder.model_name())
            .finish()
    }
}

impl Retriever {
    /// Open a retriever over the index persisted under `index_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexNotFound`] if no index has been built at
    /// that path, and [`RagError::Config`] if the index was built with a
    /// different embedding model than the one configured — mixed models
    /// make similarity scores meaningless, so the mismatch is rejected
    /// instead of silently degrading retrieval.
    pub fn open(index_dir: &Path, embedder: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        let index = VectorIndex::load(index_dir)?;

        let stored = &index.meta().embedding_model;
        if stored != embedder.model_name() {
            return Err(RagError::Config(format!(
                "index was built with embedding model '{stored}' but '{}' is configured; \
                 rebuild the index or restore the original EMBEDDING_MODEL",
                embedder.model_name()
            )));
        }

        Ok(Self { index, embedder })
    }

    /// The loaded index.
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// Retrieve the `k` chunks most similar to `query`.
    ///
    /// Returns exactly `min(k, index_size)` results ranked most-similar
    /// first, even if some are poor matches.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        let embedding = self.embedder.embed(query).await?;
        let results = self.index.search(&embedding, k);
        info!(k, result_count = results.len(), "retrieved chunks");
        Ok(results)
    }
}
