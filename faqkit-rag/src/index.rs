//! Persisted vector index with cosine-similarity search.
//!
//! The index is a flat chunk list searched by brute force; at FAQ scale
//! there is nothing to gain from an ANN structure. It is written as a
//! single JSON file under the index directory and loaded read-only at
//! query time. The file must round-trip through the same crate version
//! that wrote it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};

/// File name of the persisted index inside the index directory.
pub const INDEX_FILE: &str = "index.json";

/// Identity and shape of a persisted index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexMeta {
    /// The embedding model the chunk vectors were produced with.
    pub embedding_model: String,
    /// Dimensionality of the stored vectors.
    pub dimensions: usize,
    /// Number of chunks in the index.
    pub chunk_count: usize,
}

/// A searchable set of embedded chunks, persisted as one JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorIndex {
    meta: IndexMeta,
    chunks: Vec<Chunk>,
}

impl VectorIndex {
    /// Create an index over embedded chunks, recording the embedding
    /// model identity for the build/query mismatch check.
    pub fn new(embedding_model: impl Into<String>, dimensions: usize, chunks: Vec<Chunk>) -> Self {
        let meta = IndexMeta {
            embedding_model: embedding_model.into(),
            dimensions,
            chunk_count: chunks.len(),
        };
        Self { meta, chunks }
    }

    /// The index metadata.
    pub fn meta(&self) -> &IndexMeta {
        &self.meta
    }

    /// Number of chunks in the index.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Search for the `top_k` chunks most similar to the embedding.
    ///
    /// Returns exactly `min(top_k, len)` results ordered by descending
    /// cosine similarity. No threshold is applied and no duplicates are
    /// removed; poor matches are returned as-is.
    pub fn search(&self, embedding: &[f32], top_k: usize) -> Vec<SearchResult> {
        let mut scored: Vec<SearchResult> = self
            .chunks
            .iter()
            .map(|chunk| SearchResult {
                score: cosine_similarity(&chunk.embedding, embedding),
                chunk: chunk.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        scored
    }

    /// Persist the index under `dir`, creating the directory if absent
    /// and overwriting any prior index.
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)
            .map_err(|source| RagError::Io { path: dir.to_path_buf(), source })?;

        let path = dir.join(INDEX_FILE);
        let bytes = serde_json::to_vec(self)
            .map_err(|e| RagError::Store { message: format!("failed to encode index: {e}") })?;
        std::fs::write(&path, bytes).map_err(|source| RagError::Io { path, source })?;

        info!(chunk_count = self.chunks.len(), dir = %dir.display(), "saved vector index");
        Ok(())
    }

    /// Load a previously persisted index from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexNotFound`] if no index file exists under
    /// `dir`, and [`RagError::Store`] if the file cannot be decoded.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(INDEX_FILE);
        if !path.is_file() {
            return Err(RagError::IndexNotFound { path: dir.to_path_buf() });
        }

        let bytes = std::fs::read(&path).map_err(|source| RagError::Io { path, source })?;
        let index: Self = serde_json::from_slice(&bytes)
            .map_err(|e| RagError::Store { message: format!("failed to decode index: {e}") })?;

        info!(chunk_count = index.chunks.len(), dir = %dir.display(), "loaded vector index");
        Ok(index)
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
