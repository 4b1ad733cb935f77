//! Configuration for the pipeline and the model providers.
//!
//! Both structs are loaded once per process invocation and are immutable
//! thereafter. [`ProviderConfig`] comes from the environment;
//! [`RagConfig`] is built in code (or taken as defaults) and validated
//! through its builder.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Default base URL for the OpenAI-compatible provider.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Default chat model for generation and evaluation.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Provider endpoints and model identities, sourced from the environment.
///
/// | Variable | Default |
/// |----------|---------|
/// | `OPENAI_API_KEY` | required |
/// | `OPENAI_BASE_URL` | `https://openrouter.ai/api/v1` |
/// | `EMBEDDING_MODEL` | `text-embedding-3-small` |
/// | `LLM_MODEL` | `gpt-4o-mini` |
///
/// The same embedding configuration must be used at build time and at
/// query time; the index stores the model identity and the retriever
/// rejects a mismatch.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Embedding model name.
    pub embedding_model: String,
    /// Chat model name.
    pub llm_model: String,
}

impl ProviderConfig {
    /// Load the provider configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| RagError::Config("OPENAI_API_KEY environment variable not set".into()))?;

        Ok(Self {
            api_key,
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string()),
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string()),
        })
    }
}

/// Configuration parameters for the retrieval pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Number of characters adjacent chunks share.
    pub chunk_overlap: usize,
    /// Number of chunks to retrieve per query.
    pub top_k: usize,
    /// Sampling temperature for answer generation.
    pub temperature: f32,
    /// Maximum number of tokens generated per answer.
    pub max_tokens: u32,
    /// Sampling temperature for the evaluation judge.
    pub judge_temperature: f32,
    /// Path of the source FAQ document.
    pub document_path: PathBuf,
    /// Directory the vector index is persisted under.
    pub index_dir: PathBuf,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
            top_k: 3,
            temperature: 0.7,
            max_tokens: 500,
            judge_temperature: 0.3,
            document_path: PathBuf::from("data/faq_document.txt"),
            index_dir: PathBuf::from("data/vectorstore"),
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the target chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of chunks retrieved per query.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the sampling temperature for answer generation.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the maximum number of tokens generated per answer.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature for the evaluation judge.
    pub fn judge_temperature(mut self, temperature: f32) -> Self {
        self.config.judge_temperature = temperature;
        self
    }

    /// Set the path of the source FAQ document.
    pub fn document_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.document_path = path.into();
        self
    }

    /// Set the directory the vector index is persisted under.
    pub fn index_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.index_dir = dir.into();
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if:
    /// - `chunk_size == 0`
    /// - `chunk_overlap >= chunk_size`
    /// - `top_k == 0`
    pub fn build(self) -> Result<RagConfig> {
        if self.config.chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}
