//! End-to-end pipeline tests with mock providers.
//!
//! The embedding provider and the chat model are mocked at their trait
//! seams; everything else (chunking, persistence, retrieval, prompt
//! assembly) runs for real against a temporary directory.

use std::sync::Arc;

use async_trait::async_trait;
use faqkit_rag::{
    AnswerGenerator, ChatModel, ChatRequest, EmbeddingProvider, IndexBuilder, QueryPipeline,
    RagConfig, RagError, Result, Retriever,
};
use tempfile::TempDir;

/// Deterministic text features standing in for a real embedding.
fn feature_vector(text: &str) -> Vec<f32> {
    let len = text.len() as f32;
    let vowels = text.chars().filter(|c| "aeiouAEIOU".contains(*c)).count() as f32;
    let spaces = text.chars().filter(|c| *c == ' ').count() as f32;
    vec![len, vowels, spaces, 1.0]
}

struct MockEmbedder {
    model: &'static str,
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(feature_vector(text))
    }

    fn dimensions(&self) -> usize {
        4
    }

    fn model_name(&self) -> &str {
        self.model
    }
}

struct MockChat {
    reply: &'static str,
}

#[async_trait]
impl ChatModel for MockChat {
    async fn complete(&self, _request: &ChatRequest) -> Result<String> {
        Ok(self.reply.to_string())
    }

    fn name(&self) -> &str {
        "mock-chat"
    }
}

const PTO_DOCUMENT: &str = "Employees may request PTO via the HR portal. Requests should be \
submitted at least two weeks in advance and are approved by the direct manager.\n\n\
Onboarding requires a signed offer letter, a government-issued ID, and completed tax forms. \
New hires receive their equipment on the first day.\n\n\
Payroll is processed on the 25th of each month. Direct deposit is the default payment method \
and payslips are available in the HR portal.";

fn test_config(dir: &TempDir) -> RagConfig {
    RagConfig::builder()
        .chunk_size(500)
        .chunk_overlap(50)
        .document_path(dir.path().join("faq_document.txt"))
        .index_dir(dir.path().join("vectorstore"))
        .build()
        .unwrap()
}

async fn build_index(config: &RagConfig, model: &'static str) {
    std::fs::write(&config.document_path, PTO_DOCUMENT).unwrap();
    let builder = IndexBuilder::new(config.clone(), Arc::new(MockEmbedder { model }));
    let meta = builder.build(&config.document_path, &config.index_dir).await.unwrap();
    assert!(meta.chunk_count >= 1);
    assert_eq!(meta.embedding_model, model);
}

#[tokio::test]
async fn pto_scenario_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    build_index(&config, "mock-embed").await;

    let retriever =
        Retriever::open(&config.index_dir, Arc::new(MockEmbedder { model: "mock-embed" }))
            .unwrap();
    let generator = AnswerGenerator::new(
        Arc::new(MockChat { reply: "Submit a request through the HR portal." }),
        &config,
    );
    let pipeline = QueryPipeline::new(retriever, generator);

    let result = pipeline.answer_question("How do employees request time off?", 3).await.unwrap();
    assert_eq!(result.user_question, "How do employees request time off?");
    assert!(!result.system_answer.is_empty());
    assert!(result.chunks_related.len() <= 3);
    assert!(!result.chunks_related.is_empty());
}

#[tokio::test]
async fn k_equal_to_index_size_returns_every_chunk() {
    let dir = TempDir::new().unwrap();
    // A small budget forces several chunks out of the document.
    let config = RagConfig::builder()
        .chunk_size(120)
        .chunk_overlap(20)
        .document_path(dir.path().join("faq_document.txt"))
        .index_dir(dir.path().join("vectorstore"))
        .build()
        .unwrap();
    build_index(&config, "mock-embed").await;

    let retriever =
        Retriever::open(&config.index_dir, Arc::new(MockEmbedder { model: "mock-embed" }))
            .unwrap();
    let n = retriever.index().len();
    assert!(n > 1);

    let results = retriever.retrieve("payroll", n).await.unwrap();
    assert_eq!(results.len(), n);
}

#[tokio::test]
async fn mismatched_embedding_model_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    build_index(&config, "mock-embed-a").await;

    let err = Retriever::open(&config.index_dir, Arc::new(MockEmbedder { model: "mock-embed-b" }))
        .unwrap_err();
    assert!(matches!(err, RagError::Config(_)), "got {err:?}");
}

#[tokio::test]
async fn missing_index_is_index_not_found() {
    let dir = TempDir::new().unwrap();
    let err = Retriever::open(
        &dir.path().join("never-built"),
        Arc::new(MockEmbedder { model: "mock-embed" }),
    )
    .unwrap_err();
    assert!(matches!(err, RagError::IndexNotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn missing_document_is_io_error() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let builder =
        IndexBuilder::new(config.clone(), Arc::new(MockEmbedder { model: "mock-embed" }));
    let err = builder.build(&config.document_path, &config.index_dir).await.unwrap_err();
    assert!(matches!(err, RagError::Io { .. }), "got {err:?}");
    // No partial artifact is left behind.
    assert!(!config.index_dir.exists());
}

#[tokio::test]
async fn empty_model_output_fails_generation() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    build_index(&config, "mock-embed").await;

    let retriever =
        Retriever::open(&config.index_dir, Arc::new(MockEmbedder { model: "mock-embed" }))
            .unwrap();
    let generator = AnswerGenerator::new(Arc::new(MockChat { reply: "" }), &config);
    let pipeline = QueryPipeline::new(retriever, generator);

    let err = pipeline.answer_question("How does payroll work?", 3).await.unwrap_err();
    assert!(matches!(err, RagError::Generation { .. }), "got {err:?}");
}
