//! Run the query pipeline over the sample question set.
//!
//! Collects one result per question and writes them as a JSON array to
//! `outputs/sample_queries.json`. Fails fast on the first pipeline
//! error; nothing is persisted in that case.

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use faqkit_rag::{
    AnswerGenerator, OpenAIChatModel, OpenAIEmbeddingProvider, ProviderConfig, QueryPipeline,
    QueryResult, RagConfig, Retriever,
};
use tracing::info;

/// Representative questions for the sample artifact.
const SAMPLE_QUESTIONS: [&str; 3] = [
    "How do employees request time off?",
    "What documents are required during the onboarding process?",
    "How does the payroll processing work?",
];

const OUTPUT_PATH: &str = "outputs/sample_queries.json";

/// Run the query pipeline over the sample questions.
#[derive(Parser)]
#[command(name = "faqkit-sample-queries", version)]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    faqkit_cli::init_tracing();
    let _cli: Cli = faqkit_cli::parse_or_usage();

    let config = RagConfig::default();
    let provider = ProviderConfig::from_env()?;
    let embedder = Arc::new(OpenAIEmbeddingProvider::new(&provider)?);
    let chat = Arc::new(OpenAIChatModel::new(&provider)?);

    let retriever = Retriever::open(&config.index_dir, embedder)?;
    let generator = AnswerGenerator::new(chat, &config);
    let pipeline = QueryPipeline::new(retriever, generator);

    let mut results: Vec<QueryResult> = Vec::with_capacity(SAMPLE_QUESTIONS.len());
    for question in SAMPLE_QUESTIONS {
        info!(question, "running sample query");
        results.push(pipeline.answer_question(question, config.top_k).await?);
    }

    let output = Path::new(OUTPUT_PATH);
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, serde_json::to_string_pretty(&results)?)?;

    info!(count = results.len(), path = OUTPUT_PATH, "wrote sample queries");
    Ok(())
}
