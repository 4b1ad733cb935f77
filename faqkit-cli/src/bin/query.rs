//! Answer one question against the FAQ index.
//!
//! Prints a JSON object `{user_question, system_answer, chunks_related}`
//! to stdout.

use std::sync::Arc;

use clap::Parser;
use faqkit_rag::{
    AnswerGenerator, OpenAIChatModel, OpenAIEmbeddingProvider, ProviderConfig, QueryPipeline,
    RagConfig, Retriever,
};

/// Answer a question from the indexed FAQ document.
#[derive(Parser)]
#[command(name = "faqkit-query", version)]
struct Cli {
    /// The question to answer.
    question: String,

    /// Number of chunks to retrieve.
    #[arg(long, default_value_t = 3)]
    top_k: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    faqkit_cli::init_tracing();
    let cli: Cli = faqkit_cli::parse_or_usage();

    let config = RagConfig::default();
    let provider = ProviderConfig::from_env()?;
    let embedder = Arc::new(OpenAIEmbeddingProvider::new(&provider)?);
    let chat = Arc::new(OpenAIChatModel::new(&provider)?);

    let retriever = Retriever::open(&config.index_dir, embedder)?;
    let generator = AnswerGenerator::new(chat, &config);
    let pipeline = QueryPipeline::new(retriever, generator);

    let result = pipeline.answer_question(&cli.question, cli.top_k).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
