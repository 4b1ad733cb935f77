//! Score the quality of a saved query result with the judge model.
//!
//! Takes the path to a JSON file produced by `faqkit-query` and prints
//! a JSON object `{score, chunk_relevance_score, answer_accuracy_score,
//! completeness_score, reason}` to stdout.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use faqkit_rag::{Evaluator, OpenAIChatModel, ProviderConfig, QueryResult, RagConfig};

/// Score a saved query result with an LLM judge.
#[derive(Parser)]
#[command(name = "faqkit-evaluate", version)]
struct Cli {
    /// Path to a query result JSON file
    /// (`{user_question, system_answer, chunks_related}`).
    result_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    faqkit_cli::init_tracing();
    let cli: Cli = faqkit_cli::parse_or_usage();

    let raw = std::fs::read_to_string(&cli.result_file)
        .with_context(|| format!("failed to read {}", cli.result_file.display()))?;
    let result: QueryResult = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a query result file", cli.result_file.display()))?;

    let config = RagConfig::default();
    let provider = ProviderConfig::from_env()?;
    let chat = Arc::new(OpenAIChatModel::new(&provider)?);
    let evaluator = Evaluator::new(chat, &config);

    let evaluation = evaluator
        .evaluate(&result.user_question, &result.system_answer, &result.chunks_related)
        .await;
    println!("{}", serde_json::to_string_pretty(&evaluation)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_file_is_required() {
        assert!(Cli::try_parse_from(["faqkit-evaluate"]).is_err());
    }
}
