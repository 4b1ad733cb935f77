//! Build the FAQ vector index from the source document.
//!
//! Reads `data/faq_document.txt` and writes the index under
//! `data/vectorstore`, overwriting any prior index there.

use std::sync::Arc;

use clap::Parser;
use faqkit_rag::{IndexBuilder, OpenAIEmbeddingProvider, ProviderConfig, RagConfig};
use tracing::info;

/// Build the FAQ vector index from the source document.
#[derive(Parser)]
#[command(name = "faqkit-build-index", version)]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    faqkit_cli::init_tracing();
    let _cli: Cli = faqkit_cli::parse_or_usage();

    let config = RagConfig::default();
    let provider = ProviderConfig::from_env()?;
    let embedder = Arc::new(OpenAIEmbeddingProvider::new(&provider)?);

    let builder = IndexBuilder::new(config.clone(), embedder);
    let meta = builder.build(&config.document_path, &config.index_dir).await?;

    info!(
        chunks = meta.chunk_count,
        model = %meta.embedding_model,
        dir = %config.index_dir.display(),
        "index build complete"
    );
    Ok(())
}
