//! Retrieves passages for one question from a running Chroma server and
//! prints an extractive answer.
//!
//! ```sh
//! CHROMA_URL=http://localhost:8000 OPENAI_API_KEY=sk-... \
//!     cargo run -p hrqa --example ask -- "巴西的年假是多少天？"
//! ```

use hrqa::{
    constants::{DEFAULT_COLLECTION_NAME, DEFAULT_EMBEDDING_MODEL},
    providers::store::{ChromaStore, EmbeddingSettings},
    terms::TermExtractor,
    AnswerGenerator, JiebaTokenizer, RetrievalConfig, RetrievalPipeline, Tokenizer,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    let Some(question) = args.get(1) else {
        eprintln!("Usage: {} '<question>'", args[0]);
        return Ok(());
    };

    let chroma_url =
        env::var("CHROMA_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let embedding = EmbeddingSettings {
        api_url: env::var("EMBEDDING_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1/embeddings".to_string()),
        model: DEFAULT_EMBEDDING_MODEL.to_string(),
        api_key: env::var("OPENAI_API_KEY").ok(),
    };
    let store = ChromaStore::connect(&chroma_url, DEFAULT_COLLECTION_NAME, embedding).await?;
    let tokenizer: Arc<dyn Tokenizer> = Arc::new(JiebaTokenizer::new());

    let pipeline = RetrievalPipeline::new(
        Arc::new(store),
        tokenizer.clone(),
        RetrievalConfig::default(),
    )?;
    let result = pipeline.retrieve(question).await?;

    println!(
        "--- Status: {} ({}) ---",
        result.status().as_str(),
        result.country()
    );
    if !result.is_found() {
        return Ok(());
    }

    let answer = AnswerGenerator::new(TermExtractor::new(tokenizer))
        .generate(question, result.contexts())
        .await?;
    println!("{answer}");

    Ok(())
}
