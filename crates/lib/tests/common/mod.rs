#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared setup for the library integration tests: tracing, `.env` loading and
//! a pipeline wired to an in-memory store and a fixed tokenizer.

use dotenvy::dotenv;
use hrqa::{RetrievalConfig, RetrievalPipeline};
use hrqa_test_utils::{FixedTokenizer, InMemoryDocumentStore};
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn pipeline(store: &InMemoryDocumentStore, tokenizer: FixedTokenizer) -> RetrievalPipeline {
    pipeline_with_config(store, tokenizer, RetrievalConfig::default())
}

pub fn pipeline_with_config(
    store: &InMemoryDocumentStore,
    tokenizer: FixedTokenizer,
    config: RetrievalConfig,
) -> RetrievalPipeline {
    setup_tracing();
    RetrievalPipeline::new(Arc::new(store.clone()), Arc::new(tokenizer), config)
        .expect("retrieval config should be valid")
}
