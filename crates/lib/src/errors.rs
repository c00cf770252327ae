use std::time::Duration;
use thiserror::Error;

/// Errors raised while talking to a generative answering backend.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider is not configured: {0}")]
    MissingAiProvider(String),
}

/// Errors raised by a document store client.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to document store: {0}")]
    Request(reqwest::Error),
    #[error("Failed to deserialize document store response: {0}")]
    Deserialization(reqwest::Error),
    #[error("Document store returned an error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Collection '{0}' was not found in the document store")]
    CollectionNotFound(String),
    #[error("Query embedding failed: {0}")]
    Embedding(PromptError),
}

/// The failure kind of the retrieval pipeline.
///
/// Relevance outcomes (`irrelevant`, `no_results`, ...) are returned as data in
/// [`crate::types::RetrievalResult`]; only genuine I/O failures end up here.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Document store error: {0}")]
    Store(#[from] StoreError),
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

/// A [`crate::types::RetrievalConfig`] the pipeline refuses to run with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrievalConfigError {
    #[error("retrieval.top_k must be at least 1")]
    ZeroTopK,
}

/// Errors raised while producing the natural-language answer.
#[derive(Error, Debug)]
pub enum AnswerError {
    #[error("Answer generation failed: {0}")]
    Prompt(#[from] PromptError),
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}
