pub mod anthropic;
pub mod embedding;
pub mod local;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
pub use embedding::generate_embedding;
use std::fmt::Debug;

/// A trait for interacting with a generative answering backend.
///
/// Implementations wrap one chat-completion style API. The retrieval pipeline
/// never sees them; only the answer layer and the web-search endpoint do.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// A short label for logs (e.g. "deepseek", "claude").
    fn name(&self) -> &str;

    /// Generates a response from a given system and user prompt.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
