//! # HR Q&A Retrieval Core
//!
//! Answers questions about employment rules in individual countries from a
//! pre-built knowledge base of country guides.
//!
//! The [`RetrievalPipeline`] decides which country a question targets, rejects
//! probes and off-topic questions, and blends keyword scoring with vector
//! search to pick the passages worth answering from. The [`AnswerGenerator`]
//! turns those passages into a formatted answer.

pub mod answer;
pub mod catalog;
pub mod constants;
pub mod country;
pub mod errors;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod relevance;
pub mod retrieval;
pub mod terms;
pub mod tokenizer;
pub mod types;

pub use answer::AnswerGenerator;
pub use errors::{AnswerError, PromptError, RetrievalConfigError, RetrievalError, StoreError};
pub use pipeline::RetrievalPipeline;
pub use providers::{ai::AiProvider, store::DocumentStore};
pub use tokenizer::{JiebaTokenizer, Tokenizer};
pub use types::{ContextPassage, RetrievalConfig, RetrievalResult, RetrievalStatus};
