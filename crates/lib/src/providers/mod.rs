//! Integrations with external services: generative backends, embeddings and
//! the document store.

pub mod ai;
pub mod store;
