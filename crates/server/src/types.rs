//! Request and response bodies of the HTTP API.

use hrqa::{ContextPassage, RetrievalStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

/// The `/api/ask` body: either a not-found marker the page can explain, or an
/// answer with the passages it was built from.
#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AskResponse {
    NotFound {
        not_found: bool,
        status: RetrievalStatus,
        country: String,
        answer: String,
        sources: Vec<ContextPassage>,
    },
    Answered {
        answer: String,
        sources: Vec<ContextPassage>,
    },
}

#[derive(Debug, Deserialize, Serialize)]
pub struct WebSearchResponse {
    pub answer: String,
    pub source: String,
}
