//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `hrqa-server`.

pub mod ask;
pub mod general;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use ask::*;
pub use general::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState};

/// Rejects blank questions before they reach the pipeline.
pub(crate) fn require_question(question: &str) -> Result<&str, AppError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("问题不能为空".to_string()));
    }
    Ok(question)
}
