//! # Question Answering Handlers
//!
//! `/api/ask` answers from the knowledge base; `/api/deepseek` answers from a
//! live web search when the knowledge base has nothing.

use super::{require_question, AppError, AppState};
use crate::types::{AskRequest, AskResponse, WebSearchResponse};
use axum::{extract::State, Json};
use hrqa::{constants::WEB_SEARCH_SOURCE, AnswerError};
use tracing::info;

/// The handler for `POST /api/ask`.
pub async fn ask_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let question = require_question(&payload.question)?;
    info!("Received question: '{}'", question);

    let result = app_state.pipeline.retrieve(question).await?;
    if !result.is_found() {
        return Ok(Json(AskResponse::NotFound {
            not_found: true,
            status: result.status(),
            country: result.country().to_string(),
            answer: String::new(),
            sources: Vec::new(),
        }));
    }

    let answer = app_state
        .answer_generator
        .generate(question, result.contexts())
        .await?;

    Ok(Json(AskResponse::Answered {
        answer,
        sources: result.into_contexts(),
    }))
}

/// The handler for `POST /api/deepseek`.
pub async fn web_search_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<WebSearchResponse>, AppError> {
    let question = require_question(&payload.question)?;
    let web_search = app_state
        .web_search
        .as_ref()
        .ok_or(AppError::WebSearchUnavailable)?;
    info!(
        "Web search for '{}' via '{}'",
        question,
        web_search.provider.name()
    );

    let user_prompt = web_search.user_prompt.replace("{question}", question);
    let timeout = app_state.config.timeouts.generation();
    let answer = tokio::time::timeout(timeout, web_search.provider.generate("", &user_prompt))
        .await
        .map_err(|_| AnswerError::Timeout {
            operation: "web search",
            after: timeout,
        })??;

    Ok(Json(WebSearchResponse {
        answer,
        source: WEB_SEARCH_SOURCE.to_string(),
    }))
}
