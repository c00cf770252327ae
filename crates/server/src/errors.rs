use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hrqa::{AnswerError, PromptError, RetrievalError};
use serde_json::json;
use std::any::Any;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// The request was rejected before reaching the pipeline.
    BadRequest(String),
    /// The document store failed or timed out.
    Retrieval(RetrievalError),
    /// The generative backend failed or timed out.
    Answer(AnswerError),
    /// No web-search provider is configured.
    WebSearchUnavailable,
    /// Unexpected failures, such as a panicking handler.
    Internal(anyhow::Error),
}

impl From<RetrievalError> for AppError {
    fn from(err: RetrievalError) -> Self {
        AppError::Retrieval(err)
    }
}

impl From<AnswerError> for AppError {
    fn from(err: AnswerError) -> Self {
        AppError::Answer(err)
    }
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        AppError::Answer(AnswerError::Prompt(err))
    }
}

fn prompt_error_response(err: &PromptError) -> (StatusCode, String) {
    match err {
        PromptError::MissingAiProvider(_) | PromptError::ReqwestClientBuild(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server is not configured correctly.".to_string(),
        ),
        PromptError::AiRequest(e) => (
            StatusCode::BAD_GATEWAY,
            format!("Request to AI provider failed: {e}"),
        ),
        PromptError::AiDeserialization(e) => (
            StatusCode::BAD_GATEWAY,
            format!("Failed to deserialize AI provider response: {e}"),
        ),
        PromptError::AiApi(e) => (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}")),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Retrieval(err) => {
                error!("RetrievalError: {:?}", err);
                match &err {
                    RetrievalError::Store(e) => {
                        (StatusCode::BAD_GATEWAY, format!("Knowledge base error: {e}"))
                    }
                    RetrievalError::Timeout { .. } => {
                        (StatusCode::GATEWAY_TIMEOUT, err.to_string())
                    }
                }
            }
            AppError::Answer(err) => {
                error!("AnswerError: {:?}", err);
                match &err {
                    AnswerError::Prompt(e) => prompt_error_response(e),
                    AnswerError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, err.to_string()),
                }
            }
            AppError::WebSearchUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Web search is not configured.".to_string(),
            ),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}

/// Turns a handler panic into the same response as [`AppError::Internal`].
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
