use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tubelens_core::error::CoreError;
use tubelens_pipeline::error::PipelineError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`PipelineError`] and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tubelens_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An I/O or extraction error from `tubelens_pipeline`.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Pipeline(err) => classify_pipeline_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::MissingColumn { .. } | CoreError::Validation(_) | CoreError::Parse { .. } => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            err.to_string(),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Classify a pipeline error into an HTTP status, error code, and message.
///
/// - Missing or invalid input maps to 400.
/// - A channel without readable videos maps to 404.
/// - Extractor failures map to 502 and keep their message.
/// - Opener and I/O failures map to 500 with a sanitized message.
fn classify_pipeline_error(err: &PipelineError) -> (StatusCode, &'static str, String) {
    match err {
        PipelineError::Core(core) => classify_core_error(core),
        PipelineError::MissingInput(msg) => {
            (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
        }
        PipelineError::NoVideos(_) => (StatusCode::NOT_FOUND, "NO_VIDEOS", err.to_string()),
        PipelineError::Extraction(_) => {
            (StatusCode::BAD_GATEWAY, "EXTRACTION_FAILED", err.to_string())
        }
        PipelineError::Open { .. } | PipelineError::Io(_) => {
            tracing::error!(error = %err, "Pipeline error");
            internal()
        }
    }
}
