//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router is
//! involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use tubelens_api::error::AppError;
use tubelens_core::error::CoreError;
use tubelens_pipeline::error::PipelineError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("no url".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "no url");
}

// ---------------------------------------------------------------------------
// Test: CoreError::MissingColumn maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_column_returns_400() {
    let err = AppError::Core(CoreError::MissingColumn {
        source_name: "totals export",
        column: "Views",
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Missing column: Views in totals export");
}

// ---------------------------------------------------------------------------
// Test: pipeline input and extraction errors keep their messages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pipeline_errors_map_to_status_codes() {
    let (status, json) =
        error_to_response(PipelineError::MissingInput("Invalid path: /x".into()).into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid path: /x");

    let (status, json) =
        error_to_response(PipelineError::NoVideos("https://www.youtube.com/@x/videos".into()).into())
            .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NO_VIDEOS");

    let (status, json) =
        error_to_response(PipelineError::Extraction("exit code 1".into()).into()).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "EXTRACTION_FAILED");
    assert_eq!(json["error"], "Extraction failed: exit code 1");
}

// ---------------------------------------------------------------------------
// Test: opener failures and internal errors map to 500 and are sanitized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn opener_failure_returns_500_and_sanitizes_message() {
    let err = AppError::Pipeline(PipelineError::Open {
        path: "/home/someone/private".into(),
        message: "xdg-open exited with 3".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let (status, json) =
        error_to_response(AppError::InternalError("secret detail".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
