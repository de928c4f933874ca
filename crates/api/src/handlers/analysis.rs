//! Handlers for running a channel analysis and opening its results.

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tubelens_core::event::PipelineEvent;
use tubelens_pipeline::channel_run::{run_channel_analysis, ChannelRun};
use tubelens_pipeline::events::EventSink;
use tubelens_pipeline::opener;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub channel_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OpenFolderRequest {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OpenFolderResponse {
    pub success: bool,
}

/// Serialize one pipeline event as the `data` of a server-sent event.
pub fn sse_event(event: &PipelineEvent) -> Result<Event, axum::Error> {
    Event::default().json_data(event)
}

/// POST /api/analyze
///
/// Starts an analysis in a background task and streams its events. The
/// stream ends after the terminal `complete` or `error` event, when the
/// task drops its sink.
pub async fn analyze(
    State(state): State<AppState>,
    Json(input): Json<AnalyzeRequest>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, axum::Error>>>> {
    let channel_url = input
        .channel_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::BadRequest("Channel URL is required".to_string()))?;

    let run = ChannelRun::new(
        channel_url,
        &state.config.analyzer.output_root,
        chrono::Utc::now(),
    )?;
    tracing::info!(
        channel = %run.channel_name,
        output_dir = %run.output_dir.display(),
        "Starting channel analysis"
    );

    let (sink, receiver) = EventSink::channel();
    let source = Arc::clone(&state.source);
    tokio::spawn(async move {
        // Failures reach the client as the terminal `error` event.
        let _ = run_channel_analysis(source.as_ref(), &run, &sink).await;
    });

    let stream = UnboundedReceiverStream::new(receiver).map(|event| sse_event(&event));
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// POST /api/open-folder
///
/// Opens an existing directory in the platform file manager.
pub async fn open_folder(Json(input): Json<OpenFolderRequest>) -> AppResult<Json<OpenFolderResponse>> {
    let path = input
        .path
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Path is required".to_string()))?;

    opener::open_folder(Path::new(&path)).await?;

    Ok(Json(OpenFolderResponse { success: true }))
}
