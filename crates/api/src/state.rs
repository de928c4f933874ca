use std::sync::Arc;

use tubelens_pipeline::extractor::VideoSource;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, including the analysis output root.
    pub config: Arc<ServerConfig>,
    /// Where channel listings come from (`yt-dlp` in production).
    pub source: Arc<dyn VideoSource>,
}
