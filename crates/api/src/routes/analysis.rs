use axum::routing::post;
use axum::Router;

use crate::handlers::analysis;
use crate::state::AppState;

/// Channel analysis routes, mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analysis::analyze))
        .route("/open-folder", post(analysis::open_folder))
}
