pub mod analysis;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// POST /analyze        -> analysis::analyze (text/event-stream)
/// POST /open-folder    -> analysis::open_folder
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(analysis::router())
}
