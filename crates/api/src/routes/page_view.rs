use axum::routing::{get, post};
use axum::Router;

use crate::handlers::page_view;
use crate::state::AppState;

/// Routes mounted at `/page-views`.
///
/// ```text
/// POST /               -> track
/// GET  /top-projects   -> top_projects
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(page_view::track))
        .route("/top-projects", get(page_view::top_projects))
}
