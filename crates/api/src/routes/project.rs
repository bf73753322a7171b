use axum::routing::get;
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET /            -> list
/// GET /featured    -> featured
/// GET /{slug}      -> get_by_slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list))
        .route("/featured", get(project::featured))
        .route("/{slug}", get(project::get_by_slug))
}
