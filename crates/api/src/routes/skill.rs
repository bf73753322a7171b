use axum::routing::get;
use axum::Router;

use crate::handlers::skill;
use crate::state::AppState;

/// Routes mounted at `/skills`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(skill::list))
        .route("/featured", get(skill::featured))
}
