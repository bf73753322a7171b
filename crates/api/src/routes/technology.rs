use axum::routing::get;
use axum::Router;

use crate::handlers::technology;
use crate::state::AppState;

/// Routes mounted at `/technologies`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(technology::list))
}
