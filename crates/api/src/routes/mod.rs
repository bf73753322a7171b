pub mod auth;
pub mod contact;
pub mod health;
pub mod page_view;
pub mod project;
pub mod skill;
pub mod technology;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /health                         service and database health
///
/// /projects                       published projects (GET)
/// /projects/featured              featured projects (GET)
/// /projects/{slug}                project with technologies (GET)
///
/// /skills                         skills with categories (GET)
/// /skills/featured                featured skills by category (GET)
///
/// /technologies                   active technologies by category (GET)
///
/// /contacts                       contact form (POST)
///
/// /page-views                     track a view (POST)
/// /page-views/top-projects        most viewed projects (GET)
///
/// /auth/login                     administrator login (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/projects", project::router())
        .nest("/skills", skill::router())
        .nest("/technologies", technology::router())
        .nest("/contacts", contact::router())
        .nest("/page-views", page_view::router())
        .nest("/auth", auth::router())
}
