//! Handler for administrator login.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use folio_db::Record;

use crate::error::AppResult;
use crate::response::Envelope;
use crate::state::AppState;

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// POST /api/auth/login
///
/// Returns the user without its password hash.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<Envelope<Record>>> {
    input.validate()?;

    let user = state
        .repos
        .users
        .verify_password(&input.email, &input.password)
        .await
        .inspect_err(|e| tracing::info!(reason = %e, "Login rejected"))?;

    tracing::info!(user_id = ?user.get("id"), "User logged in");
    Ok(Json(Envelope::ok(user)))
}
