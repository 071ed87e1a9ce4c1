//! Account API endpoints

use api_types::user::{LoginUser, RegisterUser, UserView};
use axum::{Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

/// Handle registration requests. Duplicate usernames map to 409.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterUser>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state
        .engine
        .register_user(&payload.username, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserView {
            username: user.username,
            is_admin: user.is_admin,
        }),
    ))
}

/// Verify a credential pair.
///
/// There is no session to establish: authenticated routes take Basic
/// auth on every request. This endpoint lets clients check credentials
/// up front and learn the admin flag.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginUser>,
) -> Result<Json<UserView>, ServerError> {
    let user = state
        .engine
        .verify_credentials(&payload.username, &payload.password)
        .await?;

    Ok(Json(UserView {
        username: user.username,
        is_admin: user.is_admin,
    }))
}
