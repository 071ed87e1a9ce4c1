//! Basket ranking API endpoint

use api_types::basket::{BasketQuery, UnmatchedPolicy};
use axum::{Extension, Json, extract::State};
use engine::{RankedEstablishment, User};

use crate::{ServerError, server::ServerState};

/// Rank establishments by total cost of a comma-separated shopping list.
pub async fn rank(
    Extension(_user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<BasketQuery>,
) -> Result<Json<Vec<RankedEstablishment>>, ServerError> {
    let items: Vec<&str> = payload
        .items
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();

    let policy = match payload.on_unmatched {
        UnmatchedPolicy::Ignore => engine::UnmatchedPolicy::Ignore,
        UnmatchedPolicy::Reject => engine::UnmatchedPolicy::Reject,
    };

    let ranking = state.engine.rank_establishments(&items, policy).await?;
    Ok(Json(ranking))
}
