//! Catalog API endpoints

use api_types::catalog::{AutocompleteParams, PriceNew, ProductSearch};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use engine::{AUTOCOMPLETE_LIMIT, PriceCents, PriceQuote, PriceReceipt, User};

use crate::{ServerError, server::ServerState};

/// Handle requests for recording a new price (admin only).
pub async fn price_new(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<PriceNew>,
) -> Result<(StatusCode, Json<PriceReceipt>), ServerError> {
    let amount: PriceCents = payload.amount.parse().map_err(ServerError::Engine)?;

    let receipt = state
        .engine
        .record_price(&user, &payload.product, &payload.establishment, amount)
        .await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

/// Product-name autocompletion for the search forms.
pub async fn autocomplete(
    Extension(_user): Extension<User>,
    State(state): State<ServerState>,
    Query(params): Query<AutocompleteParams>,
) -> Result<Json<Vec<String>>, ServerError> {
    let suggestions = state.engine.autocomplete(&params.q, AUTOCOMPLETE_LIMIT).await?;
    Ok(Json(suggestions))
}

/// All known product names, alphabetical.
pub async fn list_products(
    Extension(_user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<String>>, ServerError> {
    let names = state.engine.list_products().await?;
    Ok(Json(names))
}

/// Every recorded price for one product, cheapest first.
pub async fn search_product(
    Extension(_user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<ProductSearch>,
) -> Result<Json<Vec<PriceQuote>>, ServerError> {
    let quotes = state.engine.prices_for_product(&payload.name).await?;
    Ok(Json(quotes))
}
