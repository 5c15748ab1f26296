use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::{AppState, extract::JsonBody};
use crate::{error::Result, models::OrderInput};

/// Place order handler
pub async fn create_order(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<OrderInput>,
) -> Result<impl IntoResponse> {
    let order = state.ledger.create_order(input).await?;
    Ok((StatusCode::OK, Json(order)))
}

pub async fn list_orders(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let orders = state.ledger.list_orders().await?;
    Ok((StatusCode::OK, Json(orders)))
}
