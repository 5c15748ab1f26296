use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::{
    AppState,
    extract::{JsonBody, OptionalJsonBody},
};
use crate::{
    error::Result,
    models::{CoilInput, DeliveryInput},
};

/// Create coil handler
pub async fn create_coil(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CoilInput>,
) -> Result<impl IntoResponse> {
    let coil = state.ledger.create_coil(input).await?;
    Ok((StatusCode::OK, Json(coil)))
}

/// List all coils handler
pub async fn list_coils(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let coils = state.ledger.list_coils().await?;
    Ok((StatusCode::OK, Json(coils)))
}

/// Get coil by ID handler
pub async fn get_coil(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let coil = state.ledger.get_coil(id).await?;
    Ok((StatusCode::OK, Json(coil)))
}

/// Hand a coil over to the customer
pub async fn mark_coil_delivered(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    OptionalJsonBody(delivery): OptionalJsonBody<DeliveryInput>,
) -> Result<impl IntoResponse> {
    let coil = state
        .ledger
        .mark_coil_delivered(id, delivery.delivered_on)
        .await?;
    Ok((StatusCode::OK, Json(coil)))
}
