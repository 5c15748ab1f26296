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
    models::{DeliveryInput, WireInput},
};

/// Register wire stock handler
pub async fn create_wire(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<WireInput>,
) -> Result<impl IntoResponse> {
    let wire = state.ledger.create_wire(input).await?;
    Ok((StatusCode::OK, Json(wire)))
}

pub async fn list_wires(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let wires = state.ledger.list_wires().await?;
    Ok((StatusCode::OK, Json(wires)))
}

/// Record that wire stock was received
pub async fn mark_wire_delivered(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    OptionalJsonBody(delivery): OptionalJsonBody<DeliveryInput>,
) -> Result<impl IntoResponse> {
    let wire = state
        .ledger
        .mark_wire_delivered(id, delivery.delivered_on)
        .await?;
    Ok((StatusCode::OK, Json(wire)))
}
