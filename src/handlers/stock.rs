use axum::{
    extract::{Json, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};

use super::AppState;
use crate::{
    error::{AppError, Result},
    models::stock::StockQuery,
};

/// Wire supply against coil and order demand for one gauge
pub async fn gauge_stock(
    State(state): State<AppState>,
    query: std::result::Result<Query<StockQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let stock = state.ledger.gauge_stock(query.gauge).await?;
    Ok((StatusCode::OK, Json(stock)))
}
