use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::db::Ledger;

pub mod coils;
pub mod extract;
pub mod orders;
pub mod stock;
pub mod wires;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
}

impl AppState {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(ledger),
        }
    }
}

/// Build the HTTP surface of the ledger.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(welcome))
        .route("/coils", post(coils::create_coil).get(coils::list_coils))
        .route("/coils/{id}", get(coils::get_coil))
        .route("/coils/{id}/delivered", post(coils::mark_coil_delivered))
        .route("/wires", post(wires::create_wire).get(wires::list_wires))
        .route("/wires/{id}/delivered", post(wires::mark_wire_delivered))
        .route("/orders", post(orders::create_order).get(orders::list_orders))
        .route("/stock", get(stock::gauge_stock))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Coil API" }))
}
