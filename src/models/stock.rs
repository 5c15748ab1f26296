use serde::{Deserialize, Serialize};

/// Wire supply and demand for one gauge, joined across wire, coil and orders
/// by `wireGauge`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeStock {
    pub wire_gauge: f64,
    /// Received wire.
    pub wire_on_hand: f64,
    /// Wire registered but not yet received.
    pub wire_in_transit: f64,
    /// Wire drawn by coils of this gauge.
    pub coil_wire_req: f64,
    /// Wire required by orders of this gauge.
    pub order_wire_req: f64,
    pub available: f64,
}

impl GaugeStock {
    pub fn new(
        wire_gauge: f64,
        wire_on_hand: f64,
        wire_in_transit: f64,
        coil_wire_req: f64,
        order_wire_req: f64,
    ) -> Self {
        Self {
            wire_gauge,
            wire_on_hand,
            wire_in_transit,
            coil_wire_req,
            order_wire_req,
            available: wire_on_hand - coil_wire_req,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub gauge: f64,
}
