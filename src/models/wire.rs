use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{DeliveryTracked, Record, gauge, non_negative, non_negative_count, timestamp};
use crate::db::schema::WireTable;
use crate::error::Result;

/// Raw wire stock of one gauge.
///
/// `wire_req` is the quantity of wire this intake supplies, in the same unit
/// coils and orders use for their requirement. `delivered` means the stock
/// was physically received from the supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Wire {
    pub id: i64,
    pub sets: i64,
    pub weight: f64,
    pub wire_req: f64,
    pub wire_gauge: f64,
    pub delivered: bool,
    #[serde(default, with = "timestamp")]
    pub delivered_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Record for Wire {
    const TABLE: &'static str = WireTable::TABLE_NAME;
    const LABEL: &'static str = "Wire";
}

impl DeliveryTracked for Wire {
    fn is_delivered(&self) -> bool {
        self.delivered
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireInput {
    pub sets: i64,
    pub weight: f64,
    pub wire_req: f64,
    pub wire_gauge: f64,
}

impl WireInput {
    pub fn validate(&self) -> Result<()> {
        non_negative_count("sets", self.sets)?;
        non_negative("weight", self.weight)?;
        non_negative("wireReq", self.wire_req)?;
        gauge(self.wire_gauge)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn intake_parses_and_validates() {
        let input: WireInput = serde_json::from_value(json!({
            "sets": 4, "weight": 250.0, "wireReq": 240.0, "wireGauge": 1.5
        }))
        .unwrap();
        assert!(input.validate().is_ok());

        let bad = WireInput { wire_gauge: -1.5, ..input };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn delivery_state_is_ignored_at_intake() {
        // Unknown fields are ignored; delivery state always starts pending.
        let input: WireInput = serde_json::from_value(json!({
            "sets": 1, "weight": 1.0, "wireReq": 1.0, "wireGauge": 1.0, "delivered": true
        }))
        .unwrap();
        assert_eq!(input.sets, 1);
    }
}
