use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Record, gauge, non_blank, non_negative, non_negative_count, timestamp};
use crate::db::schema::OrdersTable;
use crate::error::Result;

/// A customer request, immutable once placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub coil_name: Option<String>,
    pub sets: i64,
    pub weight: f64,
    pub wire_req: f64,
    pub wire_gauge: f64,
    #[serde(default, with = "timestamp")]
    pub to_deliver_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Record for Order {
    const TABLE: &'static str = OrdersTable::TABLE_NAME;
    const LABEL: &'static str = "Order";
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    #[serde(default)]
    pub coil_name: Option<String>,
    pub sets: i64,
    pub weight: f64,
    pub wire_req: f64,
    pub wire_gauge: f64,
    #[serde(default, with = "timestamp")]
    pub to_deliver_on: Option<DateTime<Utc>>,
}

impl OrderInput {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.coil_name {
            non_blank("coilName", name)?;
        }
        non_negative_count("sets", self.sets)?;
        non_negative("weight", self.weight)?;
        non_negative("wireReq", self.wire_req)?;
        gauge(self.wire_gauge)
    }
}
