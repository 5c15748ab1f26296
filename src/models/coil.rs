use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{
    DeliveryTracked, Record, gauge, non_blank, non_negative, non_negative_count, timestamp,
};
use crate::db::schema::CoilTable;
use crate::error::Result;

/// A wound, priced coil fulfilling (part of) an order.
///
/// `delivered` means the finished coil was handed over to the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Coil {
    pub id: i64,
    pub order_price: f64,
    pub sets: i64,
    pub coil_name: String,
    pub weight: f64,
    pub wire_req: f64,
    pub wire_gauge: f64,
    pub delivered: bool,
    #[serde(default, with = "timestamp")]
    pub delivered_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Record for Coil {
    const TABLE: &'static str = CoilTable::TABLE_NAME;
    const LABEL: &'static str = "Coil";
}

impl DeliveryTracked for Coil {
    fn is_delivered(&self) -> bool {
        self.delivered
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Client supplied fields for a new coil. Every field is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoilInput {
    pub order_price: f64,
    pub sets: i64,
    pub coil_name: String,
    pub weight: f64,
    pub wire_req: f64,
    pub wire_gauge: f64,
}

impl CoilInput {
    pub fn validate(&self) -> Result<()> {
        non_negative("orderPrice", self.order_price)?;
        non_negative_count("sets", self.sets)?;
        non_blank("coilName", &self.coil_name)?;
        non_negative("weight", self.weight)?;
        non_negative("wireReq", self.wire_req)?;
        gauge(self.wire_gauge)
    }
}
