use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, sqlite::SqliteRow};

use crate::error::{AppError, Result};

pub mod coil;
pub mod order;
pub mod stock;
pub mod timestamp;
pub mod wire;

pub use coil::{Coil, CoilInput};
pub use order::{Order, OrderInput};
pub use stock::GaugeStock;
pub use wire::{Wire, WireInput};

/// A row type persisted in its own table with a store-assigned `id`.
pub trait Record: for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    const TABLE: &'static str;
    /// Human readable name used in error messages.
    const LABEL: &'static str;
}

/// Records carrying the one-way `pending -> delivered` flag.
pub trait DeliveryTracked: Record {
    fn is_delivered(&self) -> bool;
    fn created_at(&self) -> DateTime<Utc>;
}

/// Optional body of a delivery transition.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeliveryInput {
    #[serde(default, with = "timestamp")]
    pub delivered_on: Option<DateTime<Utc>>,
}

pub(crate) fn non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn non_negative_count(field: &str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(AppError::Validation(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn gauge(value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::Validation(format!(
            "wireGauge must be greater than zero, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_rules() {
        assert!(non_negative("weight", 0.0).is_ok());
        assert!(non_negative("weight", -0.1).is_err());
        assert!(non_negative("weight", f64::NAN).is_err());
        assert!(non_negative("weight", f64::INFINITY).is_err());
        assert!(non_negative_count("sets", 0).is_ok());
        assert!(non_negative_count("sets", -1).is_err());
        assert!(gauge(0.5).is_ok());
        assert!(gauge(0.0).is_err());
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(non_blank("coilName", "C-100").is_ok());
        assert!(non_blank("coilName", "").is_err());
        assert!(non_blank("coilName", "   ").is_err());
    }

    #[test]
    fn delivery_body_is_optional_per_field() {
        let input: DeliveryInput = serde_json::from_str("{}").unwrap();
        assert!(input.delivered_on.is_none());

        let input: DeliveryInput =
            serde_json::from_str(r#"{"deliveredOn": "2024-05-01T12:00:00Z"}"#).unwrap();
        assert!(input.delivered_on.is_some());

        assert!(serde_json::from_str::<DeliveryInput>(r#"{"delivered": true}"#).is_err());
    }
}
