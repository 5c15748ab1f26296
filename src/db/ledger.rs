use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::{
        Coil, CoilInput, DeliveryTracked, GaugeStock, Order, OrderInput, Record, Wire, WireInput,
    },
};

/// Inventory ledger: owns the pool and every read and write of orders, wire
/// stock and coils.
///
/// Each store round-trip is bounded by `store_timeout`.
pub struct Ledger {
    pool: DbPool,
    store_timeout: Duration,
}

impl Ledger {
    pub fn new(pool: DbPool, store_timeout: Duration) -> Self {
        Self {
            pool,
            store_timeout,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn bounded<T, F>(&self, query: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.store_timeout, query).await {
            Ok(result) => result.map_err(AppError::Database),
            Err(_) => Err(AppError::Timeout),
        }
    }

    /// Persist a new coil. It starts pending with no delivery date.
    pub async fn create_coil(&self, input: CoilInput) -> Result<Coil> {
        input.validate()?;

        let coil = self
            .bounded(
                sqlx::query_as::<_, Coil>(
                    r#"
                    INSERT INTO coil
                        (orderPrice, sets, coilName, weight, wireReq, wireGauge, delivered, createdAt)
                    VALUES (?, ?, ?, ?, ?, ?, FALSE, ?)
                    RETURNING *
                    "#,
                )
                .bind(input.order_price)
                .bind(input.sets)
                .bind(&input.coil_name)
                .bind(input.weight)
                .bind(input.wire_req)
                .bind(input.wire_gauge)
                .bind(Utc::now())
                .fetch_one(&self.pool),
            )
            .await?;

        tracing::info!(id = coil.id, coil_name = %coil.coil_name, "Coil created");
        Ok(coil)
    }

    /// All coils in insertion order.
    pub async fn list_coils(&self) -> Result<Vec<Coil>> {
        self.list::<Coil>().await
    }

    pub async fn get_coil(&self, id: i64) -> Result<Coil> {
        self.get::<Coil>(id).await
    }

    pub async fn mark_coil_delivered(
        &self,
        id: i64,
        delivered_on: Option<DateTime<Utc>>,
    ) -> Result<Coil> {
        self.mark_delivered::<Coil>(id, delivered_on).await
    }

    /// Register a wire stock intake. It starts pending until received.
    pub async fn create_wire(&self, input: WireInput) -> Result<Wire> {
        input.validate()?;

        let wire = self
            .bounded(
                sqlx::query_as::<_, Wire>(
                    r#"
                    INSERT INTO wire (sets, weight, wireReq, wireGauge, delivered, createdAt)
                    VALUES (?, ?, ?, ?, FALSE, ?)
                    RETURNING *
                    "#,
                )
                .bind(input.sets)
                .bind(input.weight)
                .bind(input.wire_req)
                .bind(input.wire_gauge)
                .bind(Utc::now())
                .fetch_one(&self.pool),
            )
            .await?;

        tracing::info!(id = wire.id, wire_gauge = wire.wire_gauge, "Wire registered");
        Ok(wire)
    }

    pub async fn list_wires(&self) -> Result<Vec<Wire>> {
        self.list::<Wire>().await
    }

    pub async fn get_wire(&self, id: i64) -> Result<Wire> {
        self.get::<Wire>(id).await
    }

    pub async fn mark_wire_delivered(
        &self,
        id: i64,
        delivered_on: Option<DateTime<Utc>>,
    ) -> Result<Wire> {
        self.mark_delivered::<Wire>(id, delivered_on).await
    }

    pub async fn create_order(&self, input: OrderInput) -> Result<Order> {
        input.validate()?;

        let order = self
            .bounded(
                sqlx::query_as::<_, Order>(
                    r#"
                    INSERT INTO orders
                        (coilName, sets, weight, wireReq, wireGauge, toDeliverOn, createdAt)
                    VALUES (?, ?, ?, ?, ?, ?, ?)
                    RETURNING *
                    "#,
                )
                .bind(&input.coil_name)
                .bind(input.sets)
                .bind(input.weight)
                .bind(input.wire_req)
                .bind(input.wire_gauge)
                .bind(input.to_deliver_on)
                .bind(Utc::now())
                .fetch_one(&self.pool),
            )
            .await?;

        tracing::info!(id = order.id, wire_gauge = order.wire_gauge, "Order placed");
        Ok(order)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        self.list::<Order>().await
    }

    /// Supply and demand of wire for one gauge. Nothing is decremented.
    pub async fn gauge_stock(&self, wire_gauge: f64) -> Result<GaugeStock> {
        crate::models::gauge(wire_gauge)?;

        let (on_hand, in_transit, coil_req, order_req): (f64, f64, f64, f64) = self
            .bounded(
                sqlx::query_as(
                    r#"
                    SELECT
                        (SELECT TOTAL(wireReq) FROM wire WHERE wireGauge = ? AND delivered = TRUE),
                        (SELECT TOTAL(wireReq) FROM wire WHERE wireGauge = ? AND delivered = FALSE),
                        (SELECT TOTAL(wireReq) FROM coil WHERE wireGauge = ?),
                        (SELECT TOTAL(wireReq) FROM orders WHERE wireGauge = ?)
                    "#,
                )
                .bind(wire_gauge)
                .bind(wire_gauge)
                .bind(wire_gauge)
                .bind(wire_gauge)
                .fetch_one(&self.pool),
            )
            .await?;

        Ok(GaugeStock::new(
            wire_gauge, on_hand, in_transit, coil_req, order_req,
        ))
    }

    async fn list<T: Record>(&self) -> Result<Vec<T>> {
        let query = format!("SELECT * FROM {} ORDER BY id", T::TABLE);

        self.bounded(sqlx::query_as::<_, T>(&query).fetch_all(&self.pool))
            .await
    }

    async fn get<T: Record>(&self, id: i64) -> Result<T> {
        let query = format!("SELECT * FROM {} WHERE id = ?", T::TABLE);

        self.bounded(sqlx::query_as::<_, T>(&query).bind(id).fetch_optional(&self.pool))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {}", T::LABEL, id)))
    }

    /// One-way `pending -> delivered` transition. The first delivery date is
    /// never overwritten.
    async fn mark_delivered<T: DeliveryTracked>(
        &self,
        id: i64,
        delivered_on: Option<DateTime<Utc>>,
    ) -> Result<T> {
        let current = self.get::<T>(id).await?;
        if current.is_delivered() {
            return Err(AppError::Conflict(format!(
                "{} {} is already delivered",
                T::LABEL,
                id
            )));
        }

        let delivered_on = delivered_on.unwrap_or_else(Utc::now);
        if delivered_on < current.created_at() {
            return Err(AppError::Validation(format!(
                "deliveredOn {} is earlier than the record's creation at {}",
                delivered_on.to_rfc3339(),
                current.created_at().to_rfc3339()
            )));
        }

        let query = format!(
            "UPDATE {} SET delivered = TRUE, deliveredOn = ? WHERE id = ? AND delivered = FALSE RETURNING *",
            T::TABLE
        );

        // A concurrent transition may have won between the read and the update.
        let updated = self
            .bounded(
                sqlx::query_as::<_, T>(&query)
                    .bind(delivered_on)
                    .bind(id)
                    .fetch_optional(&self.pool),
            )
            .await?
            .ok_or_else(|| {
                AppError::Conflict(format!("{} {} is already delivered", T::LABEL, id))
            })?;

        tracing::info!(id, table = T::TABLE, "Marked as delivered");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use chrono::Duration as ChronoDuration;

    use super::*;
    use crate::test::{coil_input, order_input, setup_test_db, teardown_test_db, wire_input};

    #[tokio::test]
    async fn create_coil_echoes_input_and_starts_pending() {
        let (db_path, ledger) = setup_test_db().await;

        let coil = ledger.create_coil(coil_input("C-100")).await.unwrap();

        assert!(coil.id > 0);
        assert_eq!(coil.order_price, 120.5);
        assert_eq!(coil.sets, 10);
        assert_eq!(coil.coil_name, "C-100");
        assert_eq!(coil.weight, 5.2);
        assert_eq!(coil.wire_req, 3.1);
        assert_eq!(coil.wire_gauge, 2.0);
        assert!(!coil.delivered);
        assert!(coil.delivered_on.is_none());

        teardown_test_db(&db_path, ledger.pool()).await;
    }

    #[tokio::test]
    async fn invalid_coil_is_rejected_without_a_write() {
        let (db_path, ledger) = setup_test_db().await;

        let mut input = coil_input("C-100");
        input.coil_name = String::new();
        let err = ledger.create_coil(input).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(ledger.list_coils().await.unwrap().is_empty());

        teardown_test_db(&db_path, ledger.pool()).await;
    }

    #[tokio::test]
    async fn list_coils_returns_every_create_in_order() {
        let (db_path, ledger) = setup_test_db().await;

        let first = ledger.create_coil(coil_input("C-100")).await.unwrap();
        let second = ledger.create_coil(coil_input("C-200")).await.unwrap();

        let coils = ledger.list_coils().await.unwrap();
        assert_eq!(coils, vec![first, second]);

        teardown_test_db(&db_path, ledger.pool()).await;
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let (db_path, ledger) = setup_test_db().await;
        let ledger = Arc::new(ledger);

        let mut handles = Vec::new();
        for i in 0..16 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                ledger.create_coil(coil_input(&format!("C-{i}"))).await
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            let coil = handle.await.unwrap().unwrap();
            assert!(ids.insert(coil.id), "duplicate id {}", coil.id);
        }
        assert_eq!(ids.len(), 16);

        teardown_test_db(&db_path, ledger.pool()).await;
    }

    #[tokio::test]
    async fn expired_store_deadline_is_a_timeout() {
        let (db_path, ledger) = setup_test_db().await;
        let hurried = Ledger::new(ledger.pool().clone(), Duration::from_nanos(1));

        let err = hurried.create_coil(coil_input("T")).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout));

        let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM coil")
            .fetch_one(ledger.pool())
            .await
            .unwrap();
        assert_eq!(rows, 0);

        teardown_test_db(&db_path, ledger.pool()).await;
    }

    #[tokio::test]
    async fn get_unknown_coil_is_not_found() {
        let (db_path, ledger) = setup_test_db().await;

        let err = ledger.get_coil(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref what) if what == "Coil 42"));

        teardown_test_db(&db_path, ledger.pool()).await;
    }

    #[tokio::test]
    async fn delivery_is_one_way() {
        let (db_path, ledger) = setup_test_db().await;
        let coil = ledger.create_coil(coil_input("C-100")).await.unwrap();

        let delivered = ledger.mark_coil_delivered(coil.id, None).await.unwrap();
        assert!(delivered.delivered);
        let first_date = delivered.delivered_on.unwrap();
        assert!(first_date >= delivered.created_at);

        let err = ledger.mark_coil_delivered(coil.id, None).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let stored = ledger.get_coil(coil.id).await.unwrap();
        assert_eq!(stored.delivered_on, Some(first_date));

        teardown_test_db(&db_path, ledger.pool()).await;
    }

    #[tokio::test]
    async fn delivery_before_creation_is_rejected() {
        let (db_path, ledger) = setup_test_db().await;
        let wire = ledger.create_wire(wire_input(2.0, 100.0)).await.unwrap();

        let too_early = wire.created_at - ChronoDuration::days(1);
        let err = ledger
            .mark_wire_delivered(wire.id, Some(too_early))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(!ledger.get_wire(wire.id).await.unwrap().delivered);

        let later = wire.created_at + ChronoDuration::hours(2);
        let delivered = ledger.mark_wire_delivered(wire.id, Some(later)).await.unwrap();
        assert_eq!(delivered.delivered_on, Some(later));

        teardown_test_db(&db_path, ledger.pool()).await;
    }

    #[tokio::test]
    async fn marking_unknown_wire_is_not_found() {
        let (db_path, ledger) = setup_test_db().await;

        let err = ledger.mark_wire_delivered(9, None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        teardown_test_db(&db_path, ledger.pool()).await;
    }

    #[tokio::test]
    async fn orders_keep_their_target_date() {
        let (db_path, ledger) = setup_test_db().await;

        let mut input = order_input(2.0, 12.0);
        let due = Utc::now() + ChronoDuration::days(14);
        input.to_deliver_on = Some(due);
        let order = ledger.create_order(input).await.unwrap();

        assert_eq!(order.wire_req, 12.0);
        assert_eq!(order.coil_name.as_deref(), Some("C-100"));
        assert_eq!(order.to_deliver_on, Some(due));
        assert_eq!(ledger.list_orders().await.unwrap(), vec![order]);

        teardown_test_db(&db_path, ledger.pool()).await;
    }

    #[tokio::test]
    async fn gauge_stock_joins_by_gauge_only() {
        let (db_path, ledger) = setup_test_db().await;

        let received = ledger.create_wire(wire_input(2.0, 100.0)).await.unwrap();
        ledger.mark_wire_delivered(received.id, None).await.unwrap();
        ledger.create_wire(wire_input(2.0, 40.0)).await.unwrap();
        ledger.create_wire(wire_input(1.5, 999.0)).await.unwrap();
        ledger.create_coil(coil_input("C-100")).await.unwrap();
        ledger.create_order(order_input(2.0, 12.0)).await.unwrap();
        ledger.create_order(order_input(1.5, 7.0)).await.unwrap();

        let stock = ledger.gauge_stock(2.0).await.unwrap();
        assert_eq!(stock.wire_on_hand, 100.0);
        assert_eq!(stock.wire_in_transit, 40.0);
        assert_eq!(stock.coil_wire_req, 3.1);
        assert_eq!(stock.order_wire_req, 12.0);
        assert_eq!(stock.available, 100.0 - 3.1);

        let empty = ledger.gauge_stock(9.0).await.unwrap();
        assert_eq!(empty.wire_on_hand, 0.0);
        assert_eq!(empty.available, 0.0);

        assert!(matches!(
            ledger.gauge_stock(0.0).await.unwrap_err(),
            AppError::Validation(_)
        ));

        teardown_test_db(&db_path, ledger.pool()).await;
    }
}
