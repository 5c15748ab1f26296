use anyhow::{Context, Result};
use sqlx::{Pool, Sqlite, migrate::MigrateDatabase, sqlite::SqlitePoolOptions};

use crate::config::Config;

pub mod ledger;
pub mod schema;

pub use ledger::Ledger;

pub type DbPool = Pool<Sqlite>;

/// Initialize the database connection pool and make sure the schema exists.
///
/// Any error here is fatal: the server must not accept traffic without its tables.
pub async fn init_db_pool(config: &Config) -> Result<DbPool> {
    let database_url = config.conn_url.as_str();

    // Create the database if it doesn't exist
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        tracing::info!("Creating database at {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .with_context(|| format!("failed to create database {database_url}"))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_pool_size)
        .acquire_timeout(config.store_timeout)
        .connect(database_url)
        .await
        .with_context(|| format!("failed to connect to {database_url}"))?;

    setup_database(&pool).await?;

    Ok(pool)
}

/// Create the coil, wire and orders tables. Safe to run against an existing schema.
pub async fn setup_database(pool: &DbPool) -> Result<()> {
    for ddl in [
        schema::CoilTable::CREATE_TABLE,
        schema::WireTable::CREATE_TABLE,
        schema::OrdersTable::CREATE_TABLE,
    ] {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .context("failed to create table")?;
    }

    for ddl in schema::CREATE_INDEXES {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .context("failed to create index")?;
    }

    tracing::info!("Database schema ready");
    Ok(())
}
