use anyhow::Context;
use tracing_subscriber::EnvFilter;

use coil_inventory_server::{
    AppState, Ledger,
    config::{Config, SERVER_ADDR},
    db::init_db_pool,
    router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    // Tables must exist before any handler is registered.
    let pool = init_db_pool(&config)
        .await
        .context("failed to initialize the database")?;

    let app = router(AppState::new(Ledger::new(pool, config.store_timeout)));

    let listener = tokio::net::TcpListener::bind(SERVER_ADDR)
        .await
        .with_context(|| format!("failed to bind {SERVER_ADDR}"))?;

    tracing::info!("Coil API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
