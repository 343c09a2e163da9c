//! Campus events API server binary.

use std::sync::Arc;

use tracing::info;

use campus_events_api::app::create_app;
use campus_events_api::config::Config;
use campus_events_api::middleware;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (development convenience)
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting campus events API"
    );

    let pool = persistence::db::create_pool(&config.database.pool_config()).await?;

    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Database migrations applied");

    let addr = config.socket_addr();
    let app = create_app(Arc::new(config), pool);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app).await?;

    Ok(())
}
