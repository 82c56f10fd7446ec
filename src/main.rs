use anyhow::Context;
use tracing_subscriber::EnvFilter;

use easyshop_api::app::app;
use easyshop_api::config;
use easyshop_api::database::DatabaseManager;
use easyshop_api::is_production;
use easyshop_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config().clone();
    tracing::info!("Starting EasyShop API in {:?} mode", config.environment);

    if is_production!() && config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set in production");
    }

    let pool = DatabaseManager::connect(&config.database).context("failed to configure database pool")?;

    if config.database.run_migrations {
        if let Err(e) = DatabaseManager::migrate(&pool).await {
            // Keep serving; /health reports the database as unavailable
            tracing::error!("Skipping migrations: {}", e);
        }
    }

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    let router = app(AppState::postgres(config, pool.clone()));

    tracing::info!("EasyShop API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close(&pool).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
