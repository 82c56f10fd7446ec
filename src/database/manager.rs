use std::str::FromStr;

use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors surfaced by the data-access layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    /// Row is still referenced by another table
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds and maintains the shared connection pool
pub struct DatabaseManager;

impl DatabaseManager {
    /// Build the pool without opening a connection. Connections are acquired
    /// per call and returned to the pool when the call finishes, on success or
    /// failure.
    pub fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let options = Self::connect_options(url)?;
        let statement_timeout_ms = config.statement_timeout_ms;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .max_lifetime(config.max_lifetime())
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    if statement_timeout_ms > 0 {
                        // SET does not accept bind parameters
                        let sql = format!("SET statement_timeout = {}", statement_timeout_ms);
                        sqlx::query(&sql).execute(&mut *conn).await?;
                    }
                    Ok(())
                })
            })
            .connect_lazy_with(options);

        info!(
            "Database pool configured for {} (max_connections={}, acquire_timeout={}s)",
            Self::redact_url(url),
            config.max_connections,
            config.acquire_timeout_secs
        );
        Ok(pool)
    }

    fn connect_options(url: &str) -> Result<PgConnectOptions, DatabaseError> {
        url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        PgConnectOptions::from_str(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)
    }

    /// Strip the password so the URL can be logged
    pub fn redact_url(raw: &str) -> String {
        match url::Url::parse(raw) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("***"));
                }
                url.into()
            }
            Err(_) => "<invalid url>".to_string(),
        }
    }

    /// Apply embedded migrations from ./migrations
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(pool: &PgPool) {
        pool.close().await;
        info!("Closed database pool");
    }
}
