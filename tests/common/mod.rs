#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use sqlx::PgPool;

use easyshop_api::config::AppConfig;
use easyshop_api::database::DatabaseManager;

/// Server process owned by one test; killed when dropped
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Short acquire timeout so /health answers 503 quickly when no database is running
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_easyshop-api"));
        cmd.env("EASYSHOP_API_PORT", port.to_string())
            .env("DATABASE_ACQUIRE_TIMEOUT_SECS", "2")
            .env("DATABASE_RUN_MIGRATIONS", "false")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Migrated pool for repository tests, or None when DATABASE_URL is not set
pub async fn database() -> Result<Option<PgPool>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return Ok(None);
    };

    let mut config = AppConfig::development().database;
    config.url = Some(url);
    let pool = DatabaseManager::connect(&config)?;
    DatabaseManager::migrate(&pool).await?;
    Ok(Some(pool))
}

/// Name that will not collide with rows left by earlier runs
pub fn unique(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}-{}-{}", prefix, std::process::id(), nanos)
}

pub async fn seed_user(pool: &PgPool, prefix: &str) -> Result<i32> {
    let user_id = sqlx::query_scalar("INSERT INTO users (username, role) VALUES ($1, 'ROLE_USER') RETURNING user_id")
        .bind(unique(prefix))
        .fetch_one(pool)
        .await?;
    Ok(user_id)
}

pub async fn seed_product(pool: &PgPool, category_id: i32, price: &str) -> Result<i32> {
    let price: rust_decimal::Decimal = price.parse()?;
    let product_id = sqlx::query_scalar(
        "INSERT INTO products (name, price, category_id) VALUES ($1, $2, $3) RETURNING product_id",
    )
    .bind(unique("product"))
    .bind(price)
    .bind(category_id)
    .fetch_one(pool)
    .await?;
    Ok(product_id)
}
