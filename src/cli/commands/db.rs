use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config;
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Apply pending migrations")]
    Migrate,

    #[command(about = "Check database connectivity")]
    Ping,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let database = &config::config().database;
    let pool = DatabaseManager::connect(database).context("failed to configure database pool")?;
    let target = database
        .url
        .as_deref()
        .map(DatabaseManager::redact_url)
        .unwrap_or_default();

    let result = match cmd {
        DbCommands::Migrate => {
            DatabaseManager::migrate(&pool).await.context("migration failed")?;
            output_success(output_format, "Migrations applied", Some(json!({ "database": target })))
        }
        DbCommands::Ping => {
            DatabaseManager::health_check(&pool).await.context("database unreachable")?;
            output_success(output_format, "Database reachable", Some(json!({ "database": target })))
        }
    };

    DatabaseManager::close(&pool).await;
    result
}
