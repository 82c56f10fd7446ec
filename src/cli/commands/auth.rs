use clap::Subcommand;
use serde_json::json;

use crate::auth::{generate_jwt, Claims, MAX_EXPIRY_HOURS};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Mint a bearer token for an existing user")]
    Token {
        #[arg(help = "Username placed in the token subject")]
        username: String,
        #[arg(long, help = "Issue the token with the admin role")]
        admin: bool,
        #[arg(
            long,
            value_parser = clap::value_parser!(u64).range(1..=MAX_EXPIRY_HOURS),
            help = "Validity in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)"
        )]
        hours: Option<u64>,
    },
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Token { username, admin, hours } => {
            let security = &config::config().security;
            let hours = hours.unwrap_or(security.jwt_expiry_hours);
            let claims = if admin {
                Claims::admin(username, hours)
            } else {
                Claims::user(username, hours)
            };

            let token = generate_jwt(&claims, security)?;

            match output_format {
                OutputFormat::Json => output_success(
                    output_format,
                    "Token issued",
                    Some(json!({ "token": token, "role": claims.role, "expires_at": claims.exp })),
                ),
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
            }
        }
    }
}
