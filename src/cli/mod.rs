pub mod commands;
pub mod utils;

use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::{self, DatabaseConfig};
use crate::database::{connect_postgres, DocumentStore};

#[derive(Parser)]
#[command(name = "malls-admin")]
#[command(about = "Malls API administration - out-of-band user and data management")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Grant or revoke the admin flag of a registered user")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Delete every record of a collection")]
    Purge {
        #[arg(help = "malls, stores, employees, users or all")]
        collection: String,
        #[arg(long, help = "Confirm the deletion")]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Connect to the server's database and run one command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::config();
    let url = database_url(&config.database)?;
    let store = connect_postgres(url, &config.database).await?;
    run_with_store(cli, Arc::new(store)).await
}

/// The in-memory store lives inside the server process, so only Postgres is reachable here
fn database_url(config: &DatabaseConfig) -> anyhow::Result<&str> {
    match config.url.as_deref() {
        Some(url) => Ok(url),
        None => bail!(
            "DATABASE_URL is not set; malls-admin only works against the Postgres database the API server uses"
        ),
    }
}

pub async fn run_with_store(cli: Cli, store: Arc<dyn DocumentStore>) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::User { cmd } => commands::user::handle(cmd, store, output_format).await,
        Commands::Purge { collection, yes } => {
            commands::purge::handle(&collection, yes, store, output_format).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn refuses_to_run_without_a_database_url() {
        let mut database = AppConfig::development().database;
        database.url = None;
        let err = database_url(&database).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL is not set"));

        database.url = Some("postgres://malls@localhost/malls".to_string());
        assert_eq!(database_url(&database).unwrap(), "postgres://malls@localhost/malls");
    }

    #[tokio::test]
    async fn run_fails_fast_in_the_default_configuration() {
        if config::config().database.url.is_some() {
            return;
        }
        let cli = Cli::parse_from(["malls-admin", "user", "promote", "admin@test.com"]);
        assert!(run(cli).await.is_err());
    }
}
