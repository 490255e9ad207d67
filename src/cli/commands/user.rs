use std::sync::Arc;

use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config;
use crate::database::DocumentStore;
use crate::services::{ServiceError, UserService};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Give a user the admin flag")]
    Promote {
        #[arg(help = "Email the user registered with")]
        email: String,
    },

    #[command(about = "Remove the admin flag from a user")]
    Demote {
        #[arg(help = "Email the user registered with")]
        email: String,
    },
}

pub async fn handle(cmd: UserCommands, store: Arc<dyn DocumentStore>, output_format: OutputFormat) -> anyhow::Result<()> {
    let (email, is_admin) = match cmd {
        UserCommands::Promote { email } => (email, true),
        UserCommands::Demote { email } => (email, false),
    };

    let users = UserService::new(store, config::config().security.clone());
    match users.set_admin(&email, is_admin).await {
        Ok(user) => {
            let verb = if is_admin { "promoted to admin" } else { "demoted" };
            output_success(
                output_format,
                &format!("User {} {}", user.email, verb),
                Some(json!({ "user": user.profile() })),
            )
        }
        Err(ServiceError::NotFound(message)) => {
            output_error(output_format, &message, Some("USER_NOT_FOUND"))?;
            anyhow::bail!(message)
        }
        Err(e) => Err(e.into()),
    }
}
