//! Dispatches the parsed command to its handler.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::AppResult;

/// Run the selected command with merged and validated settings.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match cli.command() {
        Commands::Serve { dry_run, .. } => ServeCommandHandler::new(settings).execute(dry_run).await,
        Commands::Migrate { dry_run, rollback } => {
            if let Some(steps) = rollback {
                tracing::warn!(steps, "Reverting migrations, data in dropped tables is lost");
            }
            MigrateCommandHandler::new(settings)
                .execute(dry_run, rollback)
                .await
        }
    }
}
