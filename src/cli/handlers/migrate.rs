//! Migrate command handler

use crate::config::{DatabaseBackend, Settings};
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::{AppError, AppResult};

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Apply pending migrations, list them (`dry_run`), or revert `rollback` steps.
    ///
    /// # Errors
    /// Fails with `Validation` for the memory backend, which has no schema.
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.ensure_postgres()?;
        self.config.database.validate()?;
        let url = &self.config.database.url;

        if dry_run {
            let pending = pending_migrations(url).await?;
            if pending.is_empty() {
                println!("✓ No pending migrations - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                print_names(&pending);
                println!("Run without --dry-run to apply them");
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            println!("Rolling back {steps} migration(s)...");
            let reverted = revert_migrations(url, steps).await?;
            println!("✓ Rolled back {} migration(s):", reverted.len());
            print_names(&reverted);
            return Ok(());
        }

        let applied = run_pending_migrations(url).await?;
        if applied.is_empty() {
            println!("✓ No migrations to apply - database is up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            print_names(&applied);
        }
        Ok(())
    }

    fn ensure_postgres(&self) -> AppResult<()> {
        match self.config.database.backend {
            DatabaseBackend::Postgres => Ok(()),
            DatabaseBackend::Memory => Err(AppError::Validation {
                field: "database.backend".to_string(),
                reason: "migrations need the postgres backend".to_string(),
            }),
        }
    }
}

fn print_names(names: &[String]) {
    for name in names {
        println!("  - {name}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_refused() {
        let mut config = Settings::default();
        config.database.backend = DatabaseBackend::Memory;

        let result = MigrateCommandHandler::new(config).execute(false, None).await;
        match result {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "database.backend"),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_url_refused_before_connecting() {
        let result = MigrateCommandHandler::new(Settings::default())
            .execute(true, None)
            .await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }
}
