//! Serve command handler

use crate::config::{DatabaseBackend, Settings};
use crate::error::AppResult;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Run the server, or with `dry_run` only report the effective setup.
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }
        Server::new(self.config).run().await
    }

    /// Validate the configuration and print what the server would do.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Environment: {}", self.config.application.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.database.backend {
            DatabaseBackend::Postgres => println!(
                "✓ Storage: postgres (pool {}..{}, auto_migrate={})",
                self.config.database.min_connections,
                self.config.database.max_connections,
                self.config.database.auto_migrate
            ),
            DatabaseBackend::Memory => println!("✓ Storage: memory (data is lost on exit)"),
        }
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
