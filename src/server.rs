//! HTTP server lifecycle: storage setup, startup and graceful shutdown.

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::{RouterOptions, create_router};
use crate::config::{DatabaseBackend, Settings};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Build the state for the configured backend, migrating first when
    /// `database.auto_migrate` is set.
    async fn build_state(&self) -> AppResult<AppState> {
        let database = &self.settings.database;
        let jwt_config = self.settings.jwt.clone();

        match database.backend {
            DatabaseBackend::Memory => {
                tracing::warn!("Using the in-memory backend, data is lost on shutdown");
                Ok(AppState::in_memory(jwt_config))
            }
            DatabaseBackend::Postgres => {
                if database.auto_migrate {
                    let applied = run_pending_migrations(&database.url).await?;
                    tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
                }

                tracing::info!(
                    max_connections = database.max_connections,
                    min_connections = database.min_connections,
                    connection_timeout = database.connection_timeout,
                    "Initializing database connection pool"
                );
                let pool = establish_async_connection_pool(database).await?;
                Ok(AppState::new(pool, jwt_config))
            }
        }
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run(self) -> AppResult<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %crate::pkg_version(),
            environment = %self.settings.application.environment,
            backend = %self.settings.database.backend,
            "Application starting"
        );

        let state = self.build_state().await?;

        let swagger_ui = !self.settings.application.environment.is_production();
        let options = RouterOptions::from_server_config(&self.settings.server, swagger_ui);
        let router = create_router(state, options);

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            AppError::internal(format!("Failed to bind to {address}: {e}"))
        })?;

        tracing::info!(address = %address, swagger_ui, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
