//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::config::{DatabaseBackend, JwtConfig};
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Shared state handed to every handler. Cloning only clones `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// JWT configuration for token validation
    pub jwt_config: JwtConfig,
    pub backend: DatabaseBackend,
    /// Pool used by the health check, absent for the memory backend
    pub db_pool: Option<AsyncDbPool>,
}

impl AppState {
    /// State backed by PostgreSQL through `pool`.
    pub fn new(pool: AsyncDbPool, jwt_config: JwtConfig) -> Self {
        let repos = Repositories::postgres(pool.clone());
        Self {
            services: Services::new(repos, jwt_config.clone()),
            jwt_config,
            backend: DatabaseBackend::Postgres,
            db_pool: Some(pool),
        }
    }

    /// State backed by empty in-memory stores.
    pub fn in_memory(jwt_config: JwtConfig) -> Self {
        Self {
            services: Services::new(Repositories::in_memory(), jwt_config.clone()),
            jwt_config,
            backend: DatabaseBackend::Memory,
            db_pool: None,
        }
    }
}
