use std::sync::Arc;

use folio_db::repositories::Repositories;
use folio_db::{DbPool, Executor};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and repositories share one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    /// Per-table repositories over the same pool.
    pub repos: Repositories,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        let repos = Repositories::new(Executor::new(pool.clone()));
        Self {
            pool,
            config: Arc::new(config),
            repos,
        }
    }
}
