use std::sync::Arc;

use ecotour_core::identity::IdentityProvider;
use ecotour_core::storage::ObjectStorage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ecotour_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Credential store used for registration, login and admin creation.
    pub identity: Arc<dyn IdentityProvider>,
    /// Object storage for media uploads.
    pub storage: Arc<dyn ObjectStorage>,
}
