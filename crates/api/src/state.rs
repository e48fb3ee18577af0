use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::DashboardStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Storage behind the dashboard endpoints (Postgres in production,
    /// in-memory in tests).
    pub store: Arc<dyn DashboardStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
