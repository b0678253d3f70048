use std::sync::Arc;

use vireo_core::gate::PermissionGate;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vireo_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Centralized event bus; the review engine publishes one event per
    /// committed transition.
    pub event_bus: Arc<vireo_events::EventBus>,
    /// Coarse capability gate consulted before every transition.
    pub gate: Arc<dyn PermissionGate>,
}
