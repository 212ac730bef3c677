use std::sync::Arc;

use nivaran_classifier::Classifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: nivaran_db::DbPool,
    /// Server configuration (session secret, transition enforcement, CORS).
    pub config: Arc<ServerConfig>,
    /// Client for the external classification/advisory service.
    pub classifier: Arc<Classifier>,
}
