// HTTP API routes
//
// Each submodule handles one resource with its own AppState; `router`
// assembles them over a shared storage backend.

pub mod chat_analytics;
pub mod common;
pub mod events;
pub mod health;
pub mod user_data;
pub mod validation;

use axum::Router;
use std::sync::Arc;

use crate::services::HealthService;
use crate::storage::StorageBackend;

// Re-export common types
pub use common::{ApiError, ErrorResponse, ListResponse};

/// Build the API router (without docs, CORS or tracing layers)
pub fn router(db: Arc<StorageBackend>, health: Arc<HealthService>) -> Router {
    Router::new()
        .merge(chat_analytics::routes(chat_analytics::AppState::new(db.clone())))
        .merge(events::routes(events::AppState::new(db.clone())))
        .merge(user_data::routes(user_data::AppState::new(db)))
        .merge(health::routes(health::AppState::new(health)))
}
