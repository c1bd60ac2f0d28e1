// Health HTTP routes
//
// Both endpoints report this application as healthy; the chat backend's
// state is carried in the `backend` field.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::services::HealthService;

/// Result of the plain backend check in `/api/health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BackendCheck {
    Healthy,
    Error,
}

/// Backend availability reported by `/api/chat/health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BackendAvailability {
    Available,
    Unavailable,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppHealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "development")]
    pub environment: String,
    pub timestamp: DateTime<Utc>,
    pub backend: BackendCheck,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatHealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub backend: BackendAvailability,
    #[schema(example = "All systems operational")]
    pub message: String,
}

/// Body of a failed health check
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthErrorResponse {
    #[schema(example = "error")]
    pub status: String,
    #[schema(example = "Internal server error")]
    pub message: String,
}

impl HealthErrorResponse {
    fn internal() -> Self {
        Self {
            status: "error".to_string(),
            message: "Internal server error".to_string(),
        }
    }
}

/// App state for health routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<HealthService>,
}

impl AppState {
    pub fn new(service: Arc<HealthService>) -> Self {
        Self { service }
    }
}

/// Create health routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(app_health))
        .route("/api/chat/health", get(chat_health))
        .with_state(state)
}

/// GET /api/health - Application health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Application is healthy", body = AppHealthResponse)
    ),
    tag = "health"
)]
pub async fn app_health(State(state): State<AppState>) -> Json<AppHealthResponse> {
    Json(state.service.app_health().await)
}

/// GET /api/chat/health - Chat backend availability
#[utoipa::path(
    get,
    path = "/api/chat/health",
    responses(
        (status = 200, description = "Application is healthy; backend availability included", body = ChatHealthResponse),
        (status = 500, description = "Internal server error", body = HealthErrorResponse)
    ),
    tag = "health"
)]
pub async fn chat_health(
    State(state): State<AppState>,
) -> Result<Json<ChatHealthResponse>, (StatusCode, Json<HealthErrorResponse>)> {
    state.service.chat_health().await.map(Json).map_err(|e| {
        tracing::error!(error = %e, "Chat health check failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthErrorResponse::internal()),
        )
    })
}
