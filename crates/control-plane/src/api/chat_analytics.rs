// Chat analytics HTTP routes
//
// A chat surface opens an entry when it becomes visible and closes it with the
// final message count when it goes away.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solbot_core::ChatAnalyticsEntry;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{ApiError, ErrorResponse};
use super::validation::{json_body, path_param, validate_label, validate_message_count};
use crate::services::ChatAnalyticsService;
use crate::storage::StorageBackend;

/// Request to open a chat analytics entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OpenChatAnalyticsRequest {
    /// Browsing session the chat belongs to. Must already exist.
    #[schema(example = "0190d5f4-6a8e-7c1b-9a3e-2f4b5c6d7e8f")]
    pub session_id: String,
    /// Learning phase the chat is shown in.
    #[schema(example = "phase2")]
    pub phase: String,
    /// Chat surface that was opened.
    #[schema(example = "solbot-chat")]
    pub component: String,
    /// When the chat became visible.
    pub start_time: DateTime<Utc>,
}

/// Request to close a chat analytics entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CloseChatAnalyticsRequest {
    /// When the chat was hidden or the page unloaded.
    pub end_time: DateTime<Utc>,
    /// Messages exchanged while the chat was open.
    #[schema(example = 7, minimum = 0)]
    pub message_count: i32,
}

/// App state for chat analytics routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ChatAnalyticsService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            service: Arc::new(ChatAnalyticsService::new(db)),
        }
    }
}

/// Create chat analytics routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/analytics/chat", post(open_entry))
        .route("/api/analytics/chat/:id", put(close_entry))
        .with_state(state)
}

/// POST /api/analytics/chat - Open an entry
#[utoipa::path(
    post,
    path = "/api/analytics/chat",
    request_body = OpenChatAnalyticsRequest,
    responses(
        (status = 200, description = "Entry opened", body = ChatAnalyticsEntry),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "analytics"
)]
pub async fn open_entry(
    State(state): State<AppState>,
    body: Result<Json<OpenChatAnalyticsRequest>, JsonRejection>,
) -> Result<Json<ChatAnalyticsEntry>, ApiError> {
    let req = json_body(body)?;
    validate_label("phase", &req.phase)?;
    validate_label("component", &req.component)?;

    let entry = state.service.open_entry(req).await?;
    Ok(Json(entry))
}

/// PUT /api/analytics/chat/{id} - Close an entry
#[utoipa::path(
    put,
    path = "/api/analytics/chat/{id}",
    params(
        ("id" = Uuid, Path, description = "Chat analytics entry ID")
    ),
    request_body = CloseChatAnalyticsRequest,
    responses(
        (status = 200, description = "Entry closed", body = ChatAnalyticsEntry),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "analytics"
)]
pub async fn close_entry(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<CloseChatAnalyticsRequest>, JsonRejection>,
) -> Result<Json<ChatAnalyticsEntry>, ApiError> {
    let id = path_param(id)?;
    let req = json_body(body)?;
    validate_message_count(req.message_count)?;

    let entry = state.service.close_entry(id, req).await?;
    Ok(Json(entry))
}
