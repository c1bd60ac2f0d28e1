// Interaction events HTTP route
//
// Single ingestion point for UI interactions. Chat lifecycle kinds open and
// close chat analytics entries; every kind lands in the interaction log.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use solbot_core::{AnalyticsError, ChatAnalyticsEntry};
use std::sync::Arc;
use utoipa::ToSchema;

use super::common::{ApiError, ErrorResponse};
use super::validation::{json_body, require_text, validate_label, MISSING_EVENT_FIELDS};
use crate::services::interaction::CHAT_STARTED;
use crate::services::{ChatAnalyticsService, InteractionOutcome, InteractionService, NewInteraction};
use crate::storage::StorageBackend;

/// An interaction posted by the client
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RecordEventRequest {
    /// Browsing session the interaction happened in.
    pub session_id: Option<String>,
    /// Interaction kind, e.g. "chat_started", "chat_ended", "phase_completed".
    #[schema(example = "chat_started")]
    pub event_type: Option<String>,
    #[schema(example = "phase2")]
    pub phase: Option<String>,
    #[schema(example = "solbot-chat")]
    pub component: Option<String>,
    /// Kind-specific payload. `chat_ended` reads `chat_analytics_id` and
    /// `message_count` from here.
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<JsonValue>,
}

impl RecordEventRequest {
    pub fn validate(self) -> Result<NewInteraction, AnalyticsError> {
        let (Some(session_id), Some(event_type)) =
            (require_text(self.session_id), require_text(self.event_type))
        else {
            return Err(AnalyticsError::validation(MISSING_EVENT_FIELDS));
        };

        // Chat entries always carry labels
        if event_type == CHAT_STARTED {
            validate_label("phase", self.phase.as_deref().unwrap_or_default())?;
            validate_label("component", self.component.as_deref().unwrap_or_default())?;
        }

        Ok(NewInteraction {
            session_id,
            event_type,
            phase: self.phase,
            component: self.component,
            metadata: self.metadata,
        })
    }
}

/// Response to a recorded interaction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RecordEventResponse {
    /// `chat_started` returns the opened entry
    ChatStarted(ChatAnalyticsEntry),
    /// Every other kind acknowledges with `{"success": true}`
    Recorded { success: bool },
}

impl From<InteractionOutcome> for RecordEventResponse {
    fn from(outcome: InteractionOutcome) -> Self {
        match outcome {
            InteractionOutcome::ChatOpened(entry) => Self::ChatStarted(entry),
            InteractionOutcome::ChatClosed(_) | InteractionOutcome::Logged => {
                Self::Recorded { success: true }
            }
        }
    }
}

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<InteractionService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        let chats = Arc::new(ChatAnalyticsService::new(db.clone()));
        Self {
            service: Arc::new(InteractionService::new(db, chats)),
        }
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/events", post(record_event))
        .with_state(state)
}

/// POST /api/events - Record an interaction
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = RecordEventRequest,
    responses(
        (status = 200, description = "Interaction recorded", body = RecordEventResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn record_event(
    State(state): State<AppState>,
    body: Result<Json<RecordEventRequest>, JsonRejection>,
) -> Result<Json<RecordEventResponse>, ApiError> {
    let input = json_body(body)?.validate()?;
    let outcome = state.service.record(input).await?;
    Ok(Json(outcome.into()))
}
