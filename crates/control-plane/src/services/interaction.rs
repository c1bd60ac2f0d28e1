// Interaction service
//
// Every posted interaction is written to the master interaction log against
// the session's owning user. Chat lifecycle interactions additionally open or
// close a chat analytics entry using server-side times. Other kinds are only
// logged.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use solbot_core::{ChatAnalyticsEntry, Clock, Result, SystemClock};
use std::sync::Arc;
use uuid::Uuid;

use super::ChatAnalyticsService;
use crate::storage::{models::CreateInteractionLogRow, StorageBackend};

pub const CHAT_STARTED: &str = "chat_started";
pub const CHAT_ENDED: &str = "chat_ended";

/// Validated interaction posted by a client
#[derive(Debug, Clone)]
pub struct NewInteraction {
    pub session_id: String,
    pub event_type: String,
    pub phase: Option<String>,
    pub component: Option<String>,
    pub metadata: Option<JsonValue>,
}

/// What an interaction did besides being logged
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// A chat analytics entry was opened
    ChatOpened(ChatAnalyticsEntry),
    /// A chat analytics entry was closed
    ChatClosed(ChatAnalyticsEntry),
    /// Logged only
    Logged,
}

pub struct InteractionService {
    db: Arc<StorageBackend>,
    chats: Arc<ChatAnalyticsService>,
    clock: Arc<dyn Clock>,
}

impl InteractionService {
    pub fn new(db: Arc<StorageBackend>, chats: Arc<ChatAnalyticsService>) -> Self {
        Self {
            db,
            chats,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn record(&self, input: NewInteraction) -> Result<InteractionOutcome> {
        let session = self.chats.find_session(&input.session_id).await?;

        self.db
            .create_interaction_log(CreateInteractionLogRow {
                session_id: session.id,
                user_id: session.user_id,
                interaction_type: input.event_type.clone(),
                content_type: input.component.clone(),
                phase: input.phase.clone(),
                component: input.component.clone(),
                interaction_data: input.metadata.clone(),
            })
            .await?;

        tracing::debug!(
            session_id = %session.id,
            event_type = %input.event_type,
            "Logged interaction"
        );

        let now = self.clock.now();
        match input.event_type.as_str() {
            CHAT_STARTED => {
                let entry = self
                    .chats
                    .open_for_session(
                        &session,
                        input.phase.unwrap_or_default(),
                        input.component.unwrap_or_default(),
                        now,
                    )
                    .await?;
                Ok(InteractionOutcome::ChatOpened(entry))
            }
            CHAT_ENDED => self.close_chat(input.metadata.as_ref(), now).await,
            _ => Ok(InteractionOutcome::Logged),
        }
    }

    /// Close the entry named by `metadata.chat_analytics_id`.
    ///
    /// A missing, malformed or unknown id is not an error: the interaction is
    /// already logged and there is simply no entry to close.
    async fn close_chat(
        &self,
        metadata: Option<&JsonValue>,
        now: DateTime<Utc>,
    ) -> Result<InteractionOutcome> {
        let Some(entry_id) = metadata.and_then(chat_analytics_id) else {
            tracing::debug!("chat_ended without a usable chat_analytics_id, nothing to close");
            return Ok(InteractionOutcome::Logged);
        };
        let message_count = metadata.and_then(message_count).unwrap_or(0);

        match self.chats.try_close(entry_id, now, message_count).await? {
            Some(entry) => Ok(InteractionOutcome::ChatClosed(entry)),
            None => {
                tracing::debug!(entry_id = %entry_id, "chat_ended for unknown entry, nothing to close");
                Ok(InteractionOutcome::Logged)
            }
        }
    }
}

fn chat_analytics_id(metadata: &JsonValue) -> Option<Uuid> {
    metadata
        .get("chat_analytics_id")
        .and_then(JsonValue::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
}

fn message_count(metadata: &JsonValue) -> Option<i32> {
    metadata
        .get("message_count")
        .and_then(JsonValue::as_i64)
        .and_then(|n| i32::try_from(n).ok())
        .filter(|n| *n >= 0)
}
