// Chat analytics service for business logic
//
// Opens an entry when a chat surface becomes visible and closes it with the
// end time, message count and computed duration. No retries: storage errors
// surface to the caller as internal errors.

use crate::storage::{
    models::{CloseChatAnalytics, CreateChatAnalyticsRow},
    ChatAnalyticsRow, SessionRow, StorageBackend,
};
use chrono::{DateTime, Utc};
use solbot_core::{duration_seconds, AnalyticsError, ChatAnalyticsEntry, Result};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::chat_analytics::{CloseChatAnalyticsRequest, OpenChatAnalyticsRequest};

pub const SESSION_NOT_FOUND: &str = "Session not found";
pub const ENTRY_NOT_FOUND: &str = "Chat analytics entry not found";

pub struct ChatAnalyticsService {
    db: Arc<StorageBackend>,
}

impl ChatAnalyticsService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// Resolve a session by its client-supplied id.
    ///
    /// Session ids are opaque to clients; anything that is not a stored
    /// session, including text that is not a UUID, is `NotFound`.
    pub async fn find_session(&self, session_id: &str) -> Result<SessionRow> {
        let id = match Uuid::parse_str(session_id.trim()) {
            Ok(id) => id,
            Err(_) => {
                tracing::debug!(session_id, "Session id is not a UUID");
                return Err(AnalyticsError::not_found(SESSION_NOT_FOUND));
            }
        };
        self.db
            .get_session(id)
            .await?
            .ok_or_else(|| AnalyticsError::not_found(SESSION_NOT_FOUND))
    }

    /// Open an entry for a session, copying the session's owning user.
    pub async fn open_entry(&self, req: OpenChatAnalyticsRequest) -> Result<ChatAnalyticsEntry> {
        let session = self.find_session(&req.session_id).await?;
        self.open_for_session(&session, req.phase, req.component, req.start_time)
            .await
    }

    /// Open an entry for an already resolved session
    pub async fn open_for_session(
        &self,
        session: &SessionRow,
        phase: String,
        component: String,
        start_time: DateTime<Utc>,
    ) -> Result<ChatAnalyticsEntry> {
        let row = self
            .db
            .create_chat_analytics(CreateChatAnalyticsRow {
                session_id: session.id,
                user_id: session.user_id,
                phase,
                component,
                chat_start_time: start_time,
            })
            .await?;

        tracing::info!(
            entry_id = %row.id,
            session_id = %row.session_id,
            phase = %row.phase,
            component = %row.component,
            "Opened chat analytics entry"
        );

        Ok(Self::row_to_entry(row))
    }

    /// Close an entry, computing its duration from the stored start time.
    pub async fn close_entry(
        &self,
        id: Uuid,
        req: CloseChatAnalyticsRequest,
    ) -> Result<ChatAnalyticsEntry> {
        self.try_close(id, req.end_time, req.message_count)
            .await?
            .ok_or_else(|| AnalyticsError::not_found(ENTRY_NOT_FOUND))
    }

    /// Close an entry if it exists. `None` means there was nothing to close.
    pub async fn try_close(
        &self,
        id: Uuid,
        end_time: DateTime<Utc>,
        message_count: i32,
    ) -> Result<Option<ChatAnalyticsEntry>> {
        let Some(existing) = self.db.get_chat_analytics(id).await? else {
            return Ok(None);
        };

        let total_duration_seconds = duration_seconds(existing.chat_start_time, end_time);
        if total_duration_seconds < 0 {
            tracing::warn!(
                entry_id = %id,
                total_duration_seconds,
                "Chat end time precedes start time"
            );
        }

        // None here means the entry vanished between lookup and update
        let row = self
            .db
            .close_chat_analytics(
                id,
                CloseChatAnalytics {
                    chat_end_time: end_time,
                    message_count,
                    total_duration_seconds,
                },
            )
            .await?;

        if let Some(row) = &row {
            tracing::info!(
                entry_id = %row.id,
                message_count,
                total_duration_seconds,
                "Closed chat analytics entry"
            );
        }

        Ok(row.map(Self::row_to_entry))
    }

    fn row_to_entry(row: ChatAnalyticsRow) -> ChatAnalyticsEntry {
        ChatAnalyticsEntry {
            id: row.id,
            session_id: row.session_id,
            user_id: row.user_id,
            phase: row.phase,
            component: row.component,
            chat_start_time: row.chat_start_time,
            chat_end_time: row.chat_end_time,
            message_count: row.message_count,
            total_duration_seconds: row.total_duration_seconds,
            created_at: row.created_at,
        }
    }
}
