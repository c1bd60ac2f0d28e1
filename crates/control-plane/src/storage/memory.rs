// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// This implementation provides a PostgreSQL-compatible API backed by in-memory
// HashMaps, allowing the control-plane to run without a database for development.

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    sessions: RwLock<HashMap<Uuid, SessionRow>>,
    chat_analytics: RwLock<HashMap<Uuid, ChatAnalyticsRow>>,
    user_data: RwLock<Vec<UserDataRow>>,
    interaction_logs: RwLock<Vec<InteractionLogRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // ============================================
    // Sessions
    // ============================================

    /// Insert a session as the chat backend would. Dev mode and tests only.
    pub fn seed_session(&self, user_id: Uuid) -> SessionRow {
        let row = SessionRow {
            id: Uuid::now_v7(),
            user_id,
            created_at: Self::now(),
        };
        self.sessions.write().insert(row.id, row.clone());
        row
    }

    pub async fn get_session(&self, id: Uuid) -> Result<Option<SessionRow>> {
        Ok(self.sessions.read().get(&id).cloned())
    }

    // ============================================
    // Chat analytics
    // ============================================

    pub async fn create_chat_analytics(
        &self,
        input: CreateChatAnalyticsRow,
    ) -> Result<ChatAnalyticsRow> {
        let row = ChatAnalyticsRow {
            id: Uuid::now_v7(),
            session_id: input.session_id,
            user_id: input.user_id,
            phase: input.phase,
            component: input.component,
            chat_start_time: input.chat_start_time,
            chat_end_time: None,
            message_count: None,
            total_duration_seconds: None,
            created_at: Self::now(),
        };
        self.chat_analytics.write().insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn get_chat_analytics(&self, id: Uuid) -> Result<Option<ChatAnalyticsRow>> {
        Ok(self.chat_analytics.read().get(&id).cloned())
    }

    pub async fn close_chat_analytics(
        &self,
        id: Uuid,
        input: CloseChatAnalytics,
    ) -> Result<Option<ChatAnalyticsRow>> {
        let mut entries = self.chat_analytics.write();
        if let Some(entry) = entries.get_mut(&id) {
            entry.chat_end_time = Some(input.chat_end_time);
            entry.message_count = Some(input.message_count);
            entry.total_duration_seconds = Some(input.total_duration_seconds);
            return Ok(Some(entry.clone()));
        }
        Ok(None)
    }

    /// Number of stored chat analytics entries
    pub fn chat_analytics_count(&self) -> usize {
        self.chat_analytics.read().len()
    }

    // ============================================
    // User data
    // ============================================

    pub async fn create_user_data(&self, input: CreateUserDataRow) -> Result<UserDataRow> {
        let row = UserDataRow {
            id: Uuid::now_v7(),
            user_id: input.user_id,
            data_type: input.data_type,
            value: input.value,
            metadata: input.metadata,
            created_at: Self::now(),
        };
        self.user_data.write().push(row.clone());
        Ok(row)
    }

    pub async fn list_user_data(
        &self,
        user_id: Uuid,
        data_type: Option<&str>,
    ) -> Result<Vec<UserDataRow>> {
        let mut rows: Vec<_> = self
            .user_data
            .read()
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| data_type.map_or(true, |t| r.data_type == t))
            .cloned()
            .collect();
        // Newest first; v7 ids break ties within the same instant
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    // ============================================
    // Interaction logs
    // ============================================

    pub async fn create_interaction_log(
        &self,
        input: CreateInteractionLogRow,
    ) -> Result<InteractionLogRow> {
        let row = InteractionLogRow {
            id: Uuid::now_v7(),
            session_id: input.session_id,
            user_id: input.user_id,
            interaction_type: input.interaction_type,
            content_type: input.content_type,
            phase: input.phase,
            component: input.component,
            interaction_data: input.interaction_data,
            created_at: Self::now(),
        };
        self.interaction_logs.write().push(row.clone());
        Ok(row)
    }

    /// Snapshot of stored interaction logs, oldest first
    pub fn interaction_logs(&self) -> Vec<InteractionLogRow> {
        self.interaction_logs.read().clone()
    }
}
