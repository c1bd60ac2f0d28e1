// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Sessions (owned by the chat backend)
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// ============================================
// Chat analytics
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct ChatAnalyticsRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub phase: String,
    pub component: String,
    pub chat_start_time: DateTime<Utc>,
    pub chat_end_time: Option<DateTime<Utc>>,
    pub message_count: Option<i32>,
    pub total_duration_seconds: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateChatAnalyticsRow {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub phase: String,
    pub component: String,
    pub chat_start_time: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CloseChatAnalytics {
    pub chat_end_time: DateTime<Utc>,
    pub message_count: i32,
    pub total_duration_seconds: i64,
}

// ============================================
// User data
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct UserDataRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub data_type: String,
    pub value: String,
    pub metadata: Option<sqlx::types::JsonValue>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUserDataRow {
    pub user_id: Uuid,
    pub data_type: String,
    pub value: String,
    pub metadata: Option<serde_json::Value>,
}

// ============================================
// Interaction logs
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct InteractionLogRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub interaction_type: String,
    pub content_type: Option<String>,
    pub phase: Option<String>,
    pub component: Option<String>,
    pub interaction_data: Option<sqlx::types::JsonValue>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateInteractionLogRow {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub interaction_type: String,
    pub content_type: Option<String>,
    pub phase: Option<String>,
    pub component: Option<String>,
    pub interaction_data: Option<serde_json::Value>,
}
