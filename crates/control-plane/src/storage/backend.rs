// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        db.migrate().await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    // ============================================
    // Sessions
    // ============================================

    pub async fn get_session(&self, id: Uuid) -> Result<Option<SessionRow>> {
        match self {
            Self::Postgres(db) => db.get_session(id).await,
            Self::InMemory(db) => db.get_session(id).await,
        }
    }

    // ============================================
    // Chat analytics
    // ============================================

    pub async fn create_chat_analytics(
        &self,
        input: CreateChatAnalyticsRow,
    ) -> Result<ChatAnalyticsRow> {
        match self {
            Self::Postgres(db) => db.create_chat_analytics(input).await,
            Self::InMemory(db) => db.create_chat_analytics(input).await,
        }
    }

    pub async fn get_chat_analytics(&self, id: Uuid) -> Result<Option<ChatAnalyticsRow>> {
        match self {
            Self::Postgres(db) => db.get_chat_analytics(id).await,
            Self::InMemory(db) => db.get_chat_analytics(id).await,
        }
    }

    pub async fn close_chat_analytics(
        &self,
        id: Uuid,
        input: CloseChatAnalytics,
    ) -> Result<Option<ChatAnalyticsRow>> {
        match self {
            Self::Postgres(db) => db.close_chat_analytics(id, input).await,
            Self::InMemory(db) => db.close_chat_analytics(id, input).await,
        }
    }

    // ============================================
    // User data
    // ============================================

    pub async fn create_user_data(&self, input: CreateUserDataRow) -> Result<UserDataRow> {
        match self {
            Self::Postgres(db) => db.create_user_data(input).await,
            Self::InMemory(db) => db.create_user_data(input).await,
        }
    }

    pub async fn list_user_data(
        &self,
        user_id: Uuid,
        data_type: Option<&str>,
    ) -> Result<Vec<UserDataRow>> {
        match self {
            Self::Postgres(db) => db.list_user_data(user_id, data_type).await,
            Self::InMemory(db) => db.list_user_data(user_id, data_type).await,
        }
    }

    // ============================================
    // Interaction logs
    // ============================================

    pub async fn create_interaction_log(
        &self,
        input: CreateInteractionLogRow,
    ) -> Result<InteractionLogRow> {
        match self {
            Self::Postgres(db) => db.create_interaction_log(input).await,
            Self::InMemory(db) => db.create_interaction_log(input).await,
        }
    }
}
