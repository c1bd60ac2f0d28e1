// Repository layer for database operations
// Sessions (read-only), chat analytics entries, user data records, interaction logs

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::*;

const MAX_CONNECTIONS: u32 = 10;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await
            .context("Failed to connect to Postgres")?;
        Ok(Self { pool })
    }

    /// Apply embedded migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ============================================
    // Sessions
    // ============================================

    pub async fn get_session(&self, id: Uuid) -> Result<Option<SessionRow>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id, created_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // ============================================
    // Chat analytics
    // ============================================

    pub async fn create_chat_analytics(
        &self,
        input: CreateChatAnalyticsRow,
    ) -> Result<ChatAnalyticsRow> {
        let row = sqlx::query_as::<_, ChatAnalyticsRow>(
            r#"
            INSERT INTO user_chat_analytics (session_id, user_id, phase, component, chat_start_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, session_id, user_id, phase, component, chat_start_time, chat_end_time,
                      message_count, total_duration_seconds, created_at
            "#,
        )
        .bind(input.session_id)
        .bind(input.user_id)
        .bind(&input.phase)
        .bind(&input.component)
        .bind(input.chat_start_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_chat_analytics(&self, id: Uuid) -> Result<Option<ChatAnalyticsRow>> {
        let row = sqlx::query_as::<_, ChatAnalyticsRow>(
            r#"
            SELECT id, session_id, user_id, phase, component, chat_start_time, chat_end_time,
                   message_count, total_duration_seconds, created_at
            FROM user_chat_analytics
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn close_chat_analytics(
        &self,
        id: Uuid,
        input: CloseChatAnalytics,
    ) -> Result<Option<ChatAnalyticsRow>> {
        let row = sqlx::query_as::<_, ChatAnalyticsRow>(
            r#"
            UPDATE user_chat_analytics
            SET
                chat_end_time = $2,
                message_count = $3,
                total_duration_seconds = $4
            WHERE id = $1
            RETURNING id, session_id, user_id, phase, component, chat_start_time, chat_end_time,
                      message_count, total_duration_seconds, created_at
            "#,
        )
        .bind(id)
        .bind(input.chat_end_time)
        .bind(input.message_count)
        .bind(input.total_duration_seconds)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // ============================================
    // User data
    // ============================================

    pub async fn create_user_data(&self, input: CreateUserDataRow) -> Result<UserDataRow> {
        let row = sqlx::query_as::<_, UserDataRow>(
            r#"
            INSERT INTO user_data (user_id, data_type, value, metadata)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, data_type, value, metadata, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.data_type)
        .bind(&input.value)
        .bind(&input.metadata)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_user_data(
        &self,
        user_id: Uuid,
        data_type: Option<&str>,
    ) -> Result<Vec<UserDataRow>> {
        let rows = sqlx::query_as::<_, UserDataRow>(
            r#"
            SELECT id, user_id, data_type, value, metadata, created_at
            FROM user_data
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR data_type = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(data_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ============================================
    // Interaction logs
    // ============================================

    pub async fn create_interaction_log(
        &self,
        input: CreateInteractionLogRow,
    ) -> Result<InteractionLogRow> {
        let row = sqlx::query_as::<_, InteractionLogRow>(
            r#"
            INSERT INTO content_interaction_logs
                (session_id, user_id, interaction_type, content_type, phase, component, interaction_data)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, session_id, user_id, interaction_type, content_type, phase, component,
                      interaction_data, created_at
            "#,
        )
        .bind(input.session_id)
        .bind(input.user_id)
        .bind(&input.interaction_type)
        .bind(&input.content_type)
        .bind(&input.phase)
        .bind(&input.component)
        .bind(&input.interaction_data)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert interaction log")?;

        Ok(row)
    }
}
