// User data service
//
// Stores generic user data records, including tracked events posted by the
// HTTP event recorder. Textual user ids are normalized to UUIDs.

use crate::storage::{models::CreateUserDataRow, StorageBackend, UserDataRow};
use solbot_core::{normalize_user_id, Result, UserDataRecord};
use std::sync::Arc;

/// Validated input for a new user data record
#[derive(Debug, Clone)]
pub struct NewUserData {
    pub user_id: String,
    pub data_type: String,
    pub value: String,
    pub metadata: Option<serde_json::Value>,
}

pub struct UserDataService {
    db: Arc<StorageBackend>,
}

impl UserDataService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn save(&self, req: NewUserData) -> Result<UserDataRecord> {
        let user_id = normalize_user_id(&req.user_id);
        tracing::debug!(
            user_id = %user_id,
            data_type = %req.data_type,
            "Saving user data"
        );

        let row = self
            .db
            .create_user_data(CreateUserDataRow {
                user_id,
                data_type: req.data_type,
                value: req.value,
                metadata: req.metadata,
            })
            .await?;

        Ok(Self::row_to_record(row))
    }

    pub async fn list(&self, user_id: &str, data_type: Option<&str>) -> Result<Vec<UserDataRecord>> {
        let rows = self
            .db
            .list_user_data(normalize_user_id(user_id), data_type)
            .await?;
        Ok(rows.into_iter().map(Self::row_to_record).collect())
    }

    fn row_to_record(row: UserDataRow) -> UserDataRecord {
        UserDataRecord {
            id: row.id,
            user_id: row.user_id,
            data_type: row.data_type,
            value: row.value,
            metadata: row.metadata,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> UserDataService {
        UserDataService::new(Arc::new(StorageBackend::in_memory()))
    }

    #[tokio::test]
    async fn test_textual_user_ids_share_records() {
        let service = service();
        let saved = service
            .save(NewUserData {
                user_id: "user_42".to_string(),
                data_type: "event".to_string(),
                value: "page_view".to_string(),
                metadata: Some(json!({"path": "/phase1"})),
            })
            .await
            .unwrap();

        assert_eq!(saved.user_id, normalize_user_id("user_42"));

        let listed = service.list("user_42", Some("event")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, saved.id);
        assert_eq!(listed[0].metadata, Some(json!({"path": "/phase1"})));
        assert!(service.list("user_43", None).await.unwrap().is_empty());
    }
}
