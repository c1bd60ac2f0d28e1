// User data HTTP routes
//
// Generic per-user records. The tracker's HTTP recorder posts events here
// with `dataType = "event"`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use solbot_core::{AnalyticsError, UserDataRecord};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::common::{ApiError, ErrorResponse, ListResponse};
use super::validation::{
    json_body, query_params, require_text, MISSING_USER_DATA_FIELDS, MISSING_USER_ID,
};
use crate::services::{NewUserData, UserDataService};
use crate::storage::StorageBackend;

/// Request to save a user data record
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserDataRequest {
    /// User id. Non-UUID values are mapped to a stable UUID.
    #[schema(example = "user_42")]
    pub user_id: Option<String>,
    /// Kind of record, e.g. "event".
    #[schema(example = "event")]
    pub data_type: Option<String>,
    /// Record value. Non-string JSON is stored in its serialized form.
    #[schema(value_type = Object, example = "page_view")]
    pub value: Option<JsonValue>,
    /// Free-form metadata stored alongside the value.
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<JsonValue>,
}

impl SaveUserDataRequest {
    /// Check required fields and produce service input
    pub fn validate(self) -> Result<NewUserData, AnalyticsError> {
        let value = match self.value {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        match (require_text(self.user_id), require_text(self.data_type), value) {
            (Some(user_id), Some(data_type), Some(value)) => Ok(NewUserData {
                user_id,
                data_type,
                value,
                metadata: self.metadata,
            }),
            _ => Err(AnalyticsError::validation(MISSING_USER_DATA_FIELDS)),
        }
    }
}

/// Query parameters for listing user data
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListUserDataQuery {
    /// User whose records to list
    pub user_id: Option<String>,
    /// Only return records of this type
    pub data_type: Option<String>,
}

/// App state for user data routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<UserDataService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            service: Arc::new(UserDataService::new(db)),
        }
    }
}

/// Create user data routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/user-data", post(save_user_data).get(list_user_data))
        .with_state(state)
}

/// POST /api/user-data - Save a record
#[utoipa::path(
    post,
    path = "/api/user-data",
    request_body = SaveUserDataRequest,
    responses(
        (status = 200, description = "Record saved", body = UserDataRecord),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "user-data"
)]
pub async fn save_user_data(
    State(state): State<AppState>,
    body: Result<Json<SaveUserDataRequest>, JsonRejection>,
) -> Result<Json<UserDataRecord>, ApiError> {
    let input = json_body(body)?.validate()?;
    let record = state.service.save(input).await?;
    Ok(Json(record))
}

/// GET /api/user-data - List a user's records, newest first
#[utoipa::path(
    get,
    path = "/api/user-data",
    params(ListUserDataQuery),
    responses(
        (status = 200, description = "Records for the user", body = ListResponse<UserDataRecord>),
        (status = 400, description = "userId missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "user-data"
)]
pub async fn list_user_data(
    State(state): State<AppState>,
    query: Result<Query<ListUserDataQuery>, QueryRejection>,
) -> Result<Json<ListResponse<UserDataRecord>>, ApiError> {
    let query = query_params(query)?;
    let user_id = require_text(query.user_id)
        .ok_or_else(|| AnalyticsError::validation(MISSING_USER_ID))?;
    let data_type = require_text(query.data_type);

    let records = state.service.list(&user_id, data_type.as_deref()).await?;
    Ok(Json(ListResponse::new(records)))
}
