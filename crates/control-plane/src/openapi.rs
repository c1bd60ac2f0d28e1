// OpenAPI specification generation
//
// Shared by the API server (Swagger UI) and the export-openapi binary.

use crate::api;
use crate::api::{ErrorResponse, ListResponse};
use solbot_core::{ChatAnalyticsEntry, Session, UserDataRecord};
use utoipa::OpenApi;

/// OpenAPI documentation for the SoLBot analytics API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::chat_analytics::open_entry,
        api::chat_analytics::close_entry,
        api::events::record_event,
        api::user_data::save_user_data,
        api::user_data::list_user_data,
        api::health::app_health,
        api::health::chat_health,
    ),
    components(
        schemas(
            Session, ChatAnalyticsEntry, UserDataRecord,
            ErrorResponse,
            api::chat_analytics::OpenChatAnalyticsRequest,
            api::chat_analytics::CloseChatAnalyticsRequest,
            api::events::RecordEventRequest,
            api::events::RecordEventResponse,
            api::user_data::SaveUserDataRequest,
            api::user_data::ListUserDataQuery,
            ListResponse<UserDataRecord>,
            api::health::AppHealthResponse, api::health::BackendCheck,
            api::health::ChatHealthResponse, api::health::BackendAvailability,
            api::health::HealthErrorResponse,
        )
    ),
    tags(
        (name = "analytics", description = "Chat session analytics endpoints"),
        (name = "events", description = "Interaction ingestion endpoint"),
        (name = "user-data", description = "User data and tracked event endpoints"),
        (name = "health", description = "Liveness endpoints")
    ),
    info(
        title = "SoLBot Analytics API",
        version = "0.1.0",
        description = "API for recording chat analytics, tracked events and user data",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> Result<String, serde_json::Error> {
        Self::openapi().to_pretty_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_all_routes() {
        let spec = ApiDoc::openapi();
        for path in [
            "/api/analytics/chat",
            "/api/analytics/chat/{id}",
            "/api/events",
            "/api/user-data",
            "/api/health",
            "/api/chat/health",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
