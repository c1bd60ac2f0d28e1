// Input validation for analytics APIs
//
// Hard limits, not configurable. Failures become `AnalyticsError::Validation`
// and are returned as 400 with a descriptive message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query};
use solbot_core::{AnalyticsError, Result};

use super::common::ApiError;

// =============================================================================
// Input Size Limits
// =============================================================================

/// Maximum size for the phase and component labels of a chat entry.
pub const MAX_LABEL_BYTES: usize = 256;

pub const MISSING_USER_DATA_FIELDS: &str =
    "Missing required fields: userId, dataType, and value are required";

pub const MISSING_USER_ID: &str = "userId is required";

pub const MISSING_EVENT_FIELDS: &str = "Missing required fields";

// =============================================================================
// Validation Functions
// =============================================================================

/// Validate a phase or component label
pub fn validate_label(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AnalyticsError::validation(format!("{} must not be empty", field)));
    }
    if value.len() > MAX_LABEL_BYTES {
        tracing::warn!(
            "{} exceeds limit: {} bytes (max: {})",
            field,
            value.len(),
            MAX_LABEL_BYTES
        );
        return Err(AnalyticsError::validation(format!(
            "{} must be at most {} bytes",
            field, MAX_LABEL_BYTES
        )));
    }
    Ok(())
}

pub fn validate_message_count(message_count: i32) -> Result<()> {
    if message_count < 0 {
        return Err(AnalyticsError::validation(
            "message_count must be non-negative",
        ));
    }
    Ok(())
}

/// Required text field: present and not blank
pub fn require_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// =============================================================================
// Extractor rejections
// =============================================================================

/// Unwrap a JSON body, turning malformed input into a 400
pub fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> std::result::Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::bad_request(rejection.body_text())
    })
}

/// Unwrap a path parameter, turning unparsable ids into a 400
pub fn path_param<T>(path: std::result::Result<Path<T>, PathRejection>) -> std::result::Result<T, ApiError> {
    path.map(|Path(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

pub fn query_params<T>(query: std::result::Result<Query<T>, QueryRejection>) -> std::result::Result<T, ApiError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_label() {
        assert!(validate_label("phase", "phase2").is_ok());
        assert!(validate_label("component", &"x".repeat(MAX_LABEL_BYTES)).is_ok());
    }

    #[test]
    fn test_invalid_label() {
        assert!(validate_label("phase", "").is_err());
        assert!(validate_label("phase", "   ").is_err());
        let err = validate_label("component", &"x".repeat(MAX_LABEL_BYTES + 1)).unwrap_err();
        assert!(matches!(err, AnalyticsError::Validation(_)));
    }

    #[test]
    fn test_message_count() {
        assert!(validate_message_count(0).is_ok());
        assert!(validate_message_count(12).is_ok());
        assert!(validate_message_count(-1).is_err());
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text(Some("event".into())), Some("event".to_string()));
        assert_eq!(require_text(Some(" ".into())), None);
        assert_eq!(require_text(None), None);
    }
}
