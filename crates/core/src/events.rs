// Tracked event types
//
// Tracked events are ephemeral analytics signals. They are handed to an
// EventRecorder and discarded; nothing here persists them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PAGE_VIEW: &str = "page_view";
pub const SESSION_START: &str = "session_start";
pub const PAGE_EXIT: &str = "page_exit";
pub const BUTTON_CLICK: &str = "button_click";

/// User id reported when no user is known yet
pub const ANONYMOUS_USER_ID: &str = "anonymous";

/// Paths under this prefix are API calls, not pages
pub const API_PATH_PREFIX: &str = "/api/";

/// A single analytics signal describing a user action or lifecycle moment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackedEvent {
    pub user_id: String,
    pub event_type: String,
    pub path: String,
    pub timestamp: DateTime<Utc>,
    /// Event payload. Always carries a `timestamp` key mirroring the field.
    pub metadata: Map<String, Value>,
}

impl TrackedEvent {
    pub fn new(
        user_id: impl Into<String>,
        event_type: impl Into<String>,
        path: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut metadata = Map::new();
        metadata.insert("timestamp".to_string(), Value::String(timestamp.to_rfc3339()));
        Self {
            user_id: user_id.into(),
            event_type: event_type.into(),
            path: path.into(),
            timestamp,
            metadata,
        }
    }

    /// Set a metadata key, replacing any previous value
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Merge caller-supplied data. Caller keys win on conflict.
    pub fn merge(mut self, extra: Map<String, Value>) -> Self {
        self.metadata.extend(extra);
        self
    }

    pub fn is_api_path(path: &str) -> bool {
        path.starts_with(API_PATH_PREFIX)
    }
}
