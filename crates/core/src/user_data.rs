// User data domain types
//
// Generic (user, data type, value, metadata) records. Tracked events are
// stored here with data_type "event" and the event type as value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Data type used for tracked events
pub const EVENT_DATA_TYPE: &str = "event";

/// Namespace UUID for mapping textual user ids to UUIDs (UUID v5)
const USER_ID_NAMESPACE: Uuid = Uuid::from_bytes([
    0x3f, 0x1c, 0x8e, 0x52, 0x6a, 0x0d, 0x4b, 0x7e, 0x9c, 0x21, 0x5d, 0xe4, 0x0b, 0x6f, 0x93, 0xa8,
]);

/// A stored user data record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserDataRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// Owning user (normalized to a UUID).
    pub user_id: Uuid,
    /// Kind of data, e.g. "event" or "learning_objective".
    pub data_type: String,
    /// Stored value. For events this is the event type.
    pub value: String,
    /// Free-form context attached by the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// Timestamp when the record was stored.
    pub created_at: DateTime<Utc>,
}

/// Map a client-supplied user id to a UUID.
///
/// Ids that already parse as UUIDs are kept; anything else ("anonymous",
/// "user_42", an email) maps deterministically to a v5 UUID.
pub fn normalize_user_id(raw: &str) -> Uuid {
    let trimmed = raw.trim();
    Uuid::parse_str(trimmed)
        .unwrap_or_else(|_| Uuid::new_v5(&USER_ID_NAMESPACE, trimmed.as_bytes()))
}
