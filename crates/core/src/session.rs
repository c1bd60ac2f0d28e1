// Session domain types
//
// Sessions are owned by the external chat backend. This service only reads
// the owning user of a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Session - a browsing visit linked to a user by the chat backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Session {
    /// Unique identifier for the session.
    pub id: Uuid,
    /// ID of the user owning the session.
    pub user_id: Uuid,
    /// Timestamp when the session was created.
    pub created_at: DateTime<Utc>,
}
