// Chat analytics domain types
//
// A ChatAnalyticsEntry records one interval during which a chat surface was
// visible. It is created open and closed once with an end time, message
// count and computed duration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// One open-to-close interval of a visible chat surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChatAnalyticsEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// Session the chat belongs to.
    pub session_id: Uuid,
    /// Owning user, copied from the session at open time.
    pub user_id: Uuid,
    /// Learning phase the chat was shown in (e.g. "phase2").
    pub phase: String,
    /// UI component hosting the chat (e.g. "solbot-chat").
    pub component: String,
    /// When the chat surface became visible.
    pub chat_start_time: DateTime<Utc>,
    /// When the chat surface was closed. Absent while open.
    pub chat_end_time: Option<DateTime<Utc>>,
    /// Messages exchanged while open. Absent while open.
    pub message_count: Option<i32>,
    /// Whole seconds between start and end. Absent while open.
    pub total_duration_seconds: Option<i64>,
    /// Timestamp when the entry was created.
    pub created_at: DateTime<Utc>,
}

impl ChatAnalyticsEntry {
    pub fn is_open(&self) -> bool {
        self.chat_end_time.is_none()
    }
}

/// Duration between two instants in whole seconds.
///
/// Computed on integer milliseconds and rounded to the nearest second with
/// ties away from zero: 125_500 ms is 126 s, -1_500 ms is -2 s. An end time
/// before the start time yields a negative duration.
pub fn duration_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    round_millis_to_seconds((end - start).num_milliseconds())
}

fn round_millis_to_seconds(millis: i64) -> i64 {
    let magnitude = (millis.unsigned_abs() + 500) / 1000;
    let magnitude = i64::try_from(magnitude).unwrap_or(i64::MAX);
    if millis < 0 {
        -magnitude
    } else {
        magnitude
    }
}
