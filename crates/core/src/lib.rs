// SoLBot analytics core
//
// This crate holds the DB-agnostic pieces shared by the control plane and
// clients:
// - Domain entity types (Session, ChatAnalyticsEntry, UserDataRecord)
// - Tracked events and the EventTracker that produces them
// - Traits (EventRecorder, UserIdentity, Clock) for pluggable collaborators
// - Recorder implementations (HTTP, in-memory, no-op)

pub mod chat_analytics;
pub mod error;
pub mod events;
pub mod recorder;
pub mod session;
pub mod tracker;
pub mod traits;
pub mod user_data;

// In-memory implementations for examples and testing
pub mod memory;

// Re-exports for convenience
pub use chat_analytics::{duration_seconds, ChatAnalyticsEntry};
pub use error::{AnalyticsError, Result};
pub use events::{
    TrackedEvent, ANONYMOUS_USER_ID, API_PATH_PREFIX, BUTTON_CLICK, PAGE_EXIT, PAGE_VIEW,
    SESSION_START,
};
pub use memory::{FixedClock, InMemoryEventRecorder};
pub use recorder::HttpEventRecorder;
pub use session::Session;
pub use tracker::{ClientContext, EventTracker};
pub use traits::{
    Clock, EventRecorder, NoopEventRecorder, StaticIdentity, SystemClock, UserIdentity,
};
pub use user_data::{normalize_user_id, UserDataRecord, EVENT_DATA_TYPE};
