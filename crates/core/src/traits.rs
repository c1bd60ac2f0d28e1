// Core traits for pluggable collaborators
//
// These traits allow the event tracker to be used with different backends:
// - HTTP recorder posting to the user data endpoint (production)
// - In-memory implementations for examples and testing
// - No-op implementations when tracking is disabled

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::events::TrackedEvent;

// ============================================================================
// EventRecorder - Where tracked events go
// ============================================================================

/// Trait for recording tracked events
///
/// Implementations can:
/// - Post events to the user data endpoint
/// - Collect events in memory for testing
/// - Do nothing (no-op implementation)
#[async_trait]
pub trait EventRecorder: Send + Sync {
    /// Record a single event
    async fn record(&self, event: TrackedEvent) -> Result<()>;
}

/// No-op event recorder
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventRecorder;

#[async_trait]
impl EventRecorder for NoopEventRecorder {
    async fn record(&self, _event: TrackedEvent) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// UserIdentity - Who is browsing
// ============================================================================

/// Best-effort view of the current user, as stored by the client.
pub trait UserIdentity: Send + Sync {
    /// Stored user id, if any
    fn user_id(&self) -> Option<String>;

    /// Stored email, if any. Attached to event metadata when present.
    fn email(&self) -> Option<String> {
        None
    }
}

/// Identity fixed at construction time
#[derive(Debug, Default, Clone)]
pub struct StaticIdentity {
    user_id: Option<String>,
    email: Option<String>,
}

impl StaticIdentity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl UserIdentity for StaticIdentity {
    fn user_id(&self) -> Option<String> {
        self.user_id.clone()
    }

    fn email(&self) -> Option<String> {
        self.email.clone()
    }
}

// ============================================================================
// Clock - Event timestamps
// ============================================================================

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
