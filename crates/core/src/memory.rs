// In-memory implementations for examples and testing
//
// These implementations keep all data in memory, making them useful for:
// - Unit tests of the tracker
// - Running the tracker without a server

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{AnalyticsError, Result};
use crate::events::TrackedEvent;
use crate::traits::{Clock, EventRecorder};

// ============================================================================
// InMemoryEventRecorder - Collects events in memory
// ============================================================================

/// In-memory event recorder
///
/// Collects every recorded event in order. Can be switched into a failing
/// mode to exercise error paths.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRecorder {
    events: Arc<Mutex<Vec<TrackedEvent>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryEventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that rejects every event
    pub fn failing() -> Self {
        let recorder = Self::default();
        recorder.set_failing(true);
        recorder
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of recorded events
    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events.lock().clone()
    }

    /// Recorded events of a given type
    pub fn events_of_type(&self, event_type: &str) -> Vec<TrackedEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

#[async_trait]
impl EventRecorder for InMemoryEventRecorder {
    async fn record(&self, event: TrackedEvent) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AnalyticsError::recorder("recorder unavailable"));
        }
        self.events.lock().push(event);
        Ok(())
    }
}

// ============================================================================
// FixedClock - Pinned time for tests
// ============================================================================

#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
