// Event tracker
//
// Observes navigation, unload and interaction signals of a running client and
// turns them into TrackedEvents for an EventRecorder.
//
// One EventTracker value covers one browsing session: the session-start flag
// lives on the tracker and is only cleared by `end_session`.
//
// Tracking is best-effort. Recorder failures are logged and dropped; none of
// the public operations can fail.

use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::events::{
    TrackedEvent, ANONYMOUS_USER_ID, PAGE_EXIT, PAGE_VIEW, SESSION_START,
};
use crate::traits::{Clock, EventRecorder, SystemClock, UserIdentity};

/// Static facts about the running client
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    /// Referring page, if the browser reported one
    pub referrer: Option<String>,
    /// Client agent string
    pub user_agent: String,
}

impl ClientContext {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            referrer: None,
            user_agent: user_agent.into(),
        }
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }
}

pub struct EventTracker {
    recorder: Arc<dyn EventRecorder>,
    identity: Arc<dyn UserIdentity>,
    clock: Arc<dyn Clock>,
    client: ClientContext,
    session_started: AtomicBool,
    current_path: RwLock<String>,
}

impl EventTracker {
    pub fn new(
        recorder: Arc<dyn EventRecorder>,
        identity: Arc<dyn UserIdentity>,
        client: ClientContext,
    ) -> Self {
        Self {
            recorder,
            identity,
            clock: Arc::new(SystemClock),
            client,
            session_started: AtomicBool::new(false),
            current_path: RwLock::new("/".to_string()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Stored user id, or the anonymous placeholder
    pub fn current_user_id(&self) -> String {
        self.identity
            .user_id()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| ANONYMOUS_USER_ID.to_string())
    }

    /// Last path passed to `on_navigate`
    pub fn current_path(&self) -> String {
        self.current_path.read().clone()
    }

    pub fn session_started(&self) -> bool {
        self.session_started.load(Ordering::SeqCst)
    }

    /// Mark the browsing session as ended; the next page view starts a new one
    pub fn end_session(&self) {
        self.session_started.store(false, Ordering::SeqCst);
    }

    /// Handle a path change.
    ///
    /// Emits `page_view` for non-API paths, plus `session_start` for the first
    /// page of the browsing session.
    pub async fn on_navigate(&self, path: &str) {
        *self.current_path.write() = path.to_string();

        if TrackedEvent::is_api_path(path) {
            tracing::trace!(path, "Skipping tracking for API path");
            return;
        }

        let user_id = self.current_user_id();
        let now = self.clock.now();

        let page_view = TrackedEvent::new(&user_id, PAGE_VIEW, path, now)
            .with("path", path)
            .with("referrer", self.client.referrer.clone().unwrap_or_default())
            .with("userAgent", self.client.user_agent.clone());
        self.emit(page_view).await;

        // Claim the flag atomically so concurrent navigations emit at most one
        if self
            .session_started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            let session_start =
                TrackedEvent::new(&user_id, SESSION_START, path, now).with("firstPath", path);
            self.emit(session_start).await;
        }
    }

    /// Best-effort `page_exit` for the current path. Delivery is not guaranteed.
    pub async fn on_unload(&self) {
        let path = self.current_path();
        let event = TrackedEvent::new(self.current_user_id(), PAGE_EXIT, &path, self.clock.now())
            .with("path", path.as_str());
        self.emit(event).await;
    }

    /// Record an interaction such as a button click.
    ///
    /// `extra` is merged last, so caller-supplied keys override the defaults.
    pub async fn track_interaction(&self, kind: &str, element_id: &str, extra: Map<String, Value>) {
        let path = self.current_path();
        let event = TrackedEvent::new(self.current_user_id(), kind, &path, self.clock.now())
            .with("elementId", element_id)
            .with("path", path.as_str())
            .merge(extra);
        self.emit(event).await;
    }

    async fn emit(&self, mut event: TrackedEvent) {
        if let Some(email) = self.identity.email() {
            event.metadata.insert("email".to_string(), Value::String(email));
        }

        let event_type = event.event_type.clone();
        match self.recorder.record(event).await {
            Ok(()) => tracing::debug!(event_type = %event_type, "Tracked event"),
            Err(e) => tracing::warn!(
                event_type = %event_type,
                error = %e,
                "Failed to record tracked event, dropping"
            ),
        }
    }
}
