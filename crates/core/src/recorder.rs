// HTTP event recorder
//
// Posts tracked events to the user data endpoint as
// {userId, dataType: "event", value: <event type>, metadata}.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::error::{AnalyticsError, Result};
use crate::events::TrackedEvent;
use crate::traits::EventRecorder;
use crate::user_data::EVENT_DATA_TYPE;

/// Path of the user data endpoint, relative to the base URL
pub const USER_DATA_PATH: &str = "/api/user-data";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserDataPayload<'a> {
    user_id: &'a str,
    data_type: &'a str,
    value: &'a str,
    metadata: &'a Map<String, Value>,
}

/// Recorder that forwards events to a SoLBot control plane over HTTP
#[derive(Debug, Clone)]
pub struct HttpEventRecorder {
    base_url: String,
    http: reqwest::Client,
}

impl HttpEventRecorder {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalyticsError::recorder(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, USER_DATA_PATH)
    }
}

#[async_trait]
impl EventRecorder for HttpEventRecorder {
    async fn record(&self, event: TrackedEvent) -> Result<()> {
        let payload = UserDataPayload {
            user_id: &event.user_id,
            data_type: EVENT_DATA_TYPE,
            value: &event.event_type,
            metadata: &event.metadata,
        };

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|e| AnalyticsError::recorder(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnalyticsError::recorder(format!(
                "user data endpoint returned {}: {}",
                status.as_u16(),
                message
            )));
        }

        Ok(())
    }
}
