// Health service
//
// Reports this application as healthy and checks the chat backend on a
// best-effort basis. Backend outages are reported as degraded fields in a
// healthy response, never as an unhealthy status, so browser clients do not
// cascade backend failures into their own UI.

use chrono::Utc;
use reqwest::{StatusCode, Url};
use solbot_core::{AnalyticsError, Result};
use std::future::Future;

use crate::api::health::{AppHealthResponse, BackendAvailability, BackendCheck, ChatHealthResponse};
use crate::config::HealthProbeConfig;

pub const HEALTHY: &str = "healthy";

const MAX_RETRIES: u32 = 1;

pub struct HealthService {
    http: reqwest::Client,
    config: HealthProbeConfig,
    environment: String,
}

impl HealthService {
    pub fn new(config: HealthProbeConfig, environment: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnalyticsError::Internal(e.into()))?;
        Ok(Self {
            http,
            config,
            environment: environment.into(),
        })
    }

    /// Application health with a single bounded backend check
    pub async fn app_health(&self) -> AppHealthResponse {
        let backend = match self.check_backend_health().await {
            Ok(()) => BackendCheck::Healthy,
            Err(e) => {
                tracing::error!(error = %e, "Backend health check failed");
                BackendCheck::Error
            }
        };

        AppHealthResponse {
            status: HEALTHY.to_string(),
            environment: self.environment.clone(),
            timestamp: Utc::now(),
            backend,
        }
    }

    /// Chat backend availability with one retry and a warning on slow checks.
    ///
    /// Only an internal fault (an unusable backend URL) is an error; an
    /// unreachable or failing backend is reported as unavailable.
    pub async fn chat_health(&self) -> Result<ChatHealthResponse> {
        let url = self.endpoint("/api/chat/health")?;
        tracing::debug!(url = %url, "Checking chat backend health");

        let check = warn_if_slow(self.config.warn_after, self.check_with_retry(url));

        let response = match check.await {
            Ok(status) if status.is_success() => ChatHealthResponse {
                status: HEALTHY.to_string(),
                backend: BackendAvailability::Available,
                message: "All systems operational".to_string(),
            },
            Ok(status) => {
                tracing::warn!(
                    status = status.as_u16(),
                    "Backend health check returned an error status, application is still functional"
                );
                ChatHealthResponse {
                    status: HEALTHY.to_string(),
                    backend: BackendAvailability::Unavailable,
                    message: "Application is healthy but backend may be unavailable".to_string(),
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Error checking backend health, application is still functional"
                );
                ChatHealthResponse {
                    status: HEALTHY.to_string(),
                    backend: BackendAvailability::Unavailable,
                    message: "Application is healthy but backend cannot be reached".to_string(),
                }
            }
        };

        Ok(response)
    }

    async fn check_backend_health(&self) -> Result<()> {
        let url = self.endpoint("/health")?;
        let response = self
            .http
            .get(url)
            .timeout(self.config.app_check_timeout)
            .send()
            .await
            .map_err(|e| AnalyticsError::upstream(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AnalyticsError::upstream(format!(
                "backend returned {}",
                response.status().as_u16()
            )))
        }
    }

    /// GET the health URL, retrying transport failures once after a fixed delay.
    /// HTTP error statuses are returned as-is and not retried.
    async fn check_with_retry(&self, url: Url) -> Result<StatusCode> {
        let mut retries_left = MAX_RETRIES;
        loop {
            match self.http.get(url.clone()).send().await {
                Ok(response) => {
                    tracing::debug!(status = response.status().as_u16(), "Backend health response");
                    return Ok(response.status());
                }
                Err(e) if retries_left > 0 => {
                    retries_left -= 1;
                    tracing::info!(
                        error = %e,
                        retries_left,
                        "Retrying backend health check"
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(e) => return Err(AnalyticsError::upstream(e.to_string())),
            }
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.config.backend_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| {
            AnalyticsError::Internal(anyhow::anyhow!("Invalid backend URL '{}': {}", raw, e))
        })
    }
}

/// Await `fut`, logging a warning once `warn_after` elapses without aborting it.
async fn warn_if_slow<F: Future>(warn_after: std::time::Duration, fut: F) -> F::Output {
    tokio::pin!(fut);
    tokio::select! {
        output = &mut fut => output,
        _ = tokio::time::sleep(warn_after) => {
            tracing::warn!(
                waited_ms = warn_after.as_millis() as u64,
                "Health check is taking longer than expected, but continuing"
            );
            fut.await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(backend_url: &str) -> HealthService {
        let config = HealthProbeConfig {
            backend_url: backend_url.to_string(),
            timeout: Duration::from_millis(500),
            app_check_timeout: Duration::from_millis(500),
            warn_after: Duration::from_millis(50),
            retry_delay: Duration::from_millis(10),
        };
        HealthService::new(config, "test").unwrap()
    }

    #[tokio::test]
    async fn test_chat_health_available() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let response = service_for(&server.uri()).chat_health().await.unwrap();
        assert_eq!(response.status, HEALTHY);
        assert_eq!(response.backend, BackendAvailability::Available);
    }

    #[tokio::test]
    async fn test_chat_health_error_status_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/health"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let response = service_for(&server.uri()).chat_health().await.unwrap();
        assert_eq!(response.status, HEALTHY);
        assert_eq!(response.backend, BackendAvailability::Unavailable);
        assert!(response.message.contains("may be unavailable"));
    }

    #[tokio::test]
    async fn test_chat_health_unreachable_backend_still_healthy() {
        // Nothing listens on port 9 (discard) in test environments
        let response = service_for("http://127.0.0.1:9").chat_health().await.unwrap();
        assert_eq!(response.status, HEALTHY);
        assert_eq!(response.backend, BackendAvailability::Unavailable);
        assert!(response.message.contains("cannot be reached"));
    }

    #[tokio::test]
    async fn test_slow_backend_is_awaited_past_warning() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/health"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
            .mount(&server)
            .await;

        let response = service_for(&server.uri()).chat_health().await.unwrap();
        assert_eq!(response.backend, BackendAvailability::Available);
    }

    #[tokio::test]
    async fn test_backend_slower_than_timeout_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/health"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let response = service_for(&server.uri()).chat_health().await.unwrap();
        assert_eq!(response.status, HEALTHY);
        assert_eq!(response.backend, BackendAvailability::Unavailable);
    }

    #[tokio::test]
    async fn test_invalid_backend_url_is_internal_fault() {
        let err = service_for("not a url").chat_health().await.unwrap_err();
        assert!(matches!(err, AnalyticsError::Internal(_)));
    }

    #[tokio::test]
    async fn test_app_health_reports_backend_error_but_stays_healthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let response = service_for(&server.uri()).app_health().await;
        assert_eq!(response.status, HEALTHY);
        assert_eq!(response.environment, "test");
        assert_eq!(response.backend, BackendCheck::Error);
    }

    #[tokio::test]
    async fn test_app_health_backend_healthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let response = service_for(&server.uri()).app_health().await;
        assert_eq!(response.backend, BackendCheck::Healthy);
    }
}
