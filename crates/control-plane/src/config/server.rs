// Server configuration loaded from environment variables.
// Decision: DATABASE_URL unset means dev mode with in-memory storage
// Decision: Backend check timings are configurable, defaults match the web client

use axum::http::HeaderValue;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";
const DEFAULT_BACKEND_URL: &str = "http://localhost:8090";
const DEFAULT_ENVIRONMENT: &str = "development";

/// Timings for the upstream backend liveness checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthProbeConfig {
    /// Base URL of the chat backend
    pub backend_url: String,
    /// Hard ceiling for a single check request
    pub timeout: Duration,
    /// Ceiling for the plain `/api/health` backend check
    pub app_check_timeout: Duration,
    /// After this long a warning is logged; the check keeps running
    pub warn_after: Duration,
    /// Delay before the single retry of a failed chat-health check
    pub retry_delay: Duration,
}

impl Default for HealthProbeConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_secs(10),
            app_check_timeout: Duration::from_secs(5),
            warn_after: Duration::from_secs(2),
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Postgres URL; None selects in-memory storage
    pub database_url: Option<String>,
    /// Deployment environment reported by `/api/health`
    pub environment: String,
    /// Browser origins allowed by CORS (empty = same-origin only)
    pub cors_origins: Vec<HeaderValue>,
    pub health: HealthProbeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: None,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            cors_origins: Vec::new(),
            health: HealthProbeConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = HealthProbeConfig::default();
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());
        let millis = |key: &str, default: Duration| {
            non_empty(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(default)
        };

        let health = HealthProbeConfig {
            backend_url: non_empty("BACKEND_API_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),
            timeout: millis("HEALTH_PROBE_TIMEOUT_MS", defaults.timeout),
            app_check_timeout: millis("HEALTH_CHECK_TIMEOUT_MS", defaults.app_check_timeout),
            warn_after: millis("HEALTH_PROBE_WARN_MS", defaults.warn_after),
            retry_delay: millis("HEALTH_PROBE_RETRY_DELAY_MS", defaults.retry_delay),
        };

        // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
        let cors_origins = non_empty("CORS_ALLOWED_ORIGINS")
            .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
            .unwrap_or_default();

        Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            database_url: non_empty("DATABASE_URL"),
            environment: non_empty("APP_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            cors_origins,
            health,
        }
    }

    pub fn is_dev_mode(&self) -> bool {
        self.database_url.is_none()
    }
}
