// Error types for analytics operations

use thiserror::Error;

/// Result type alias for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors that can occur while recording analytics
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Referenced session or analytics entry does not exist
    #[error("{0}")]
    NotFound(String),

    /// Request failed boundary validation
    #[error("{0}")]
    Validation(String),

    /// Upstream backend could not be reached
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Event recorder failed to deliver an event
    #[error("Recorder error: {0}")]
    Recorder(String),

    /// Anything else (storage failures, serialization, ...)
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AnalyticsError {
    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        AnalyticsError::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        AnalyticsError::Validation(msg.into())
    }

    /// Create an upstream unavailable error
    pub fn upstream(msg: impl Into<String>) -> Self {
        AnalyticsError::UpstreamUnavailable(msg.into())
    }

    /// Create a recorder error
    pub fn recorder(msg: impl Into<String>) -> Self {
        AnalyticsError::Recorder(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AnalyticsError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_verbatim() {
        let err = AnalyticsError::not_found("Session not found");
        assert_eq!(err.to_string(), "Session not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_internal_keeps_raw_message() {
        let err: AnalyticsError = anyhow::anyhow!("connection reset").into();
        assert_eq!(err.to_string(), "connection reset");
        assert!(!err.is_not_found());
    }
}
