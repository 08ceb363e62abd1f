//! Error types for the API client

use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
///
/// Every variant originates in the transport layer. Review operations never
/// construct errors themselves; they hand back whatever the transport reports.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Yotpo returned a non-success status
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Raw response body
        message: String,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// HTTP status reported by the service, if the failure got that far
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiResponse { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Json(_) | Self::Config(_) | Self::InvalidUrl(_) => None,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let not_found = ApiError::api_response(404, "review not found");
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());
        assert_eq!(not_found.status(), Some(404));

        let unavailable = ApiError::api_response(503, "maintenance");
        assert!(unavailable.is_server_error());
        assert!(!unavailable.is_client_error());
    }

    #[test]
    fn test_config_error_has_no_status() {
        let err = ApiError::config("base_url cannot be empty");
        assert_eq!(err.status(), None);
        assert_eq!(
            err.to_string(),
            "Configuration error: base_url cannot be empty"
        );
    }

    #[test]
    fn test_api_response_display() {
        let err = ApiError::api_response(401, r#"{"status":{"message":"Unauthorized"}}"#);
        assert_eq!(
            err.to_string(),
            r#"API error (401): {"status":{"message":"Unauthorized"}}"#
        );
    }
}
