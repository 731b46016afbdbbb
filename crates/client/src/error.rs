//! Error types for the storefront client.
//!
//! Failures come in two kinds: local validation failures
//! ([`ValidationError`]), which never reach the network, and remote failures
//! ([`ApiError`]). [`StorefrontError`] wraps both for session operations.

use quitanda_core::ValidationError;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend returned HTTP {status}: {}", message.as_deref().unwrap_or("no details"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body, when present.
        message: Option<String>,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The payload parsed but violates the expected contract.
    #[error("Unexpected value for {field}: {detail}")]
    Contract {
        /// Wire field name.
        field: &'static str,
        /// What was wrong with it.
        detail: String,
    },

    /// An endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Whether the backend answered 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// The message the backend put in its error body, if any.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Errors returned by storefront session operations.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Input rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Printing was requested before any receipt was rendered.
    #[error("No receipt to print")]
    NoReceipt,

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_includes_backend_message() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Estoque insuficiente".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Backend returned HTTP 400: Estoque insuficiente"
        );
        assert_eq!(err.backend_message(), Some("Estoque insuficiente"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found() {
        let err = ApiError::Status {
            status: 404,
            message: None,
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Backend returned HTTP 404: no details");
    }

    #[test]
    fn test_validation_is_transparent() {
        let err = StorefrontError::from(ValidationError::EmptyCart);
        assert_eq!(err.to_string(), "Cart is empty!");
    }
}
