//! Error types for phpIPAM operations.
//!
//! A single error enum covers configuration, authentication, transport,
//! decoding and validation failures. Every failure propagates to the caller
//! unchanged; nothing in the client retries or suppresses errors.

use thiserror::Error;

/// Main error type for phpIPAM operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration error (bad endpoint, unusable TLS settings, ...)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Endpoint or request path could not be turned into a URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Credentials were rejected or the token could not be refreshed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Response body, payload or timestamp could not be decoded
    #[error("Failed to parse phpIPAM response: {0}")]
    ParseError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// phpIPAM could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Caller-side validation failed before any request was sent
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Operation is not valid in the current session state
    #[error("Invalid session state: {0}")]
    StateError(String),

    /// phpIPAM reported that the resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// phpIPAM answered with an unsuccessful envelope
    #[error("phpIPAM API error {code}: {message}")]
    Api {
        /// Status code reported in the envelope
        code: u16,
        /// Message reported in the envelope
        message: String,
    },
}

/// Specialized result type for phpIPAM operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::AuthenticationFailed(_) => "AUTHENTICATION_FAILED",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::StateError(_) => "STATE_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Api { .. } => "API_ERROR",
        }
    }

    /// Returns true for failures raised by the network layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpError(_) | Self::Timeout(_) | Self::ServiceUnavailable(_)
        )
    }

    /// Builds the error matching an unsuccessful envelope.
    #[must_use]
    pub fn from_envelope(code: u16, message: Option<&str>) -> Self {
        let message = message.unwrap_or("no message").to_string();
        match code {
            401 | 403 => Self::AuthenticationFailed(message),
            404 => Self::NotFound(message),
            _ => Self::Api { code, message },
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}
