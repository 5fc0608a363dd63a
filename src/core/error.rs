//! Error types for the shieldcortex client.
//!
//! Failures fall into two groups. API errors are classified HTTP responses
//! from the service and always carry the status and the raw response body.
//! Everything else (transport failures, malformed success bodies,
//! cancellation, bad configuration) is reported with its own variant and
//! never masquerades as an API error.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Discriminant for the closed set of classified API errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Credential rejected or expired (401).
    Auth,
    /// Too many requests (429).
    RateLimit,
    /// Malformed request payload (400).
    Validation,
    /// Any other non-2xx status.
    Generic,
}

impl ApiErrorKind {
    /// Returns the stable snake_case name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::RateLimit => "rate_limit",
            Self::Validation => "validation",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The main error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service rejected the API key.
    #[error("authentication failed: check your API key")]
    Auth {
        /// Raw response body.
        body: String,
    },

    /// The service is rate limiting this client.
    #[error("rate limit exceeded (retry after {retry_after:?}s)")]
    RateLimited {
        /// Raw response body.
        body: String,
        /// Seconds to wait, from the `retry-after` header when numeric.
        retry_after: Option<u64>,
    },

    /// The service rejected the request payload.
    #[error("validation error")]
    Validation {
        /// Raw response body.
        body: String,
    },

    /// Any other non-2xx response.
    #[error("API error: {status}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request never produced an HTTP response.
    #[error("transport error: {message}")]
    Transport {
        /// Description from the underlying transport.
        message: String,
        /// Whether the failure was a timeout.
        timed_out: bool,
    },

    /// A 2xx response body could not be decoded.
    #[error("malformed response body: {message}")]
    Decode {
        /// Decoder error message.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The call was cancelled through its cancellation token.
    #[error("request was cancelled")]
    Cancelled,

    /// Invalid client configuration.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl ClientError {
    /// Returns the API error kind, or `None` for non-API failures.
    pub fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Auth { .. } => Some(ApiErrorKind::Auth),
            Self::RateLimited { .. } => Some(ApiErrorKind::RateLimit),
            Self::Validation { .. } => Some(ApiErrorKind::Validation),
            Self::Api { .. } => Some(ApiErrorKind::Generic),
            _ => None,
        }
    }

    /// Returns the HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { .. } => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::Validation { .. } => Some(400),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body, verbatim, when one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Auth { body }
            | Self::RateLimited { body, .. }
            | Self::Validation { body }
            | Self::Api { body, .. }
            | Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns the server's retry hint for rate-limit errors.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited {
                retry_after: Some(secs),
                ..
            } => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }

    /// Returns `true` if repeating the call later may succeed.
    ///
    /// The client itself never retries; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Transport { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is one of the classified API errors.
    pub fn is_api_error(&self) -> bool {
        self.kind().is_some()
    }

    /// Creates a `Transport` error.
    pub fn transport(message: impl Into<String>, timed_out: bool) -> Self {
        Self::Transport {
            message: message.into(),
            timed_out,
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
