//! Error types for the resource fetcher
//!
//! These errors never reach the caller of the public fetch methods: they are
//! produced by the `try_*` methods of [`ResourceClient`](crate::ResourceClient)
//! and consumed by [`OrFallback`](crate::OrFallback).

/// Result type alias for fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to an upstream provider
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed (connection refused, DNS, TLS, body read...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// API returned a non-success status
    #[error("API error: {0}")]
    ApiError(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout,

    /// Successful response whose payload does not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Coarse classification used when logging a fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network error, timeout or non-success status
    Transient,
    /// Success status, unusable body
    Malformed,
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an API error
    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::ApiError(msg.into())
    }

    /// Create a malformed-response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Wraps a reqwest error, surfacing timeouts as [`Error::Timeout`]
    pub(crate) fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Json(_) | Self::Malformed(_) => FailureKind::Malformed,
            _ => FailureKind::Transient,
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.kind() == FailureKind::Malformed
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
