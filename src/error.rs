//! Error types for Hashgrid client operations.
//!
//! Every fallible call in this crate returns [`Result`], whose error side is
//! [`HashgridError`].
//!
//! # Error Categories
//!
//! | Category | Variants | Carries status |
//! |----------|----------|----------------|
//! | Session | `NotInitialized`, `Closed` | No |
//! | HTTP | `Api`, `Authentication`, `NotFound`, `Validation` | Yes |
//! | Transport | `Request` | No |
//! | Mapping | `Decode` | No |
//! | Configuration | `Config` | No |
//! | Arguments | `InvalidArgument` | No |
//!
//! The HTTP and transport variants together form the "API error" family:
//! [`HashgridError::is_api_error`] answers `true` for all of them. A request
//! timeout surfaces as `Request`, indistinguishable by kind from an
//! unreachable server.
//!
//! # Examples
//!
//! ```
//! use hashgrid::HashgridError;
//!
//! let err = HashgridError::NotInitialized;
//! assert!(err.is_session_error());
//! assert!(!err.is_api_error());
//! assert_eq!(err.status_code(), None);
//! ```

use crate::types::ApiResponse;
use thiserror::Error;

/// Result type for Hashgrid operations.
pub type Result<T> = std::result::Result<T, HashgridError>;

/// Errors that can occur while talking to a grid.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HashgridError {
    /// A request was issued before the client session was opened.
    #[error("Client not initialized. Open a session or use Hashgrid::connect")]
    NotInitialized,

    /// A request was issued after the client session was closed.
    #[error("Client session is closed")]
    Closed,

    /// The server answered with a non-success status not covered by a
    /// more specific variant.
    #[error("{message}")]
    Api {
        /// Server-provided `message` field, or `API error: <status>`.
        message: String,
        /// HTTP status code.
        status: u16,
        /// Snapshot of the failed response.
        response: Box<ApiResponse>,
    },

    /// HTTP 401: the API key is missing or rejected.
    #[error("{message}")]
    Authentication {
        /// Human readable description.
        message: String,
        /// HTTP status code (always 401).
        status: u16,
        /// Snapshot of the failed response.
        response: Box<ApiResponse>,
    },

    /// HTTP 404: the addressed resource does not exist.
    #[error("{message}")]
    NotFound {
        /// Human readable description.
        message: String,
        /// HTTP status code (always 404).
        status: u16,
        /// Snapshot of the failed response.
        response: Box<ApiResponse>,
    },

    /// HTTP 422: the server rejected the request payload.
    #[error("{message}")]
    Validation {
        /// Server-provided `message` field, or `Validation error`.
        message: String,
        /// HTTP status code (always 422).
        status: u16,
        /// Snapshot of the failed response.
        response: Box<ApiResponse>,
    },

    /// The request never produced a response (connection refused, DNS
    /// failure, timeout, body read failure).
    #[error("Request failed: {0}")]
    Request(String),

    /// A success response did not match the expected record shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A call argument was rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<reqwest::Error> for HashgridError {
    fn from(err: reqwest::Error) -> Self {
        HashgridError::Request(err.to_string())
    }
}

impl From<serde_json::Error> for HashgridError {
    fn from(err: serde_json::Error) -> Self {
        HashgridError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for HashgridError {
    fn from(err: url::ParseError) -> Self {
        HashgridError::Config(format!("invalid URL: {}", err))
    }
}

impl HashgridError {
    /// HTTP status code of the failed response, if there was one.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HashgridError::Api { status, .. }
            | HashgridError::Authentication { status, .. }
            | HashgridError::NotFound { status, .. }
            | HashgridError::Validation { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response snapshot for HTTP-derived errors.
    #[must_use]
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            HashgridError::Api { response, .. }
            | HashgridError::Authentication { response, .. }
            | HashgridError::NotFound { response, .. }
            | HashgridError::Validation { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Whether this error belongs to the API error family (any HTTP failure
    /// or transport failure).
    #[inline]
    #[must_use]
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            HashgridError::Api { .. }
                | HashgridError::Authentication { .. }
                | HashgridError::NotFound { .. }
                | HashgridError::Validation { .. }
                | HashgridError::Request(_)
        )
    }

    /// Whether the client session itself is unusable.
    ///
    /// Polling loops stop on these instead of retrying.
    #[inline]
    #[must_use]
    pub fn is_session_error(&self) -> bool {
        matches!(self, HashgridError::NotInitialized | HashgridError::Closed)
    }
}
