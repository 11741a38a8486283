//! # Lookup Errors
//!
//! Error types for remote lookups (pricing and maps).
//!
//! Every failure collapses onto one of three [`FailureKind`]s. The kind is
//! what enrichment records; the message is for logs only.
//!
//! # Examples
//!
//! ```
//! use vehicle_catalog::infrastructure::lookups::error::{FailureKind, LookupError};
//!
//! let error = LookupError::timeout("request timed out after 2000ms");
//! assert_eq!(error.kind(), FailureKind::Timeout);
//!
//! let error = LookupError::invalid_response("missing field `price`");
//! assert_eq!(error.kind(), FailureKind::RemoteError);
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Classification of a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The call did not complete before its deadline.
    Timeout,
    /// The remote answered, but with an error status or unusable data.
    RemoteError,
    /// The remote could not be reached.
    Unreachable,
}

impl FailureKind {
    /// Returns the snake_case name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::RemoteError => "remote_error",
            Self::Unreachable => "unreachable",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for pricing and maps lookups.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// Request timed out.
    #[error("lookup timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error.
    #[error("lookup unreachable: {message}")]
    Unreachable {
        /// Error message.
        message: String,
    },

    /// Non-success HTTP status.
    #[error("lookup remote error ({status}): {message}")]
    Remote {
        /// HTTP status code returned by the remote.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Response could not be parsed or failed validation.
    #[error("lookup invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}

impl LookupError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates an unreachable error.
    #[must_use]
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Creates a remote error from an HTTP status.
    #[must_use]
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Creates an invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Returns the failure classification.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::Unreachable { .. } => FailureKind::Unreachable,
            Self::Remote { .. } | Self::InvalidResponse { .. } => FailureKind::RemoteError,
        }
    }

    /// Returns the HTTP status, if the remote answered with one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for lookups.
pub type LookupResult<T> = Result<T, LookupError>;
