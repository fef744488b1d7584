//! Client error type.

use idiom_catalog::TypeCodeError;
use thiserror::Error;

/// Failures surfaced by the API client and the browse session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("request failed: {message}")]
    Transport {
        /// Transport failure description.
        message: String,
    },
    /// A guarded operation exceeded its time limit.
    #[error("request timed out after {seconds}s")]
    Timeout {
        /// The limit that was exceeded, in whole seconds.
        seconds: u64,
    },
    /// The server answered with a non-success status.
    #[error("server responded with {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },
    /// The response body did not match the expected shape.
    #[error("invalid response payload: {message}")]
    Decode {
        /// Decoder failure description.
        message: String,
    },
    /// The caller supplied something the client refuses to send.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Validation failure description.
        message: String,
    },
    /// A category code could not be generated.
    #[error(transparent)]
    TypeCode(#[from] TypeCodeError),
}

impl ClientError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Whether the server reported that the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Whether retrying the same request could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode { .. } | Self::InvalidRequest { .. } | Self::TypeCode(_) => false,
        }
    }
}
