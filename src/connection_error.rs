//! Session error types for the RCON client
//!
//! Every step of a protocol session returns `Result<_, SessionError>`. The
//! whitelist client never lets these escape: each variant maps onto one
//! [`Outcome`] through [`SessionError::outcome`].

use std::time::Duration;

use thiserror::Error;

use crate::protocol::CodecError;
use crate::session::SessionState;
use crate::whitelist::Outcome;

/// Errors that can occur during one RCON session
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// TCP connect failed (refused, unreachable, DNS failure)
    #[error("failed to connect to {host}:{port}: {source}")]
    ConnectRefused {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    /// TCP connect did not complete in time
    #[error("connect to {host}:{port} timed out after {timeout:?}")]
    ConnectTimeout {
        host: String,
        port: u16,
        timeout: Duration,
    },

    /// Server answered the login with a request id other than the login id
    #[error("authentication rejected (request id {request_id})")]
    AuthRejected { request_id: i32 },

    /// No login reply in time
    #[error("no authentication reply within {timeout:?}")]
    AuthTimeout { timeout: Duration },

    /// No command reply in time
    #[error("no command reply within {timeout:?}")]
    CommandTimeout { timeout: Duration },

    /// Command reply carried an unexpected request id
    #[error("response id {actual} does not match request id {expected}: {body:?}")]
    MismatchedId {
        expected: i32,
        actual: i32,
        body: String,
    },

    /// Frame could not be decoded (short read, bad length, closed socket)
    #[error("malformed packet: {0}")]
    Malformed(CodecError),

    /// Operation not legal in the current lifecycle state
    #[error("cannot {operation} in state {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    /// I/O error while writing to the server
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CodecError> for SessionError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Io(e) => Self::Io(e),
            other => Self::Malformed(other),
        }
    }
}

impl SessionError {
    /// Classified outcome reported to callers for this failure
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::ConnectRefused { .. } => Outcome::Unavailable,
            Self::ConnectTimeout { .. } | Self::CommandTimeout { .. } => Outcome::Timeout,
            Self::AuthRejected { .. } | Self::AuthTimeout { .. } => Outcome::AuthFailure,
            Self::MismatchedId { .. }
            | Self::Malformed(_)
            | Self::InvalidState { .. }
            | Self::Io(_) => Outcome::ProtocolError,
        }
    }

    /// Check if this is an authentication error
    #[must_use]
    pub const fn is_authentication_error(&self) -> bool {
        matches!(self, Self::AuthRejected { .. } | Self::AuthTimeout { .. })
    }

    /// Check if this is a timeout of any step
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::ConnectTimeout { .. } | Self::AuthTimeout { .. } | Self::CommandTimeout { .. }
        )
    }

    /// Check if this is a network connectivity error
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::ConnectRefused { .. } | Self::ConnectTimeout { .. })
    }

    /// Get the appropriate log level for this error
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        match self {
            // Wrong password or a misbehaving server needs an operator
            Self::AuthRejected { .. }
            | Self::MismatchedId { .. }
            | Self::Malformed(_)
            | Self::InvalidState { .. } => tracing::Level::ERROR,
            // Server down or slow is usually transient
            Self::ConnectRefused { .. }
            | Self::ConnectTimeout { .. }
            | Self::AuthTimeout { .. }
            | Self::CommandTimeout { .. } => tracing::Level::WARN,
            Self::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe => tracing::Level::WARN,
            Self::Io(_) => tracing::Level::ERROR,
        }
    }

    /// Raw server text attached to this error, if any
    #[must_use]
    pub fn response_text(&self) -> Option<&str> {
        match self {
            Self::MismatchedId { body, .. } => Some(body),
            _ => None,
        }
    }
}
