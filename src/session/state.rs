//! Session lifecycle state

use std::fmt;

/// Lifecycle of one RCON session
///
/// ```text
/// Disconnected -> Connected -> Authenticated -> Executing -> Closed
///                     |              |              |
///                     +--------------+--------------+--> Closed (on failure)
/// ```
///
/// A session runs one command and is never reused; `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No socket yet; a live `RconSession` starts in `Connected`, so this
    /// only names the origin of the connect transition
    Disconnected,
    /// TCP established, login not yet accepted
    Connected,
    /// Login accepted, ready for the command
    Authenticated,
    /// Command sent, waiting for its reply
    Executing,
    /// Socket released; terminal
    Closed,
}

impl SessionState {
    /// Whether a login may be sent in this state
    #[inline]
    #[must_use]
    pub const fn can_authenticate(self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Whether a command may be sent in this state
    #[inline]
    #[must_use]
    pub const fn can_execute(self) -> bool {
        matches!(self, Self::Authenticated)
    }

    /// Whether the session is finished
    #[inline]
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Short name for logs and error messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connected => "connected",
            Self::Authenticated => "authenticated",
            Self::Executing => "executing",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
