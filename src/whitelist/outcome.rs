//! Classified result of a whitelist operation

use std::fmt;

use crate::protocol::ResponseClass;

/// What happened to one whitelist operation
///
/// Only [`Success`](Self::Success), [`AlreadyPresent`](Self::AlreadyPresent)
/// and [`NotPresent`](Self::NotPresent) mean the desired end state was
/// reached; everything else needs a human to follow up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The mutation or command was applied
    Success,
    /// Add of a player already on the list
    AlreadyPresent,
    /// Remove of a player not on the list
    NotPresent,
    /// The server does not know this player
    NotFound,
    /// The game server could not be reached
    Unavailable,
    /// A step or the whole operation ran out of time
    Timeout,
    /// The RCON password was rejected or the login went unanswered
    AuthFailure,
    /// The server violated the wire protocol
    ProtocolError,
    /// The nickname failed validation; nothing was sent
    InvalidNickname,
    /// The server reported an error; carries its text
    Failed(String),
    /// The reply matched no known phrase; carries its text
    Unclassified(String),
}

impl Outcome {
    /// Whether the desired end state was reached
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success | Self::AlreadyPresent | Self::NotPresent)
    }

    /// Whether a human must finish the operation by hand
    #[must_use]
    pub const fn requires_manual_action(&self) -> bool {
        !self.is_success()
    }

    /// Server text carried by this outcome, if any
    #[must_use]
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Self::Failed(text) | Self::Unclassified(text) => Some(text),
            _ => None,
        }
    }

    /// Short stable name for logs and exit reporting
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::AlreadyPresent => "already_present",
            Self::NotPresent => "not_present",
            Self::NotFound => "not_found",
            Self::Unavailable => "unavailable",
            Self::Timeout => "timeout",
            Self::AuthFailure => "auth_failure",
            Self::ProtocolError => "protocol_error",
            Self::InvalidNickname => "invalid_nickname",
            Self::Failed(_) => "failed",
            Self::Unclassified(_) => "unclassified",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.raw_text() {
            Some(text) => write!(f, "{}: {}", self.as_str(), text),
            None => f.write_str(self.as_str()),
        }
    }
}

impl From<ResponseClass> for Outcome {
    fn from(class: ResponseClass) -> Self {
        match class {
            ResponseClass::Success => Self::Success,
            ResponseClass::AlreadyPresent => Self::AlreadyPresent,
            ResponseClass::NotPresent => Self::NotPresent,
            ResponseClass::NotFound => Self::NotFound,
            ResponseClass::Failed(text) => Self::Failed(text),
            ResponseClass::Unclassified(text) => Self::Unclassified(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_set() {
        let successes = [Outcome::Success, Outcome::AlreadyPresent, Outcome::NotPresent];
        for outcome in successes {
            assert!(outcome.is_success(), "{outcome}");
            assert!(!outcome.requires_manual_action());
        }
    }

    #[test]
    fn test_everything_else_needs_a_human() {
        let failures = [
            Outcome::NotFound,
            Outcome::Unavailable,
            Outcome::Timeout,
            Outcome::AuthFailure,
            Outcome::ProtocolError,
            Outcome::InvalidNickname,
            Outcome::Failed("Error".to_string()),
            Outcome::Unclassified("???".to_string()),
        ];
        for outcome in failures {
            assert!(outcome.requires_manual_action(), "{outcome}");
        }
    }

    #[test]
    fn test_display_carries_text() {
        assert_eq!(Outcome::Timeout.to_string(), "timeout");
        assert_eq!(
            Outcome::Unclassified("ZzzUnrecognizedZzz".to_string()).to_string(),
            "unclassified: ZzzUnrecognizedZzz"
        );
    }

    #[test]
    fn test_from_response_class() {
        assert_eq!(Outcome::from(ResponseClass::NotPresent), Outcome::NotPresent);
        assert_eq!(
            Outcome::from(ResponseClass::Failed("Error: x".to_string())),
            Outcome::Failed("Error: x".to_string())
        );
    }
}
