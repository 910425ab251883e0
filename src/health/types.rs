use std::time::Duration;

/// Result of a single availability probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// TCP handshake completed within the bound
    Reachable {
        /// Time the handshake took
        elapsed: Duration,
    },
    /// Connect failed before the bound (refused, unreachable, DNS failure)
    Refused,
    /// No handshake within the bound
    TimedOut,
}

impl ProbeStatus {
    /// Whether the game server accepted a TCP connection
    #[inline]
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Reachable { .. })
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reachable { elapsed } => write!(f, "reachable in {}ms", elapsed.as_millis()),
            Self::Refused => f.write_str("connection refused"),
            Self::TimedOut => f.write_str("timed out"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_reachable_is_available() {
        assert!(
            ProbeStatus::Reachable {
                elapsed: Duration::from_millis(3)
            }
            .is_available()
        );
        assert!(!ProbeStatus::Refused.is_available());
        assert!(!ProbeStatus::TimedOut.is_available());
    }

    #[test]
    fn test_display() {
        let status = ProbeStatus::Reachable {
            elapsed: Duration::from_millis(42),
        };
        assert_eq!(status.to_string(), "reachable in 42ms");
        assert_eq!(ProbeStatus::TimedOut.to_string(), "timed out");
    }
}
