//! Constants used throughout the RCON client
//!
//! This module centralizes magic numbers and wire values so the codec,
//! session and configuration layers agree on them.

use std::time::Duration;

/// RCON wire protocol constants
///
/// Frame layout (all integers little-endian `i32`):
/// ```text
/// length | request_id | type | body (UTF-8) | 0x00 0x00
/// ```
pub mod wire {
    /// Size of the leading length prefix
    pub const LENGTH_PREFIX: usize = 4;

    /// Bytes covered by `length` that are not body: request id + type + two nulls
    pub const HEADER_AND_TERMINATOR: usize = 4 + 4 + 2;

    /// Smallest legal value of the length prefix (empty body)
    pub const MIN_PACKET_LENGTH: usize = HEADER_AND_TERMINATOR;

    /// Largest response payload a server sends in a single packet
    pub const MAX_RESPONSE_BODY: usize = 4096;

    /// Largest length prefix we are willing to allocate for
    pub const MAX_PACKET_LENGTH: usize = MAX_RESPONSE_BODY + HEADER_AND_TERMINATOR;

    /// Trailing terminator appended after every body
    pub const TERMINATOR: [u8; 2] = [0x00, 0x00];

    // Compile-time validation
    const _MIN_BELOW_MAX: () = assert!(MIN_PACKET_LENGTH < MAX_PACKET_LENGTH);
}

/// Packet type codes
pub mod packet_type {
    /// Login request carrying the password
    pub const AUTH: i32 = 3;

    /// Command execution request
    pub const EXEC_COMMAND: i32 = 2;

    /// Server reply to a login request (shares the value of `EXEC_COMMAND`)
    pub const AUTH_RESPONSE: i32 = 2;

    /// Server reply carrying command output
    pub const RESPONSE_VALUE: i32 = 0;
}

/// Request id correlation constants
pub mod request_id {
    /// Request id used for the login packet
    pub const AUTH: i32 = 1;

    /// Request id used for the single command packet of a session
    pub const COMMAND: i32 = 2;

    /// Request id the server echoes when the password is rejected
    pub const AUTH_REJECTED: i32 = -1;
}

/// Timeout defaults
pub mod timeout {
    use super::Duration;

    /// Per-step timeout for connect, auth read and command read
    pub const RCON: Duration = Duration::from_secs(10);

    /// Bound on the pre-flight availability probe
    pub const PROBE: Duration = Duration::from_secs(5);

    /// Bound on one whole orchestrator call
    pub const OPERATION: Duration = Duration::from_secs(15);
}

/// Nickname format limits
pub mod nickname {
    /// Minimum nickname length in characters
    pub const MIN_LEN: usize = 3;

    /// Maximum nickname length in characters
    pub const MAX_LEN: usize = 16;
}

/// Deduplication window defaults
pub mod dedup {
    use super::Duration;

    /// How long a recorded operation suppresses repeats
    pub const WINDOW: Duration = Duration::from_secs(60);

    /// Upper bound on tracked identities
    pub const MAX_ENTRIES: u64 = 10_000;
}
