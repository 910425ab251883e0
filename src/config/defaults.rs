//! Default values for configuration fields
//!
//! This module centralizes all default values used in serde deserialization.

use std::time::Duration;

/// Default add command
pub const WHITELIST_ADD_COMMAND: &str = "whitelist add {nickname}";

/// Default remove command
pub const WHITELIST_REMOVE_COMMAND: &str = "whitelist remove {nickname}";

/// Default list command
pub const WHITELIST_LIST_COMMAND: &str = "whitelist list";

/// Default donation reward command (LuckPerms title permission)
pub const SUFFIX_COMMAND: &str = "lp user {nickname} permission set title.u.donate";

/// Default config file path used by the binary
pub const CONFIG_PATH: &str = "config.toml";

/// Default dedup window
#[inline]
pub fn dedup_window() -> Duration {
    crate::constants::dedup::WINDOW
}
