//! Cache module
//!
//! Provides the recent-operation dedup cache used by callers to suppress
//! repeated whitelist mutations (double-clicked approval buttons, replayed
//! donation webhooks).

mod recent;

pub use recent::{RecentOperations, operation_key};
