//! Time-windowed deduplication of recent operations
//!
//! Callers (button handlers, donation pipeline) record the identity of an
//! operation before running it. A repeat of the same identity inside the
//! window is suppressed. The RCON client itself never consults this cache;
//! it is injected into the caller layer.

use moka::future::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::config::DedupConfig;
use crate::types::{MaxEntries, Nickname};

/// Bounded, expiring set of recently seen operation identities
///
/// Thread-safe: Uses Arc<Cache> internally, safe to clone and share across tasks
#[derive(Debug, Clone)]
pub struct RecentOperations {
    cache: Arc<Cache<String, ()>>,
    window: Duration,
    suppressed: Arc<AtomicU64>,
}

impl RecentOperations {
    /// Create a cache that remembers each identity for `window`
    #[must_use]
    pub fn new(window: Duration, max_entries: MaxEntries) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries.get())
            .time_to_live(window)
            .build();

        Self {
            cache: Arc::new(cache),
            window,
            suppressed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create from the `[dedup]` configuration section
    #[must_use]
    pub fn from_config(config: &DedupConfig) -> Self {
        Self::new(config.window, config.max_entries)
    }

    /// Record `key`; `true` if it was not seen inside the window
    ///
    /// Check and insert are one atomic step, so two concurrent callers with
    /// the same key cannot both get `true`.
    pub async fn check_and_record(&self, key: &str) -> bool {
        let entry = self.cache.entry_by_ref(key).or_insert(()).await;
        if entry.is_fresh() {
            true
        } else {
            self.suppressed.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Suppressed repeated operation '{}'", key);
            false
        }
    }

    /// Whether `key` is currently inside its window
    pub async fn contains(&self, key: &str) -> bool {
        self.cache.get(key).await.is_some()
    }

    /// Drop `key` so the next attempt proceeds (e.g. after a failed operation)
    pub async fn forget(&self, key: &str) {
        self.cache.invalidate(key).await;
    }

    /// Configured dedup window
    #[must_use]
    #[inline]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Number of repeats suppressed so far
    #[must_use]
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    /// Get current cache entry count
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Get configured cache capacity
    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.cache.policy().max_capacity().unwrap_or(0)
    }

    /// Run pending background tasks (for testing)
    pub async fn sync(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl Default for RecentOperations {
    fn default() -> Self {
        Self::from_config(&DedupConfig::default())
    }
}

/// Identity of a whitelist operation on a player
///
/// Minecraft nicknames are case-insensitive, so the key is lowercased.
///
/// # Examples
/// ```
/// use rcon_whitelist::cache::operation_key;
/// use rcon_whitelist::types::Nickname;
///
/// let nick = Nickname::new("Steve123".to_string()).unwrap();
/// assert_eq!(operation_key("add", &nick), "add:steve123");
/// ```
#[must_use]
pub fn operation_key(action: &str, nickname: &Nickname) -> String {
    format!("{}:{}", action, nickname.as_str().to_ascii_lowercase())
}
