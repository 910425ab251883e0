//! Capacity limit configuration types

use std::num::NonZeroU64;

nonzero_newtype! {
    /// A non-zero upper bound on the number of entries a cache may hold
    ///
    /// # Examples
    /// ```
    /// use rcon_whitelist::types::MaxEntries;
    ///
    /// let max = MaxEntries::new(500).unwrap();
    /// assert_eq!(max.get(), 500);
    ///
    /// assert!(MaxEntries::new(0).is_none());
    /// ```
    #[doc(alias = "capacity")]
    pub struct MaxEntries(NonZeroU64: u64, serialize as serialize_u64);
}

impl MaxEntries {
    /// Default dedup cache bound
    pub const DEFAULT: Self =
        Self(NonZeroU64::new(crate::constants::dedup::MAX_ENTRIES).unwrap());
}

impl Default for MaxEntries {
    fn default() -> Self {
        Self::DEFAULT
    }
}
