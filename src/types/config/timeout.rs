//! Timeout newtypes for type-safe timeout handling
//!
//! Strongly-typed wrappers around `std::time::Duration` so a probe bound
//! cannot be passed where the per-step RCON timeout is expected.

use std::time::Duration;

/// Macro to generate Duration newtypes with a default, accessors,
/// conversions and seconds-based serde
macro_rules! timeout_newtype {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident = $default:expr;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $name(Duration);

        impl $name {
            /// Default value for this timeout
            pub const DEFAULT: Self = Self($default);

            #[doc = concat!("Create a new ", stringify!($name))]
            #[inline]
            pub const fn new(duration: Duration) -> Self {
                Self(duration)
            }

            /// Get the underlying duration
            #[inline]
            #[must_use]
            pub const fn as_duration(self) -> Duration {
                self.0
            }

            /// True when the timeout would expire immediately
            #[inline]
            #[must_use]
            pub const fn is_zero(self) -> bool {
                self.0.is_zero()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::DEFAULT
            }
        }

        impl From<Duration> for $name {
            fn from(duration: Duration) -> Self {
                Self(duration)
            }
        }

        impl From<$name> for Duration {
            fn from(timeout: $name) -> Self {
                timeout.0
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                super::duration_serde::serialize(&self.0, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                super::duration_serde::deserialize(deserializer).map(Self)
            }
        }
    };
}

timeout_newtype! {
    /// Bound applied separately to connect, auth read and command read
    pub struct RconTimeout = crate::constants::timeout::RCON;
}

timeout_newtype! {
    /// Bound on the pre-flight TCP availability probe
    pub struct ProbeTimeout = crate::constants::timeout::PROBE;
}

timeout_newtype! {
    /// Bound on one whole orchestrator call, probe included
    pub struct OperationTimeout = crate::constants::timeout::OPERATION;
}
