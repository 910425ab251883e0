//! Validated string types that enforce invariants at construction time

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::nickname::{MAX_LEN, MIN_LEN};

/// Validation errors for string types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("hostname cannot be empty or whitespace")]
    EmptyHostName,

    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("port cannot be 0")]
    InvalidPort,

    #[error("invalid port number: {0}")]
    InvalidPortNumber(String),

    #[error("nickname must be {min}-{max} characters, got {len}")]
    NicknameLength { len: usize, min: usize, max: usize },

    #[error("nickname may only contain A-Z, a-z, 0-9 and '_': {0:?}")]
    NicknameCharacters(String),
}

/// Macro to generate validated string newtypes.
///
/// Each type gets:
/// - A `new()` constructor that validates
/// - `as_str()` getter
/// - `AsRef<str>`, `Deref`, `Display`, `TryFrom<String>`, `FromStr` impls
/// - Serde `Serialize` and `Deserialize` with validation
macro_rules! validated_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident(String) {
            validation: |$s_param:ident| $validation:expr,
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        $vis struct $name(String);

        impl $name {
            #[doc = concat!("Create a new ", stringify!($name), " after validation")]
            pub fn new($s_param: String) -> Result<Self, ValidationError> {
                let validate = || $validation;
                validate()?;
                Ok(Self($s_param))
            }

            #[doc = concat!("Get the ", stringify!($name), " as a string slice")]
            #[must_use]
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            #[inline]
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from($s_param: String) -> Result<Self, Self::Error> {
                Self::new($s_param)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ValidationError;

            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::new(s.to_string())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::new(s).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Check whether a character is allowed in a nickname
#[inline]
#[must_use]
pub const fn is_nickname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

validated_string! {
    /// A validated hostname that cannot be empty or whitespace-only
    ///
    /// # Examples
    /// ```
    /// use rcon_whitelist::types::HostName;
    ///
    /// let host = HostName::new("mc.example.com".to_string()).unwrap();
    /// assert_eq!(host.as_str(), "mc.example.com");
    ///
    /// assert!(HostName::new("".to_string()).is_err());
    /// assert!(HostName::new("   ".to_string()).is_err());
    /// ```
    #[doc(alias = "host")]
    pub struct HostName(String) {
        validation: |s| {
            if s.trim().is_empty() {
                Err(ValidationError::EmptyHostName)
            } else {
                Ok(())
            }
        },
    }
}

validated_string! {
    /// RCON password. Never printed by `Debug` or `Display`.
    pub struct Password(String) {
        validation: |s| {
            if s.is_empty() {
                Err(ValidationError::EmptyPassword)
            } else {
                Ok(())
            }
        },
    }
}

validated_string! {
    /// A Minecraft nickname: 3-16 characters of `[A-Za-z0-9_]`
    ///
    /// Validation happens here, before any network I/O, so a nickname that
    /// reaches a command template can never smuggle extra arguments.
    ///
    /// # Examples
    /// ```
    /// use rcon_whitelist::types::Nickname;
    ///
    /// assert!(Nickname::new("Steve123".to_string()).is_ok());
    /// assert!(Nickname::new("ab".to_string()).is_err());
    /// assert!(Nickname::new("Steve 123".to_string()).is_err());
    /// ```
    #[doc(alias = "player")]
    pub struct Nickname(String) {
        validation: |s| {
            let len = s.chars().count();
            if !(MIN_LEN..=MAX_LEN).contains(&len) {
                Err(ValidationError::NicknameLength { len, min: MIN_LEN, max: MAX_LEN })
            } else if !s.chars().all(is_nickname_char) {
                Err(ValidationError::NicknameCharacters(s.clone()))
            } else {
                Ok(())
            }
        },
    }
}

impl fmt::Debug for HostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HostName").field(&self.0).finish()
    }
}

impl fmt::Display for HostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Nickname").field(&self.0).finish()
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(****)")
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}
