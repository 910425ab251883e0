//! Duration serialization helpers for configuration files

use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

/// Seconds as written in a config file: whole (`10`) or fractional (`0.5`)
#[derive(Deserialize)]
#[serde(untagged)]
enum Seconds {
    Whole(u64),
    Fractional(f64),
}

impl Seconds {
    fn into_duration<E: serde::de::Error>(self) -> Result<Duration, E> {
        match self {
            Self::Whole(secs) => Ok(Duration::from_secs(secs)),
            Self::Fractional(secs) => Duration::try_from_secs_f64(secs)
                .map_err(|_| E::custom(format!("invalid duration: {secs} seconds"))),
        }
    }
}

/// Helper for (de)serializing Duration as seconds
///
/// TOML configs specify timeouts in seconds. Whole seconds are written back
/// as integers, sub-second values as floats.
pub mod duration_serde {
    use super::*;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_nanos() == 0 {
            serializer.serialize_u64(duration.as_secs())
        } else {
            serializer.serialize_f64(duration.as_secs_f64())
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        Seconds::deserialize(deserializer)?.into_duration()
    }
}
