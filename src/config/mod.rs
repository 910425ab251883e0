//! Configuration module
//!
//! This module handles all configuration types and loading for the RCON
//! whitelist client.

pub mod defaults;
mod loading;
mod types;
mod validation;

pub use loading::{
    ConfigSource, ENV_HOST, ENV_PASSWORD, ENV_PORT, ENV_TIMEOUT, has_rcon_env_vars, load_config,
    load_config_from_env, load_config_from_env_with, load_config_from_str_with,
    load_config_with_fallback,
};
pub use types::{Config, DedupConfig, RconConfig};
