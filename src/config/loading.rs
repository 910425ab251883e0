//! Configuration loading from files and environment variables
//!
//! Connection parameters may come from a TOML file, from the environment,
//! or both. Environment variables take precedence over the file so secrets
//! can stay out of it:
//! - `RCON_HOST`
//! - `RCON_PORT`
//! - `RCON_PASSWORD`
//! - `RCON_TIMEOUT` (seconds, fractional allowed)

use anyhow::{Context, Result};
use std::path::Path;

use super::types::Config;

/// Environment variable overriding `[rcon].host`
pub const ENV_HOST: &str = "RCON_HOST";
/// Environment variable overriding `[rcon].port`
pub const ENV_PORT: &str = "RCON_PORT";
/// Environment variable overriding `[rcon].password`
pub const ENV_PASSWORD: &str = "RCON_PASSWORD";
/// Environment variable overriding `[rcon].timeout`
pub const ENV_TIMEOUT: &str = "RCON_TIMEOUT";

/// Where a configuration was loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// TOML file (possibly with environment overrides)
    File,
    /// Environment variables only
    Environment,
}

impl ConfigSource {
    /// Human-readable description for logs
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::File => "configuration file",
            Self::Environment => "environment variables",
        }
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Check whether any RCON environment variable is set
#[must_use]
pub fn has_rcon_env_vars() -> bool {
    [ENV_HOST, ENV_PORT, ENV_PASSWORD, ENV_TIMEOUT]
        .iter()
        .any(|key| process_env(key).is_some())
}

/// Overlay environment values onto the `[rcon]` table
fn overlay_env<F>(table: &mut toml::Table, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let rcon = table
        .entry("rcon")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()))
        .as_table_mut()
        .context("[rcon] must be a table")?;

    if let Some(host) = lookup(ENV_HOST) {
        tracing::info!("Using {} from environment", ENV_HOST);
        rcon.insert("host".to_string(), toml::Value::String(host));
    }

    if let Some(port) = lookup(ENV_PORT) {
        let port: i64 = port
            .trim()
            .parse()
            .with_context(|| format!("{} must be a port number, got '{}'", ENV_PORT, port))?;
        rcon.insert("port".to_string(), toml::Value::Integer(port));
    }

    if let Some(password) = lookup(ENV_PASSWORD) {
        rcon.insert("password".to_string(), toml::Value::String(password));
    }

    if let Some(timeout) = lookup(ENV_TIMEOUT) {
        let trimmed = timeout.trim();
        let value = match trimmed.parse::<i64>() {
            Ok(secs) => toml::Value::Integer(secs),
            Err(_) => toml::Value::Float(trimmed.parse::<f64>().with_context(|| {
                format!("{} must be a number of seconds, got '{}'", ENV_TIMEOUT, timeout)
            })?),
        };
        rcon.insert("timeout".to_string(), value);
    }

    Ok(())
}

/// Deserialize and validate an overlaid table
fn finish(table: toml::Table) -> Result<Config> {
    let config = toml::Value::Table(table).try_into::<Config>()?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from TOML text with environment values from `lookup`
///
/// `load_config` uses the process environment; tests pass a map.
pub fn load_config_from_str_with<F>(content: &str, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut table: toml::Table = toml::from_str(content)?;
    overlay_env(&mut table, lookup)?;
    finish(table)
}

/// Build a configuration from environment values alone
pub fn load_config_from_env_with<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut table = toml::Table::new();
    overlay_env(&mut table, lookup)?;
    finish(table).context("Incomplete RCON configuration in environment")
}

/// Load configuration from a TOML file, with environment variable overrides
pub fn load_config(config_path: &str) -> Result<Config> {
    let config_content = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", config_path, e))?;

    load_config_from_str_with(&config_content, process_env)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {:#}", config_path, e))
}

/// Load configuration from `RCON_*` environment variables
pub fn load_config_from_env() -> Result<Config> {
    load_config_from_env_with(process_env)
}

/// Load from the file if it exists, otherwise from the environment
pub fn load_config_with_fallback(config_path: &str) -> Result<(Config, ConfigSource)> {
    if Path::new(config_path).exists() {
        return Ok((load_config(config_path)?, ConfigSource::File));
    }

    if has_rcon_env_vars() {
        tracing::info!(
            "Config file '{}' not found, using environment variables",
            config_path
        );
        return Ok((load_config_from_env()?, ConfigSource::Environment));
    }

    Err(anyhow::anyhow!(
        "Config file '{}' not found and no {} variables are set",
        config_path,
        "RCON_*"
    ))
}
