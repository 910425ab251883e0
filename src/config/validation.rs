//! Configuration validation
//!
//! Most invariants are enforced by the types themselves (non-empty host and
//! password, non-zero port). This checks what types cannot: template
//! placeholders, zero timeouts, and suspicious combinations.

use anyhow::Result;

use super::types::Config;

impl Config {
    /// Validate configuration for correctness
    pub fn validate(&self) -> Result<()> {
        self.commands.validate()?;

        let rcon = &self.rcon;
        if rcon.timeout.is_zero() {
            anyhow::bail!("rcon.timeout must be greater than zero");
        }
        if rcon.probe_timeout.is_zero() {
            anyhow::bail!("rcon.probe_timeout must be greater than zero");
        }
        if rcon.operation_timeout.is_zero() {
            anyhow::bail!("rcon.operation_timeout must be greater than zero");
        }
        if self.dedup.window.is_zero() {
            anyhow::bail!("dedup.window must be greater than zero");
        }

        if rcon.operation_timeout.as_duration() < rcon.timeout.as_duration() {
            tracing::warn!(
                "rcon.operation_timeout ({:?}) is shorter than rcon.timeout ({:?}); \
                 slow steps will be reported as whole-operation timeouts",
                rcon.operation_timeout.as_duration(),
                rcon.timeout.as_duration()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandTemplate;
    use crate::types::{OperationTimeout, RconTimeout};
    use std::time::Duration;

    fn base() -> Config {
        toml::from_str("[rcon]\nhost = \"localhost\"\npassword = \"pw\"\n").unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = base();
        config.rcon.timeout = RconTimeout::new(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_operation_timeout_rejected() {
        let mut config = base();
        config.rcon.operation_timeout = OperationTimeout::new(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_dedup_window_rejected() {
        let mut config = base();
        config.dedup.window = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let mut config = base();
        config.commands.remove = CommandTemplate::new("whitelist remove").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("whitelist_remove_command"));
    }

    #[test]
    fn test_short_operation_timeout_only_warns() {
        let mut config = base();
        config.rcon.operation_timeout = OperationTimeout::new(Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }
}
