//! Configuration type definitions

use crate::command::CommandTemplates;
use crate::types::{
    HostName, MaxEntries, OperationTimeout, Password, Port, ProbeTimeout, RconTimeout,
    duration_serde,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Game server connection parameters
    pub rcon: RconConfig,
    /// Command templates
    #[serde(default)]
    pub commands: CommandTemplates,
    /// Recent-operation dedup settings
    #[serde(default)]
    pub dedup: DedupConfig,
}

/// RCON connection parameters
///
/// Immutable once loaded; shared read-only between callers.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RconConfig {
    /// Game server hostname or IP
    pub host: HostName,
    /// RCON port
    #[serde(default)]
    pub port: Port,
    /// RCON password
    pub password: Password,
    /// Per-step timeout for connect, login and command reply
    #[serde(default)]
    pub timeout: RconTimeout,
    /// Bound on the pre-flight availability probe
    #[serde(default)]
    pub probe_timeout: ProbeTimeout,
    /// Bound on one whole whitelist operation
    #[serde(default)]
    pub operation_timeout: OperationTimeout,
}

impl RconConfig {
    /// Parameters with default port and timeouts
    #[must_use]
    pub fn new(host: HostName, password: Password) -> Self {
        Self {
            host,
            port: Port::default(),
            password,
            timeout: RconTimeout::default(),
            probe_timeout: ProbeTimeout::default(),
            operation_timeout: OperationTimeout::default(),
        }
    }

    /// Builder method: set the port
    #[must_use]
    pub fn with_port(mut self, port: Port) -> Self {
        self.port = port;
        self
    }

    /// Builder method: set the per-step timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: RconTimeout) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder method: set the probe bound
    #[must_use]
    pub fn with_probe_timeout(mut self, timeout: ProbeTimeout) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Builder method: set the whole-operation bound
    #[must_use]
    pub fn with_operation_timeout(mut self, timeout: OperationTimeout) -> Self {
        self.operation_timeout = timeout;
        self
    }
}

impl std::fmt::Debug for RconConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RconConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password)
            .field("timeout", &self.timeout)
            .field("probe_timeout", &self.probe_timeout)
            .field("operation_timeout", &self.operation_timeout)
            .finish()
    }
}

/// Recent-operation dedup settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupConfig {
    /// How long a recorded operation suppresses repeats
    #[serde(with = "duration_serde", default = "super::defaults::dedup_window")]
    pub window: Duration,
    /// Upper bound on tracked operations
    #[serde(default)]
    pub max_entries: MaxEntries,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            window: super::defaults::dedup_window(),
            max_entries: MaxEntries::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[rcon]
host = "mc.example.com"
password = "secret"
"#;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config: Config = toml::from_str(MINIMAL).unwrap();

        assert_eq!(config.rcon.host.as_str(), "mc.example.com");
        assert_eq!(config.rcon.port, Port::RCON);
        assert_eq!(config.rcon.timeout.as_duration(), Duration::from_secs(10));
        assert_eq!(
            config.rcon.probe_timeout.as_duration(),
            Duration::from_secs(5)
        );
        assert_eq!(
            config.rcon.operation_timeout.as_duration(),
            Duration::from_secs(15)
        );
        assert_eq!(config.commands, CommandTemplates::default());
        assert_eq!(config.dedup, DedupConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
[rcon]
host = "10.0.0.5"
port = 25580
password = "hunter2"
timeout = 3
probe_timeout = 1.5
operation_timeout = 8

[commands]
whitelist_add_command = "easywl add {nickname}"
whitelist_list_command = "easywl list"

[dedup]
window = 30
max_entries = 100
"#,
        )
        .unwrap();

        assert_eq!(config.rcon.port.get(), 25580);
        assert_eq!(config.rcon.timeout.as_duration(), Duration::from_secs(3));
        assert_eq!(
            config.rcon.probe_timeout.as_duration(),
            Duration::from_millis(1500)
        );
        assert_eq!(config.commands.add.as_str(), "easywl add {nickname}");
        assert_eq!(config.commands.list.as_str(), "easywl list");
        assert_eq!(config.dedup.window, Duration::from_secs(30));
        assert_eq!(config.dedup.max_entries.get(), 100);
    }

    #[test]
    fn test_missing_password_rejected() {
        let result = toml::from_str::<Config>("[rcon]\nhost = \"mc.example.com\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_password_rejected() {
        let result = toml::from_str::<Config>(
            "[rcon]\nhost = \"mc.example.com\"\npassword = \"\"\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("mc.example.com"));
    }

    #[test]
    fn test_builder() {
        let rcon = RconConfig::new(
            HostName::new("localhost".to_string()).unwrap(),
            Password::new("pw".to_string()).unwrap(),
        )
        .with_port(Port::new(30000).unwrap())
        .with_timeout(RconTimeout::new(Duration::from_secs(2)));

        assert_eq!(rcon.port.get(), 30000);
        assert_eq!(rcon.timeout.as_duration(), Duration::from_secs(2));
        assert_eq!(rcon.probe_timeout, ProbeTimeout::default());
    }
}
