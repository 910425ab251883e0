//! Whitelist orchestration
//!
//! [`WhitelistClient`] is the public face of the crate. Each operation
//! validates its input, probes the server, opens a fresh session, sends one
//! command and classifies the reply. No error or panic escapes: every
//! failure becomes an [`Outcome`], logged with the raw server text.

mod outcome;

pub use outcome::Outcome;

use std::sync::Arc;

use tokio::time;
use tracing::{debug, error, info, warn};

use crate::command::CommandTemplates;
use crate::config::{Config, RconConfig};
use crate::connection_error::SessionError;
use crate::health::{AvailabilityCheck, TcpProber};
use crate::protocol::{
    classify, is_error_response, is_list_response, parse_whitelist, strip_formatting,
};
use crate::session;
use crate::types::Nickname;

/// Whitelist mutation client
///
/// Cheap to clone; configuration is shared read-only. Concurrent calls are
/// independent sessions with no ordering between them.
#[derive(Debug, Clone)]
pub struct WhitelistClient<P = TcpProber> {
    rcon: Arc<RconConfig>,
    commands: Arc<CommandTemplates>,
    prober: P,
}

impl WhitelistClient<TcpProber> {
    /// Create a client probing over TCP with the configured bound
    #[must_use]
    pub fn new(rcon: RconConfig, commands: CommandTemplates) -> Self {
        let prober = TcpProber::new(rcon.probe_timeout);
        Self {
            rcon: Arc::new(rcon),
            commands: Arc::new(commands),
            prober,
        }
    }

    /// Create a client from a loaded configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.rcon.clone(), config.commands.clone())
    }
}

impl<P> WhitelistClient<P>
where
    P: AvailabilityCheck,
{
    /// Replace the availability check
    #[must_use]
    pub fn with_prober<Q: AvailabilityCheck>(self, prober: Q) -> WhitelistClient<Q> {
        WhitelistClient {
            rcon: self.rcon,
            commands: self.commands,
            prober,
        }
    }

    /// Connection parameters in use
    #[must_use]
    pub fn rcon_config(&self) -> &RconConfig {
        &self.rcon
    }

    /// Whether the game server currently accepts TCP connections
    pub async fn is_available(&self) -> bool {
        self.prober.probe(&self.rcon.host, self.rcon.port).await
    }

    /// Add `nickname` to the whitelist
    pub async fn add(&self, nickname: &str) -> Outcome {
        let Some(nickname) = validate(nickname) else {
            return Outcome::InvalidNickname;
        };
        let command = self.commands.add.render(&nickname);
        self.mutate("add", &nickname, &command).await
    }

    /// Remove `nickname` from the whitelist; absence counts as success
    pub async fn remove(&self, nickname: &str) -> Outcome {
        let Some(nickname) = validate(nickname) else {
            return Outcome::InvalidNickname;
        };
        let command = self.commands.remove.render(&nickname);
        self.mutate("remove", &nickname, &command).await
    }

    /// Fetch the current whitelist, in server order
    ///
    /// A reply that is neither a recognized listing nor error-free is
    /// `Failed`, so "Unknown command" text never becomes player names.
    pub async fn list(&self) -> Result<Vec<String>, Outcome> {
        let body = self.run(self.commands.list.as_str()).await?;

        if !is_list_response(&body) && is_error_response(&body) {
            let text = strip_formatting(&body);
            error!("Whitelist listing failed: {}", text);
            return Err(Outcome::Failed(text));
        }

        let players = parse_whitelist(&body);
        debug!("Whitelist has {} player(s)", players.len());
        Ok(players)
    }

    /// Run an arbitrary console command
    ///
    /// `Success` unless the reply contains an error marker.
    pub async fn execute(&self, raw_command: &str) -> Outcome {
        let body = match self.run(raw_command).await {
            Ok(body) => body,
            Err(outcome) => return outcome,
        };

        let text = strip_formatting(&body);
        if is_error_response(&body) {
            error!("Command '{}' failed: {}", raw_command, text);
            Outcome::Failed(text)
        } else {
            info!("Command '{}' executed: {}", raw_command, text);
            Outcome::Success
        }
    }

    /// Grant the donation reward (title suffix permission) to `nickname`
    pub async fn grant_suffix(&self, nickname: &str) -> Outcome {
        let Some(nickname) = validate(nickname) else {
            return Outcome::InvalidNickname;
        };
        let command = self.commands.suffix.render(&nickname);
        self.execute(&command).await
    }

    /// Send a whitelist mutation and classify the reply
    async fn mutate(&self, action: &str, nickname: &Nickname, command: &str) -> Outcome {
        let body = match self.run(command).await {
            Ok(body) => body,
            Err(outcome) => return outcome,
        };

        let outcome = Outcome::from(classify(&body));
        match &outcome {
            Outcome::Success => info!("Whitelist {} of {} succeeded", action, nickname),
            Outcome::AlreadyPresent | Outcome::NotPresent => info!(
                "Whitelist {} of {}: nothing to do ({})",
                action, nickname, outcome
            ),
            _ => warn!(
                "Whitelist {} of {} needs manual action ({}); server said: {:?}",
                action, nickname, outcome, body
            ),
        }
        outcome
    }

    /// Probe, then run one session for `command`, all within the operation bound
    async fn run(&self, command: &str) -> Result<String, Outcome> {
        let bound = self.rcon.operation_timeout.as_duration();

        match time::timeout(bound, self.probe_and_run(command)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Command '{}' exceeded operation timeout {:?}", command, bound);
                Err(Outcome::Timeout)
            }
        }
    }

    async fn probe_and_run(&self, command: &str) -> Result<String, Outcome> {
        let rcon = &self.rcon;

        if !self.prober.probe(&rcon.host, rcon.port).await {
            error!(
                "Game server {}:{} is unavailable; command '{}' not sent",
                rcon.host, rcon.port, command
            );
            return Err(Outcome::Unavailable);
        }

        session::run_command(rcon, command).await.map_err(|e| {
            log_session_error(command, &e);
            e.outcome()
        })
    }
}

/// Validate a caller-supplied nickname; no I/O happens on failure
fn validate(nickname: &str) -> Option<Nickname> {
    match Nickname::new(nickname.to_string()) {
        Ok(nickname) => Some(nickname),
        Err(e) => {
            warn!("Rejected nickname {:?}: {}", nickname, e);
            None
        }
    }
}

fn log_session_error(command: &str, err: &SessionError) {
    let raw = err.response_text().unwrap_or("");
    match err.log_level() {
        tracing::Level::ERROR => {
            error!("RCON command '{}' failed: {} (raw: {:?})", command, err, raw)
        }
        tracing::Level::WARN => {
            warn!("RCON command '{}' failed: {} (raw: {:?})", command, err, raw)
        }
        _ => debug!("RCON command '{}' failed: {} (raw: {:?})", command, err, raw),
    }
}
