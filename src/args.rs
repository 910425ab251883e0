//! Command-line arguments for the `rcon-whitelist` binary

use clap::{Parser, Subcommand};
use std::fmt;

use crate::config::defaults;
use crate::health::AvailabilityCheck;
use crate::whitelist::{Outcome, WhitelistClient};

/// Manage a Minecraft server whitelist over RCON
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    ///
    /// Can be overridden with RCON_CONFIG environment variable. When the file
    /// does not exist, RCON_HOST/RCON_PASSWORD/... are used instead.
    #[arg(short, long, default_value = defaults::CONFIG_PATH, env = "RCON_CONFIG")]
    pub config: String,

    #[command(subcommand)]
    pub action: Action,
}

/// One operation per invocation
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add a player to the whitelist
    Add { nickname: String },
    /// Remove a player from the whitelist
    Remove { nickname: String },
    /// Print the current whitelist
    List,
    /// Run an arbitrary console command
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Grant the donation title permission to a player
    GrantSuffix { nickname: String },
    /// Check that the game server accepts TCP connections
    Probe,
}

/// What an action produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub outcome: Outcome,
    /// Whitelist contents, for `list`
    pub players: Option<Vec<String>>,
}

impl Report {
    fn outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            players: None,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.players {
            Some(players) if players.is_empty() => write!(f, "whitelist is empty"),
            Some(players) => write!(f, "{} player(s): {}", players.len(), players.join(", ")),
            None => write!(f, "{}", self.outcome),
        }
    }
}

impl Action {
    /// Run this action against `client`
    pub async fn run<P: AvailabilityCheck>(&self, client: &WhitelistClient<P>) -> Report {
        match self {
            Self::Add { nickname } => Report::outcome(client.add(nickname).await),
            Self::Remove { nickname } => Report::outcome(client.remove(nickname).await),
            Self::GrantSuffix { nickname } => Report::outcome(client.grant_suffix(nickname).await),
            Self::Exec { command } => Report::outcome(client.execute(&command.join(" ")).await),
            Self::List => match client.list().await {
                Ok(players) => Report {
                    outcome: Outcome::Success,
                    players: Some(players),
                },
                Err(outcome) => Report::outcome(outcome),
            },
            Self::Probe => Report::outcome(if client.is_available().await {
                Outcome::Success
            } else {
                Outcome::Unavailable
            }),
        }
    }
}
