//! RCON client and whitelist mutation service for Minecraft servers
//!
//! The crate opens one TCP session per operation, authenticates over RCON,
//! sends a single administrative command and turns the locale-dependent
//! reply into an [`Outcome`].
//!
//! ```no_run
//! use rcon_whitelist::{WhitelistClient, load_config};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = load_config("config.toml")?;
//! let client = WhitelistClient::from_config(&config);
//!
//! let outcome = client.add("Steve123").await;
//! if outcome.requires_manual_action() {
//!     eprintln!("please whitelist Steve123 by hand: {outcome}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod cache;
pub mod command;
pub mod config;
pub mod connection_error;
pub mod constants;
pub mod health;
pub mod logging;
pub mod protocol;
pub mod session;
pub mod types;
pub mod whitelist;

pub use cache::RecentOperations;
pub use config::{Config, RconConfig, load_config, load_config_from_env, load_config_with_fallback};
pub use connection_error::SessionError;
pub use health::{AvailabilityCheck, TcpProber};
pub use session::{RconSession, SessionState, run_command};
pub use whitelist::{Outcome, WhitelistClient};
