//! Core validated types shared by the configuration, command and
//! orchestration layers.

pub mod config;
pub mod validated;

pub use config::{
    MaxEntries, OperationTimeout, Port, ProbeTimeout, RconTimeout, duration_serde,
};
pub use validated::{HostName, Nickname, Password, ValidationError, is_nickname_char};
