//! Command formatting module
//!
//! Renders the configurable whitelist commands by substituting a validated
//! nickname. A nickname that reached this module has already passed
//! [`Nickname`](crate::types::Nickname) validation, so substitution is a
//! plain textual replace.

mod template;

pub use template::{CommandTemplate, CommandTemplates, NICKNAME_PLACEHOLDER, TemplateError};
