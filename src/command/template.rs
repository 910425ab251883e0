//! Command templates with `{nickname}` substitution

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::types::Nickname;

/// Placeholder replaced by the validated nickname
pub const NICKNAME_PLACEHOLDER: &str = "{nickname}";

/// Errors for malformed command templates
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TemplateError {
    #[error("command template cannot be empty")]
    Empty,

    #[error("{name} template must contain {{nickname}}: {template:?}")]
    MissingPlaceholder { name: &'static str, template: String },

    #[error("{name} template takes no nickname but contains {{nickname}}: {template:?}")]
    UnexpectedPlaceholder { name: &'static str, template: String },
}

/// A server command with an optional `{nickname}` placeholder
///
/// # Examples
/// ```
/// use rcon_whitelist::command::CommandTemplate;
/// use rcon_whitelist::types::Nickname;
///
/// let template = CommandTemplate::new("whitelist add {nickname}").unwrap();
/// let nick = Nickname::new("Steve123".to_string()).unwrap();
/// assert_eq!(template.render(&nick), "whitelist add Steve123");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CommandTemplate(String);

impl CommandTemplate {
    /// Create a template; surrounding whitespace is trimmed
    pub fn new(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();
        let trimmed = template.trim();
        if trimmed.is_empty() {
            return Err(TemplateError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Raw template text
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the template contains the nickname placeholder
    #[must_use]
    pub fn takes_nickname(&self) -> bool {
        self.0.contains(NICKNAME_PLACEHOLDER)
    }

    /// Substitute `nickname` for every placeholder
    #[must_use]
    pub fn render(&self, nickname: &Nickname) -> String {
        self.0.replace(NICKNAME_PLACEHOLDER, nickname.as_str())
    }

    /// Check that the template contains the placeholder
    pub fn require_nickname(&self, name: &'static str) -> Result<(), TemplateError> {
        if self.takes_nickname() {
            Ok(())
        } else {
            Err(TemplateError::MissingPlaceholder {
                name,
                template: self.0.clone(),
            })
        }
    }

    /// Check that the template does not contain the placeholder
    pub fn forbid_nickname(&self, name: &'static str) -> Result<(), TemplateError> {
        if self.takes_nickname() {
            Err(TemplateError::UnexpectedPlaceholder {
                name,
                template: self.0.clone(),
            })
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CommandTemplate").field(&self.0).finish()
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CommandTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for CommandTemplate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

/// The configurable command set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandTemplates {
    #[serde(rename = "whitelist_add_command", default = "default_add")]
    pub add: CommandTemplate,
    #[serde(rename = "whitelist_remove_command", default = "default_remove")]
    pub remove: CommandTemplate,
    #[serde(rename = "whitelist_list_command", default = "default_list")]
    pub list: CommandTemplate,
    #[serde(rename = "suffix_command", default = "default_suffix")]
    pub suffix: CommandTemplate,
}

impl CommandTemplates {
    /// Check placeholder usage of every template
    pub fn validate(&self) -> Result<(), TemplateError> {
        self.add.require_nickname("whitelist_add_command")?;
        self.remove.require_nickname("whitelist_remove_command")?;
        self.suffix.require_nickname("suffix_command")?;
        self.list.forbid_nickname("whitelist_list_command")?;
        Ok(())
    }
}

impl Default for CommandTemplates {
    fn default() -> Self {
        Self {
            add: default_add(),
            remove: default_remove(),
            list: default_list(),
            suffix: default_suffix(),
        }
    }
}

fn builtin(text: &'static str) -> CommandTemplate {
    CommandTemplate(text.to_string())
}

fn default_add() -> CommandTemplate {
    builtin(crate::config::defaults::WHITELIST_ADD_COMMAND)
}

fn default_remove() -> CommandTemplate {
    builtin(crate::config::defaults::WHITELIST_REMOVE_COMMAND)
}

fn default_list() -> CommandTemplate {
    builtin(crate::config::defaults::WHITELIST_LIST_COMMAND)
}

fn default_suffix() -> CommandTemplate {
    builtin(crate::config::defaults::SUFFIX_COMMAND)
}
