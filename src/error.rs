use thiserror::Error;

use crate::terminal::LineKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("No home directory")]
    NoHomeDir,

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Something a command referred to that does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    #[error("Error: Data shard '{0}' corrupted or not found.")]
    Project(String),

    #[error("Resource '{0}' not found.")]
    Resource(String),

    #[error("Theme '{name}' not found. Available: {available}")]
    Theme { name: String, available: String },

    #[error("cat: {0}: No such file or directory")]
    File(String),
}

/// Failures a command can report back to the prompt.
///
/// None of these are fatal to the session: the interpreter turns each one
/// into a classified history line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("{0}")]
    Usage(&'static str),

    #[error(transparent)]
    NotFound(#[from] Missing),

    #[error("Nice try. You are not root on this system.")]
    PermissionDenied,

    #[error("command not found: {0}. Type 'help' for assistance.")]
    UnknownCommand(String),

    #[error("Note: destructive commands are disabled on this system.")]
    SabotageBlocked,
}

impl CommandError {
    /// Line classification used when this error reaches the history.
    pub fn kind(&self) -> LineKind {
        match self {
            CommandError::SabotageBlocked => LineKind::System,
            _ => LineKind::Error,
        }
    }
}
