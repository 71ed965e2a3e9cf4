//! Configuration-state errors.
//!
//! Gameplay operations never fail: spawn rate clamps, unknown removals are
//! ignored. Only binding, scheduler start and configuration loading return
//! [`GameError`].

use std::fmt;

#[derive(Debug)]
pub enum GameError {
    /// `bind_world` was called while a world is already attached.
    AlreadyBound,

    /// The spawn scheduler is already armed; a second timer is never created.
    AlreadySpawning,

    /// Spawning needs a world to read the viewport width from.
    NotBound,

    /// A configuration value is outside its valid range.
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the constraint.
        reason: &'static str,
    },

    /// Configuration JSON could not be parsed.
    ConfigParse(serde_json::Error),

    /// Configuration file could not be read or written.
    Io(std::io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::AlreadyBound => write!(f, "a world is already bound to this game"),
            GameError::AlreadySpawning => write!(f, "shape spawning is already running"),
            GameError::NotBound => write!(f, "no world is bound to this game"),
            GameError::InvalidConfig { field, reason } => {
                write!(f, "invalid config value for `{field}`: {reason}")
            }
            GameError::ConfigParse(e) => write!(f, "failed to parse config: {e}"),
            GameError::Io(e) => write!(f, "config i/o error: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::ConfigParse(e) => Some(e),
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::ConfigParse(e)
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}
