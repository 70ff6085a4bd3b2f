//! Error types
//!
//! The simulation itself never fails: invalid gameplay states are no-ops.
//! These errors cover load-time problems only (missing level data, bad config).

use std::fmt;

/// A level could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// The requested index has no layout. This is a content gap, not a
    /// player-reachable condition.
    UnknownLevel { index: u32, available: u32 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLevel { index, available } => {
                write!(f, "unknown level {index} (levels 1..={available} exist)")
            }
        }
    }
}

impl std::error::Error for LevelError {}

/// Configuration could not be loaded or is inconsistent.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Parse(e) => write!(f, "Parse error: {e}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid config field `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_level_message() {
        let err = LevelError::UnknownLevel {
            index: 7,
            available: 3,
        };
        assert_eq!(err.to_string(), "unknown level 7 (levels 1..=3 exist)");
    }

    #[test]
    fn test_parse_error_has_source() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ConfigError::from(parse);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Parse error"));
    }
}
