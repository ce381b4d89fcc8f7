use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Log severity, ordered ascending: `Debug < Info < Warning < Error < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Diagnostic detail.
    #[default]
    Debug,
    /// Normal operation.
    Info,
    /// Something unexpected, operation continues.
    #[serde(alias = "warn")]
    Warning,
    /// An operation failed.
    Error,
    /// The application cannot continue.
    Critical,
}

impl Level {
    /// Uppercase display name, as it appears in formatted output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            other => Err(Error::Config(format!("unknown log level: {}", other))),
        }
    }
}

/// The `log` facade has no Critical and is one level more verbose at the
/// bottom; Trace records are folded into Debug.
impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => Self::Debug,
            log::Level::Info => Self::Info,
            log::Level::Warn => Self::Warning,
            log::Level::Error => Self::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Critical);
    }

    #[test]
    fn test_level_as_str() {
        assert_eq!(Level::Debug.as_str(), "DEBUG");
        assert_eq!(Level::Warning.as_str(), "WARNING");
        assert_eq!(Level::Critical.as_str(), "CRITICAL");
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("INFO".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("Warning".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!(" critical ".parse::<Level>().unwrap(), Level::Critical);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_serde_lowercase() {
        let level: Level = serde_yaml::from_str("warning").unwrap();
        assert_eq!(level, Level::Warning);
        let level: Level = serde_yaml::from_str("warn").unwrap();
        assert_eq!(level, Level::Warning);
        assert_eq!(serde_yaml::to_string(&Level::Error).unwrap().trim(), "error");
    }

    #[test]
    fn trace_maps_to_debug() {
        assert_eq!(Level::from(log::Level::Trace), Level::Debug);
        assert_eq!(Level::from(log::Level::Warn), Level::Warning);
        assert_eq!(Level::from(log::Level::Error), Level::Error);
    }
}
