//! Diagnostic severity, as written in config files and on the command line.
//!
//! A thin layer over [`log::Level`] that adds the `warning` and `err`
//! spellings the config accepts.

use std::fmt;
use std::str::FromStr;

/// Ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Per-frame traffic.
    Trace,
    /// Connect, teardown, and path resolution details.
    Debug,
    /// Connection established, subscribed, config loaded.
    #[default]
    Info,
    /// Rejected subscriptions, connections closed after an error.
    Warn,
    /// Failures that stop an operation.
    Error,
}

impl Level {
    /// Equivalent `log` crate level.
    #[must_use]
    pub const fn to_log(self) -> log::Level {
        match self {
            Self::Trace => log::Level::Trace,
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warn => log::Level::Warn,
            Self::Error => log::Level::Error,
        }
    }

    #[must_use]
    pub const fn from_log(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Self::Trace,
            log::Level::Debug => Self::Debug,
            log::Level::Info => Self::Info,
            log::Level::Warn => Self::Warn,
            log::Level::Error => Self::Error,
        }
    }

    /// Filter that lets this level and everything more severe through.
    #[must_use]
    pub fn to_filter(self) -> log::LevelFilter {
        self.to_log().to_level_filter()
    }
}

/// Returned by `FromStr` for an unknown level name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let name = match lower.as_str() {
            "warning" => "warn",
            "err" => "error",
            other => other,
        };
        name.parse::<log::Level>()
            .map(Self::from_log)
            .map_err(|_| ParseLevelError(s.to_string()))
    }
}
