//! Configuration struct definitions.

use crate::sway::codec::DEFAULT_MAX_PAYLOAD_LEN;
use serde::Deserialize;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum diagnostic log level.
    pub level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Where to find the IPC socket.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SocketConfig {
    /// Explicit socket path; skips environment lookup and discovery.
    pub path: Option<String>,
    /// Environment variables holding the socket path, checked in order.
    pub env_vars: Vec<String>,
    /// Program and arguments that print the socket path.
    pub discovery_command: Vec<String>,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            path: None,
            env_vars: vec!["SWAYSOCK".to_string(), "I3SOCK".to_string()],
            discovery_command: vec!["sway".to_string(), "--get-socketpath".to_string()],
        }
    }
}

/// How to signal the peer when a client shuts down.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Teardown {
    /// Write a non-header byte sequence, then shut the socket down.
    #[default]
    Sentinel,
    /// Only shut the socket down.
    Shutdown,
}

/// Per-connection settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Largest payload accepted in either direction.
    pub max_payload_len: usize,
    /// Teardown strategy.
    pub teardown: Teardown,
    /// Wait granularity of the event listener, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
            teardown: Teardown::Sentinel,
            poll_interval_ms: 100,
        }
    }
}

impl ConnectionConfig {
    /// Listener poll interval.
    #[must_use]
    pub const fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}
