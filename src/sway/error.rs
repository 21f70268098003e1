//! Error types for sway IPC operations.

use std::fmt;
use std::io;
use std::path::PathBuf;

use super::codec::MAGIC;

/// Error type for sway IPC operations.
#[derive(Debug)]
pub enum SwayError {
    /// The socket path could not be determined.
    Discovery(DiscoveryError),
    /// Socket creation or `connect` failed, or the path does not fit a socket address.
    Connect {
        /// Path that was being connected to.
        path: PathBuf,
        /// Underlying failure.
        source: io::Error,
    },
    /// A send on the socket failed before every byte was written.
    Write(io::Error),
    /// A receive failed, or the peer closed the socket before a frame was complete.
    Read(io::Error),
    /// The byte stream no longer follows the framing rules.
    Protocol(ProtocolError),
    /// The subscribe handshake did not succeed.
    Subscription(SubscriptionError),
    /// The connection was closed, either explicitly or after an earlier fatal error.
    ConnectionClosed,
}

impl SwayError {
    /// Whether the error leaves the connection that produced it unusable.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Write(_) | Self::Read(_) | Self::Protocol(_) | Self::ConnectionClosed
        )
    }
}

impl fmt::Display for SwayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovery(e) => write!(f, "failed to locate sway socket: {e}"),
            Self::Connect { path, source } => {
                write!(f, "failed to connect to {}: {source}", path.display())
            }
            Self::Write(e) => write!(f, "failed to write to sway socket: {e}"),
            Self::Read(e) => write!(f, "failed to read from sway socket: {e}"),
            Self::Protocol(e) => write!(f, "protocol error: {e}"),
            Self::Subscription(e) => write!(f, "subscription failed: {e}"),
            Self::ConnectionClosed => write!(f, "connection is closed"),
        }
    }
}

impl std::error::Error for SwayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Discovery(e) => Some(e),
            Self::Connect { source, .. } => Some(source),
            Self::Write(e) | Self::Read(e) => Some(e),
            Self::Protocol(e) => Some(e),
            Self::Subscription(e) => Some(e),
            Self::ConnectionClosed => None,
        }
    }
}

impl From<DiscoveryError> for SwayError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

impl From<ProtocolError> for SwayError {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

impl From<SubscriptionError> for SwayError {
    fn from(e: SubscriptionError) -> Self {
        Self::Subscription(e)
    }
}

/// Why the socket path could not be resolved.
#[derive(Debug)]
pub enum DiscoveryError {
    /// No environment variable was set and no discovery command is configured.
    NoCommand,
    /// The discovery command could not be started.
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying failure.
        source: io::Error,
    },
    /// The discovery command ran but printed nothing usable.
    EmptyOutput,
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCommand => write!(f, "no socket variable set and no discovery command"),
            Self::Spawn { program, source } => write!(f, "could not run `{program}`: {source}"),
            Self::EmptyOutput => write!(f, "discovery command printed no socket path"),
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::NoCommand | Self::EmptyOutput => None,
        }
    }
}

/// Framing violations. Each one leaves the stream misaligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The header did not start with the protocol magic.
    BadMagic {
        /// Bytes found where the magic was expected.
        found: [u8; MAGIC.len()],
    },
    /// A declared payload length exceeds the configured maximum.
    PayloadTooLarge {
        /// Declared or requested length.
        len: usize,
        /// Configured limit.
        max: usize,
    },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadMagic { found } => {
                write!(f, "bad magic {:?}", String::from_utf8_lossy(found))
            }
            Self::PayloadTooLarge { len, max } => {
                write!(f, "payload of {len} bytes exceeds limit of {max} bytes")
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Subscribe handshake failures and misuse of the event channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The acknowledgement was not the success literal; holds what was received.
    Rejected(String),
    /// The event channel already completed a subscribe handshake.
    AlreadySubscribed,
    /// Events were requested before any successful subscribe.
    NotSubscribed,
}

impl fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(ack) => write!(f, "compositor replied {ack}"),
            Self::AlreadySubscribed => write!(f, "event channel is already subscribed"),
            Self::NotSubscribed => write!(f, "event channel is not subscribed"),
        }
    }
}

impl std::error::Error for SubscriptionError {}
