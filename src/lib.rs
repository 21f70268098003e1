//! `swaysock` - Blocking client for the sway/i3 IPC protocol.
//!
//! Provides:
//! - Socket path discovery (`$SWAYSOCK`, `$I3SOCK`, `sway --get-socketpath`)
//! - The binary frame codec (`i3-ipc` magic, little-endian length and type)
//! - Separate command and event connections with strict request/response order
//! - Subscribe handshake and an optional background event listener
//! - A `swaymsg`-style command-line tool
//!
//! # Example
//!
//! ```no_run
//! use swaysock::sway::{Client, message::command};
//!
//! let client = Client::connect()?;
//! let version = client.send_command(command::GET_VERSION, "")?;
//! println!("{}", String::from_utf8_lossy(version.payload()));
//! # Ok::<(), swaysock::sway::SwayError>(())
//! ```
//!
//! # Features
//!
//! - `cli` (default): Enables the `swaysock` binary and its `env_logger` setup

pub mod config;
pub mod error;
pub mod internal;
pub mod level;
pub mod sway;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

pub use config::Config;
pub use error::Error;
pub use level::Level;
pub use sway::{Client, Frame, SwayError};
