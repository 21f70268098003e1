//! CLI module for swaysock.
//!
//! This module provides the command-line interface using Clap.

pub mod commands;
pub mod util;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Log level for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for crate::level::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::Trace,
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
        }
    }
}

/// swaysock - Talk to sway over its IPC socket.
#[derive(Debug, Parser)]
#[command(name = "swaysock", version, about = "Talk to sway over its IPC socket")]
pub struct Cli {
    /// Socket path (overrides $SWAYSOCK and discovery)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub socket: Option<String>,
    /// Config file to load instead of the default one
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Diagnostic log level
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one message on the command connection and print the reply.
    Send {
        /// Message type: a name such as `get_workspaces`, or a number
        #[arg(short = 't', long = "type", default_value = "run_command")]
        message_type: String,
        /// Pretty-print JSON replies
        #[arg(short, long)]
        pretty: bool,
        /// Payload, joined with spaces
        payload: Vec<String>,
    },
    /// Subscribe to events and print them as they arrive.
    Subscribe {
        /// Event names, e.g. `workspace window`
        #[arg(required = true)]
        events: Vec<String>,
        /// Stop after this many events
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Pretty-print JSON payloads
        #[arg(short, long)]
        pretty: bool,
    },
    /// Print the resolved socket path.
    Socket,
}

pub use commands::{cmd_send, cmd_socket, cmd_subscribe};
pub use util::{format_payload, parse_message_type};
