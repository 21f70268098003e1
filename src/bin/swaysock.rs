//! `swaysock` talks to a running sway instance from the shell, in the manner
//! of `swaymsg`.
//!
//! Usage:
//!   swaysock send [-t TYPE] [PAYLOAD...]   Send one message, print the reply
//!   swaysock subscribe EVENT... [-n N]     Stream events until closed
//!   swaysock socket                        Print the resolved socket path

use clap::Parser;
use swaysock::cli::{Cli, Command, cmd_send, cmd_socket, cmd_subscribe};
use swaysock::config::Config;
use swaysock::internal;
use swaysock::level::Level;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let level = cli.log_level.map_or_else(|| config.parse_level(), Level::from);
    internal::init(level);

    if let Some(socket) = cli.socket {
        config.socket.path = Some(socket);
    }

    match &cli.command {
        Command::Send {
            message_type,
            pretty,
            payload,
        } => cmd_send(message_type, payload, *pretty, &config),
        Command::Subscribe {
            events,
            count,
            pretty,
        } => cmd_subscribe(events, *count, *pretty, &config),
        Command::Socket => cmd_socket(&config),
    }
}
