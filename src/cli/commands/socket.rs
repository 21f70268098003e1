//! `swaysock socket`: print where the IPC socket is.

use crate::config::Config;
use crate::internal;
use crate::sway::socket;
use std::process::ExitCode;

/// Resolves the socket path without connecting to it.
#[must_use]
pub fn cmd_socket(config: &Config) -> ExitCode {
    match socket::resolve_socket_path(&config.socket) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            internal::error("CLI", &e.to_string());
            ExitCode::FAILURE
        }
    }
}
