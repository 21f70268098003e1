//! `swaysock send`: one request on the command connection.

use crate::cli::util::{format_payload, parse_message_type};
use crate::config::Config;
use crate::internal;
use crate::sway::Client;
use std::process::ExitCode;

/// Sends `payload` with the given type and prints the reply payload.
#[must_use]
pub fn cmd_send(message_type: &str, payload: &[String], pretty: bool, config: &Config) -> ExitCode {
    let Some(message_type) = parse_message_type(message_type) else {
        internal::error("CLI", &format!("Unknown message type: {message_type}"));
        return ExitCode::FAILURE;
    };

    let client = match Client::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            internal::error("CLI", &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match client.send_command(message_type, payload.join(" ")) {
        Ok(reply) => {
            println!("{}", format_payload(reply.payload(), pretty));
            ExitCode::SUCCESS
        }
        Err(e) => {
            internal::error("CLI", &e.to_string());
            ExitCode::FAILURE
        }
    }
}
