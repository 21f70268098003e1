//! `swaysock subscribe`: foreground event streaming, one line per event.

use crate::cli::util::format_payload;
use crate::config::Config;
use crate::internal;
use crate::sway::{Client, listener, message};
use std::ops::ControlFlow;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

/// Subscribes to `events` and prints `<name> <payload>` for each one until the
/// connection closes or `count` events have been printed.
#[must_use]
pub fn cmd_subscribe(
    events: &[String],
    count: Option<usize>,
    pretty: bool,
    config: &Config,
) -> ExitCode {
    let client = match Client::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            internal::error("CLI", &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = client.subscribe_events(events.iter().map(String::as_str)) {
        internal::error("CLI", &e.to_string());
        return ExitCode::FAILURE;
    }

    if count == Some(0) {
        return ExitCode::SUCCESS;
    }

    let mut seen = 0usize;
    let shutdown = AtomicBool::new(false);
    let result = listener::run_event_loop(
        &client,
        config.connection.poll_interval(),
        &shutdown,
        |frame| {
            let name = message::event_name(frame.message_type())
                .map_or_else(|| format!("{:#x}", frame.message_type()), str::to_string);
            println!("{name} {}", format_payload(frame.payload(), pretty));
            seen += 1;
            if count.is_some_and(|n| seen >= n) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        },
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            internal::error("CLI", &e.to_string());
            ExitCode::FAILURE
        }
    }
}
