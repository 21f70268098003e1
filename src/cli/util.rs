//! Utility functions for the CLI.

use crate::sway::message;

/// Parses a message type given by name (`get_tree`) or number (`4`, `0x80000000`).
#[must_use]
pub fn parse_message_type(s: &str) -> Option<u32> {
    if let Some(t) = message::command_from_name(s) {
        return Some(t);
    }
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Renders a payload for the terminal, pretty-printing JSON when asked.
#[must_use]
pub fn format_payload(payload: &[u8], pretty: bool) -> String {
    if pretty {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(payload) {
            if let Ok(rendered) = serde_json::to_string_pretty(&value) {
                return rendered;
            }
        }
    }
    String::from_utf8_lossy(payload).into_owned()
}
