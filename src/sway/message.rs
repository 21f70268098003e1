//! Numeric message types of the sway IPC protocol.
//!
//! The transport treats types as opaque `u32`s. These tables exist so callers
//! and the CLI can refer to them by name.

/// Command message types, sent on the command connection.
pub mod command {
    /// Runs the payload as sway commands.
    pub const RUN_COMMAND: u32 = 0;
    /// Lists workspaces.
    pub const GET_WORKSPACES: u32 = 1;
    /// Subscribes the connection to a JSON array of event names.
    pub const SUBSCRIBE: u32 = 2;
    /// Lists outputs.
    pub const GET_OUTPUTS: u32 = 3;
    /// Returns the full layout tree.
    pub const GET_TREE: u32 = 4;
    /// Lists window marks.
    pub const GET_MARKS: u32 = 5;
    /// Lists bar ids, or one bar's config when the payload names it.
    pub const GET_BAR_CONFIG: u32 = 6;
    /// Compositor version.
    pub const GET_VERSION: u32 = 7;
    /// Lists configured binding modes.
    pub const GET_BINDING_MODES: u32 = 8;
    /// Returns the loaded config text.
    pub const GET_CONFIG: u32 = 9;
    /// Broadcasts a tick event carrying the payload.
    pub const SEND_TICK: u32 = 10;
    /// i3 compatibility; sway always replies with failure.
    pub const SYNC: u32 = 11;
    /// Current binding mode.
    pub const GET_BINDING_STATE: u32 = 12;
    /// Lists input devices (sway only).
    pub const GET_INPUTS: u32 = 100;
    /// Lists seats (sway only).
    pub const GET_SEATS: u32 = 101;
}

/// Event message types, pushed on a subscribed event connection.
pub mod event {
    /// Workspace focused, created, or renamed.
    pub const WORKSPACE: u32 = 0x8000_0000;
    /// Output layout changed.
    pub const OUTPUT: u32 = 0x8000_0001;
    /// Binding mode changed.
    pub const MODE: u32 = 0x8000_0002;
    /// A window changed.
    pub const WINDOW: u32 = 0x8000_0003;
    /// Bar config changed.
    pub const BARCONFIG_UPDATE: u32 = 0x8000_0004;
    /// A binding ran.
    pub const BINDING: u32 = 0x8000_0005;
    /// The compositor is exiting.
    pub const SHUTDOWN: u32 = 0x8000_0006;
    /// Sent after subscribing and on every `SEND_TICK`.
    pub const TICK: u32 = 0x8000_0007;
    /// Bar visibility changed (sway only).
    pub const BAR_STATE_UPDATE: u32 = 0x8000_0014;
    /// Input device added, removed, or reconfigured (sway only).
    pub const INPUT: u32 = 0x8000_0015;
}

/// Bit set on every event type.
pub const EVENT_BIT: u32 = 0x8000_0000;

const COMMANDS: &[(&str, u32)] = &[
    ("run_command", command::RUN_COMMAND),
    ("get_workspaces", command::GET_WORKSPACES),
    ("subscribe", command::SUBSCRIBE),
    ("get_outputs", command::GET_OUTPUTS),
    ("get_tree", command::GET_TREE),
    ("get_marks", command::GET_MARKS),
    ("get_bar_config", command::GET_BAR_CONFIG),
    ("get_version", command::GET_VERSION),
    ("get_binding_modes", command::GET_BINDING_MODES),
    ("get_config", command::GET_CONFIG),
    ("send_tick", command::SEND_TICK),
    ("sync", command::SYNC),
    ("get_binding_state", command::GET_BINDING_STATE),
    ("get_inputs", command::GET_INPUTS),
    ("get_seats", command::GET_SEATS),
];

const EVENTS: &[(&str, u32)] = &[
    ("workspace", event::WORKSPACE),
    ("output", event::OUTPUT),
    ("mode", event::MODE),
    ("window", event::WINDOW),
    ("barconfig_update", event::BARCONFIG_UPDATE),
    ("binding", event::BINDING),
    ("shutdown", event::SHUTDOWN),
    ("tick", event::TICK),
    ("bar_state_update", event::BAR_STATE_UPDATE),
    ("input", event::INPUT),
];

/// Whether `message_type` is in the event range.
#[must_use]
pub const fn is_event(message_type: u32) -> bool {
    message_type & EVENT_BIT != 0
}

/// Looks up a command type by its snake-case name (case-insensitive).
#[must_use]
pub fn command_from_name(name: &str) -> Option<u32> {
    COMMANDS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, t)| t)
}

/// Name of a command type, if it is a known one.
#[must_use]
pub fn command_name(message_type: u32) -> Option<&'static str> {
    COMMANDS
        .iter()
        .find(|&&(_, t)| t == message_type)
        .map(|&(n, _)| n)
}

/// Name of an event type, if it is a known one.
#[must_use]
pub fn event_name(message_type: u32) -> Option<&'static str> {
    EVENTS
        .iter()
        .find(|&&(_, t)| t == message_type)
        .map(|&(n, _)| n)
}

/// Event names accepted in a subscribe payload.
pub fn event_names() -> impl Iterator<Item = &'static str> {
    EVENTS.iter().map(|&(n, _)| n)
}
