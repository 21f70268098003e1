//! Swaysock's own diagnostics, tagged with a scope (`SOCKET`, `IPC`, `EVENTS`,
//! `CONFIG`, `CLI`).
//!
//! Records go through the `log` facade with the scope as target, so the
//! embedding application decides where they end up. The library never
//! installs a logger itself.

use crate::level::Level;

/// Whether a record at `level` would be emitted by the installed logger.
#[must_use]
pub fn enabled(level: Level) -> bool {
    log::log_enabled!(level.to_log())
}

fn emit(level: Level, scope: &str, msg: &str) {
    log::log!(target: scope, level.to_log(), "{msg}");
}

/// High-volume instrumentation, such as one line per frame.
pub fn trace(scope: &str, msg: &str) {
    emit(Level::Trace, scope, msg);
}

/// Startup and teardown details.
pub fn debug(scope: &str, msg: &str) {
    emit(Level::Debug, scope, msg);
}

/// Operational milestones.
pub fn info(scope: &str, msg: &str) {
    emit(Level::Info, scope, msg);
}

/// Non-fatal anomalies.
pub fn warn(scope: &str, msg: &str) {
    emit(Level::Warn, scope, msg);
}

/// Failures.
pub fn error(scope: &str, msg: &str) {
    emit(Level::Error, scope, msg);
}

/// Installs `env_logger` at `level` unless `RUST_LOG` says otherwise.
///
/// Later calls are no-ops.
#[cfg(feature = "cli")]
pub fn init(level: Level) {
    let _ = env_logger::Builder::new()
        .filter_level(level.to_filter())
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}
