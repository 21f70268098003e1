//! Sway IPC socket path resolution.

use super::error::DiscoveryError;
use crate::config::SocketConfig;
use crate::internal;
use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Resolves the socket path from the process environment.
///
/// Priority:
/// 1. `config.path` (explicit override, tilde-expanded)
/// 2. the first non-empty variable in `config.env_vars`
/// 3. the output of `config.discovery_command`
///
/// Paths are returned as-is; whether they exist is only found out on connect.
/// Nothing is cached.
///
/// # Errors
/// Returns [`DiscoveryError`] if every source comes up empty.
pub fn resolve_socket_path(config: &SocketConfig) -> Result<PathBuf, DiscoveryError> {
    resolve_socket_path_with(config, |name| std::env::var_os(name))
}

/// Same as [`resolve_socket_path`], reading variables through `lookup`.
///
/// # Errors
/// Returns [`DiscoveryError`] if every source comes up empty.
pub fn resolve_socket_path_with<F>(config: &SocketConfig, lookup: F) -> Result<PathBuf, DiscoveryError>
where
    F: Fn(&str) -> Option<OsString>,
{
    if let Some(ref path) = config.path {
        let expanded = shellexpand::tilde(path);
        internal::debug("SOCKET", &format!("Using configured socket path {expanded}"));
        return Ok(PathBuf::from(expanded.as_ref()));
    }

    for name in &config.env_vars {
        if let Some(value) = lookup(name).filter(|v| !v.is_empty()) {
            internal::debug("SOCKET", &format!("Socket path taken from ${name}"));
            return Ok(PathBuf::from(value));
        }
    }

    run_discovery(&config.discovery_command)
}

/// Runs a discovery command such as `sway --get-socketpath` and returns its
/// standard output minus one trailing newline.
///
/// The exit status is not checked; an instance that is not running prints
/// nothing and is reported as [`DiscoveryError::EmptyOutput`].
///
/// # Errors
/// Returns [`DiscoveryError::NoCommand`] for an empty command line,
/// [`DiscoveryError::Spawn`] if it cannot be started, and
/// [`DiscoveryError::EmptyOutput`] if it prints nothing.
pub fn run_discovery(command: &[String]) -> Result<PathBuf, DiscoveryError> {
    let Some((program, args)) = command.split_first() else {
        return Err(DiscoveryError::NoCommand);
    };

    internal::debug("SOCKET", &format!("Running {}", command.join(" ")));
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|source| DiscoveryError::Spawn {
            program: program.clone(),
            source,
        })?;

    let stdout = strip_trailing_newline(output.stdout);
    if stdout.is_empty() {
        internal::error("SOCKET", "Discovery command printed no socket path");
        return Err(DiscoveryError::EmptyOutput);
    }

    Ok(PathBuf::from(OsString::from_vec(stdout)))
}

/// Removes a single trailing `\n`, if present.
#[must_use]
pub fn strip_trailing_newline(mut bytes: Vec<u8>) -> Vec<u8> {
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    bytes
}
