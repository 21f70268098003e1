//! Tests for sway socket path resolution.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use swaysock::config::{ConnectionConfig, SocketConfig};
use swaysock::sway::socket::{
    resolve_socket_path_with, run_discovery, strip_trailing_newline,
};
use swaysock::sway::{Client, DiscoveryError, SwayError};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
    let map: HashMap<String, OsString> = pairs
        .iter()
        .map(|&(k, v)| (k.to_string(), OsString::from(v)))
        .collect();
    move |name| map.get(name).cloned()
}

fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

#[test]
fn env_var_is_returned_verbatim_even_if_missing_on_disk() {
    let config = SocketConfig {
        discovery_command: Vec::new(),
        ..SocketConfig::default()
    };
    let path = resolve_socket_path_with(
        &config,
        env(&[("SWAYSOCK", "/nonexistent/sway-ipc.1000.42.sock")]),
    )
    .unwrap();
    assert_eq!(path, PathBuf::from("/nonexistent/sway-ipc.1000.42.sock"));

    match Client::connect_to(&path, &ConnectionConfig::default()) {
        Err(SwayError::Connect { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected connect error, got {other:?}"),
    }
}

#[test]
fn env_vars_are_checked_in_order_and_empty_ones_skipped() {
    let config = SocketConfig::default();
    let path = resolve_socket_path_with(
        &config,
        env(&[("SWAYSOCK", ""), ("I3SOCK", "/run/user/1000/i3/ipc-socket.1")]),
    )
    .unwrap();
    assert_eq!(path, PathBuf::from("/run/user/1000/i3/ipc-socket.1"));

    let path = resolve_socket_path_with(
        &config,
        env(&[("SWAYSOCK", "/a.sock"), ("I3SOCK", "/b.sock")]),
    )
    .unwrap();
    assert_eq!(path, PathBuf::from("/a.sock"));
}

#[test]
fn explicit_path_wins_over_environment() {
    let config = SocketConfig {
        path: Some("/tmp/override.sock".to_string()),
        ..SocketConfig::default()
    };
    let path = resolve_socket_path_with(&config, env(&[("SWAYSOCK", "/env.sock")])).unwrap();
    assert_eq!(path, PathBuf::from("/tmp/override.sock"));
}

#[test]
fn falls_back_to_discovery_command() {
    let config = SocketConfig {
        discovery_command: sh("printf '/run/user/1000/sway-ipc.sock\\n'"),
        ..SocketConfig::default()
    };
    let path = resolve_socket_path_with(&config, env(&[])).unwrap();
    assert_eq!(path, PathBuf::from("/run/user/1000/sway-ipc.sock"));
}

#[test]
fn discovery_strips_only_one_newline() {
    let path = run_discovery(&sh("printf '/x.sock\\n\\n'")).unwrap();
    assert_eq!(path, PathBuf::from("/x.sock\n"));

    let path = run_discovery(&sh("printf '/no-newline.sock'")).unwrap();
    assert_eq!(path, PathBuf::from("/no-newline.sock"));
}

#[test]
fn discovery_ignores_stderr_and_reports_empty_output() {
    let result = run_discovery(&sh("echo 'sway not running' >&2; exit 1"));
    assert!(matches!(result, Err(DiscoveryError::EmptyOutput)));

    let result = run_discovery(&sh("printf '\\n'"));
    assert!(matches!(result, Err(DiscoveryError::EmptyOutput)));
}

#[test]
fn discovery_reports_missing_program() {
    let result = run_discovery(&["swaysock-test-no-such-program".to_string()]);
    match result {
        Err(DiscoveryError::Spawn { program, source }) => {
            assert_eq!(program, "swaysock-test-no-such-program");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected spawn error, got {other:?}"),
    }
}

#[test]
fn nothing_configured_is_no_command() {
    let config = SocketConfig {
        path: None,
        env_vars: Vec::new(),
        discovery_command: Vec::new(),
    };
    assert!(matches!(
        resolve_socket_path_with(&config, env(&[])),
        Err(DiscoveryError::NoCommand)
    ));
}

#[test]
fn strip_trailing_newline_cases() {
    assert_eq!(strip_trailing_newline(b"a\n".to_vec()), b"a");
    assert_eq!(strip_trailing_newline(b"a".to_vec()), b"a");
    assert_eq!(strip_trailing_newline(b"\n".to_vec()), b"");
    assert_eq!(strip_trailing_newline(Vec::new()), b"");
}
