//! CLI parse and batch tests.

use super::{run_list, Cli, DEFAULT_INPUT};
use clap::Parser;
use lcmon_core::input::InputError;
use lcmon_core::key::Endpoint;
use lcmon_core::retry::RetryPolicy;
use lcmon_core::{Monitor, MonitorSettings};
use std::io::Write;
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

/// A monitor whose address never parses, so every key fails without touching the network.
fn offline_monitor() -> Monitor {
    Monitor::new(MonitorSettings {
        endpoint: Endpoint::new("offline {key}"),
        retry: RetryPolicy::immediate(3),
        ..MonitorSettings::default()
    })
}

#[test]
fn cli_parse_default_input() {
    let cli = parse(&["lcmon"]);
    assert_eq!(cli.input, Path::new(DEFAULT_INPUT));
}

#[test]
fn cli_parse_short_input() {
    let cli = parse(&["lcmon", "-i", "custom_problems.txt"]);
    assert_eq!(cli.input, Path::new("custom_problems.txt"));
}

#[test]
fn cli_parse_long_input() {
    let cli = parse(&["lcmon", "--input", "data/my_list.txt"]);
    assert_eq!(cli.input, Path::new("data/my_list.txt"));
}

#[test]
fn cli_rejects_positional_args() {
    assert!(Cli::try_parse_from(["lcmon", "two-sum"]).is_err());
}

#[test]
fn blank_lines_are_skipped_and_each_key_reported() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(b"two-sum\n\n  \nadd-two-numbers\n").unwrap();
    f.flush().unwrap();

    let mut out = Vec::new();
    let summary = run_list(f.path(), offline_monitor(), &mut out).unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.available, 0);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        format!("Loaded 2 problems from {}", f.path().display())
    );
    assert_eq!(lines[1], "");
    assert!(lines[2].starts_with("Problem: two-sum "));
    assert!(lines[2].ends_with("| Online Users: -1"));
    assert!(lines[3].starts_with("Problem: add-two-numbers "));
    assert_eq!(lines.len(), 4);
}

#[test]
fn missing_input_fails_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");

    let mut out = Vec::new();
    let err = run_list(&path, offline_monitor(), &mut out).unwrap_err();
    assert!(out.is_empty());
    assert!(matches!(
        err.downcast_ref::<InputError>(),
        Some(InputError::NotFound { .. })
    ));
    assert!(format!("{err:#}").contains("missing.txt"));
}

#[test]
fn bundled_list_exists() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(DEFAULT_INPUT);
    let keys = lcmon_core::input::load_keys(&path).unwrap();
    assert_eq!(keys.len(), 75);
    assert_eq!(keys[0].as_str(), "merge-strings-alternately");
}
