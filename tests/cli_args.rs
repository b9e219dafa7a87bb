//! Integration tests for CLI argument handling
//!
//! Tests the --state flag and the standard clap surface by running the
//! actual binary. Flows that would hit the network are covered by unit
//! tests against fake fetchers instead.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_parkscout"))
        .args(args)
        .output()
        .expect("Failed to execute parkscout")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("parkscout"), "Help should mention parkscout");
    assert!(stdout.contains("state"), "Help should mention --state flag");
}

#[test]
fn test_version_flag_prints_the_package_version() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "Version output should contain the crate version: {}",
        stdout
    );
}

#[test]
fn test_unknown_flag_prints_error_and_exits() {
    let output = run_cli(&["--such-flag-does-not-exist"]);
    assert!(
        !output.status.success(),
        "Expected an unknown flag to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("unexpected"),
        "Should print a clap error message: {}",
        stderr
    );
}

#[test]
fn test_state_flag_is_accepted_alongside_help() {
    // --help short-circuits before any network access, so this only checks
    // that the flag parses
    let output = run_cli(&["--state", "michigan", "--help"]);
    assert!(output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use parkscout::cli::{Cli, StartupConfig};

    #[test]
    fn test_cli_no_args_has_no_initial_state() {
        let cli = Cli::parse_from(["parkscout"]);
        assert!(cli.state.is_none());
    }

    #[test]
    fn test_cli_state_flag_carries_the_name() {
        let cli = Cli::parse_from(["parkscout", "--state", "michigan"]);
        assert_eq!(cli.state.as_deref(), Some("michigan"));
    }

    #[test]
    fn test_cli_state_flag_keeps_multiword_names() {
        let cli = Cli::parse_from(["parkscout", "--state", "new mexico"]);
        assert_eq!(cli.state.as_deref(), Some("new mexico"));
    }

    #[test]
    fn test_startup_config_passes_the_state_through() {
        let cli = Cli::parse_from(["parkscout", "--state", "Michigan"]);
        let config = StartupConfig::from_cli(&cli);
        assert_eq!(config.initial_state.as_deref(), Some("Michigan"));
    }

    #[test]
    fn test_startup_config_without_flag_is_default() {
        let cli = Cli::parse_from(["parkscout"]);
        let config = StartupConfig::from_cli(&cli);
        assert_eq!(config, StartupConfig::default());
    }
}
