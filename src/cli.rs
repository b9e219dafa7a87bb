//! Command-line interface parsing for Park Scout
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --state flag for jumping straight to one state's site listing.

use clap::Parser;

/// Park Scout - Browse national park sites by state and look up nearby places
#[derive(Parser, Debug)]
#[command(name = "parkscout")]
#[command(about = "Browse US national park sites by state and look up nearby places")]
#[command(version)]
pub struct Cli {
    /// Load a state's site listing immediately on startup
    ///
    /// Examples:
    ///   parkscout                      # Start at the state prompt
    ///   parkscout --state michigan     # Start with Michigan's sites listed
    ///
    /// The name is matched case-insensitively against the live directory;
    /// an unknown name falls back to the normal state prompt.
    #[arg(long, value_name = "NAME")]
    pub state: Option<String>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupConfig {
    /// State name fed to the session as its first input, if any
    pub initial_state: Option<String>,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * A config with `initial_state` trimmed, or None when the flag was
    ///   absent or blank
    pub fn from_cli(cli: &Cli) -> Self {
        let initial_state = cli
            .state
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from);
        Self { initial_state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["parkscout"]);
        assert!(cli.state.is_none());
    }

    #[test]
    fn test_cli_parse_state_flag() {
        let cli = Cli::parse_from(["parkscout", "--state", "michigan"]);
        assert_eq!(cli.state.as_deref(), Some("michigan"));
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert!(config.initial_state.is_none());
    }

    #[test]
    fn test_startup_config_from_cli_without_state() {
        let cli = Cli::parse_from(["parkscout"]);
        let config = StartupConfig::from_cli(&cli);
        assert!(config.initial_state.is_none());
    }

    #[test]
    fn test_startup_config_from_cli_trims_the_state_name() {
        let cli = Cli::parse_from(["parkscout", "--state", "  New Mexico  "]);
        let config = StartupConfig::from_cli(&cli);
        assert_eq!(config.initial_state.as_deref(), Some("New Mexico"));
    }

    #[test]
    fn test_startup_config_from_cli_blank_state_counts_as_absent() {
        let cli = Cli::parse_from(["parkscout", "--state", "   "]);
        let config = StartupConfig::from_cli(&cli);
        assert!(config.initial_state.is_none());
    }
}
