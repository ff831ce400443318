use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// Main CLI structure for the ignite-node application
/// Uses clap's derive macros for automatic CLI generation
#[derive(Parser, Debug)]
#[command(version)] // Automatically uses version from Cargo.toml
#[command(about = "Ignite Network Node - contribute bandwidth, earn rewards")]
#[command(long_about = "Monitors this host's network interface throughput and reports the measured \
bandwidth to the Ignite Network every 30 seconds.\n\n\
Credentials can also be supplied through IGNITE_EMAIL and IGNITE_PASSWORD, and the collector URL \
through IGNITE_API_URL or an ignite.toml file.\n\n\
Examples:\n  \
ignite-node --email you@example.com --password secret\n  \
ignite-node --config /etc/ignite.toml run\n  \
ignite-node sample --interval 5          # Print local throughput, no login")]
pub struct Cli {
    /// TOML configuration file (defaults to ./ignite.toml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignite account email
    #[arg(long, global = true)]
    pub email: Option<String>,

    /// Ignite account password
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Collector API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands; `run` is used when none is given
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Log in and report bandwidth until interrupted
    Run,

    /// Take two local samples and print the measured delta (no network access)
    Sample {
        /// Seconds between the two samples
        #[arg(short = 'i', long, default_value = "1")]
        interval: u64,
    },
}

impl Cli {
    pub fn selected_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_file: self.config.clone(),
            api_url: self.api_url.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_run() {
        let cli = Cli::try_parse_from(["ignite-node", "--email", "a@b.c", "--password", "pw"]).unwrap();
        assert_eq!(cli.selected_command(), Commands::Run);

        let overrides = cli.overrides();
        assert_eq!(overrides.email.as_deref(), Some("a@b.c"));
        assert_eq!(overrides.password.as_deref(), Some("pw"));
        assert!(overrides.api_url.is_none());
        assert!(overrides.config_file.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ignite-node",
            "sample",
            "--interval",
            "5",
            "--api-url",
            "http://localhost:3000",
        ])
        .unwrap();
        assert_eq!(cli.selected_command(), Commands::Sample { interval: 5 });
        assert_eq!(cli.overrides().api_url.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
