//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for veille using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// veille - personal data exposure scanner
#[derive(Parser, Debug)]
#[command(name = "veille")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "veille.toml", env = "VEILLE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VEILLE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a directory of plain-text documents for personal data
    Scan(commands::scan::ScanArgs),

    /// Validate the configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_scan() {
        let cli = Cli::parse_from(["veille", "scan", "/tmp/docs"]);
        assert_eq!(cli.config, "veille.toml");
        assert!(matches!(cli.command, Commands::Scan(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["veille", "--config", "custom.toml", "scan", "/tmp/docs"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["veille", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }
}
