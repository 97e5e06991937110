// veille - personal data exposure scanner
// Copyright (c) 2025 Veille Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use veille::cli::{Cli, Commands};
use veille::config::LoggingConfig;
use veille::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Console-only logging for the CLI; file logging is opt-in through the
    // configuration file and only relevant for long-running deployments.
    let logging_config = LoggingConfig {
        level: cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
        file_enabled: false,
        file_dir: String::new(),
    };
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(5);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "veille - personal data exposure scanner"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Scan(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
    }
}
