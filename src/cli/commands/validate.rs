//! Validate config command implementation

use crate::config::VeilleConfig;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");

        let config = match VeilleConfig::from_file(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e:#}");
                return Ok(2);
            }
        };

        match config.validate() {
            Ok(()) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration summary:");
                println!("  Log level:            {}", config.logging.level);
                println!("  Max file size:        {} bytes", config.scan.max_file_size);
                println!(
                    "  Recognizer text cap:  {} chars",
                    config.scan.recognizer_text_cap
                );
                println!(
                    "  Excluded persons:     {}",
                    config.exclusions.excluded_persons.len()
                );
                println!(
                    "  Organization units:   {}",
                    config.exclusions.organization_units.len()
                );
                println!(
                    "  Template indicators:  {}",
                    config.exclusions.template_indicators.len()
                );
                println!(
                    "  Internal domains:     {}",
                    config.exclusions.internal_domains.len()
                );
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e:#}");
                Ok(2)
            }
        }
    }
}
