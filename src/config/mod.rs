//! Configuration management
//!
//! Veille is configured through a single TOML file with three sections:
//! `[exclusions]` (reference lists consumed by the contextual classifier and
//! the validators), `[scan]` (batch-scan options), and `[logging]`. Every
//! section has usable defaults; the exclusion defaults are compiled in from
//! `exclusions/default_exclusions.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default exclusion lists embedded at compile time
const DEFAULT_EXCLUSIONS: &str = include_str!("../../exclusions/default_exclusions.toml");

/// Reference lists consumed by the detection pipeline
///
/// Read-only during an analysis run; edits to the backing file take effect
/// on the next run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusionConfig {
    /// Known non-personal proper names (organization staff, placeholders)
    #[serde(default)]
    pub excluded_persons: Vec<String>,

    /// Organizational-unit names (departments, services)
    #[serde(default)]
    pub organization_units: Vec<String>,

    /// Vocabulary indicating professional/organizational context
    #[serde(default)]
    pub professional_context: Vec<String>,

    /// Vocabulary indicating a template/example document
    #[serde(default)]
    pub template_indicators: Vec<String>,

    /// Mail domains of the organization itself; addresses under these are
    /// never reported as an external exposure
    #[serde(default)]
    pub internal_domains: Vec<String>,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        // The embedded list ships with the binary and is validated by tests.
        toml::from_str(DEFAULT_EXCLUSIONS).expect("embedded default exclusion list must parse")
    }
}

impl ExclusionConfig {
    /// Load exclusion lists from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read exclusion file: {}",
                path.as_ref().display()
            )
        })?;
        Self::from_toml(&content)
    }

    /// Parse exclusion lists from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse exclusion TOML")?;
        Ok(config)
    }

    /// Load from a file, falling back to the embedded defaults when the file
    /// is missing or unreadable
    ///
    /// The fallback is safe but noisy: with no exclusions known, every staff
    /// name and internal address surfaces as a finding. A warning is logged
    /// so the degradation is visible.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::from_file(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "Falling back to built-in exclusion lists"
                );
                Self::default()
            }
        }
    }
}

/// Batch-scan options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Files larger than this are skipped (bytes)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Maximum number of characters fed to the name recognizer per document
    #[serde(default = "default_recognizer_text_cap")]
    pub recognizer_text_cap: usize,

    /// Extensions excluded from directory scans (with leading dot)
    #[serde(default)]
    pub excluded_extensions: Vec<String>,
}

fn default_max_file_size() -> u64 {
    50 * 1024 * 1024
}

fn default_recognizer_text_cap() -> usize {
    100_000
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            recognizer_text_cap: default_recognizer_text_cap(),
            excluded_extensions: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable JSON file logging with daily rotation
    #[serde(default)]
    pub file_enabled: bool,

    /// Directory for rotated log files
    #[serde(default = "default_log_dir")]
    pub file_dir: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "./logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_enabled: false,
            file_dir: default_log_dir(),
        }
    }
}

/// Root configuration mapping to the TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VeilleConfig {
    /// Exclusion lists
    #[serde(default)]
    pub exclusions: ExclusionConfig,

    /// Batch-scan options
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VeilleConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read configuration file: {}",
                path.as_ref().display()
            )
        })?;
        let mut config: Self =
            toml::from_str(&content).context("Failed to parse configuration TOML")?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from a file, falling back to full defaults when missing
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::from_file(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "Using default configuration"
                );
                let mut config = Self::default();
                let _ = config.apply_env_overrides();
                config
            }
        }
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("VEILLE_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(path) = std::env::var("VEILLE_EXCLUSIONS") {
            self.exclusions = ExclusionConfig::from_file(&path)
                .with_context(|| format!("Invalid VEILLE_EXCLUSIONS file: {path}"))?;
        }

        if let Ok(val) = std::env::var("VEILLE_MAX_FILE_SIZE") {
            self.scan.max_file_size = val
                .parse()
                .context("Invalid VEILLE_MAX_FILE_SIZE value")?;
        }

        if let Ok(val) = std::env::var("VEILLE_RECOGNIZER_TEXT_CAP") {
            self.scan.recognizer_text_cap = val
                .parse()
                .context("Invalid VEILLE_RECOGNIZER_TEXT_CAP value")?;
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            );
        }

        if self.scan.recognizer_text_cap == 0 {
            anyhow::bail!("scan.recognizer_text_cap must be greater than zero");
        }

        if self.exclusions.template_indicators.is_empty() {
            anyhow::bail!(
                "exclusions.template_indicators must not be empty; \
                 template detection would be disabled silently"
            );
        }

        Ok(())
    }
}
