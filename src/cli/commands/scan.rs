//! Scan command implementation
//!
//! Walks a directory of plain-text documents, runs the detection pipeline
//! over each, and prints the corpus risk summary. Name recognition runs
//! with the no-op recognizer unless an external model is wired in; the
//! pattern pipeline is unaffected.

use crate::config::VeilleConfig;
use crate::detection::ner::{NoopRecognizer, RecognizerHandle};
use crate::detection::DetectionEngine;
use crate::scan::{report, BatchScanner};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan
    pub path: PathBuf,

    /// Maximum number of files to analyze
    #[arg(long)]
    pub max_files: Option<usize>,

    /// Write the full summary as JSON to this file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Also list likely false-positive name detections
    #[arg(long)]
    pub review_names: bool,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = VeilleConfig::load_or_default(config_path);
        config.validate()?;

        if !self.path.is_dir() {
            eprintln!("Not a directory: {}", self.path.display());
            return Ok(2);
        }

        let engine = DetectionEngine::new(
            config.exclusions.clone(),
            RecognizerHandle::from_recognizer(Arc::new(NoopRecognizer)),
        )
        .with_recognizer_text_cap(config.scan.recognizer_text_cap);

        let scanner = BatchScanner::new(Arc::new(engine), config.scan.clone());

        tracing::info!(path = %self.path.display(), "Scanning directory");
        let summary = scanner
            .scan_directory(&self.path, self.max_files, |done, total| {
                if done % 50 == 0 || done == total {
                    tracing::info!(done, total, "Scan progress");
                }
            })
            .await?;

        print!("{}", report::format_console(&summary));

        if self.review_names {
            let flagged = report::false_positive_report(&summary.records, &config.exclusions);
            if flagged.is_empty() {
                println!("No name detections flagged for review.");
            } else {
                println!("Name detections to review:");
                for fp in &flagged {
                    println!(
                        "  {}: \"{}\" ({:.2}) {}",
                        fp.source, fp.value, fp.confidence, fp.reason
                    );
                }
            }
        }

        if let Some(ref output) = self.output {
            std::fs::write(output, summary.to_json()?)?;
            println!("Summary written to {}", output.display());
        }

        Ok(0)
    }
}
