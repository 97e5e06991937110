//! Batch scanning
//!
//! Runs the detection engine over many documents, one outcome per document,
//! with incremental progress reporting. A single document's failure never
//! aborts the batch: extraction failures land in the per-document failure
//! list while every other document keeps its results.

pub mod report;
pub mod source;

use crate::config::ScanConfig;
use crate::detection::DetectionEngine;
use crate::domain::{DetectOutcome, DetectionSet, FileCategory, Result};
use crate::risk::{FileRiskRecord, RiskReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use source::{PlainTextFile, TextSource};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Result of analyzing one document in a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileScanRecord {
    /// Source identifier (path)
    pub source: String,
    /// Coarse document category
    pub category: FileCategory,
    /// First 100 characters of the extracted text, for diagnostics
    pub snippet: String,
    /// Accepted detections
    pub detections: DetectionSet,
    /// Recognizer failure for this document, if any
    pub recognizer_error: Option<String>,
    /// Risk aggregate derived from the detections
    pub risk: FileRiskRecord,
}

/// A document that was skipped or failed, with the reason
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub source: String,
    pub reason: String,
}

/// Outcome of a whole batch scan
#[derive(Debug, Serialize)]
pub struct ScanSummary {
    /// Scan start time
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
    /// Per-document results
    pub records: Vec<FileScanRecord>,
    /// Documents skipped before reading (temp files, size cap, ...)
    pub skipped: Vec<DocumentFailure>,
    /// Documents whose text extraction failed
    pub failed: Vec<DocumentFailure>,
    /// Corpus-wide risk report over the scanned documents
    pub report: RiskReport,
}

impl ScanSummary {
    /// Serialize the summary as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Batch scanner over text sources
///
/// The engine is shared by reference: detection is pure and synchronous, so
/// a single engine serves any number of concurrent scans.
pub struct BatchScanner {
    engine: Arc<DetectionEngine>,
    config: ScanConfig,
}

impl BatchScanner {
    pub fn new(engine: Arc<DetectionEngine>, config: ScanConfig) -> Self {
        Self { engine, config }
    }

    /// Scan the plain-text files under a directory
    ///
    /// Walks the directory, applies the skip rules, and analyzes at most
    /// `max_files` documents. `progress` receives (processed, total) after
    /// every document.
    pub async fn scan_directory(
        &self,
        dir: &Path,
        max_files: Option<usize>,
        progress: impl Fn(usize, usize),
    ) -> Result<ScanSummary> {
        let (mut files, skipped_paths) = source::collect_plain_text_files(dir, &self.config)?;
        if let Some(max) = max_files {
            files.truncate(max);
        }

        let sources: Vec<Box<dyn TextSource>> = files
            .into_iter()
            .map(|path| Box::new(PlainTextFile::new(path)) as Box<dyn TextSource>)
            .collect();

        let mut summary = self.scan_sources(sources, progress).await;
        summary
            .skipped
            .extend(skipped_paths.into_iter().map(|(path, reason)| {
                DocumentFailure {
                    source: path.display().to_string(),
                    reason,
                }
            }));
        Ok(summary)
    }

    /// Scan a set of text sources
    ///
    /// Each source is extracted and analyzed independently; extraction
    /// failures are recorded and the batch continues.
    pub async fn scan_sources(
        &self,
        sources: Vec<Box<dyn TextSource>>,
        progress: impl Fn(usize, usize),
    ) -> ScanSummary {
        let started_at = Utc::now();
        let start = Instant::now();
        let total = sources.len();

        let mut records = Vec::with_capacity(total);
        let mut failed = Vec::new();

        tracing::info!(documents = total, "Starting batch scan");

        for (index, source) in sources.iter().enumerate() {
            match source.text() {
                Ok(text) => {
                    records.push(self.analyze_document(source.as_ref(), &text));
                }
                Err(e) => {
                    tracing::warn!(source = %source.id(), error = %e, "Text extraction failed");
                    failed.push(DocumentFailure {
                        source: source.id().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
            progress(index + 1, total);
        }

        let report = RiskReport::build(
            &records.iter().map(|r| r.risk.clone()).collect::<Vec<_>>(),
        );

        tracing::info!(
            analyzed = records.len(),
            failed = failed.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch scan finished"
        );

        ScanSummary {
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            records,
            skipped: Vec::new(),
            failed,
            report,
        }
    }

    /// Analyze one extracted document into its scan record
    fn analyze_document(&self, source: &dyn TextSource, text: &str) -> FileScanRecord {
        let (detections, recognizer_error) =
            match self.engine.detect_outcome(text, source.id()) {
                DetectOutcome::Complete(set) => (set, None),
                DetectOutcome::TextEmpty => (DetectionSet::new(), None),
                DetectOutcome::Partial {
                    detections,
                    recognizer_error,
                } => (detections, Some(recognizer_error)),
            };

        let risk = FileRiskRecord::compute(source.id(), source.category(), &detections);

        FileScanRecord {
            source: source.id().to_string(),
            category: source.category(),
            snippet: snippet(text, 100),
            detections,
            recognizer_error,
            risk,
        }
    }
}

/// First `max_chars` characters of the text
fn snippet(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
