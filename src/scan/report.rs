//! Scan reporting
//!
//! Console formatting for batch summaries and the false-positive review
//! list: name detections that survived the pipeline but still look
//! non-personal, collected so a reviewer can clear them in one pass.

use crate::config::ExclusionConfig;
use crate::domain::DataType;
use crate::scan::{FileScanRecord, ScanSummary};
use serde::{Deserialize, Serialize};

/// Role vocabulary that should not appear inside a personal name
const TITLE_INDICATORS: [&str; 7] = [
    "service",
    "département",
    "direction",
    "unité",
    "pôle",
    "responsable",
    "chef",
];

/// A name detection flagged for manual review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FalsePositive {
    /// File the detection came from
    pub source: String,
    /// The detected value
    pub value: String,
    /// Its confidence
    pub confidence: f64,
    /// Why it was flagged
    pub reason: String,
}

/// Collect likely false-positive name detections across scan records
pub fn false_positive_report(
    records: &[FileScanRecord],
    config: &ExclusionConfig,
) -> Vec<FalsePositive> {
    let mut flagged = Vec::new();

    for record in records {
        for detection in record.detections.of(DataType::PersonName) {
            let value_lower = detection.value.to_lowercase();

            let reason = if detection.confidence < 0.4 {
                Some("confidence below the name acceptance threshold")
            } else if detection.value.split_whitespace().count() < 2 {
                Some("single-word name")
            } else if config
                .organization_units
                .iter()
                .any(|unit| value_lower.contains(unit.to_lowercase().as_str()))
            {
                Some("contains a known organizational unit")
            } else if TITLE_INDICATORS
                .iter()
                .any(|term| value_lower.contains(term))
            {
                Some("contains role or structure vocabulary")
            } else {
                None
            };

            if let Some(reason) = reason {
                flagged.push(FalsePositive {
                    source: record.source.clone(),
                    value: detection.value.clone(),
                    confidence: detection.confidence,
                    reason: reason.to_string(),
                });
            }
        }
    }

    flagged
}

/// Format a batch summary for console output
pub fn format_console(summary: &ScanSummary) -> String {
    let mut output = String::new();

    output.push_str("═══════════════════════════════════════════════\n");
    output.push_str("                SCAN SUMMARY                   \n");
    output.push_str("═══════════════════════════════════════════════\n\n");

    output.push_str(&format!(
        "  Documents analyzed:  {}\n",
        summary.records.len()
    ));
    output.push_str(&format!("  Skipped:             {}\n", summary.skipped.len()));
    output.push_str(&format!("  Failed:              {}\n", summary.failed.len()));
    output.push_str(&format!("  Duration:            {} ms\n\n", summary.duration_ms));

    let report = &summary.report;
    output.push_str(&format!(
        "  High risk files:     {}\n",
        report.high_risk_files.len()
    ));
    output.push_str(&format!(
        "  Medium risk files:   {}\n",
        report.medium_risk_files.len()
    ));
    output.push_str(&format!(
        "  Low risk files:      {}\n\n",
        report.low_risk_files.len()
    ));

    if !report.risk_by_type.is_empty() {
        output.push_str("  Risk by data type:\n");
        for (data_type, score) in &report.risk_by_type {
            output.push_str(&format!("    {:16} {:>8.2}\n", data_type.label(), score));
        }
        output.push('\n');
    }

    if !report.risky_extensions.is_empty() {
        output.push_str("  At-risk files by extension:\n");
        for (extension, count) in &report.risky_extensions {
            let label = if extension.is_empty() { "(none)" } else { extension };
            output.push_str(&format!("    {:16} {:>5}\n", label, count));
        }
        output.push('\n');
    }

    for ranked in report.high_risk_files.iter().take(10) {
        output.push_str(&format!(
            "  ⚠ {:<40} {:>8.2}\n",
            ranked.source, ranked.score
        ));
    }

    output.push_str("═══════════════════════════════════════════════\n");
    output
}
