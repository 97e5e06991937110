//! Risk aggregation
//!
//! Turns per-document detection sets into per-file risk records and a
//! corpus-wide report. Scoring is stateless: a record is entirely derived
//! from a detection set plus the fixed per-type weight table and can be
//! recomputed at any time.

use crate::domain::{DataType, DetectionSet, FileCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::Path;

/// Files scoring above this are high risk
const HIGH_RISK_THRESHOLD: f64 = 20.0;

/// Files scoring above this (and at most the high threshold) are medium risk
const MEDIUM_RISK_THRESHOLD: f64 = 10.0;

/// Per-file risk aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRiskRecord {
    /// File identifier (path)
    pub source: String,
    /// Coarse document category
    pub category: FileCategory,
    /// Risk subscore per data type: mean confidence × type weight
    pub subscores: BTreeMap<DataType, f64>,
    /// Total risk: sum of the subscores
    pub total: f64,
}

impl FileRiskRecord {
    /// Compute the record for one file's detections
    pub fn compute(
        source: impl Into<String>,
        category: FileCategory,
        detections: &DetectionSet,
    ) -> Self {
        let mut subscores = BTreeMap::new();
        let mut total = 0.0;

        for data_type in DataType::ALL {
            let found = detections.of(data_type);
            if found.is_empty() {
                continue;
            }
            let mean_confidence =
                found.iter().map(|d| d.confidence).sum::<f64>() / found.len() as f64;
            let subscore = mean_confidence * data_type.risk_weight();
            subscores.insert(data_type, subscore);
            total += subscore;
        }

        Self {
            source: source.into(),
            category,
            subscores,
            total,
        }
    }

    /// Risk tier this file falls into, `None` when risk is zero
    pub fn tier(&self) -> Option<RiskTier> {
        if self.total > HIGH_RISK_THRESHOLD {
            Some(RiskTier::High)
        } else if self.total > MEDIUM_RISK_THRESHOLD {
            Some(RiskTier::Medium)
        } else if self.total > 0.0 {
            Some(RiskTier::Low)
        } else {
            None
        }
    }
}

/// Risk tiers for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

/// One file inside a report tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedFile {
    /// File identifier (path)
    pub source: String,
    /// Total risk score
    pub score: f64,
    /// Coarse document category
    pub category: FileCategory,
}

/// Corpus-wide risk report over many file records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    /// Total files analyzed
    pub total_analyzed: usize,
    /// Files above the high-risk threshold, sorted by descending score
    pub high_risk_files: Vec<RankedFile>,
    /// Files in the medium band, sorted by descending score
    pub medium_risk_files: Vec<RankedFile>,
    /// Remaining at-risk files, unordered
    pub low_risk_files: Vec<RankedFile>,
    /// Running risk total per data type across all files
    pub risk_by_type: BTreeMap<DataType, f64>,
    /// Extension frequency among at-risk files, sorted by descending count
    pub risky_extensions: Vec<(String, usize)>,
    /// Report generation time
    pub generated_at: DateTime<Utc>,
}

impl RiskReport {
    /// Build the corpus report from per-file records
    pub fn build(records: &[FileRiskRecord]) -> Self {
        let mut high = Vec::new();
        let mut medium = Vec::new();
        let mut low = Vec::new();
        let mut risk_by_type: BTreeMap<DataType, f64> = BTreeMap::new();
        let mut extension_counts: HashMap<String, usize> = HashMap::new();

        for record in records {
            for (&data_type, &subscore) in &record.subscores {
                *risk_by_type.entry(data_type).or_insert(0.0) += subscore;
            }

            let ranked = RankedFile {
                source: record.source.clone(),
                score: record.total,
                category: record.category,
            };
            match record.tier() {
                Some(RiskTier::High) => high.push(ranked),
                Some(RiskTier::Medium) => medium.push(ranked),
                Some(RiskTier::Low) => low.push(ranked),
                None => continue,
            }

            let extension = Path::new(&record.source)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{}", e.to_lowercase()))
                .unwrap_or_default();
            *extension_counts.entry(extension).or_insert(0) += 1;
        }

        let by_score_desc = |a: &RankedFile, b: &RankedFile| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        };
        high.sort_by(by_score_desc);
        medium.sort_by(by_score_desc);

        let mut risky_extensions: Vec<(String, usize)> = extension_counts.into_iter().collect();
        risky_extensions.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            total_analyzed: records.len(),
            high_risk_files: high,
            medium_risk_files: medium,
            low_risk_files: low,
            risk_by_type,
            risky_extensions,
            generated_at: Utc::now(),
        }
    }
}

/// Aggregate many per-file detection sets into a corpus risk report
///
/// This is the second public operation of the core next to
/// [`DetectionEngine::detect`](crate::detection::DetectionEngine::detect).
pub fn score_risk<I, S>(detection_sets: I) -> RiskReport
where
    I: IntoIterator<Item = (S, DetectionSet, FileCategory)>,
    S: Into<String>,
{
    let records: Vec<FileRiskRecord> = detection_sets
        .into_iter()
        .map(|(source, set, category)| FileRiskRecord::compute(source, category, &set))
        .collect();
    RiskReport::build(&records)
}
