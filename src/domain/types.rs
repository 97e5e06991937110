//! Detection data model
//!
//! Types shared by the detection engine, the risk aggregator, and the batch
//! scanner: the supported data types, individual detections, per-document
//! detection sets, file categories, and the tagged per-document outcome.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Categories of personal data the scanner can detect
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Email addresses
    Email,
    /// French phone numbers (national and international forms)
    Phone,
    /// Calendar dates (DD/MM/YYYY)
    Date,
    /// French social security numbers (NIR), 13 or 15 digits
    NationalId,
    /// French business registration numbers (SIRET), 14 digits
    BusinessId,
    /// French postal addresses
    PostalAddress,
    /// IPv4 and IPv6 addresses
    IpAddress,
    /// Person names, sourced from the external name recognizer
    PersonName,
}

impl DataType {
    /// All supported data types, in a stable order
    pub const ALL: [DataType; 8] = [
        DataType::Email,
        DataType::Phone,
        DataType::Date,
        DataType::NationalId,
        DataType::BusinessId,
        DataType::PostalAddress,
        DataType::IpAddress,
        DataType::PersonName,
    ];

    /// Stable label used in reports and serialized output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Date => "date",
            Self::NationalId => "national_id",
            Self::BusinessId => "business_id",
            Self::PostalAddress => "postal_address",
            Self::IpAddress => "ip_address",
            Self::PersonName => "person_name",
        }
    }

    /// Risk weight applied when aggregating per-file scores
    ///
    /// Dates carry no weight: they are detected and reported but do not
    /// contribute to exposure risk on their own.
    pub fn risk_weight(&self) -> f64 {
        match self {
            Self::NationalId => 10.0,
            Self::Email => 5.0,
            Self::Phone => 5.0,
            Self::PersonName => 3.0,
            Self::BusinessId => 2.0,
            Self::PostalAddress => 2.0,
            Self::IpAddress => 2.0,
            Self::Date => 0.0,
        }
    }

    /// Minimum confidence a detection of this type needs to be kept
    pub fn acceptance_threshold(&self) -> f64 {
        match self {
            Self::Email => 0.7,
            Self::Phone => 0.7,
            Self::Date => 0.5,
            Self::NationalId => 0.8,
            Self::BusinessId => 0.8,
            Self::PostalAddress => 0.7,
            Self::IpAddress => 0.7,
            Self::PersonName => 0.4,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One detected instance of personal data in one document
///
/// The value is the literal matched substring, never normalized, so the
/// finding can be located in the original document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Category of the detected data
    pub data_type: DataType,
    /// Exact matched substring
    pub value: String,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f64,
}

impl Detection {
    /// Create a new detection with the confidence clamped to [0, 1]
    pub fn new(data_type: DataType, value: impl Into<String>, confidence: f64) -> Self {
        Self {
            data_type,
            value: value.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Per-document detection outcome: detections grouped by data type, in the
/// order they were found in the text
///
/// Every detection stored here meets its type's acceptance threshold;
/// sub-threshold candidates are dropped before the set is finalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionSet {
    by_type: BTreeMap<DataType, Vec<Detection>>,
}

impl DetectionSet {
    /// Create an empty detection set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a detection, preserving insertion order within its type
    ///
    /// The detection engine only inserts detections that already meet the
    /// acceptance threshold; callers building sets by hand (for example from
    /// deserialized results) are expected to do the same.
    pub fn push(&mut self, detection: Detection) {
        self.by_type
            .entry(detection.data_type)
            .or_default()
            .push(detection);
    }

    /// Detections of a given type, in order of first appearance
    pub fn of(&self, data_type: DataType) -> &[Detection] {
        self.by_type
            .get(&data_type)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate over all detections
    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.by_type.values().flatten()
    }

    /// Data types with at least one detection
    pub fn types(&self) -> impl Iterator<Item = DataType> + '_ {
        self.by_type.keys().copied()
    }

    /// Total number of detections across all types
    pub fn total(&self) -> usize {
        self.by_type.values().map(Vec::len).sum()
    }

    /// Whether the set holds no detections at all
    pub fn is_empty(&self) -> bool {
        self.by_type.values().all(Vec::is_empty)
    }
}

/// Coarse document category derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    /// Plain text (txt, log, csv)
    Text,
    /// Word-processor documents (docx, doc, rtf, odt)
    Word,
    /// Spreadsheets (xlsx, xls, ods)
    Spreadsheet,
    /// PDF documents
    Pdf,
    /// Anything else
    Unknown,
}

impl FileCategory {
    /// Derive the category from a file path's extension
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "txt" | "log" | "csv" => Self::Text,
            "docx" | "doc" | "rtf" | "odt" => Self::Word,
            "xlsx" | "xls" | "ods" => Self::Spreadsheet,
            "pdf" => Self::Pdf,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Word => "word",
            Self::Spreadsheet => "spreadsheet",
            Self::Pdf => "pdf",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Tagged outcome of analyzing one document
///
/// A recognizer failure does not discard the pattern-based detections that
/// were already made; the batch layer uses the tag as the per-document error
/// marker while the detections remain usable.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectOutcome {
    /// Full pipeline ran; all detections present
    Complete(DetectionSet),
    /// Extracted text was empty or shorter than 3 characters
    TextEmpty,
    /// The name recognizer failed; pattern-based detections were kept
    Partial {
        /// Detections from the pattern pipeline (no person names)
        detections: DetectionSet,
        /// Reason reported by the recognizer
        recognizer_error: String,
    },
}

impl DetectOutcome {
    /// Collapse the outcome into its detection set, empty when no text was
    /// available
    pub fn into_detections(self) -> DetectionSet {
        match self {
            Self::Complete(set) => set,
            Self::TextEmpty => DetectionSet::default(),
            Self::Partial { detections, .. } => detections,
        }
    }

    /// Borrow the detection set, empty for [`DetectOutcome::TextEmpty`]
    pub fn detections(&self) -> Option<&DetectionSet> {
        match self {
            Self::Complete(set) => Some(set),
            Self::TextEmpty => None,
            Self::Partial { detections, .. } => Some(detections),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_set_preserves_insertion_order() {
        let mut set = DetectionSet::new();
        set.push(Detection::new(DataType::Email, "a@example.com", 0.9));
        set.push(Detection::new(DataType::Email, "b@example.com", 0.9));
        let values: Vec<_> = set.of(DataType::Email).iter().map(|d| &d.value).collect();
        assert_eq!(values, ["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_detection_confidence_clamped() {
        let d = Detection::new(DataType::Date, "01/01/2020", 1.5);
        assert_eq!(d.confidence, 1.0);
        let d = Detection::new(DataType::Date, "01/01/2020", -0.2);
        assert_eq!(d.confidence, 0.0);
    }

    #[test]
    fn test_file_category_from_path() {
        assert_eq!(FileCategory::from_path("a/b/report.TXT"), FileCategory::Text);
        assert_eq!(FileCategory::from_path("notes.docx"), FileCategory::Word);
        assert_eq!(FileCategory::from_path("data.xlsx"), FileCategory::Spreadsheet);
        assert_eq!(FileCategory::from_path("scan.pdf"), FileCategory::Pdf);
        assert_eq!(FileCategory::from_path("archive.zip"), FileCategory::Unknown);
        assert_eq!(FileCategory::from_path("no_extension"), FileCategory::Unknown);
    }

    #[test]
    fn test_outcome_into_detections() {
        let mut set = DetectionSet::new();
        set.push(Detection::new(DataType::Phone, "0612345678", 0.85));
        let outcome = DetectOutcome::Partial {
            detections: set.clone(),
            recognizer_error: "model unavailable".into(),
        };
        assert_eq!(outcome.into_detections(), set);
        assert!(DetectOutcome::TextEmpty.into_detections().is_empty());
    }

    #[test]
    fn test_serialized_type_labels() {
        let json = serde_json::to_string(&DataType::NationalId).unwrap();
        assert_eq!(json, "\"national_id\"");
    }
}
