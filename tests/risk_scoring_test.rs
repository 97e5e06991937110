//! Integration tests for risk aggregation over detection sets

use veille::domain::{DataType, Detection, DetectionSet, FileCategory};
use veille::risk::{score_risk, FileRiskRecord, RiskTier};

fn set_of(detections: &[(DataType, f64)]) -> DetectionSet {
    let mut set = DetectionSet::new();
    for (i, &(data_type, confidence)) in detections.iter().enumerate() {
        set.push(Detection::new(data_type, format!("value-{i}"), confidence));
    }
    set
}

#[test]
fn test_risk_boundary_twenty_is_medium_not_high() {
    let set = set_of(&[
        (DataType::NationalId, 1.0),
        (DataType::Email, 1.0),
        (DataType::Phone, 1.0),
    ]);
    let record = FileRiskRecord::compute("dossier.txt", FileCategory::Text, &set);
    assert!((record.total - 20.0).abs() < 1e-9);
    assert_eq!(record.tier(), Some(RiskTier::Medium));

    let report = score_risk(vec![("dossier.txt", set, FileCategory::Text)]);
    assert!(report.high_risk_files.is_empty());
    assert_eq!(report.medium_risk_files.len(), 1);
}

#[test]
fn test_national_id_dominates_risk_weighting() {
    let with_nir = set_of(&[(DataType::NationalId, 0.98)]);
    let with_email = set_of(&[(DataType::Email, 0.9)]);

    let nir_record = FileRiskRecord::compute("a.txt", FileCategory::Text, &with_nir);
    let email_record = FileRiskRecord::compute("b.txt", FileCategory::Text, &with_email);
    assert!(nir_record.total > email_record.total);
}

#[test]
fn test_zero_risk_files_belong_to_no_tier() {
    let report = score_risk(vec![
        ("vide.txt", DetectionSet::new(), FileCategory::Text),
        (
            "dates.txt",
            set_of(&[(DataType::Date, 0.5)]),
            FileCategory::Text,
        ),
    ]);
    assert_eq!(report.total_analyzed, 2);
    assert!(report.high_risk_files.is_empty());
    assert!(report.medium_risk_files.is_empty());
    assert!(report.low_risk_files.is_empty());
    assert!(report.risky_extensions.is_empty());
}

#[test]
fn test_tier_lists_are_sorted_by_descending_score() {
    let light = set_of(&[(DataType::BusinessId, 0.92)]);
    let medium = set_of(&[(DataType::NationalId, 1.0), (DataType::Email, 0.8)]);
    let heavy = set_of(&[
        (DataType::NationalId, 1.0),
        (DataType::Email, 1.0),
        (DataType::Phone, 1.0),
        (DataType::PersonName, 1.0),
    ]);

    let report = score_risk(vec![
        ("light.txt", light, FileCategory::Text),
        ("medium.txt", medium, FileCategory::Text),
        ("heavy.txt", heavy, FileCategory::Text),
    ]);

    assert_eq!(report.high_risk_files.len(), 1);
    assert_eq!(report.high_risk_files[0].source, "heavy.txt");
    assert_eq!(report.medium_risk_files.len(), 1);
    assert_eq!(report.low_risk_files.len(), 1);
    assert_eq!(report.low_risk_files[0].source, "light.txt");
}

#[test]
fn test_extension_frequency_sorted_descending() {
    let risky = set_of(&[(DataType::Email, 0.9)]);
    let report = score_risk(vec![
        ("a.txt", risky.clone(), FileCategory::Text),
        ("b.txt", risky.clone(), FileCategory::Text),
        ("c.txt", risky.clone(), FileCategory::Text),
        ("d.xlsx", risky.clone(), FileCategory::Spreadsheet),
        ("clean.pdf", DetectionSet::new(), FileCategory::Pdf),
    ]);

    assert_eq!(
        report.risky_extensions,
        vec![(".txt".to_string(), 3), (".xlsx".to_string(), 1)]
    );
}

#[test]
fn test_mean_confidence_not_sum_drives_subscores() {
    // three low-confidence emails must not outscore one high-confidence one
    let many_low = set_of(&[
        (DataType::Email, 0.7),
        (DataType::Email, 0.7),
        (DataType::Email, 0.7),
    ]);
    let one_high = set_of(&[(DataType::Email, 0.9)]);

    let low_record = FileRiskRecord::compute("low.txt", FileCategory::Text, &many_low);
    let high_record = FileRiskRecord::compute("high.txt", FileCategory::Text, &one_high);
    assert!(low_record.total < high_record.total);
}

#[test]
fn test_report_serializes_to_json() {
    let report = score_risk(vec![(
        "dossier.txt",
        set_of(&[(DataType::NationalId, 0.98)]),
        FileCategory::Text,
    )]);
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("national_id"));
    assert!(json.contains("dossier.txt"));
}
