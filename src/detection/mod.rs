//! Detection pipeline
//!
//! The [`DetectionEngine`] runs the per-document pipeline: pattern
//! extraction, structural validation, contextual classification, confidence
//! scoring, and threshold filtering. It is a pure function of the document
//! text, the exclusion configuration, and the recognizer handle: two runs
//! over the same inputs produce identical detection sets.

pub mod context;
pub mod ner;
mod patterns;
mod scorer;
pub mod validators;

use crate::config::ExclusionConfig;
use crate::domain::{DataType, DetectOutcome, Detection, DetectionSet};
use ner::{IgnoreList, RecognizerHandle};

/// Default cap on the text length fed to the name recognizer
const DEFAULT_RECOGNIZER_TEXT_CAP: usize = 100_000;

/// Per-document detection engine
///
/// Construction is cheap; the expensive recognizer initialization happens on
/// first use through the handle. The engine holds no per-document state and
/// is safe to share across threads for parallel scans.
pub struct DetectionEngine {
    exclusions: ExclusionConfig,
    recognizer: RecognizerHandle,
    ignore: IgnoreList,
    recognizer_text_cap: usize,
}

impl DetectionEngine {
    /// Create an engine over the given exclusion lists and recognizer handle
    pub fn new(exclusions: ExclusionConfig, recognizer: RecognizerHandle) -> Self {
        let ignore = IgnoreList::from_config(&exclusions);
        Self {
            exclusions,
            recognizer,
            ignore,
            recognizer_text_cap: DEFAULT_RECOGNIZER_TEXT_CAP,
        }
    }

    /// Override the recognizer text cap (characters)
    pub fn with_recognizer_text_cap(mut self, cap: usize) -> Self {
        self.recognizer_text_cap = cap;
        self
    }

    /// Analyze one document and return its detection set
    ///
    /// Convenience over [`detect_outcome`](Self::detect_outcome): partial
    /// results after a recognizer failure are kept, the failure itself is
    /// only logged.
    pub fn detect(&self, text: &str, source_hint: &str) -> DetectionSet {
        self.detect_outcome(text, source_hint).into_detections()
    }

    /// Analyze one document, reporting the tagged outcome
    ///
    /// `source_hint` (usually the file path) is used only for diagnostics,
    /// never for detection logic.
    pub fn detect_outcome(&self, text: &str, source_hint: &str) -> DetectOutcome {
        // Unreadable or near-empty extractions are a valid zero-detection
        // outcome, not an error.
        if text.chars().take(3).count() < 3 {
            return DetectOutcome::TextEmpty;
        }

        let text_lower = text.to_lowercase();
        let is_template = context::is_template_document(&text_lower, &self.exclusions);
        if is_template {
            tracing::info!(source = %source_hint, "Document reads as a template/example");
        }

        let mut set = DetectionSet::new();

        for candidate in patterns::find_all(&patterns::EMAIL, text) {
            if validators::validate_email(candidate, &self.exclusions.internal_domains) {
                self.accept(&mut set, DataType::Email, candidate, scorer::email_confidence(is_template));
            }
        }

        for candidate in patterns::find_all(&patterns::PHONE, text) {
            if validators::validate_phone(candidate) {
                self.accept(
                    &mut set,
                    DataType::Phone,
                    candidate,
                    scorer::phone_confidence(candidate, is_template),
                );
            }
        }

        for candidate in patterns::find_all(&patterns::DATE, text) {
            if validators::validate_date(candidate) {
                self.accept(&mut set, DataType::Date, candidate, scorer::DATE_CONFIDENCE);
            }
        }

        for candidate in patterns::find_all(&patterns::NATIONAL_ID, text) {
            if validators::validate_nir(candidate) {
                self.accept(
                    &mut set,
                    DataType::NationalId,
                    candidate,
                    scorer::NATIONAL_ID_CONFIDENCE,
                );
            }
        }

        for candidate in patterns::find_all(&patterns::BUSINESS_ID, text) {
            if validators::validate_siret(candidate) {
                self.accept(
                    &mut set,
                    DataType::BusinessId,
                    candidate,
                    scorer::BUSINESS_ID_CONFIDENCE,
                );
            }
        }

        for candidate in patterns::find_all(&patterns::POSTAL_ADDRESS, text) {
            if validators::validate_postal_address(candidate) {
                self.accept(
                    &mut set,
                    DataType::PostalAddress,
                    candidate,
                    scorer::postal_address_confidence(is_template),
                );
            }
        }

        for candidate in patterns::find_all(&patterns::IP_ADDRESS, text) {
            if validators::validate_ip_address(candidate) {
                self.accept(
                    &mut set,
                    DataType::IpAddress,
                    candidate,
                    scorer::ip_confidence(candidate),
                );
            }
        }

        // A recognizer failure must not cost the document its pattern-based
        // detections; the person-name bucket simply stays empty.
        let recognizer_error = match self.detect_names(text, &mut set) {
            Ok(()) => None,
            Err(reason) => {
                tracing::error!(
                    source = %source_hint,
                    error = %reason,
                    "Name recognition failed; keeping pattern detections"
                );
                Some(reason)
            }
        };

        tracing::debug!(
            source = %source_hint,
            detections = set.total(),
            template = is_template,
            "Document analyzed"
        );

        match recognizer_error {
            None => DetectOutcome::Complete(set),
            Some(recognizer_error) => DetectOutcome::Partial {
                detections: set,
                recognizer_error,
            },
        }
    }

    /// Run the recognizer and score its candidates into `set`
    fn detect_names(&self, text: &str, set: &mut DetectionSet) -> Result<(), String> {
        let recognizer = self.recognizer.recognizer()?;
        let capped = cap_chars(text, self.recognizer_text_cap);
        let candidates = recognizer.person_names(capped).map_err(|e| e.to_string())?;

        for candidate in candidates {
            let name = candidate.trim();
            if name.is_empty() || self.ignore.is_ignored(name) {
                continue;
            }
            let confidence = match scorer::person_name_score(name, text, &self.exclusions) {
                Some(confidence) => confidence,
                None => continue,
            };
            if context::is_organizational_name(text, name, &self.exclusions) {
                continue;
            }
            self.accept(set, DataType::PersonName, name, confidence);
        }
        Ok(())
    }

    /// Keep a detection only when it reaches its type's acceptance threshold
    fn accept(&self, set: &mut DetectionSet, data_type: DataType, value: &str, confidence: f64) {
        if confidence >= data_type.acceptance_threshold() {
            set.push(Detection::new(data_type, value, confidence));
        }
    }
}

/// First `cap` characters of `text`, bounding the recognizer cost on
/// pathologically large documents
fn cap_chars(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ner::{NameRecognizer, NoopRecognizer};
    use std::sync::Arc;

    struct FixedRecognizer(Vec<String>);

    impl NameRecognizer for FixedRecognizer {
        fn person_names(&self, _text: &str) -> anyhow::Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FailingRecognizer;

    impl NameRecognizer for FailingRecognizer {
        fn person_names(&self, _text: &str) -> anyhow::Result<Vec<String>> {
            anyhow::bail!("inference backend unavailable")
        }
    }

    fn engine_without_names() -> DetectionEngine {
        DetectionEngine::new(
            ExclusionConfig::default(),
            RecognizerHandle::from_recognizer(Arc::new(NoopRecognizer)),
        )
    }

    fn engine_with_names(names: &[&str]) -> DetectionEngine {
        DetectionEngine::new(
            ExclusionConfig::default(),
            RecognizerHandle::from_recognizer(Arc::new(FixedRecognizer(
                names.iter().map(|n| n.to_string()).collect(),
            ))),
        )
    }

    #[test]
    fn test_empty_text_is_a_zero_detection_outcome() {
        let engine = engine_without_names();
        assert_eq!(engine.detect_outcome("", "empty.txt"), DetectOutcome::TextEmpty);
        assert_eq!(engine.detect_outcome("ab", "tiny.txt"), DetectOutcome::TextEmpty);
    }

    #[test]
    fn test_regex_detection_with_validation() {
        let engine = engine_without_names();
        let set = engine.detect(
            "Contact : jean.dupont@example.com, tel 0612345678, SIRET 73282932000074.",
            "note.txt",
        );
        assert_eq!(set.of(DataType::Email).len(), 1);
        assert_eq!(set.of(DataType::Phone).len(), 1);
        assert_eq!(set.of(DataType::BusinessId).len(), 1);
        assert_eq!(set.of(DataType::Email)[0].value, "jean.dupont@example.com");
    }

    #[test]
    fn test_luhn_invalid_siret_dropped_silently() {
        let engine = engine_without_names();
        let set = engine.detect("SIRET 73282932000073 en attente.", "note.txt");
        assert!(set.of(DataType::BusinessId).is_empty());
    }

    #[test]
    fn test_internal_domain_email_not_reported() {
        let engine = engine_without_names();
        let set = engine.detect("Écrire à support@acme.fr ou client@example.com.", "mail.txt");
        let values: Vec<_> = set.of(DataType::Email).iter().map(|d| &d.value).collect();
        assert_eq!(values, ["client@example.com"]);
    }

    #[test]
    fn test_recognizer_failure_keeps_pattern_detections() {
        let engine = DetectionEngine::new(
            ExclusionConfig::default(),
            RecognizerHandle::from_recognizer(Arc::new(FailingRecognizer)),
        );
        let outcome = engine.detect_outcome("Appelez le 0612345678 demain.", "doc.txt");
        match outcome {
            DetectOutcome::Partial {
                detections,
                recognizer_error,
            } => {
                assert_eq!(detections.of(DataType::Phone).len(), 1);
                assert!(recognizer_error.contains("unavailable"));
            }
            other => panic!("expected partial outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_person_name_accepted_in_personal_context() {
        let engine = engine_with_names(&["Amélie Rousseau"]);
        let text = "Courrier envoyé par Amélie Rousseau pour sa demande de logement.";
        let set = engine.detect(text, "courrier.txt");
        let names: Vec<_> = set.of(DataType::PersonName).iter().map(|d| &d.value).collect();
        assert_eq!(names, ["Amélie Rousseau"]);
    }

    #[test]
    fn test_org_adjacent_name_rejected() {
        let engine = engine_with_names(&["Marie Martin"]);
        let text = "Document rédigé par Marie Martin, responsable du service RH.";
        let set = engine.detect(text, "rapport.txt");
        assert!(set.of(DataType::PersonName).is_empty());
    }

    #[test]
    fn test_ignore_list_prefilters_placeholders() {
        let engine = engine_with_names(&["John Doe", "Monsieur X"]);
        let set = engine.detect("Exemple signé John Doe et Monsieur X.", "modele.txt");
        assert!(set.of(DataType::PersonName).is_empty());
    }

    #[test]
    fn test_template_lowers_postal_address_below_threshold() {
        let engine = engine_without_names();
        // a template document scores postal addresses 0.65, under the 0.7
        // acceptance threshold, so the address disappears entirely
        let template = "Exemple de courrier : 12 rue de la Paix, 75002 Paris";
        let set = engine.detect(template, "modele.txt");
        assert!(set.of(DataType::PostalAddress).is_empty());

        let real = "Courrier : 12 rue de la Paix, 75002 Paris";
        let set = engine.detect(real, "courrier.txt");
        assert_eq!(set.of(DataType::PostalAddress).len(), 1);
    }

    #[test]
    fn test_detect_is_deterministic() {
        let engine = engine_with_names(&["Amélie Rousseau"]);
        let text = "Amélie Rousseau, amelie@example.com, 06 12 34 56 78, le 01/02/2021.";
        let first = engine.detect(text, "a.txt");
        let second = engine.detect(text, "a.txt");
        assert_eq!(first, second);
    }

    #[test]
    fn test_cap_chars_respects_boundaries() {
        let text = "ééééé";
        assert_eq!(cap_chars(text, 2), "éé");
        assert_eq!(cap_chars(text, 10), text);
    }
}
