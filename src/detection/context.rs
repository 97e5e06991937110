//! Contextual classifier
//!
//! Decides whether a name candidate refers to the organization rather than a
//! person, scores the professional context around a name, and flags template
//! documents. All heuristics work on case-folded text with character-bounded
//! windows around candidate occurrences.

use crate::config::ExclusionConfig;

/// Vocabulary that marks a candidate string itself as an org structure
const ORG_NAME_INDICATORS: [&str; 7] = [
    "service",
    "département",
    "direction",
    "pôle",
    "équipe",
    "groupe",
    "unité",
];

/// Role vocabulary looked up in the windows around each occurrence
const ROLE_CONTEXT: [&str; 22] = [
    "directeur",
    "directrice",
    "responsable",
    "chef",
    "technicien",
    "informatique",
    "référent",
    "chargé de",
    "service",
    "département",
    "pôle",
    "l'équipe",
    "signature",
    "contact",
    "coordonnées",
    "adjoint",
    "administratif",
    "conseiller",
    "manager",
    "gestion",
    "gestionnaire",
    "assistant",
];

/// Honorific titles
const HONORIFIC_TITLES: [&str; 9] = [
    "m.",
    "mme.",
    "mr.",
    "dr.",
    "monsieur",
    "madame",
    "docteur",
    "prof.",
    "professeur",
];

/// Phrases that, immediately after a name, assign it a role
const ROLE_ASSIGNMENT_LEADS: [&str; 5] = ["est", "a été nommé", "occupe", "en charge", ":"];

/// Whether the document text reads as a template/example rather than real
/// data
///
/// `text_lower` must already be case-folded; the flag is computed once per
/// document and lowers confidence for every detection type.
pub(crate) fn is_template_document(text_lower: &str, config: &ExclusionConfig) -> bool {
    config
        .template_indicators
        .iter()
        .any(|term| text_lower.contains(term.to_lowercase().as_str()))
}

/// Whether a name candidate most likely refers to the organization
///
/// Combines signals from the candidate string itself (known units, acronym
/// casing, org vocabulary) with the ±50-character windows around each of its
/// occurrences in the document (role vocabulary, formal-address patterns,
/// role-assignment phrases).
pub fn is_organizational_name(text: &str, candidate: &str, config: &ExclusionConfig) -> bool {
    let text_lower = text.to_lowercase();
    let candidate_lower = candidate.to_lowercase();

    if config
        .organization_units
        .iter()
        .any(|unit| candidate_lower.contains(unit.to_lowercase().as_str()))
    {
        return true;
    }

    // Short all-caps phrases are acronyms (IBM, DRH, ...)
    let has_letters = candidate.chars().any(char::is_alphabetic);
    if has_letters
        && candidate
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
        && candidate.split_whitespace().count() <= 2
    {
        return true;
    }

    if ORG_NAME_INDICATORS
        .iter()
        .any(|term| candidate_lower.contains(term))
    {
        return true;
    }

    let windows = occurrence_windows(&text_lower, &candidate_lower, 50);
    if windows.is_empty() {
        return false;
    }

    let role_hits = windows
        .iter()
        .filter(|w| ROLE_CONTEXT.iter().any(|term| w.contains(term)))
        .count();
    if role_hits as f64 >= windows.len() as f64 / 2.0 {
        return true;
    }

    let official_patterns = [
        format!("m. {candidate_lower}"),
        format!("mr {candidate_lower}"),
        format!("mme {candidate_lower}"),
        format!("monsieur {candidate_lower}"),
        format!("madame {candidate_lower}"),
        format!("{candidate_lower}, directeur"),
        format!("{candidate_lower}, responsable"),
        format!("{candidate_lower} (directeur"),
        format!("{candidate_lower} (responsable"),
        format!("{candidate_lower} - directeur"),
        format!("{candidate_lower} - responsable"),
    ];
    if official_patterns.iter().any(|p| text_lower.contains(p)) {
        return true;
    }

    for window in &windows {
        if let Some(pos) = window.find(candidate_lower.as_str()) {
            let after = window[pos + candidate_lower.len()..].trim_start();
            if ROLE_ASSIGNMENT_LEADS
                .iter()
                .any(|lead| after.starts_with(lead))
            {
                return true;
            }
        }
    }

    false
}

/// Score how professional the context around a name's first occurrence is
///
/// Examines a ±100-character window around the first occurrence and
/// accumulates: +0.15 per professional-context term, +0.10 per honorific
/// title, +0.20 per template indicator found in the window. Capped at 1.0;
/// the caller subtracts this from the name's confidence.
pub fn professional_context_score(name: &str, text: &str, config: &ExclusionConfig) -> f64 {
    let text_lower = text.to_lowercase();
    let name_lower = name.to_lowercase();

    let pos = match text_lower.find(name_lower.as_str()) {
        Some(pos) => pos,
        None => return 0.0,
    };
    let window = window_around(&text_lower, pos, pos + name_lower.len(), 100);

    let mut score: f64 = 0.0;
    for term in &config.professional_context {
        if window.contains(term.to_lowercase().as_str()) {
            score += 0.15;
        }
    }
    for title in HONORIFIC_TITLES {
        if window.contains(title) {
            score += 0.10;
        }
    }
    for indicator in &config.template_indicators {
        if window.contains(indicator.to_lowercase().as_str()) {
            score += 0.20;
        }
    }

    score.min(1.0)
}

/// Windows of ±`margin` bytes (clamped to char boundaries) around every
/// occurrence of `needle` in `haystack`
///
/// Occurrences are found with a one-character step so overlapping repeats
/// are all seen.
fn occurrence_windows<'a>(haystack: &'a str, needle: &str, margin: usize) -> Vec<&'a str> {
    if needle.is_empty() {
        return Vec::new();
    }
    let mut windows = Vec::new();
    let mut from = 0;
    while let Some(rel) = haystack[from..].find(needle) {
        let idx = from + rel;
        windows.push(window_around(haystack, idx, idx + needle.len(), margin));
        from = ceil_boundary(haystack, idx + 1);
        if from >= haystack.len() {
            break;
        }
    }
    windows
}

/// Slice `[start - margin, end + margin]` clamped to char boundaries
fn window_around(text: &str, start: usize, end: usize, margin: usize) -> &str {
    let lo = floor_boundary(text, start.saturating_sub(margin));
    let hi = ceil_boundary(text, (end + margin).min(text.len()));
    &text[lo..hi]
}

fn floor_boundary(text: &str, mut i: usize) -> usize {
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_boundary(text: &str, mut i: usize) -> usize {
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    i.min(text.len())
}
