//! Confidence scorer
//!
//! Assigns the final confidence to every validated candidate. Most types
//! carry a fixed prior, lowered when the document is a template; person
//! names get a graded score built from word shape, in-document repetition,
//! honorifics, and the professional-context signal.

use crate::config::ExclusionConfig;
use crate::detection::context;
use regex::Regex;
use std::sync::LazyLock;

/// The most common written form of a national number: pairs separated by
/// single spaces after the leading 0
static COMMON_PHONE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[1-9](?: \d{2}){4}$").expect("common phone format"));

/// Characters that never appear in a human name
const NAME_DISALLOWED_SYMBOLS: [char; 16] = [
    '@', '#', '$', '%', '*', '+', '=', '_', '|', '<', '>', '{', '}', '[', ']', '^',
];

/// Honorific prefixes raising name confidence
const NAME_PREFIXES: [&str; 8] = [
    "m.",
    "mme",
    "dr",
    "prof",
    "monsieur",
    "madame",
    "docteur",
    "professeur",
];

/// Org vocabulary that should never sit inside a person name
const NAME_ORG_TERMS: [&str; 6] = [
    "service",
    "équipe",
    "groupe",
    "département",
    "direction",
    "pôle",
];

pub(crate) fn email_confidence(is_template: bool) -> f64 {
    if is_template {
        0.7
    } else {
        0.9
    }
}

/// Template documents take precedence over the common-format downgrade
pub(crate) fn phone_confidence(phone: &str, is_template: bool) -> f64 {
    if is_template {
        0.7
    } else if COMMON_PHONE_FORMAT.is_match(phone) {
        0.75
    } else {
        0.85
    }
}

/// Dates carry low sensitivity on their own
pub(crate) const DATE_CONFIDENCE: f64 = 0.5;

/// A structurally valid national id is always highly sensitive
pub(crate) const NATIONAL_ID_CONFIDENCE: f64 = 0.98;

pub(crate) const BUSINESS_ID_CONFIDENCE: f64 = 0.92;

pub(crate) fn postal_address_confidence(is_template: bool) -> f64 {
    if is_template {
        0.65
    } else {
        0.75
    }
}

/// Reserved/private ranges are most often lab or documentation values
pub(crate) fn ip_confidence(ip: &str) -> f64 {
    if ip.starts_with("127.")
        || ip.starts_with("192.168.")
        || ip.starts_with("10.")
        || ip.starts_with("172.")
    {
        0.75
    } else {
        0.85
    }
}

/// Score a person-name candidate against the document it came from
///
/// Returns `None` when the candidate is rejected outright (too short, a
/// known excluded name, an acronym, or malformed); otherwise the graded
/// confidence, clamped to [0, 1]. A raw score below 0.3 also rejects the
/// candidate before the acceptance threshold is even consulted.
pub fn person_name_score(name: &str, text: &str, config: &ExclusionConfig) -> Option<f64> {
    if name.chars().count() < 3 {
        return None;
    }

    let name_lower = name.to_lowercase();
    if config
        .excluded_persons
        .iter()
        .any(|excluded| name_lower.contains(excluded.to_lowercase().as_str()))
    {
        return None;
    }

    // Single short all-caps token: an acronym, not a name
    let words: Vec<&str> = name.split_whitespace().collect();
    let all_upper = name.chars().any(char::is_alphabetic)
        && name
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase);
    if all_upper && words.len() == 1 && name.chars().count() <= 5 {
        return None;
    }

    if name
        .chars()
        .any(|c| NAME_DISALLOWED_SYMBOLS.contains(&c) || c == '/' || c == '\\')
    {
        return None;
    }

    let mut confidence = 0.5;

    if words.len() < 2 {
        confidence -= 0.2;
    } else {
        confidence += 0.1;
    }

    let mut capital_words = 0;
    for word in &words {
        let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
        let has_digit = word.chars().any(|c| c.is_ascii_digit());
        if starts_upper && !has_digit {
            capital_words += 1;
            confidence += 0.05;
        } else {
            confidence -= 0.1;
        }
    }
    if capital_words < 2 && words.len() >= 2 {
        confidence -= 0.2;
    }

    // Frequent repetition reads as boilerplate, not a person
    let occurrences = text.to_lowercase().matches(name_lower.as_str()).count();
    if occurrences > 3 {
        confidence -= (occurrences as f64 * 0.05).min(0.5);
    }

    if NAME_PREFIXES
        .iter()
        .any(|prefix| name_lower.starts_with(prefix))
    {
        confidence += 0.15;
    }

    confidence -= context::professional_context_score(name, text, config);

    if NAME_ORG_TERMS.iter().any(|term| name_lower.contains(term)) {
        confidence -= 0.3;
    }

    if confidence < 0.3 {
        return None;
    }
    Some(confidence.clamp(0.0, 1.0))
}
