//! Pattern extractors
//!
//! One compiled regular expression per data type, matching the lexical shape
//! of candidates in raw text. Extraction is deliberately permissive: the
//! structural validators decide what survives. Matches are reported in order
//! of appearance, one entry per occurrence, without deduplication.

use regex::Regex;
use std::sync::LazyLock;

/// Email addresses: alphanumeric-first local part, dotted domain labels,
/// alphabetic TLD of 2-63 characters.
pub(crate) static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[a-zA-Z0-9][a-zA-Z0-9._%+-]{0,63}@(?:[a-zA-Z0-9-]{1,63}\.){1,8}[a-zA-Z]{2,63}\b")
        .expect("email pattern")
});

/// French phone numbers: national form (0 + 9 digits) or international
/// `+33`/`0033` prefixes, optionally grouped in pairs by spaces, dots or
/// dashes, with the parenthesised retained trunk zero (`+33 (0)6 ...`).
pub(crate) static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\+|\b00)33[ .\-]?(?:\(0\)[ .\-]?)?[1-9](?:[ .\-]?\d{2}){4}\b|\b0[1-9](?:[ .\-]?\d{2}){4}\b",
    )
    .expect("phone pattern")
});

/// Dates in DD/MM/YYYY with `/`, `-` or `.` separators, years 1900-2099.
pub(crate) static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:0[1-9]|[12]\d|3[01])[/.\-](?:0[1-9]|1[012])[/.\-](?:19|20)\d{2}\b")
        .expect("date pattern")
});

/// French social security numbers (NIR): sex digit 1-3, year, month 01-12,
/// a day-like pair (calendar day or the even/odd unknown-day ranges), six
/// more digits, optional 2-digit control key.
pub(crate) static NATIONAL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b[123]\d{2}(?:0[1-9]|1[0-2])(?:0[1-9]|[12]\d|3[01]|[2468][02468]|[13579][13579])\d{6}(?:\d{2})?\b",
    )
    .expect("national id pattern")
});

/// SIRET business registration numbers: exactly 14 digits.
pub(crate) static BUSINESS_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{14}\b").expect("business id pattern"));

/// French postal addresses: house number, street tokens (accented letters
/// allowed), 5-digit postal code, optional locality.
pub(crate) static POSTAL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,4}[,\s]+[a-zA-ZÀ-ÿ'.\s\-]+[,\s]+\d{5}(?:\s+[a-zA-ZÀ-ÿ'.\s\-]+)?\b")
        .expect("postal address pattern")
});

/// IPv4 dotted quads with octet ranges enforced, and IPv6 in full or
/// `::`-compressed form. The validator remains the authority on
/// well-formedness; this pattern only locates candidates.
pub(crate) static IP_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\.){3}(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\b|(?:[0-9A-Fa-f]{1,4}:){7}[0-9A-Fa-f]{1,4}|(?:[0-9A-Fa-f]{1,4}:){1,6}(?::[0-9A-Fa-f]{1,4}){1,6}|(?:[0-9A-Fa-f]{1,4}:){1,7}:|::(?:[0-9A-Fa-f]{1,4}(?::[0-9A-Fa-f]{1,4}){0,6})?",
    )
    .expect("ip address pattern")
});

/// All matches of `re` in `text`, in order of appearance
pub(crate) fn find_all<'t>(re: &Regex, text: &'t str) -> Vec<&'t str> {
    re.find_iter(text).map(|m| m.as_str()).collect()
}
