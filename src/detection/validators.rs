//! Structural validators
//!
//! One pure validation function per data type. Extractors locate candidates;
//! these functions decide whether a candidate is structurally plausible
//! (checksums, calendar rules, normal forms). A failed validation silently
//! drops the candidate, it is not an error.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9][^@]*@[^@]+\.[^@]+$").expect("email shape"));

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{5}\b").expect("postal code shape"));

static STREET_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,4}\s*,?\s+[\w\s'\-]+").expect("street shape"));

static IPV4_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\.){3}(?:25[0-5]|2[0-4]\d|[01]?\d\d?)$")
        .expect("ipv4 shape")
});

/// Validate an email candidate
///
/// Enforces the RFC length cap, a `local@domain.tld` shape with an
/// alphanumeric first character, and rejects addresses whose domain belongs
/// to the organization itself (`internal_domains`).
pub fn validate_email(email: &str, internal_domains: &[String]) -> bool {
    if email.is_empty() || email.len() > 254 {
        return false;
    }
    if !EMAIL_SHAPE.is_match(email) {
        return false;
    }

    let domain = match email.rsplit_once('@') {
        Some((_, domain)) => domain.to_lowercase(),
        None => return false,
    };
    !internal_domains.iter().any(|d| {
        let d = d.to_lowercase();
        domain == d || domain.ends_with(&format!(".{d}"))
    })
}

/// Validate a French phone number
///
/// Strips formatting punctuation, then accepts the 10-digit national form
/// and the `+33`/`0033` international forms, including the variants where
/// the trunk zero is retained after the country code.
pub fn validate_phone(phone: &str) -> bool {
    let cleaned: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-' | '_' | '(' | ')'))
        .collect();

    if let Some(rest) = cleaned.strip_prefix("+33") {
        national_without_trunk(rest) || national_with_trunk(rest)
    } else if let Some(rest) = cleaned.strip_prefix("0033") {
        national_without_trunk(rest) || national_with_trunk(rest)
    } else {
        national_with_trunk(&cleaned)
    }
}

/// 10-digit national form: leading 0, then a nonzero first digit
fn national_with_trunk(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    digits.len() == 10
        && bytes[0] == b'0'
        && (b'1'..=b'9').contains(&bytes[1])
        && digits.chars().all(|c| c.is_ascii_digit())
}

/// 9-digit form with the trunk zero dropped
fn national_without_trunk(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    digits.len() == 9
        && (b'1'..=b'9').contains(&bytes[0])
        && digits.chars().all(|c| c.is_ascii_digit())
}

/// Validate a DD/MM/YYYY date, separators `/`, `-` or `.`
///
/// Months 1-12, years 1900-2025, day bounded by the month length with the
/// Gregorian leap-year rule.
pub fn validate_date(date: &str) -> bool {
    let parts: Vec<&str> = date.split(['/', '-', '.']).collect();
    if parts.len() != 3 {
        return false;
    }
    let (day, month, year) = match (
        parts[0].parse::<u32>(),
        parts[1].parse::<u32>(),
        parts[2].parse::<i32>(),
    ) {
        (Ok(d), Ok(m), Ok(y)) => (d, m, y),
        _ => return false,
    };

    if !(1..=12).contains(&month) || !(1900..=2025).contains(&year) {
        return false;
    }

    let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
    let days_in_month = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => unreachable!(),
    };
    (1..=days_in_month).contains(&day)
}

/// Validate a French social security number (NIR)
///
/// A 15-digit number is a 13-digit body plus a 2-digit control key, which
/// must equal `97 - (body mod 97)`. A bare 13-digit number carries no key
/// and is accepted as-is; this is deliberately permissive, the key simply
/// cannot be verified.
pub fn validate_nir(nir: &str) -> bool {
    if !nir.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if !matches!(nir.as_bytes().first(), Some(b'1' | b'2' | b'3')) {
        return false;
    }

    match nir.len() {
        13 => true,
        15 => {
            let body: u64 = match nir[..13].parse() {
                Ok(n) => n,
                Err(_) => return false,
            };
            let key: u64 = match nir[13..].parse() {
                Ok(k) => k,
                Err(_) => return false,
            };
            key == 97 - (body % 97)
        }
        _ => false,
    }
}

/// Validate a SIRET number: exactly 14 digits passing the Luhn check
pub fn validate_siret(siret: &str) -> bool {
    siret.len() == 14 && siret.chars().all(|c| c.is_ascii_digit()) && luhn_check(siret)
}

/// Luhn mod-10 checksum over a digit string
///
/// Doubles every second digit from the right, subtracting 9 when the double
/// exceeds 9; valid when the total is a multiple of 10.
pub(crate) fn luhn_check(digits: &str) -> bool {
    let digits: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 2 {
        return false;
    }
    let mut sum = 0u32;
    for (i, &d) in digits.iter().rev().enumerate() {
        let mut val = d;
        if i % 2 == 1 {
            val *= 2;
            if val > 9 {
                val -= 9;
            }
        }
        sum += val;
    }
    sum % 10 == 0
}

/// Validate a French postal address
///
/// Requires a 5-digit postal code, a 1-4 digit house number followed by
/// street tokens, and at least two words in the pre-comma street segment
/// (number plus at least one street word).
pub fn validate_postal_address(address: &str) -> bool {
    let address = address.trim();
    if address.is_empty() {
        return false;
    }
    if !POSTAL_CODE.is_match(address) {
        return false;
    }

    let street = match STREET_SHAPE.find(address) {
        Some(m) => m.as_str(),
        None => return false,
    };
    let before_comma = street.split(',').next().unwrap_or("").trim();
    before_comma.split_whitespace().count() >= 2
}

/// Validate an IPv4 or IPv6 address
pub fn validate_ip_address(ip: &str) -> bool {
    let ip = ip.trim();
    if ip.is_empty() {
        return false;
    }
    IPV4_SHAPE.is_match(ip) || is_valid_ipv6(ip)
}

/// IPv6 well-formedness: eight 1-4 hex digit groups, or a single `::`
/// compression with fewer groups. The bare `::` is not accepted.
fn is_valid_ipv6(ip: &str) -> bool {
    fn groups_ok(part: &str) -> Option<usize> {
        if part.is_empty() {
            return Some(0);
        }
        let groups: Vec<&str> = part.split(':').collect();
        for g in &groups {
            if g.is_empty() || g.len() > 4 || !g.chars().all(|c| c.is_ascii_hexdigit()) {
                return None;
            }
        }
        Some(groups.len())
    }

    let mut halves = ip.splitn(2, "::");
    let head = halves.next().unwrap_or("");
    match halves.next() {
        Some(tail) => {
            // a second "::" is malformed
            if tail.contains("::") {
                return false;
            }
            match (groups_ok(head), groups_ok(tail)) {
                (Some(h), Some(t)) => h + t >= 1 && h + t <= 7,
                _ => false,
            }
        }
        None => matches!(groups_ok(ip), Some(8)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn no_domains() -> Vec<String> {
        Vec::new()
    }

    fn acme_domains() -> Vec<String> {
        vec!["acme.fr".to_string(), "acme.com".to_string()]
    }

    #[test_case("test@example.com", true; "plain address")]
    #[test_case("user.name+tag@example.co.uk", true; "plus tag and multi label")]
    #[test_case("x@y.z", true; "minimal")]
    #[test_case("", false; "empty")]
    #[test_case("test@example", false; "no tld")]
    #[test_case("test.example.com", false; "no at sign")]
    #[test_case("@example.com", false; "no local part")]
    fn test_validate_email(email: &str, expected: bool) {
        assert_eq!(validate_email(email, &no_domains()), expected);
    }

    #[test]
    fn test_validate_email_rejects_internal_domains() {
        assert!(!validate_email("jean@acme.fr", &acme_domains()));
        assert!(!validate_email("jean@mail.acme.com", &acme_domains()));
        assert!(validate_email("jean@example.com", &acme_domains()));
    }

    #[test]
    fn test_validate_email_length_cap() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(!validate_email(&long, &no_domains()));
    }

    #[test_case("0612345678", true; "canonical mobile")]
    #[test_case("06 12 34 56 78", true; "space separated")]
    #[test_case("06.12.34.56.78", true; "dot separated")]
    #[test_case("06-12-34-56-78", true; "dash separated")]
    #[test_case("0512345678", true; "landline")]
    #[test_case("+33612345678", true; "international")]
    #[test_case("+33 6 12 34 56 78", true; "international spaced")]
    #[test_case("+33 (0)6 12 34 56 78", true; "retained trunk zero")]
    #[test_case("0033612345678", true; "double zero prefix")]
    #[test_case("00330612345678", true; "double zero with trunk")]
    #[test_case("", false; "empty")]
    #[test_case("061234567", false; "too short")]
    #[test_case("06123456789", false; "too long")]
    #[test_case("abc1234567", false; "letters")]
    #[test_case("0012345678", false; "zero first digit")]
    fn test_validate_phone(phone: &str, expected: bool) {
        assert_eq!(validate_phone(phone), expected);
    }

    #[test_case("01/01/2020", true; "plain date")]
    #[test_case("31/12/2020", true; "end of year")]
    #[test_case("29/02/2020", true; "leap year")]
    #[test_case("29/02/2000", true; "leap century")]
    #[test_case("01-01-2020", true; "dash separator")]
    #[test_case("31.12.2020", true; "dot separator")]
    #[test_case("", false; "empty")]
    #[test_case("32/01/2020", false; "day overflow")]
    #[test_case("29/02/2021", false; "not a leap year")]
    #[test_case("29/02/1900", false; "century non leap")]
    #[test_case("01/13/2020", false; "month overflow")]
    #[test_case("01/01/1800", false; "year too old")]
    #[test_case("01/01/2026", false; "year too recent")]
    fn test_validate_date(date: &str, expected: bool) {
        assert_eq!(validate_date(date), expected);
    }

    #[test]
    fn test_validate_nir_with_key() {
        // 97 - (1850775123456 mod 97) == 8
        assert!(validate_nir("185077512345608"));
        assert!(!validate_nir("185077512345609"));
    }

    #[test]
    fn test_validate_nir_without_key_is_permissive() {
        assert!(validate_nir("1850775123456"));
        assert!(validate_nir("2950712345678"));
    }

    #[test_case("", false; "empty")]
    #[test_case("12345", false; "too short")]
    #[test_case("485077512345608", false; "bad sex digit")]
    #[test_case("18507751234560", false; "fourteen digits")]
    #[test_case("18507751234A608", false; "letter inside")]
    fn test_validate_nir_rejects(nir: &str, expected: bool) {
        assert_eq!(validate_nir(nir), expected);
    }

    #[test]
    fn test_validate_siret() {
        assert!(validate_siret("73282932000074"));
        assert!(validate_siret("35600000000048"));
        // decrementing the last digit breaks the Luhn key
        assert!(!validate_siret("73282932000073"));
        assert!(!validate_siret(""));
        assert!(!validate_siret("1234567890"));
        assert!(!validate_siret("12345678901234567"));
    }

    #[test_case("12 Rue de la Paix, 75002", true; "number street postal code")]
    #[test_case("12 Rue de la Paix, 75002 Paris", true; "with locality")]
    #[test_case("1 Avenue des Champs-Élysées, 75008 Paris", true; "accented street")]
    #[test_case("42 Boulevard Haussmann, 75009 PARIS", true; "uppercase locality")]
    #[test_case("8 place du Commerce 44000 Nantes", true; "no comma")]
    #[test_case("", false; "empty")]
    #[test_case("Rue de la Paix", false; "no number no postal code")]
    #[test_case("12, 75001", false; "no street name")]
    #[test_case("42, Boulevard Haussmann - 75009 PARIS", false; "comma directly after number")]
    #[test_case("12 Rue de la Paix, 750", false; "short postal code")]
    fn test_validate_postal_address(address: &str, expected: bool) {
        assert_eq!(validate_postal_address(address), expected);
    }

    #[test_case("192.168.1.1", true; "private v4")]
    #[test_case("127.0.0.1", true; "loopback")]
    #[test_case("8.8.8.8", true; "public v4")]
    #[test_case("255.255.255.255", true; "broadcast")]
    #[test_case("2001:0db8:85a3:0000:0000:8a2e:0370:7334", true; "full v6")]
    #[test_case("fe80::1", true; "compressed v6")]
    #[test_case("::1", true; "loopback v6")]
    #[test_case("2001:db8::", true; "trailing compression")]
    #[test_case("", false; "empty")]
    #[test_case("192.168.1", false; "incomplete v4")]
    #[test_case("192.168.1.300", false; "octet overflow")]
    #[test_case("2001:0db8:gggg::1", false; "bad hex")]
    #[test_case("::", false; "bare compression")]
    #[test_case("1::2::3", false; "double compression")]
    #[test_case("1:2:3:4:5:6:7", false; "seven groups")]
    fn test_validate_ip_address(ip: &str, expected: bool) {
        assert_eq!(validate_ip_address(ip), expected);
    }

    #[test]
    fn test_luhn_check() {
        assert!(luhn_check("73282932000074"));
        assert!(!luhn_check("73282932000075"));
        assert!(!luhn_check("7"));
    }
}
