//! IBAN and BIC validation
//!
//! IBANs are checked structurally and with the ISO 13616 Mod-97 checksum.
//! BICs have no checksum, only the ISO 9362 structural pattern:
//!
//! ```text
//! AAAA BB CC (DDD)
//! bank country location (branch)
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Shortest IBAN issued by any country (Norway)
pub const IBAN_MIN_LEN: usize = 15;

/// Longest IBAN allowed by ISO 13616
pub const IBAN_MAX_LEN: usize = 34;

const MOD97: u32 = 97;

static BIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{6}[A-Z0-9]{2}([A-Z0-9]{3})?$").expect("BIC pattern is a valid regex")
});

/// True iff `bic` is an 8 or 11 character BIC.
pub fn validate_bic(bic: &str) -> bool {
    BIC_PATTERN.is_match(bic)
}

/// Length, country prefix and character set checks shared by both IBAN checks.
fn has_iban_shape(iban: &str) -> bool {
    let len = iban.len();
    if !(IBAN_MIN_LEN..=IBAN_MAX_LEN).contains(&len) {
        return false;
    }
    if !iban.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    iban.chars().take(2).all(|c| c.is_ascii_uppercase())
}

/// Structural IBAN check without the checksum: bounds, alphabetic country
/// code and two numeric check digits.
pub fn is_well_formed_iban(iban: &str) -> bool {
    has_iban_shape(iban) && iban[2..4].chars().all(|c| c.is_ascii_digit())
}

/// Full IBAN check including Mod-97.
pub fn is_valid_iban(iban: &str) -> bool {
    if !has_iban_shape(iban) {
        return false;
    }

    // Move the country code and check digits to the end
    let rearranged = iban[4..].chars().chain(iban[..4].chars());

    // Expand letters to 10..=35 and fold into the remainder digit by digit,
    // so the (up to 68 digit) number never has to be materialised
    let mut remainder = 0u32;
    for c in rearranged {
        let Some(value) = c.to_digit(36) else {
            return false;
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % MOD97
        } else {
            (remainder * 10 + value) % MOD97
        };
    }

    remainder == 1
}

/// Groups of four separated by a space, last group variable length.
///
/// Separators in the input are dropped first, so already formatted or messy
/// input comes out in the canonical paper form:
/// `GB29NWBK60161331926819` → `GB29 NWBK 6016 1331 9268 19`.
pub fn format_readable(iban: &str) -> String {
    strip_non_alphanumeric(iban)
        .chars()
        .collect::<Vec<char>>()
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<String>>()
        .join(" ")
}

/// Removes everything that is not a letter or a digit.
pub fn strip_non_alphanumeric(input: &str) -> String {
    input.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Strips user-entered punctuation and whitespace.
///
/// The checksum result is advisory: the cleaned value is returned whether or
/// not it validates. Use [`is_valid_iban`] on the result to decide.
pub fn clean(iban: &str) -> String {
    let cleaned = strip_non_alphanumeric(iban);
    if !is_valid_iban(&cleaned) {
        tracing::debug!(iban = %cleaned, "cleaned IBAN does not pass Mod-97");
    }
    cleaned
}
