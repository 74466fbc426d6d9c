//! Field validators for contact input.
//!
//! Every validator is a pure function over a raw string: it either returns the
//! normalized value or a [`ValidationError`]. None of them touch the address book,
//! so the same functions serve creation, in-place editing and record loading.
//!
//! - Names are trimmed and title-cased.
//! - Phone numbers must be Italian mobile numbers (`3xx xxx xxxx`, optionally
//!   prefixed with `+39`) and are canonicalized to `+39` followed by digits only.
//! - Email is optional: an empty value means "no email".

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Country code prepended to every canonical phone number.
pub const PHONE_PREFIX: &str = "+39";

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+39\s?)?3[0-9]{2}\s?[0-9]{3}\s?[0-9]{4}$").expect("valid phone pattern")
});

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.]+@(?:\w+\.)+\w{2,3}$").expect("valid email pattern"));

/// Trims and title-cases a first or last name.
///
/// ```
/// use contactbook::validators::validate_name;
///
/// assert_eq!(validate_name("  newton  ").unwrap(), "Newton");
/// assert_eq!(validate_name("leonardo da vinci").unwrap(), "Leonardo Da Vinci");
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingRequiredField("name"));
    }
    Ok(title_case(trimmed))
}

/// Validates a phone number and returns its canonical form (`+39` + digits).
///
/// ```
/// use contactbook::validators::validate_phone_number;
///
/// assert_eq!(validate_phone_number("344 555 4466").unwrap(), "+393445554466");
/// assert_eq!(validate_phone_number("+39 344 555 4466").unwrap(), "+393445554466");
/// assert!(validate_phone_number("34423").is_err());
/// ```
pub fn validate_phone_number(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingRequiredField("phone"));
    }

    if !PHONE_PATTERN.is_match(trimmed) {
        return Err(ValidationError::InvalidPhone(trimmed.to_string()));
    }

    let digits: String = trimmed
        .strip_prefix(PHONE_PREFIX)
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    Ok(format!("{}{}", PHONE_PREFIX, digits))
}

/// Validates an optional email address.
///
/// Returns `Ok(None)` for empty input; a valid address is returned unchanged
/// (no case folding).
pub fn validate_email(raw: &str) -> Result<Option<String>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    if !EMAIL_PATTERN.is_match(raw) {
        return Err(ValidationError::InvalidEmail(raw.to_string()));
    }

    Ok(Some(raw.to_string()))
}

/// Uppercases the first character and lowercases the rest.
///
/// When the first character uppercases to several (`ß` → `SS`), only the
/// first of those stays uppercase, so capitalizing twice changes nothing.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut upper = first.to_uppercase();
    let mut out = String::with_capacity(word.len());
    out.extend(upper.next());
    out.extend(upper.flat_map(char::to_lowercase));
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}
