use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::db::enums::Choices;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required.")]
    RequiredFieldMissing,

    #[error("Invalid phone")]
    InvalidPhone,

    #[error("Invalid state")]
    InvalidState,

    #[error("Invalid genres")]
    InvalidGenres,

    #[error("Invalid URL.")]
    InvalidUrl,

    #[error("Not a valid choice")]
    InvalidChoice,

    #[error("Not a valid datetime value")]
    InvalidDateTime,
}

lazy_static! {
    // Anchored at the start only: trailing characters after a valid number
    // are accepted.
    static ref PHONE_PATTERN: Regex =
        Regex::new(r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})")
            .expect("phone pattern compiles");
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_PATTERN.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

pub fn validate_state(state: &str, states: &Choices) -> Result<(), ValidationError> {
    if states.contains(state) {
        Ok(())
    } else {
        Err(ValidationError::InvalidState)
    }
}

/// Every submitted genre must be a known code. Emptiness is the required
/// rule's concern, not this one.
pub fn validate_genres<S: AsRef<str>>(
    genres: &[S],
    known: &Choices,
) -> Result<(), ValidationError> {
    if genres.iter().all(|genre| known.contains(genre.as_ref())) {
        Ok(())
    } else {
        Err(ValidationError::InvalidGenres)
    }
}

/// An absolute URL with a host that carries a top-level domain.
pub fn validate_url(link: &str) -> Result<(), ValidationError> {
    let url = Url::parse(link.trim()).map_err(|_| ValidationError::InvalidUrl)?;
    match url.host_str() {
        Some(host) if host.contains('.') && !host.ends_with('.') => Ok(()),
        _ => Err(ValidationError::InvalidUrl),
    }
}

/// Accepts RFC 3339, or a naive `YYYY-MM-DD HH:MM[:SS]` taken as UTC.
pub fn validate_datetime(value: &str) -> Result<DateTime<FixedOffset>, ValidationError> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed);
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive).into())
        .ok_or(ValidationError::InvalidDateTime)
}

pub fn validate_choice(value: &str, allowed: &[i32]) -> Result<i32, ValidationError> {
    value
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|id| allowed.contains(id))
        .ok_or(ValidationError::InvalidChoice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_valid_phone_formats() {
        assert_eq!(validate_phone("(415) 555-2671"), Ok(()));
        assert_eq!(validate_phone("415-555-2671"), Ok(()));
        assert_eq!(validate_phone("4155552671"), Ok(()));
        assert_eq!(validate_phone("415.555.2671"), Ok(()));
        assert_eq!(validate_phone("415 555 2671"), Ok(()));
    }

    #[test]
    fn test_invalid_phone_formats() {
        assert_eq!(validate_phone("555-26"), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_phone(""), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_phone("+1 415 555 2671"), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_phone("phone: 415-555-2671"), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn test_phone_accepts_trailing_characters() {
        // Prefix match only; this looseness is kept deliberately.
        assert_eq!(validate_phone("415-555-2671 ext. 12"), Ok(()));
        assert_eq!(validate_phone("4155552671garbage"), Ok(()));
    }

    #[test]
    fn test_validate_state() {
        let states = Choices::from_codes(["CA", "NY"]);
        assert_eq!(validate_state("CA", &states), Ok(()));
        assert_eq!(validate_state("ZZ", &states), Err(ValidationError::InvalidState));
        assert_eq!(validate_state("", &states), Err(ValidationError::InvalidState));
    }

    #[test]
    fn test_validate_genres() {
        let genres = Choices::from_codes(["Jazz", "Rock n Roll"]);
        assert_eq!(validate_genres(&["Jazz"], &genres), Ok(()));
        assert_eq!(validate_genres(&["Jazz", "Rock n Roll"], &genres), Ok(()));
        assert_eq!(
            validate_genres(&["Jazz", "Polka"], &genres),
            Err(ValidationError::InvalidGenres)
        );
    }

    #[test]
    fn test_validate_url() {
        assert_eq!(validate_url("https://www.facebook.com/TheMusicalHop"), Ok(()));
        assert_eq!(validate_url("http://example.org"), Ok(()));
        assert_eq!(validate_url(""), Err(ValidationError::InvalidUrl));
        assert_eq!(validate_url("facebook.com/page"), Err(ValidationError::InvalidUrl));
        assert_eq!(validate_url("http://localhost/page"), Err(ValidationError::InvalidUrl));
    }

    #[test]
    fn test_validate_datetime_formats() {
        let parsed = validate_datetime("2035-04-01 20:00:00").unwrap();
        assert_eq!(parsed.year(), 2035);
        assert_eq!(parsed.hour(), 20);
        assert_eq!(parsed.offset().local_minus_utc(), 0);

        assert!(validate_datetime("2035-04-01 20:00").is_ok());
        assert!(validate_datetime("2035-04-01T20:00").is_ok());

        let with_offset = validate_datetime("2035-04-01T20:00:00-07:00").unwrap();
        assert_eq!(with_offset.offset().local_minus_utc(), -7 * 3600);

        assert_eq!(
            validate_datetime("next friday"),
            Err(ValidationError::InvalidDateTime)
        );
    }

    #[test]
    fn test_validate_choice() {
        assert_eq!(validate_choice("2", &[1, 2, 3]), Ok(2));
        assert_eq!(validate_choice("9", &[1, 2, 3]), Err(ValidationError::InvalidChoice));
        assert_eq!(validate_choice("two", &[1, 2]), Err(ValidationError::InvalidChoice));
    }
}
