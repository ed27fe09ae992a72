//! Validation helpers
//!
//! Field checks shared by the intake forms and admin payloads. Each helper
//! returns a `validator::ValidationError` so it can be used from
//! `#[validate(custom = "...")]` or pushed into a `ValidationErrors` by hand.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::ValidationError;

lazy_static! {
    // Digits with the usual separators, optional international prefix.
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9\s\-()]+$").unwrap();
}

/// Minimum characters a phone number must have, separators included
pub const PHONE_MIN_LEN: usize = 10;
pub const PHONE_MAX_LEN: usize = 20;

/// Parse a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error.message = Some("must be a valid id".into());
        error
    })
}

/// Parse a `YYYY-MM-DD` date
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error.message = Some("must be a date in YYYY-MM-DD format".into());
        error
    })
}

/// The date must be today or later
pub fn validate_not_past(date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if date < today {
        let mut error = ValidationError::new("past_date");
        error.add_param("value".into(), &date.to_string());
        error.add_param("today".into(), &today.to_string());
        error.message = Some("must not be in the past".into());
        return Err(error);
    }
    Ok(())
}

/// `end` must not come before `start`
pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        let mut error = ValidationError::new("date_order");
        error.add_param("start".into(), &start.to_string());
        error.add_param("end".into(), &end.to_string());
        error.message = Some("must not be before the start date".into());
        return Err(error);
    }
    Ok(())
}

/// Permissive phone check: length bounds plus a digits-and-separators grammar
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < PHONE_MIN_LEN || len > PHONE_MAX_LEN || !PHONE_RE.is_match(trimmed) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        error.add_param("min".into(), &PHONE_MIN_LEN);
        error.message = Some("must be a valid phone number".into());
        return Err(error);
    }
    Ok(())
}

/// Non-negative decimal amount
pub fn validate_non_negative_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value.to_string());
        error.message = Some("must not be negative".into());
        return Err(error);
    }
    Ok(())
}

/// Every entry must be non-blank
pub fn validate_no_blank_entries(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        let mut error = ValidationError::new("blank_entry");
        error.message = Some("must not contain blank entries".into());
        return Err(error);
    }
    Ok(())
}

/// Trim a string, mapping blank to `None`
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("invalid-uuid").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("2026-01-05").unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
        );
        assert!(validate_date("2026/01/05").is_err());
        assert!(validate_date("05-01-2026").is_err());
    }

    #[test]
    fn test_validate_not_past() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(validate_not_past(today, today).is_ok());
        assert!(validate_not_past(today.succ_opt().unwrap(), today).is_ok());
        assert!(validate_not_past(today.pred_opt().unwrap(), today).is_err());
    }

    #[test]
    fn test_validate_date_order() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 8).unwrap();
        assert!(validate_date_order(start, end).is_ok());
        assert!(validate_date_order(start, start).is_ok());
        assert!(validate_date_order(end, start).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+880171234567").is_ok());
        assert!(validate_phone("01712-345678").is_ok());
        assert!(validate_phone("(017) 1234 5678").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me maybe").is_err());
        assert!(validate_phone("+880-17-abc-4567").is_err());
    }

    #[test]
    fn test_validate_non_negative_price() {
        assert!(validate_non_negative_price(&Decimal::new(3500, 0)).is_ok());
        assert!(validate_non_negative_price(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative_price(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Dhaka ".to_string())), Some("Dhaka".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
