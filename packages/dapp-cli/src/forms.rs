//! Form validation shared by the hotel and auction commands
//!
//! A form checks every field before anything is sent and reports all
//! failing fields at once, the way the web forms showed one message per
//! input.

use alloy::primitives::{Address, U256};
use crosslayer_rs::units::parse_token_amount;
use std::fmt;
use thiserror::Error;

/// A single invalid input
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every invalid input of one form submission
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub struct FormError {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid input")?;
        for error in &self.errors {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

impl FormError {
    /// The error reported for `field`, if any
    pub fn field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

/// Collects field results while a form is validated
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the error of a failed field and keep going
    pub fn check<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    /// Produce the validated value, or every recorded error.
    ///
    /// `build` only runs when all fields passed.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, FormError> {
        if !self.errors.is_empty() {
            return Err(FormError {
                errors: self.errors,
            });
        }
        build().ok_or_else(|| FormError { errors: Vec::new() })
    }
}

pub fn parse_address(field: &'static str, raw: &str) -> Result<Address, FieldError> {
    raw.trim()
        .parse()
        .map_err(|_| FieldError::new(field, format!("\"{}\" is not a valid address", raw)))
}

/// Decimal token amount that must be greater than zero
pub fn parse_positive_amount(
    field: &'static str,
    raw: &str,
    decimals: u8,
) -> Result<U256, FieldError> {
    let amount = parse_token_amount(raw, decimals)
        .map_err(|_| FieldError::new(field, format!("\"{}\" is not a valid amount", raw)))?;
    if amount.is_zero() {
        return Err(FieldError::new(field, "must be greater than 0"));
    }
    Ok(amount)
}

pub fn in_range<T>(field: &'static str, value: T, min: T, max: T) -> Result<T, FieldError>
where
    T: PartialOrd + fmt::Display + Copy,
{
    if value < min || value > max {
        return Err(FieldError::new(
            field,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(value)
}

pub fn non_empty(field: &'static str, raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(field, "is required"));
    }
    Ok(trimmed.to_string())
}

/// Strict `true` / `false`
pub fn parse_bool(field: &'static str, raw: &str) -> Result<bool, FieldError> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(FieldError::new(
            field,
            format!("expected \"true\" or \"false\", got \"{}\"", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_collects_every_error() {
        let mut v = Validator::new();
        let a = v.check(in_range("rating", 7u8, 1, 5));
        let b = v.check(non_empty("comment", "  "));
        let c = v.check(in_range("nights", 3u32, 1, 100));
        assert!(a.is_none() && b.is_none());
        assert_eq!(c, Some(3));

        let err = v.finish(|| Some(())).unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.field("rating").unwrap().message, "must be between 1 and 5");
        assert_eq!(err.field("comment").unwrap().message, "is required");
        assert!(err.field("nights").is_none());
        assert_eq!(
            err.to_string(),
            "invalid input\n  rating: must be between 1 and 5\n  comment: is required"
        );
    }

    #[test]
    fn test_positive_amount() {
        assert_eq!(
            parse_positive_amount("price", "0.5", 18).unwrap(),
            U256::from(500_000_000_000_000_000u128)
        );
        assert_eq!(
            parse_positive_amount("price", "0", 18).unwrap_err().message,
            "must be greater than 0"
        );
        assert!(parse_positive_amount("price", "-3", 18).is_err());
        assert!(parse_positive_amount("price", "ten", 18).is_err());
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(
            parse_address("beneficiary", "0x1111111111111111111111111111111111111111").unwrap(),
            Address::repeat_byte(0x11)
        );
        let err = parse_address("beneficiary", "0x1234").unwrap_err();
        assert_eq!(err.field, "beneficiary");
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("available", "true").unwrap());
        assert!(!parse_bool("available", " false ").unwrap());
        assert!(parse_bool("available", "yes").is_err());
        assert!(parse_bool("available", "TRUE").is_err());
    }
}
