//! Option validators.
//!
//! Each validator turns a raw string (from the config file or the command
//! line) into a typed [`OptionValue`] or fails with [`ValidationError`].
//! The typed parsers are generic so they can be composed into the
//! per-option validators referenced by the schema.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use super::resolved::minutes;
use super::schema::{Channel, OptionValue};

/// A raw value was rejected by its validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// Signature shared by every option validator.
pub type Validator = fn(&str) -> Result<OptionValue, ValidationError>;

/// Parse a number of type `T`.
pub fn number<T>(raw: &str) -> Result<T, ValidationError>
where
    T: FromStr,
    T::Err: Display,
{
    let trimmed = raw.trim();
    trimmed
        .parse::<T>()
        .map_err(|e| ValidationError::new(format!("'{}' is not a valid number ({})", trimmed, e)))
}

/// Reject zero and negative values. Never clamps.
pub fn positive<T>(value: T) -> Result<T, ValidationError>
where
    T: PartialOrd + Default + Display,
{
    if value > T::default() {
        Ok(value)
    } else {
        Err(ValidationError::new(format!("{} must be greater than zero", value)))
    }
}

/// Split a comma-separated list and require every token to be in `allowed`.
///
/// Tokens are trimmed; order and duplicates from the input are kept.
pub fn vocabulary_set(raw: &str, allowed: &[&str]) -> Result<Vec<String>, ValidationError> {
    raw.split(',')
        .map(str::trim)
        .map(|token| {
            if allowed.contains(&token) {
                Ok(token.to_string())
            } else {
                Err(ValidationError::new(format!(
                    "'{}' is not one of: {}",
                    token,
                    allowed.join(",")
                )))
            }
        })
        .collect()
}

/// Positive number of minutes that lasts at least one millisecond.
pub fn positive_minutes(raw: &str) -> Result<OptionValue, ValidationError> {
    let value: f64 = number(raw)?;
    if !value.is_finite() {
        return Err(ValidationError::new(format!("{} is not a finite number", value)));
    }
    let value = positive(value)?;
    if minutes(value).is_zero() {
        return Err(ValidationError::new(format!(
            "{} minutes is shorter than a millisecond",
            value
        )));
    }
    Ok(OptionValue::Float(value))
}

/// Positive integer value.
pub fn positive_integer(raw: &str) -> Result<OptionValue, ValidationError> {
    let value: i64 = number(raw)?;
    let value = positive(value)?;
    u32::try_from(value)
        .map(OptionValue::Integer)
        .map_err(|_| ValidationError::new(format!("{} is too large", value)))
}

/// Notification channel list restricted to [`Channel::NAMES`].
pub fn channel_set(raw: &str) -> Result<OptionValue, ValidationError> {
    let tokens = vocabulary_set(raw, &Channel::NAMES)?;
    tokens
        .iter()
        .map(|t| t.parse::<Channel>())
        .collect::<Result<Vec<_>, _>>()
        .map(OptionValue::Channels)
}

/// Optional filesystem path; an empty value means "none".
pub fn optional_path(raw: &str) -> Result<OptionValue, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(OptionValue::Path(None))
    } else {
        Ok(OptionValue::Path(Some(PathBuf::from(trimmed))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_minutes_accepts_fractions() {
        assert_eq!(positive_minutes("0.5").unwrap(), OptionValue::Float(0.5));
        assert_eq!(positive_minutes(" 25 ").unwrap(), OptionValue::Float(25.0));
    }

    #[test]
    fn test_positive_minutes_rejects_zero_and_negative() {
        assert!(positive_minutes("0").is_err());
        assert!(positive_minutes("-1.5").is_err());
    }

    #[test]
    fn test_positive_minutes_rejects_garbage() {
        let err = positive_minutes("soon").unwrap_err();
        assert!(err.reason().contains("soon"));
        assert!(positive_minutes("inf").is_err());
        assert!(positive_minutes("NaN").is_err());
    }

    #[test]
    fn test_positive_minutes_rejects_sub_millisecond() {
        let err = positive_minutes("0.000001").unwrap_err();
        assert!(err.reason().contains("shorter than a millisecond"));
        assert!(positive_minutes("0").is_err());
        assert_eq!(positive_minutes("0.5").unwrap(), OptionValue::Float(0.5));
        // 0.00001 minutes is 0.6 ms, which rounds up to 1 ms
        assert_eq!(positive_minutes("0.00001").unwrap(), OptionValue::Float(0.00001));
    }

    #[test]
    fn test_positive_integer() {
        assert_eq!(positive_integer("4").unwrap(), OptionValue::Integer(4));
        assert!(positive_integer("0").is_err());
        assert!(positive_integer("-2").is_err());
        assert!(positive_integer("2.5").is_err());
    }

    #[test]
    fn test_positive_does_not_clamp() {
        let err = positive(-3i64).unwrap_err();
        assert_eq!(err.reason(), "-3 must be greater than zero");
    }

    #[test]
    fn test_vocabulary_set_preserves_order_and_duplicates() {
        let allowed = ["a", "b", "c"];
        assert_eq!(
            vocabulary_set("c, a ,c", &allowed).unwrap(),
            vec!["c".to_string(), "a".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_vocabulary_set_rejects_unknown_and_empty_tokens() {
        let allowed = ["a", "b"];
        assert!(vocabulary_set("a,z", &allowed).is_err());
        assert!(vocabulary_set("a,,b", &allowed).is_err());
        assert!(vocabulary_set("", &allowed).is_err());
    }

    #[test]
    fn test_channel_set() {
        assert_eq!(
            channel_set("console,desktop").unwrap(),
            OptionValue::Channels(vec![Channel::Console, Channel::Desktop])
        );
        let err = channel_set("console,bogus").unwrap_err();
        assert!(err.reason().contains("bogus"));
    }

    #[test]
    fn test_optional_path() {
        assert_eq!(optional_path("").unwrap(), OptionValue::Path(None));
        assert_eq!(optional_path("   ").unwrap(), OptionValue::Path(None));
        assert_eq!(
            optional_path(" /tmp/brring.wav ").unwrap(),
            OptionValue::Path(Some(PathBuf::from("/tmp/brring.wav")))
        );
    }
}
