//! Submission and query parameter validation.
//!
//! Checks run in a fixed order and the first failure wins: presence of both
//! fields, then the numeric range of the rating.

use serde_json::Value;
use starboard_core::error::DomainError;
use starboard_core::rating::RatingValue;

/// Message returned when the subject or the rating is missing.
pub const FIELDS_REQUIRED: &str = "Service provider ID and rating are required";

/// Message returned when the rating is not an integer in `1..=5`.
pub const RATING_OUT_OF_RANGE: &str = "Rating must be a number between 1 and 5";

/// Message returned by the internal average endpoint for a missing subject.
pub const SUBJECT_REQUIRED: &str = "Service provider ID is required";

/// Message returned by the public endpoints for a missing subject.
pub const PUBLIC_SUBJECT_REQUIRED: &str = "serviceProviderId parameter is required";

/// Validates a raw submission and returns the subject and rating value.
///
/// # Errors
///
/// Returns `DomainError::Validation` with [`FIELDS_REQUIRED`] when either
/// field is missing or falsy, or with [`RATING_OUT_OF_RANGE`] when the rating
/// is not an integral number between 1 and 5.
pub fn validate_submission(
    service_provider_id: Option<&str>,
    rating: Option<&Value>,
) -> Result<(String, RatingValue), DomainError> {
    let subject_id = service_provider_id.filter(|id| !id.is_empty());
    let rating = rating.filter(|value| is_truthy(value));

    let (Some(subject_id), Some(rating)) = (subject_id, rating) else {
        return Err(DomainError::Validation(FIELDS_REQUIRED.to_owned()));
    };

    let value = integral_number(rating)
        .and_then(|n| RatingValue::new(n).ok())
        .ok_or_else(|| DomainError::Validation(RATING_OUT_OF_RANGE.to_owned()))?;

    Ok((subject_id.to_owned(), value))
}

/// Returns the subject id if present and non-empty.
///
/// # Errors
///
/// Returns `DomainError::Validation` carrying `message` otherwise.
pub fn require_subject_id<'a>(
    service_provider_id: Option<&'a str>,
    message: &str,
) -> Result<&'a str, DomainError> {
    service_provider_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| DomainError::Validation(message.to_owned()))
}

/// Reads a subject id from a raw JSON field.
///
/// Strings are used as is. Truthy numbers and `true` are stringified, so an
/// id sent as `42` is stored as `"42"`. Falsy values, arrays and objects count
/// as absent.
#[must_use]
pub fn subject_from_json(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        scalar @ (Value::Number(_) | Value::Bool(_)) if is_truthy(scalar) => {
            Some(scalar.to_string())
        }
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Integer value of a JSON number, accepting floats with no fractional part.
fn integral_number(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && (-1e15..=1e15).contains(&f) {
        #[allow(clippy::cast_possible_truncation)]
        let i = f as i64;
        Some(i)
    } else {
        None
    }
}
