// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// A step payload that can check its own required fields.
///
/// Validation here is limited to presence and simple numeric bounds.
/// Format rules (identity card numbers, phone numbers, IBANs) belong to the
/// form that produces the payload and are not enforced.
pub trait Validate {
    /// Checks the payload.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    fn validate(&self) -> Result<(), DomainError>;
}

/// Opaque payloads are accepted as-is.
///
/// This lets a flow plug in a step whose schema is owned elsewhere.
impl Validate for serde_json::Value {
    fn validate(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

impl Validate for () {
    fn validate(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Requires a string field to contain something other than whitespace.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is blank.
pub fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Requires a count to be at least `minimum`.
///
/// # Errors
///
/// Returns `DomainError::BelowMinimum` if the value is too small.
pub fn require_at_least(field: &str, value: u32, minimum: u32) -> Result<(), DomainError> {
    if value < minimum {
        return Err(DomainError::BelowMinimum {
            field: field.to_string(),
            minimum: minimum.to_string(),
        });
    }
    Ok(())
}

/// Requires an amount to be finite and at least `minimum`.
///
/// # Errors
///
/// Returns `DomainError::BelowMinimum` if the value is too small or not finite.
pub fn require_amount(field: &str, value: f64, minimum: f64) -> Result<(), DomainError> {
    if !value.is_finite() || value < minimum {
        return Err(DomainError::BelowMinimum {
            field: field.to_string(),
            minimum: minimum.to_string(),
        });
    }
    Ok(())
}

/// Requires an optional string field, when present and non-blank, to parse as a number.
///
/// # Errors
///
/// Returns `DomainError::InvalidNumber` if the value does not parse.
pub fn require_numeric(field: &str, value: Option<&str>) -> Result<(), DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(()),
        Some(raw) if raw.parse::<f64>().is_ok() => Ok(()),
        Some(raw) => Err(DomainError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}
