// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during step payload validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is empty or blank.
    MissingField {
        /// The field name, dotted for nested fields (e.g. `guarantor1.fullName`).
        field: String,
    },
    /// A numeric field is below its allowed minimum.
    BelowMinimum {
        /// The field name.
        field: String,
        /// The minimum accepted value, rendered for display.
        minimum: String,
    },
    /// A field that must hold a number does not parse as one.
    InvalidNumber {
        /// The field name.
        field: String,
        /// The rejected value.
        value: String,
    },
    /// The finance sheet has no entry for a requested guard.
    MissingFinanceEntry {
        /// The guard description the entry is keyed by.
        description: String,
    },
    /// No fingerprint has been captured.
    EmptyBiometricCapture,
    /// A finger label that is not a scanner position.
    UnknownFinger(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Field '{field}' is required"),
            Self::BelowMinimum { field, minimum } => {
                write!(f, "Field '{field}' must be at least {minimum}")
            }
            Self::InvalidNumber { field, value } => {
                write!(f, "Field '{field}' must be a number, got '{value}'")
            }
            Self::MissingFinanceEntry { description } => {
                write!(f, "No finance entry for requested guard '{description}'")
            }
            Self::EmptyBiometricCapture => {
                write!(f, "At least one fingerprint must be captured")
            }
            Self::UnknownFinger(label) => write!(f, "Unknown finger: {label}"),
        }
    }
}

impl std::error::Error for DomainError {}
