// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use guardpost::{StorageError, StoreError, TransportError, WizardError};
use guardpost_domain::DomainError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from the domain and wizard errors and represent the
/// API contract. Each variant maps to one HTTP status in the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A payload or request field failed validation.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },
    /// A mandatory step has not been completed.
    #[error("Step '{step}' must be completed before submitting")]
    MissingStep {
        /// The wire name of the step.
        step: String,
    },
    /// The flow requires a bearer token and none is stored.
    #[error("No credential available; sign in before submitting")]
    MissingCredential,
    /// The upstream could not be reached or did not answer in time.
    #[error("Upstream unavailable: {message}")]
    UpstreamUnavailable {
        message: String,
        /// Whether the submission timeout elapsed.
        timed_out: bool,
    },
    /// The upstream answered with a non-success status.
    #[error("Upstream rejected the submission ({status}): {message}")]
    UpstreamRejected {
        /// The upstream status code.
        status: u16,
        /// The upstream's explanation.
        message: String,
    },
    /// A step, draft or other resource does not exist.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The kind of resource, e.g. `"Draft"`.
        resource_type: String,
        message: String,
    },
    /// The wizard is busy with another request.
    #[error("Conflict: {message}")]
    Conflict { message: String },
    /// Storage or encoding failed on this side.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// A stable machine-readable name for the error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::MissingStep { .. } => "missing_step",
            Self::MissingCredential => "missing_credential",
            Self::UpstreamUnavailable { .. } => "upstream_unavailable",
            Self::UpstreamRejected { .. } => "upstream_rejected",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal",
        }
    }

    /// Returns whether the same request may succeed if retried unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::Conflict { .. }
        )
    }
}

/// Translates a payload validation failure into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::MissingField { field }
        | DomainError::BelowMinimum { field, .. }
        | DomainError::InvalidNumber { field, .. } => ApiError::InvalidInput { field, message },
        DomainError::MissingFinanceEntry { description } => ApiError::InvalidInput {
            field: format!("finance.{description}"),
            message,
        },
        DomainError::EmptyBiometricCapture => ApiError::InvalidInput {
            field: String::from("biometric"),
            message,
        },
        DomainError::UnknownFinger(_) => ApiError::InvalidInput {
            field: String::from("finger"),
            message,
        },
    }
}

/// Translates a wizard failure into an API error.
#[must_use]
pub fn translate_wizard_error(err: WizardError) -> ApiError {
    match err {
        WizardError::MissingStep { step } => ApiError::MissingStep {
            step: step.to_string(),
        },
        WizardError::MissingCredential => ApiError::MissingCredential,
        WizardError::StepOutOfRange { .. } => ApiError::InvalidInput {
            field: String::from("index"),
            message: err.to_string(),
        },
        WizardError::StepNotConfigured { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Step"),
            message: err.to_string(),
        },
        WizardError::SubmissionInFlight => ApiError::Conflict {
            message: err.to_string(),
        },
        WizardError::Credentials(storage) => storage.into(),
        WizardError::Transport(transport) => translate_transport_error(transport),
    }
}

/// Translates a transport failure into an API error.
#[must_use]
pub fn translate_transport_error(err: TransportError) -> ApiError {
    match err {
        TransportError::Network(_) => ApiError::UpstreamUnavailable {
            message: err.to_string(),
            timed_out: false,
        },
        TransportError::Timeout { .. } => ApiError::UpstreamUnavailable {
            message: err.to_string(),
            timed_out: true,
        },
        TransportError::Rejected { status, message } => {
            ApiError::UpstreamRejected { status, message }
        }
        TransportError::Encoding(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}
