// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;
use thiserror::Error;

/// Errors raised by a durable slot storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backend cannot be reached (e.g. a poisoned lock or closed connection).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    /// The backend reported a failure while reading or writing a slot.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Errors raised by the draft store.
///
/// A failed mutation leaves the in-memory collection untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The durable slot could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The collection could not be serialized.
    #[error("Failed to encode drafts: {0}")]
    Encoding(String),
}

/// Errors surfaced by a submission transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),
    /// No response arrived within the submission timeout.
    #[error("Submission timed out after {}ms", .after.as_millis())]
    Timeout {
        /// The timeout that elapsed.
        after: Duration,
    },
    /// The backend answered with a non-success status.
    #[error("Server rejected submission ({status}): {message}")]
    Rejected {
        /// The status code returned by the backend.
        status: u16,
        /// The backend's explanation, or the status text when it gave none.
        message: String,
    },
    /// The aggregated payload could not be encoded.
    #[error("Failed to encode submission: {0}")]
    Encoding(String),
}

/// Errors raised by the wizard controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// A mandatory step has no stored payload.
    #[error("Step '{step}' must be completed before submitting")]
    MissingStep {
        /// The key of the first unfinished mandatory step.
        step: &'static str,
    },
    /// The transport requires a credential and none is stored.
    #[error("No credential available; sign in before submitting")]
    MissingCredential,
    /// Navigation to an index outside the configured steps.
    #[error("Step index {index} is out of range for {step_count} steps")]
    StepOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of configured steps.
        step_count: usize,
    },
    /// A payload for a step the flow does not configure.
    #[error("Step '{step}' is not part of this wizard")]
    StepNotConfigured {
        /// The step key carried by the payload.
        step: &'static str,
    },
    /// Another caller holds the session while a submission is in flight.
    #[error("A submission is already in flight")]
    SubmissionInFlight,
    /// The credential slot could not be read.
    #[error("Credential storage failed: {0}")]
    Credentials(#[from] StorageError),
    /// The submission reached the transport and failed there.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl WizardError {
    /// Returns whether the error was detected before any network call.
    #[must_use]
    pub const fn is_local_precondition(&self) -> bool {
        matches!(self, Self::MissingStep { .. } | Self::MissingCredential)
    }

    /// Returns whether re-invoking the submission unchanged may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(TransportError::Network(_) | TransportError::Timeout { .. })
                | Self::SubmissionInFlight
        )
    }

    /// Returns whether the backend received and rejected the submission.
    #[must_use]
    pub const fn is_server_rejection(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Rejected { .. }))
    }
}
