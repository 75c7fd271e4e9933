// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The boundary between a wizard and the backend that receives its
//! aggregated submission.

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::TransportError;

/// An opaque bearer credential.
///
/// `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

/// One submission handed to a transport.
#[derive(Debug)]
pub struct SubmissionRequest<'a, S> {
    /// The flow name, which transports use to pick an endpoint.
    pub flow: &'static str,
    /// The aggregated payload.
    pub payload: &'a S,
    /// The credential to present, when the flow requires one.
    pub credential: Option<&'a BearerToken>,
}

/// What the backend returned for an accepted submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// A backend-assigned reference, if it returned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// A human-readable confirmation, if it returned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Sends an aggregated submission to a backend.
///
/// The controller bounds every call with its own timeout and treats a
/// dropped future as a failed submission, so implementations need not.
pub trait SubmissionTransport: Send + Sync {
    /// Delivers one submission.
    fn submit<S>(
        &self,
        request: SubmissionRequest<'_, S>,
    ) -> impl Future<Output = Result<SubmissionReceipt, TransportError>> + Send
    where
        S: Serialize + Sync;
}
