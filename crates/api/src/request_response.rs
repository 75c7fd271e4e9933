// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use guardpost::{Draft, DraftId};

/// One configured step as shown to the UI.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StepInfo {
    /// The step's wire name.
    pub key: String,
    /// Whether submission waits for this step.
    pub mandatory: bool,
    /// Whether the step has stored data.
    pub completed: bool,
}

/// API response describing where a wizard stands.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WizardStateResponse {
    /// The flow name.
    pub flow: String,
    /// `editing`, `submitting`, `submitted` or `failed`.
    pub phase: String,
    /// The index of the step being shown.
    pub current_step_index: usize,
    /// The wire name of the step being shown.
    pub current_step: String,
    /// Every configured step, in order.
    pub steps: Vec<StepInfo>,
}

/// API response after a step is completed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StepCompletedResponse {
    /// Whether completing the step submitted the wizard.
    pub submitted: bool,
    /// The wizard state after the step.
    pub state: WizardStateResponse,
    /// The upstream receipt, when the wizard was submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<SubmissionResponse>,
}

/// The payload stored for one step, used to prefill a revisited form.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredPayloadResponse {
    /// The step's wire name.
    pub step: String,
    /// The stored payload, tagged with its step, or `null` when the step
    /// has not been completed.
    pub payload: Option<serde_json::Value>,
}

/// API request to jump to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GoToStepRequest {
    /// The target step index.
    pub index: usize,
}

/// API response for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmissionResponse {
    /// The upstream reference, if one was returned.
    pub reference: Option<String>,
    /// A success message.
    pub message: String,
}

/// API request to store the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoreTokenRequest {
    /// The opaque token issued by the identity provider.
    pub token: String,
}

/// API response listing the drafts.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DraftListResponse<T> {
    /// The drafts, in insertion order.
    pub records: Vec<Draft<T>>,
    /// The draft being edited, if any.
    pub editing_id: Option<DraftId>,
}

/// API response for a newly added draft.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DraftCreatedResponse {
    /// The identifier assigned by the store.
    pub id: DraftId,
}

/// API request to mark a draft as being edited, or to clear the mark.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetEditingRequest {
    pub id: Option<DraftId>,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    /// A stable machine-readable error name.
    pub error: String,
    /// A human-readable description.
    pub message: String,
}
