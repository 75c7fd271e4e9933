// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations on wizards, drafts and the session token.
//!
//! Every operation takes the object it acts on by reference; locking and
//! sharing are the server's concern.

use guardpost::{
    BearerToken, CredentialSource, Draft, DraftBacking, DraftId, DraftStore, SlotCredentials,
    SlotStorage, StepKey, StepOutcome, SubmissionReceipt, SubmissionTransport, Wizard,
    WizardFlow, WizardSession,
};
use guardpost_domain::Validate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{ApiError, translate_domain_error, translate_wizard_error};
use crate::flows::{CheckedFlow, parse_step};
use crate::request_response::{
    DraftCreatedResponse, DraftListResponse, GoToStepRequest, SetEditingRequest, StepInfo,
    StepCompletedResponse, StoreTokenRequest, StoredPayloadResponse, SubmissionResponse,
    WizardStateResponse,
};

/// Describes where a wizard stands.
pub fn wizard_state<F, T, B, C>(wizard: &Wizard<F, T, B, C>) -> WizardStateResponse
where
    F: WizardFlow,
    T: SubmissionTransport,
    B: DraftBacking<Snapshot = F::Snapshot>,
    C: CredentialSource,
{
    let session: &WizardSession<F> = wizard.session();
    let steps: Vec<StepInfo> = F::steps()
        .iter()
        .map(|step| StepInfo {
            key: step.as_str().to_string(),
            mandatory: F::is_mandatory(*step),
            completed: session.stored(*step).is_some(),
        })
        .collect();

    WizardStateResponse {
        flow: F::NAME.to_string(),
        phase: wizard.phase().as_str().to_string(),
        current_step_index: wizard.current_step_index(),
        current_step: wizard.current_step().as_str().to_string(),
        steps,
    }
}

/// Validates and completes one step.
///
/// Completing the last step submits the wizard.
///
/// # Arguments
///
/// * `wizard` - The wizard to advance
/// * `payload` - The step's data, tagged with its step
///
/// # Errors
///
/// Returns an error if:
/// - The payload fails validation (nothing is stored)
/// - The step is not part of the flow
/// - A mandatory step or the credential is missing at submission
/// - The upstream rejects or cannot be reached
pub async fn complete_step<F, T, B, C>(
    wizard: &mut Wizard<F, T, B, C>,
    payload: F::Payload,
) -> Result<StepCompletedResponse, ApiError>
where
    F: CheckedFlow,
    T: SubmissionTransport,
    B: DraftBacking<Snapshot = F::Snapshot>,
    C: CredentialSource,
{
    {
        let snapshot: F::Snapshot = wizard.backing().snapshot();
        F::check(&payload, &snapshot).map_err(translate_domain_error)?;
    }

    let outcome: StepOutcome = wizard
        .complete_step(payload)
        .await
        .map_err(translate_wizard_error)?;

    let receipt: Option<SubmissionResponse> = match outcome {
        StepOutcome::Advanced { index } => {
            debug!(flow = F::NAME, index, "Step accepted");
            None
        }
        StepOutcome::Submitted(receipt) => Some(submission_response(F::NAME, receipt)),
    };

    Ok(StepCompletedResponse {
        submitted: receipt.is_some(),
        state: wizard_state(wizard),
        receipt,
    })
}

/// Returns the payload stored for a step, to prefill its form.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the flow has no step called
/// `step_name`.
pub fn stored_payload<F, T, B, C>(
    wizard: &Wizard<F, T, B, C>,
    step_name: &str,
) -> Result<StoredPayloadResponse, ApiError>
where
    F: CheckedFlow,
    T: SubmissionTransport,
    B: DraftBacking<Snapshot = F::Snapshot>,
    C: CredentialSource,
{
    let step: F::Step = parse_step::<F>(step_name).ok_or_else(|| ApiError::ResourceNotFound {
        resource_type: String::from("Step"),
        message: format!("Flow '{}' has no step '{step_name}'", F::NAME),
    })?;

    let payload: Option<serde_json::Value> = wizard
        .stored_payload(step)
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to encode stored payload: {e}"),
        })?;

    Ok(StoredPayloadResponse {
        step: step.as_str().to_string(),
        payload,
    })
}

/// Jumps to any configured step.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the index is out of range.
pub fn go_to_step<F, T, B, C>(
    wizard: &mut Wizard<F, T, B, C>,
    request: GoToStepRequest,
) -> Result<WizardStateResponse, ApiError>
where
    F: WizardFlow,
    T: SubmissionTransport,
    B: DraftBacking<Snapshot = F::Snapshot>,
    C: CredentialSource,
{
    wizard
        .go_to_step(request.index)
        .map_err(translate_wizard_error)?;
    Ok(wizard_state(wizard))
}

/// Moves one step back, staying at the first step.
pub fn go_back<F, T, B, C>(wizard: &mut Wizard<F, T, B, C>) -> WizardStateResponse
where
    F: WizardFlow,
    T: SubmissionTransport,
    B: DraftBacking<Snapshot = F::Snapshot>,
    C: CredentialSource,
{
    wizard.go_back();
    wizard_state(wizard)
}

/// Re-submits the stored data after a failed attempt.
///
/// # Errors
///
/// Returns the same errors as [`complete_step`] at submission.
pub async fn submit<F, T, B, C>(
    wizard: &mut Wizard<F, T, B, C>,
) -> Result<SubmissionResponse, ApiError>
where
    F: WizardFlow,
    T: SubmissionTransport,
    B: DraftBacking<Snapshot = F::Snapshot>,
    C: CredentialSource,
{
    let receipt: SubmissionReceipt = wizard.submit().await.map_err(translate_wizard_error)?;
    Ok(submission_response(F::NAME, receipt))
}

/// Abandons the wizard run. Drafts are kept.
pub fn cancel<F, T, B, C>(wizard: &mut Wizard<F, T, B, C>) -> WizardStateResponse
where
    F: WizardFlow,
    T: SubmissionTransport,
    B: DraftBacking<Snapshot = F::Snapshot>,
    C: CredentialSource,
{
    wizard.cancel();
    wizard_state(wizard)
}

fn submission_response(flow: &str, receipt: SubmissionReceipt) -> SubmissionResponse {
    info!(flow, reference = ?receipt.reference, "Submission completed");
    SubmissionResponse {
        reference: receipt.reference,
        message: receipt
            .message
            .unwrap_or_else(|| String::from("Submitted successfully")),
    }
}

/// Lists the drafts and the editing mark.
pub fn list_drafts<T, S>(store: &DraftStore<T, S>) -> DraftListResponse<T>
where
    T: Clone + Serialize + DeserializeOwned,
    S: SlotStorage,
{
    DraftListResponse {
        records: store.snapshot(),
        editing_id: store.editing_target().cloned(),
    }
}

/// Validates and appends a draft.
///
/// # Errors
///
/// Returns an error if the record fails validation or cannot be persisted.
pub fn add_draft<T, S>(
    store: &mut DraftStore<T, S>,
    record: T,
) -> Result<DraftCreatedResponse, ApiError>
where
    T: Clone + Serialize + DeserializeOwned + Validate,
    S: SlotStorage,
{
    record.validate().map_err(translate_domain_error)?;
    let id: DraftId = store.add(record)?;
    Ok(DraftCreatedResponse { id })
}

/// Replaces a draft in place and clears the editing mark.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no draft has `id`, leaving the
/// store untouched; otherwise validation and persistence errors.
pub fn update_draft<T, S>(
    store: &mut DraftStore<T, S>,
    id: DraftId,
    record: T,
) -> Result<DraftListResponse<T>, ApiError>
where
    T: Clone + Serialize + DeserializeOwned + Validate,
    S: SlotStorage,
{
    record.validate().map_err(translate_domain_error)?;
    if store.get(&id).is_none() {
        return Err(draft_not_found(&id));
    }
    store.update(Draft { id, record })?;
    Ok(list_drafts(store))
}

/// Removes a draft.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no draft has `id`.
pub fn delete_draft<T, S>(
    store: &mut DraftStore<T, S>,
    id: &DraftId,
) -> Result<DraftListResponse<T>, ApiError>
where
    T: Clone + Serialize + DeserializeOwned,
    S: SlotStorage,
{
    if !store.delete(id)? {
        return Err(draft_not_found(id));
    }
    Ok(list_drafts(store))
}

/// Marks a draft as being edited, or clears the mark.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the target is not a draft.
pub fn set_editing<T, S>(
    store: &mut DraftStore<T, S>,
    request: SetEditingRequest,
) -> Result<DraftListResponse<T>, ApiError>
where
    T: Clone + Serialize + DeserializeOwned,
    S: SlotStorage,
{
    if let Some(id) = &request.id
        && store.get(id).is_none()
    {
        return Err(draft_not_found(id));
    }
    store.set_editing_target(request.id)?;
    Ok(list_drafts(store))
}

/// Clears every draft and the editing mark.
///
/// # Errors
///
/// Returns an error if the slot cannot be removed.
pub fn reset_drafts<T, S>(store: &mut DraftStore<T, S>) -> Result<DraftListResponse<T>, ApiError>
where
    T: Clone + Serialize + DeserializeOwned,
    S: SlotStorage,
{
    store.reset()?;
    Ok(list_drafts(store))
}

fn draft_not_found(id: &DraftId) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Draft"),
        message: format!("No draft with id '{id}'"),
    }
}

/// Stores the bearer token presented at submission.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a blank token, or an internal
/// error if the slot cannot be written.
pub fn store_token<S: SlotStorage>(
    credentials: &mut SlotCredentials<S>,
    request: StoreTokenRequest,
) -> Result<(), ApiError> {
    if request.token.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("token"),
            message: String::from("Token must not be blank"),
        });
    }
    credentials.store(&BearerToken::new(request.token))?;
    info!("Session token stored");
    Ok(())
}

/// Removes the stored bearer token.
///
/// # Errors
///
/// Returns an internal error if the slot cannot be removed.
pub fn clear_token<S: SlotStorage>(credentials: &mut SlotCredentials<S>) -> Result<(), ApiError> {
    credentials.clear()?;
    info!("Session token cleared");
    Ok(())
}
