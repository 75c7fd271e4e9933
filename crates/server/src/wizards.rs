// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP routes for one wizard.
//!
//! Every flow gets the same seven routes, nested under `/wizards/<flow>`.
//! Mutating routes refuse with `409 Conflict` instead of queueing behind a
//! request that already holds the wizard, which is always the case while a
//! submission is in flight. Reads never wait either: while the wizard is
//! held they answer with the last state seen, marked `submitting`.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use guardpost::{CredentialSource, DraftBacking, Wizard, WizardFlow, WizardPhase};
use guardpost_api::{
    ApiError, CheckedFlow, GoToStepRequest, HttpTransport, StepCompletedResponse,
    StoredPayloadResponse, SubmissionResponse, WizardStateResponse,
};
use std::sync::{Arc, PoisonError};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::HttpError;

/// A wizard together with the state last reported for it.
pub struct WizardHandle<F, B, C>
where
    F: WizardFlow,
{
    wizard: Mutex<Wizard<F, HttpTransport, B, C>>,
    last_state: std::sync::Mutex<WizardStateResponse>,
}

/// A wizard shared between requests.
pub type SharedWizard<F, B, C> = Arc<WizardHandle<F, B, C>>;

impl<F, B, C> WizardHandle<F, B, C>
where
    F: CheckedFlow,
    B: DraftBacking<Snapshot = F::Snapshot>,
    C: CredentialSource,
{
    pub fn new(wizard: Wizard<F, HttpTransport, B, C>) -> Self {
        let last_state: WizardStateResponse = guardpost_api::wizard_state(&wizard);
        Self {
            wizard: Mutex::new(wizard),
            last_state: std::sync::Mutex::new(last_state),
        }
    }

    /// Takes the wizard, or fails at once if another request holds it.
    ///
    /// # Errors
    ///
    /// Returns a `409 Conflict` error while the wizard is held.
    pub fn try_claim(
        &self,
    ) -> Result<MutexGuard<'_, Wizard<F, HttpTransport, B, C>>, HttpError> {
        self.wizard.try_lock().map_err(|_| {
            debug!(flow = F::NAME, "Wizard busy");
            HttpError::from(ApiError::Conflict {
                message: format!("The {} wizard is busy with another request", F::NAME),
            })
        })
    }

    /// Waits for the wizard.
    #[cfg(test)]
    pub async fn lock(&self) -> MutexGuard<'_, Wizard<F, HttpTransport, B, C>> {
        self.wizard.lock().await
    }

    /// Records the state a request leaves the wizard in.
    fn remember(&self, wizard: &Wizard<F, HttpTransport, B, C>) -> WizardStateResponse {
        let state: WizardStateResponse = guardpost_api::wizard_state(wizard);
        *self
            .last_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = state.clone();
        state
    }

    /// The state to report while another request holds the wizard.
    fn busy_state(&self) -> WizardStateResponse {
        let mut state: WizardStateResponse = self
            .last_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        state.phase = WizardPhase::Submitting.as_str().to_string();
        state
    }
}

/// Builds the routes of one wizard.
pub fn wizard_routes<F, B, C, S>(wizard: SharedWizard<F, B, C>) -> Router<S>
where
    F: CheckedFlow,
    F::Snapshot: Send,
    B: DraftBacking<Snapshot = F::Snapshot> + 'static,
    C: CredentialSource + 'static,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handle_state::<F, B, C>))
        .route("/steps", post(handle_complete_step::<F, B, C>))
        .route("/steps/{step}", get(handle_stored_payload::<F, B, C>))
        .route("/goto", post(handle_go_to_step::<F, B, C>))
        .route("/back", post(handle_go_back::<F, B, C>))
        .route("/submit", post(handle_submit::<F, B, C>))
        .route("/cancel", post(handle_cancel::<F, B, C>))
        .with_state(wizard)
}

async fn handle_state<F, B, C>(
    State(handle): State<SharedWizard<F, B, C>>,
) -> Json<WizardStateResponse>
where
    F: CheckedFlow,
    B: DraftBacking<Snapshot = F::Snapshot> + 'static,
    C: CredentialSource + 'static,
{
    let state: WizardStateResponse = match handle.wizard.try_lock() {
        Ok(guard) => handle.remember(&guard),
        Err(_) => handle.busy_state(),
    };
    Json(state)
}

async fn handle_complete_step<F, B, C>(
    State(handle): State<SharedWizard<F, B, C>>,
    Json(payload): Json<F::Payload>,
) -> Result<Json<StepCompletedResponse>, HttpError>
where
    F: CheckedFlow,
    F::Snapshot: Send,
    B: DraftBacking<Snapshot = F::Snapshot> + 'static,
    C: CredentialSource + 'static,
{
    let mut guard = handle.try_claim()?;
    let result: Result<StepCompletedResponse, ApiError> =
        guardpost_api::complete_step(&mut *guard, payload).await;
    handle.remember(&guard);
    Ok(Json(result?))
}

async fn handle_stored_payload<F, B, C>(
    State(handle): State<SharedWizard<F, B, C>>,
    Path(step): Path<String>,
) -> Result<Json<StoredPayloadResponse>, HttpError>
where
    F: CheckedFlow,
    B: DraftBacking<Snapshot = F::Snapshot> + 'static,
    C: CredentialSource + 'static,
{
    let guard = handle.try_claim()?;
    let response: StoredPayloadResponse = guardpost_api::stored_payload(&*guard, &step)?;
    Ok(Json(response))
}

async fn handle_go_to_step<F, B, C>(
    State(handle): State<SharedWizard<F, B, C>>,
    Json(request): Json<GoToStepRequest>,
) -> Result<Json<WizardStateResponse>, HttpError>
where
    F: CheckedFlow,
    B: DraftBacking<Snapshot = F::Snapshot> + 'static,
    C: CredentialSource + 'static,
{
    let mut guard = handle.try_claim()?;
    guardpost_api::go_to_step(&mut *guard, request)?;
    Ok(Json(handle.remember(&guard)))
}

async fn handle_go_back<F, B, C>(
    State(handle): State<SharedWizard<F, B, C>>,
) -> Result<Json<WizardStateResponse>, HttpError>
where
    F: CheckedFlow,
    B: DraftBacking<Snapshot = F::Snapshot> + 'static,
    C: CredentialSource + 'static,
{
    let mut guard = handle.try_claim()?;
    guardpost_api::go_back(&mut *guard);
    Ok(Json(handle.remember(&guard)))
}

async fn handle_submit<F, B, C>(
    State(handle): State<SharedWizard<F, B, C>>,
) -> Result<Json<SubmissionResponse>, HttpError>
where
    F: CheckedFlow,
    F::Snapshot: Send,
    B: DraftBacking<Snapshot = F::Snapshot> + 'static,
    C: CredentialSource + 'static,
{
    let mut guard = handle.try_claim()?;
    let result: Result<SubmissionResponse, ApiError> = guardpost_api::submit(&mut *guard).await;
    handle.remember(&guard);
    Ok(Json(result?))
}

async fn handle_cancel<F, B, C>(
    State(handle): State<SharedWizard<F, B, C>>,
) -> Result<Json<WizardStateResponse>, HttpError>
where
    F: CheckedFlow,
    B: DraftBacking<Snapshot = F::Snapshot> + 'static,
    C: CredentialSource + 'static,
{
    let mut guard = handle.try_claim()?;
    guardpost_api::cancel(&mut *guard);
    Ok(Json(handle.remember(&guard)))
}
