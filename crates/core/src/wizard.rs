// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The wizard controller.
//!
//! Completing any step but the last stores its payload and advances.
//! Completing the last step checks the local preconditions (every mandatory
//! step has data, a credential is available when one is required), then
//! aggregates and submits. Nothing is stored when a precondition fails.
//!
//! A successful submission clears the session and the draft backing. A
//! failed one keeps everything so the same submission can be retried.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::backing::{DraftBacking, NoBacking};
use crate::credentials::{CredentialLookup, CredentialSource, NoCredentials};
use crate::error::{TransportError, WizardError};
use crate::flow::{StepKey, StepPayload, WizardFlow};
use crate::session::{StepData, WizardPhase, WizardSession};
use crate::transport::{BearerToken, SubmissionReceipt, SubmissionRequest, SubmissionTransport};

/// Upper bound on one submission round trip.
pub const DEFAULT_SUBMISSION_TIMEOUT: Duration = Duration::from_secs(30);

/// The result of completing a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The payload was stored and the wizard moved to `index`.
    Advanced { index: usize },
    /// The last step triggered a successful submission.
    Submitted(SubmissionReceipt),
}

/// Marks the phase as submitting for as long as it lives.
///
/// If the submission future is dropped before it settles, the guard is
/// dropped with it and the phase becomes [`WizardPhase::Failed`].
struct InFlight<'a> {
    phase: &'a mut WizardPhase,
    settled: bool,
}

impl<'a> InFlight<'a> {
    const fn begin(phase: &'a mut WizardPhase) -> Self {
        *phase = WizardPhase::Submitting;
        Self {
            phase,
            settled: false,
        }
    }

    fn settle(mut self, outcome: WizardPhase) {
        *self.phase = outcome;
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.phase = WizardPhase::Failed;
        }
    }
}

/// Drives one wizard flow from its first step to submission.
pub struct Wizard<F, T, B = NoBacking, C = NoCredentials>
where
    F: WizardFlow,
{
    session: WizardSession<F>,
    phase: WizardPhase,
    transport: T,
    backing: B,
    credentials: C,
    timeout: Duration,
}

impl<F, T, B, C> std::fmt::Debug for Wizard<F, T, B, C>
where
    F: WizardFlow,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wizard")
            .field("session", &self.session)
            .field("phase", &self.phase)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl<F, T, B> Wizard<F, T, B, NoCredentials>
where
    F: WizardFlow,
    T: SubmissionTransport,
    B: DraftBacking<Snapshot = F::Snapshot>,
{
    /// Creates a wizard at step 0 that submits without a credential.
    pub fn new(transport: T, backing: B) -> Self {
        Self {
            session: WizardSession::new(),
            phase: WizardPhase::Editing(0),
            transport,
            backing,
            credentials: NoCredentials,
            timeout: DEFAULT_SUBMISSION_TIMEOUT,
        }
    }
}

impl<F, T, B, C> Wizard<F, T, B, C>
where
    F: WizardFlow,
    T: SubmissionTransport,
    B: DraftBacking<Snapshot = F::Snapshot>,
    C: CredentialSource,
{
    /// Replaces the credential source.
    pub fn with_credentials<C2: CredentialSource>(self, credentials: C2) -> Wizard<F, T, B, C2> {
        Wizard {
            session: self.session,
            phase: self.phase,
            transport: self.transport,
            backing: self.backing,
            credentials,
            timeout: self.timeout,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the session with payloads saved earlier and returns to step 0.
    pub fn restore(&mut self, data: StepData<F::Step, F::Payload>) {
        self.session = WizardSession::restore(data);
        self.phase = WizardPhase::Editing(0);
        debug!(flow = F::NAME, restored = self.session.data().len(), "Session restored");
    }

    #[must_use]
    pub const fn phase(&self) -> WizardPhase {
        self.phase
    }

    #[must_use]
    pub const fn session(&self) -> &WizardSession<F> {
        &self.session
    }

    #[must_use]
    pub const fn current_step_index(&self) -> usize {
        self.session.current_index()
    }

    #[must_use]
    pub fn current_step(&self) -> F::Step {
        self.session.current_step()
    }

    /// The payload stored for `step`, to prefill a step that is revisited.
    #[must_use]
    pub fn stored_payload(&self, step: F::Step) -> Option<&F::Payload> {
        self.session.stored(step)
    }

    #[must_use]
    pub const fn backing(&self) -> &B {
        &self.backing
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Jumps to any configured step. Stored data is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::StepOutOfRange`] if `index` is not a
    /// configured step.
    pub fn go_to_step(&mut self, index: usize) -> Result<(), WizardError> {
        self.ensure_idle()?;
        self.session.go_to(index)?;
        self.phase = WizardPhase::Editing(index);
        debug!(flow = F::NAME, index, "Moved to step");
        Ok(())
    }

    /// Moves one step back, staying at the first step. Returns the new index.
    pub fn go_back(&mut self) -> usize {
        let index: usize = self.session.go_back();
        self.phase = WizardPhase::Editing(index);
        index
    }

    /// Abandons the run: clears stored data and returns to step 0.
    ///
    /// The draft backing is left alone.
    pub fn cancel(&mut self) {
        self.session.reset();
        self.phase = WizardPhase::Editing(0);
        info!(flow = F::NAME, "Wizard cancelled");
    }

    /// Completes the step `payload` belongs to.
    ///
    /// # Errors
    ///
    /// - [`WizardError::StepNotConfigured`] if the payload's step is not
    ///   part of the flow.
    /// - [`WizardError::MissingStep`] or [`WizardError::MissingCredential`]
    ///   if the last step is completed before the preconditions hold. Nothing
    ///   is stored and no request is made.
    /// - [`WizardError::Transport`] if the submission fails or times out.
    ///   Stored data is kept.
    pub async fn complete_step(
        &mut self,
        payload: F::Payload,
    ) -> Result<StepOutcome, WizardError> {
        self.ensure_idle()?;
        let step: F::Step = payload.step();
        let position: usize = WizardSession::<F>::position_of(step)
            .ok_or(WizardError::StepNotConfigured {
                step: step.as_str(),
            })?;

        if !WizardSession::<F>::is_terminal(position) {
            let replaced: bool = self.session.record(payload).is_some();
            let next: usize = position + 1;
            self.go_to_step(next)?;
            debug!(flow = F::NAME, step = %step, replaced, "Step completed");
            return Ok(StepOutcome::Advanced { index: next });
        }

        if let Some(missing) = self.session.first_missing_mandatory(Some(step)) {
            debug!(flow = F::NAME, missing = %missing, "Submission refused");
            return Err(WizardError::MissingStep {
                step: missing.as_str(),
            });
        }
        let credential: Option<BearerToken> = self.resolve_credential()?;

        self.session.record(payload);
        self.session.go_to(position)?;
        let receipt: SubmissionReceipt = self.dispatch(credential).await?;
        Ok(StepOutcome::Submitted(receipt))
    }

    /// Re-submits the stored data, typically after a failed attempt.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::MissingStep`] if the last step or any
    /// mandatory step has no stored data, and the same errors as
    /// [`Self::complete_step`] otherwise.
    pub async fn submit(&mut self) -> Result<SubmissionReceipt, WizardError> {
        self.ensure_idle()?;
        let last: usize = WizardSession::<F>::step_count().saturating_sub(1);
        let terminal: F::Step = F::steps()[last];
        if self.session.stored(terminal).is_none() {
            return Err(WizardError::MissingStep {
                step: terminal.as_str(),
            });
        }
        if let Some(missing) = self.session.first_missing_mandatory(None) {
            return Err(WizardError::MissingStep {
                step: missing.as_str(),
            });
        }
        let credential: Option<BearerToken> = self.resolve_credential()?;

        self.session.go_to(last)?;
        self.dispatch(credential).await
    }

    const fn ensure_idle(&self) -> Result<(), WizardError> {
        match self.phase {
            WizardPhase::Submitting => Err(WizardError::SubmissionInFlight),
            _ => Ok(()),
        }
    }

    fn resolve_credential(&mut self) -> Result<Option<BearerToken>, WizardError> {
        match self.credentials.lookup()? {
            CredentialLookup::NotRequired => Ok(None),
            CredentialLookup::Present(token) => Ok(Some(token)),
            CredentialLookup::Absent => {
                debug!(flow = F::NAME, "Submission refused: no credential");
                Err(WizardError::MissingCredential)
            }
        }
    }

    async fn dispatch(
        &mut self,
        credential: Option<BearerToken>,
    ) -> Result<SubmissionReceipt, WizardError> {
        let snapshot: B::Snapshot = self.backing.snapshot();
        let submission: F::Submission = F::aggregate(self.session.data(), clone_snapshot::<B>(&snapshot));
        let in_flight: InFlight<'_> = InFlight::begin(&mut self.phase);
        info!(flow = F::NAME, "Submitting");

        let request: SubmissionRequest<'_, F::Submission> = SubmissionRequest {
            flow: F::NAME,
            payload: &submission,
            credential: credential.as_ref(),
        };
        let outcome: Result<Result<SubmissionReceipt, TransportError>, _> =
            tokio::time::timeout(self.timeout, self.transport.submit(request)).await;

        match outcome {
            Ok(Ok(receipt)) => {
                in_flight.settle(WizardPhase::Submitted);
                info!(flow = F::NAME, reference = ?receipt.reference, "Submission accepted");
                self.session.reset();
                if let Err(err) = self.backing.clear_submitted(&snapshot) {
                    warn!(flow = F::NAME, error = %err, "Failed to clear drafts after submission");
                }
                self.phase = WizardPhase::Editing(0);
                Ok(receipt)
            }
            Ok(Err(err)) => {
                in_flight.settle(WizardPhase::Failed);
                warn!(flow = F::NAME, error = %err, "Submission failed");
                Err(err.into())
            }
            Err(_) => {
                in_flight.settle(WizardPhase::Failed);
                let err: TransportError = TransportError::Timeout {
                    after: self.timeout,
                };
                warn!(flow = F::NAME, error = %err, "Submission failed");
                Err(err.into())
            }
        }
    }
}

/// Clones a backing snapshot through the `DraftBacking` bound, which carries
/// the `Clone` requirement that `WizardFlow::Snapshot` does not.
fn clone_snapshot<B: DraftBacking>(snapshot: &B::Snapshot) -> B::Snapshot {
    snapshot.clone()
}
