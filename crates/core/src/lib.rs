// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Multi-step wizard controller and persisted draft store.
//!
//! A [`Wizard`] walks a [`WizardFlow`] one step at a time, keeps the payload
//! of every completed step, and on the last step aggregates everything into
//! one submission for a [`SubmissionTransport`]. A [`DraftStore`] holds
//! records the user builds up outside the wizard (e.g. the guards requested
//! for a location) and persists them to a [`SlotStorage`] slot so they
//! survive a restart.

mod backing;
mod credentials;
mod draft_store;
mod error;
mod flow;
mod session;
mod storage;
mod transport;
mod wizard;

#[cfg(test)]
mod tests;

pub use backing::{DraftBacking, NoBacking};
pub use credentials::{CredentialLookup, CredentialSource, NoCredentials, SlotCredentials, TOKEN_SLOT};
pub use draft_store::{
    DEFAULT_DRAFT_SLOT, DRAFT_FORMAT_VERSION, Draft, DraftId, DraftStore, SharedDraftStore,
    SubscriptionId,
};
pub use error::{StorageError, StoreError, TransportError, WizardError};
pub use flow::{StepKey, StepPayload, WizardFlow};
pub use session::{StepData, WizardPhase, WizardSession};
pub use storage::{MemoryStorage, SharedStorage, SlotStorage};
pub use transport::{BearerToken, SubmissionReceipt, SubmissionRequest, SubmissionTransport};
pub use wizard::{DEFAULT_SUBMISSION_TIMEOUT, StepOutcome, Wizard};
