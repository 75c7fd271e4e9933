// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The concrete wizard flows.
//!
//! Each flow pairs a closed step enum with a closed payload enum. Payloads
//! travel as `{"step": "<key>", "data": {...}}` so a single endpoint can
//! accept any step of a flow.

mod client;
mod location;
mod registration;

use guardpost::{StepKey, WizardFlow};
use guardpost_domain::{DomainError, Validate};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub use client::{ClientOnboarding, ClientPayload, ClientStep, ClientSubmission};
pub use location::{LocationOnboarding, LocationPayload, LocationStep, LocationSubmission};
pub use registration::{
    EmployeeRegistration, EmployeeSubmission, GuardPayload, GuardRegistration, GuardSubmission,
    RegistrationPayload, RegistrationStep,
};

/// What a step's data type must support to be plugged into a flow.
///
/// Flows that are generic over a step's schema accept any type meeting
/// this bound, including `serde_json::Value` for a schema owned elsewhere.
pub trait StepSchema:
    Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Validate + Send + Sync + 'static
{
}

impl<T> StepSchema for T where
    T: Clone
        + Debug
        + Default
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Validate
        + Send
        + Sync
        + 'static
{
}

/// A flow whose payloads cross the HTTP boundary and are validated there.
pub trait CheckedFlow: WizardFlow<Payload: Serialize + DeserializeOwned> {
    /// Checks a payload before it reaches the wizard.
    ///
    /// `snapshot` is the flow's current draft snapshot, for rules that span
    /// a step and the drafts (e.g. every requested guard needs finance
    /// terms).
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    fn check(payload: &Self::Payload, snapshot: &Self::Snapshot) -> Result<(), DomainError>;
}

/// Looks up one of `F`'s configured steps by its wire name.
#[must_use]
pub fn parse_step<F: WizardFlow>(name: &str) -> Option<F::Step> {
    F::steps().iter().copied().find(|step| step.as_str() == name)
}
