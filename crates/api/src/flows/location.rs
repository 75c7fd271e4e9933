// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Location onboarding: where the guards go, which guards, and what they
//! cost. The guards themselves are drafts kept outside the wizard.

use guardpost::{Draft, StepData, StepKey, StepPayload, WizardFlow};
use guardpost_domain::{
    DomainError, FinanceSheet, GuardRequisition, LocationInformation, Validate,
};
use serde::{Deserialize, Serialize};

use super::CheckedFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationStep {
    Location,
    Guards,
    Finance,
}

impl StepKey for LocationStep {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Guards => "guards",
            Self::Finance => "finance",
        }
    }
}

impl std::fmt::Display for LocationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The data completed at each location step.
///
/// The guards step carries nothing: its records live in the draft store
/// and completing it only moves the wizard on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", content = "data", rename_all = "camelCase")]
pub enum LocationPayload {
    Location(LocationInformation),
    Guards,
    Finance(FinanceSheet),
}

impl StepPayload for LocationPayload {
    type Step = LocationStep;

    fn step(&self) -> LocationStep {
        match self {
            Self::Location(_) => LocationStep::Location,
            Self::Guards => LocationStep::Guards,
            Self::Finance(_) => LocationStep::Finance,
        }
    }
}

impl Validate for LocationPayload {
    fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::Location(location) => location.validate(),
            Self::Guards => Ok(()),
            Self::Finance(finance) => finance.validate(),
        }
    }
}

/// The body posted when a location is onboarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSubmission {
    pub location: LocationInformation,
    pub guards: Vec<Draft<GuardRequisition>>,
    pub finance: FinanceSheet,
}

pub struct LocationOnboarding;

impl WizardFlow for LocationOnboarding {
    type Step = LocationStep;
    type Payload = LocationPayload;
    type Snapshot = Vec<Draft<GuardRequisition>>;
    type Submission = LocationSubmission;

    const NAME: &'static str = "onboarding";

    fn steps() -> &'static [LocationStep] {
        &[
            LocationStep::Location,
            LocationStep::Guards,
            LocationStep::Finance,
        ]
    }

    fn is_mandatory(step: LocationStep) -> bool {
        step == LocationStep::Location
    }

    fn aggregate(
        data: &StepData<LocationStep, LocationPayload>,
        snapshot: Vec<Draft<GuardRequisition>>,
    ) -> LocationSubmission {
        let mut submission: LocationSubmission = LocationSubmission {
            location: LocationInformation::default(),
            guards: snapshot,
            finance: FinanceSheet::default(),
        };
        for payload in data.payloads() {
            match payload {
                LocationPayload::Location(location) => submission.location = location.clone(),
                LocationPayload::Guards => {}
                LocationPayload::Finance(finance) => submission.finance = finance.clone(),
            }
        }
        submission
    }
}

impl CheckedFlow for LocationOnboarding {
    fn check(
        payload: &LocationPayload,
        snapshot: &Vec<Draft<GuardRequisition>>,
    ) -> Result<(), DomainError> {
        payload.validate()?;
        if let LocationPayload::Finance(finance) = payload {
            finance.validate_against(
                snapshot
                    .iter()
                    .map(|draft| draft.record.description.as_str()),
            )?;
        }
        Ok(())
    }
}
