// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use guardpost::{StepData, StepKey, StepPayload, WizardFlow};
use guardpost_domain::{CompanyInformation, DomainError, PrimaryContact, Validate};
use serde::{Deserialize, Serialize};

use super::CheckedFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientStep {
    Company,
    Contact,
}

impl StepKey for ClientStep {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Contact => "contact",
        }
    }
}

impl std::fmt::Display for ClientStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", content = "data", rename_all = "camelCase")]
pub enum ClientPayload {
    Company(CompanyInformation),
    Contact(PrimaryContact),
}

impl StepPayload for ClientPayload {
    type Step = ClientStep;

    fn step(&self) -> ClientStep {
        match self {
            Self::Company(_) => ClientStep::Company,
            Self::Contact(_) => ClientStep::Contact,
        }
    }
}

impl Validate for ClientPayload {
    fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::Company(company) => company.validate(),
            Self::Contact(contact) => contact.validate(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientSubmission {
    pub company: CompanyInformation,
    pub contact: PrimaryContact,
}

/// Client company onboarding: the company, then its point of contact.
pub struct ClientOnboarding;

impl WizardFlow for ClientOnboarding {
    type Step = ClientStep;
    type Payload = ClientPayload;
    type Snapshot = ();
    type Submission = ClientSubmission;

    const NAME: &'static str = "clients";

    fn steps() -> &'static [ClientStep] {
        &[ClientStep::Company, ClientStep::Contact]
    }

    fn is_mandatory(step: ClientStep) -> bool {
        step == ClientStep::Company
    }

    fn aggregate(data: &StepData<ClientStep, ClientPayload>, (): ()) -> ClientSubmission {
        let mut submission: ClientSubmission = ClientSubmission::default();
        for payload in data.payloads() {
            match payload {
                ClientPayload::Company(company) => submission.company = company.clone(),
                ClientPayload::Contact(contact) => submission.contact = contact.clone(),
            }
        }
        submission
    }
}

impl CheckedFlow for ClientOnboarding {
    fn check(payload: &ClientPayload, _snapshot: &()) -> Result<(), DomainError> {
        payload.validate()
    }
}
