// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee and guard registration.
//!
//! Both flows start from the same personal information but diverge after
//! it. Steps whose schema differs between deployments (next of kin,
//! experience) are type parameters, defaulting to the standard payloads.

use guardpost::{StepData, StepKey, StepPayload, WizardFlow};
use guardpost_domain::{
    AcademicLicense, BankAccount, BiometricCapture, DomainError, Experience, NextOfKin,
    PersonalInformation, References, UploadedDocuments, Validate,
};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use super::{CheckedFlow, StepSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistrationStep {
    Personal,
    NextOfKin,
    AcademicLicense,
    Experience,
    References,
    BankAccount,
    UploadDocs,
    Biometric,
}

impl StepKey for RegistrationStep {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::NextOfKin => "nextOfKin",
            Self::AcademicLicense => "academicLicense",
            Self::Experience => "experience",
            Self::References => "references",
            Self::BankAccount => "bankAccount",
            Self::UploadDocs => "uploadDocs",
            Self::Biometric => "biometric",
        }
    }
}

impl std::fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", content = "data", rename_all = "camelCase")]
pub enum RegistrationPayload<K = NextOfKin, E = Experience> {
    Personal(PersonalInformation),
    NextOfKin(K),
    AcademicLicense(AcademicLicense),
    Experience(E),
    References(References),
    BankAccount(BankAccount),
    UploadDocs(UploadedDocuments),
    Biometric(BiometricCapture),
}

impl<K, E> StepPayload for RegistrationPayload<K, E>
where
    K: StepSchema,
    E: StepSchema,
{
    type Step = RegistrationStep;

    fn step(&self) -> RegistrationStep {
        match self {
            Self::Personal(_) => RegistrationStep::Personal,
            Self::NextOfKin(_) => RegistrationStep::NextOfKin,
            Self::AcademicLicense(_) => RegistrationStep::AcademicLicense,
            Self::Experience(_) => RegistrationStep::Experience,
            Self::References(_) => RegistrationStep::References,
            Self::BankAccount(_) => RegistrationStep::BankAccount,
            Self::UploadDocs(_) => RegistrationStep::UploadDocs,
            Self::Biometric(_) => RegistrationStep::Biometric,
        }
    }
}

impl<K: Validate, E: Validate> Validate for RegistrationPayload<K, E> {
    fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::Personal(personal) => personal.validate(),
            Self::NextOfKin(next_of_kin) => next_of_kin.validate(),
            Self::AcademicLicense(academics) => academics.validate(),
            Self::Experience(experience) => experience.validate(),
            Self::References(references) => references.validate(),
            Self::BankAccount(account) => account.validate(),
            Self::UploadDocs(documents) => documents.validate(),
            Self::Biometric(capture) => capture.validate(),
        }
    }
}

/// The body posted when an employee is registered.
///
/// Optional steps the user skipped are sent with their default (empty)
/// value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSubmission<K = NextOfKin, E = Experience> {
    pub personal: PersonalInformation,
    pub next_of_kin: K,
    pub academic_license: AcademicLicense,
    pub experience: E,
    pub references: References,
    pub bank_account: BankAccount,
    pub upload_docs: UploadedDocuments,
    pub biometric: BiometricCapture,
}

/// Full employee registration, eight steps ending with the biometric
/// capture.
pub struct EmployeeRegistration<K = NextOfKin, E = Experience>(PhantomData<fn() -> (K, E)>);

impl<K, E> WizardFlow for EmployeeRegistration<K, E>
where
    K: StepSchema,
    E: StepSchema,
{
    type Step = RegistrationStep;
    type Payload = RegistrationPayload<K, E>;
    type Snapshot = ();
    type Submission = EmployeeSubmission<K, E>;

    const NAME: &'static str = "employees";

    fn steps() -> &'static [RegistrationStep] {
        &[
            RegistrationStep::Personal,
            RegistrationStep::NextOfKin,
            RegistrationStep::AcademicLicense,
            RegistrationStep::Experience,
            RegistrationStep::References,
            RegistrationStep::BankAccount,
            RegistrationStep::UploadDocs,
            RegistrationStep::Biometric,
        ]
    }

    fn is_mandatory(step: RegistrationStep) -> bool {
        matches!(
            step,
            RegistrationStep::Personal
                | RegistrationStep::BankAccount
                | RegistrationStep::Biometric
        )
    }

    fn aggregate(
        data: &StepData<RegistrationStep, RegistrationPayload<K, E>>,
        (): (),
    ) -> EmployeeSubmission<K, E> {
        let mut submission: EmployeeSubmission<K, E> = EmployeeSubmission::default();
        for payload in data.payloads() {
            match payload {
                RegistrationPayload::Personal(personal) => submission.personal = personal.clone(),
                RegistrationPayload::NextOfKin(next_of_kin) => {
                    submission.next_of_kin = next_of_kin.clone();
                }
                RegistrationPayload::AcademicLicense(academics) => {
                    submission.academic_license = academics.clone();
                }
                RegistrationPayload::Experience(experience) => {
                    submission.experience = experience.clone();
                }
                RegistrationPayload::References(references) => {
                    submission.references = references.clone();
                }
                RegistrationPayload::BankAccount(account) => {
                    submission.bank_account = account.clone();
                }
                RegistrationPayload::UploadDocs(documents) => {
                    submission.upload_docs = documents.clone();
                }
                RegistrationPayload::Biometric(capture) => submission.biometric = capture.clone(),
            }
        }
        submission
    }
}

impl<K, E> CheckedFlow for EmployeeRegistration<K, E>
where
    K: StepSchema,
    E: StepSchema,
{
    fn check(payload: &RegistrationPayload<K, E>, _snapshot: &()) -> Result<(), DomainError> {
        payload.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", content = "data", rename_all = "camelCase")]
pub enum GuardPayload<K = NextOfKin> {
    Personal(PersonalInformation),
    NextOfKin(K),
}

impl<K: StepSchema> StepPayload for GuardPayload<K> {
    type Step = RegistrationStep;

    fn step(&self) -> RegistrationStep {
        match self {
            Self::Personal(_) => RegistrationStep::Personal,
            Self::NextOfKin(_) => RegistrationStep::NextOfKin,
        }
    }
}

impl<K: Validate> Validate for GuardPayload<K> {
    fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::Personal(personal) => personal.validate(),
            Self::NextOfKin(next_of_kin) => next_of_kin.validate(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardSubmission<K = NextOfKin> {
    pub personal: PersonalInformation,
    pub next_of_kin: K,
}

/// Short guard registration: personal information and next of kin.
pub struct GuardRegistration<K = NextOfKin>(PhantomData<fn() -> K>);

impl<K: StepSchema> WizardFlow for GuardRegistration<K> {
    type Step = RegistrationStep;
    type Payload = GuardPayload<K>;
    type Snapshot = ();
    type Submission = GuardSubmission<K>;

    const NAME: &'static str = "guards";

    fn steps() -> &'static [RegistrationStep] {
        &[RegistrationStep::Personal, RegistrationStep::NextOfKin]
    }

    fn is_mandatory(step: RegistrationStep) -> bool {
        step == RegistrationStep::Personal
    }

    fn aggregate(
        data: &StepData<RegistrationStep, GuardPayload<K>>,
        (): (),
    ) -> GuardSubmission<K> {
        let mut submission: GuardSubmission<K> = GuardSubmission::default();
        for payload in data.payloads() {
            match payload {
                GuardPayload::Personal(personal) => submission.personal = personal.clone(),
                GuardPayload::NextOfKin(next_of_kin) => submission.next_of_kin = next_of_kin.clone(),
            }
        }
        submission
    }
}

impl<K: StepSchema> CheckedFlow for GuardRegistration<K> {
    fn check(payload: &GuardPayload<K>, _snapshot: &()) -> Result<(), DomainError> {
        payload.validate()
    }
}
