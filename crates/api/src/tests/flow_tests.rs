// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use guardpost::{Draft, DraftId, StepData, WizardFlow};
use guardpost_domain::{
    DomainError, Experience, GuardRequisition, LocationInformation, NextOfKin,
};
use serde_json::{Value, json};

use crate::{
    CheckedFlow, ClientOnboarding, ClientPayload, ClientStep, EmployeeRegistration,
    EmployeeSubmission, GuardPayload, GuardRegistration, LocationOnboarding, LocationPayload,
    LocationStep, LocationSubmission, RegistrationPayload, RegistrationStep, parse_step,
};

use super::helpers::{
    create_test_bank_account, create_test_biometric, create_test_company, create_test_contact,
    create_test_finance, create_test_guard, create_test_location, create_test_next_of_kin,
    create_test_personal,
};

fn create_test_drafts() -> Vec<Draft<GuardRequisition>> {
    vec![
        Draft {
            id: DraftId::new("g-1"),
            record: create_test_guard("Un-Armed", 4),
        },
        Draft {
            id: DraftId::new("g-2"),
            record: create_test_guard("Supervisor", 1),
        },
    ]
}

#[test]
fn test_payloads_are_tagged_by_step() {
    let payload: LocationPayload = serde_json::from_value(json!({
        "step": "location",
        "data": { "clientName": "Acme", "city": "Karachi" }
    }))
    .unwrap();

    match payload {
        LocationPayload::Location(location) => {
            assert_eq!(location.client_name, "Acme");
            assert_eq!(location.city, "Karachi");
            assert!(location.gps.is_empty());
        }
        other => panic!("Unexpected payload: {other:?}"),
    }
}

#[test]
fn test_unit_step_payload_needs_no_data() {
    let payload: LocationPayload = serde_json::from_value(json!({ "step": "guards" })).unwrap();

    assert_eq!(payload, LocationPayload::Guards);
}

#[test]
fn test_unknown_step_tag_is_rejected() {
    let result: Result<ClientPayload, serde_json::Error> =
        serde_json::from_value(json!({ "step": "finance", "data": {} }));

    assert!(result.is_err());
}

#[test]
fn test_parse_step_only_knows_configured_steps() {
    assert_eq!(
        parse_step::<LocationOnboarding>("finance"),
        Some(LocationStep::Finance)
    );
    assert_eq!(
        parse_step::<EmployeeRegistration>("nextOfKin"),
        Some(RegistrationStep::NextOfKin)
    );
    assert_eq!(parse_step::<GuardRegistration>("bankAccount"), None);
    assert_eq!(parse_step::<ClientOnboarding>("Company"), None);
}

#[test]
fn test_location_aggregation_folds_in_drafts() {
    let data: StepData<LocationStep, LocationPayload> = [
        LocationPayload::Location(create_test_location()),
        LocationPayload::Guards,
        LocationPayload::Finance(create_test_finance(&["Un-Armed", "Supervisor"])),
    ]
    .into_iter()
    .collect();

    let submission: LocationSubmission =
        LocationOnboarding::aggregate(&data, create_test_drafts());
    let body: Value = serde_json::to_value(&submission).unwrap();

    assert_eq!(body["location"]["clientName"], "Acme");
    assert_eq!(body["guards"][0]["id"], "g-1");
    assert_eq!(body["guards"][0]["description"], "Un-Armed");
    assert_eq!(body["guards"][1]["numberOfPersons"], 1);
    assert_eq!(body["finance"]["Supervisor"]["salaryPerMonth"], "30000");
}

#[test]
fn test_location_aggregation_defaults_missing_steps() {
    let data: StepData<LocationStep, LocationPayload> =
        std::iter::once(LocationPayload::Location(create_test_location())).collect();

    let submission: LocationSubmission = LocationOnboarding::aggregate(&data, Vec::new());

    assert!(submission.guards.is_empty());
    assert!(submission.finance.0.is_empty());
}

#[test]
fn test_finance_must_cover_every_requested_guard() {
    let payload: LocationPayload = LocationPayload::Finance(create_test_finance(&["Un-Armed"]));

    let result: Result<(), DomainError> =
        LocationOnboarding::check(&payload, &create_test_drafts());

    assert_eq!(
        result,
        Err(DomainError::MissingFinanceEntry {
            description: String::from("Supervisor"),
        })
    );
}

#[test]
fn test_location_step_requires_its_fields() {
    let mut location: LocationInformation = create_test_location();
    location.gps = String::from("  ");

    let result: Result<(), DomainError> =
        LocationOnboarding::check(&LocationPayload::Location(location), &Vec::new());

    assert_eq!(
        result,
        Err(DomainError::MissingField {
            field: String::from("gps"),
        })
    );
}

#[test]
fn test_client_flow_shape() {
    assert_eq!(ClientOnboarding::NAME, "clients");
    assert_eq!(
        ClientOnboarding::steps(),
        &[ClientStep::Company, ClientStep::Contact]
    );
    assert!(ClientOnboarding::is_mandatory(ClientStep::Company));
    assert!(!ClientOnboarding::is_mandatory(ClientStep::Contact));

    let data: StepData<ClientStep, ClientPayload> = [
        ClientPayload::Contact(create_test_contact()),
        ClientPayload::Company(create_test_company()),
    ]
    .into_iter()
    .collect();
    let body: Value = serde_json::to_value(ClientOnboarding::aggregate(&data, ())).unwrap();

    assert_eq!(body["company"]["mscNo"], "MSC-001");
    assert_eq!(body["contact"]["pocName"], "S. Khan");
}

#[test]
fn test_employee_submission_contains_every_step() {
    let data: StepData<RegistrationStep, RegistrationPayload> = [
        RegistrationPayload::Personal(create_test_personal()),
        RegistrationPayload::BankAccount(create_test_bank_account()),
        RegistrationPayload::Biometric(create_test_biometric()),
    ]
    .into_iter()
    .collect();

    let submission: EmployeeSubmission =
        EmployeeRegistration::<NextOfKin, Experience>::aggregate(&data, ());
    let body: Value = serde_json::to_value(&submission).unwrap();

    for key in [
        "personal",
        "nextOfKin",
        "academicLicense",
        "experience",
        "references",
        "bankAccount",
        "uploadDocs",
        "biometric",
    ] {
        assert!(body.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(body["nextOfKin"]["fullName"], "");
    assert_eq!(body["biometric"]["Right Thumb"], "dGVtcGxhdGU=");
}

#[test]
fn test_employee_mandatory_steps() {
    let mandatory: Vec<RegistrationStep> = EmployeeRegistration::<NextOfKin, Experience>::steps()
        .iter()
        .copied()
        .filter(|step| EmployeeRegistration::<NextOfKin, Experience>::is_mandatory(*step))
        .collect();

    assert_eq!(
        mandatory,
        vec![
            RegistrationStep::Personal,
            RegistrationStep::BankAccount,
            RegistrationStep::Biometric,
        ]
    );
}

#[test]
fn test_registration_accepts_an_opaque_next_of_kin_schema() {
    let payload: RegistrationPayload<Value, Experience> = serde_json::from_value(json!({
        "step": "nextOfKin",
        "data": { "guardianName": "Sara", "relation": "Sister" }
    }))
    .unwrap();

    assert!(EmployeeRegistration::<Value, Experience>::check(&payload, &()).is_ok());

    let data: StepData<RegistrationStep, RegistrationPayload<Value, Experience>> =
        std::iter::once(payload).collect();
    let body: Value =
        serde_json::to_value(EmployeeRegistration::<Value, Experience>::aggregate(&data, ()))
            .unwrap();

    assert_eq!(body["nextOfKin"]["relation"], "Sister");
}

#[test]
fn test_guard_registration_is_two_steps() {
    assert_eq!(GuardRegistration::<NextOfKin>::NAME, "guards");
    assert_eq!(
        GuardRegistration::<NextOfKin>::steps(),
        &[RegistrationStep::Personal, RegistrationStep::NextOfKin]
    );

    let data: StepData<RegistrationStep, GuardPayload> = [
        GuardPayload::Personal(create_test_personal()),
        GuardPayload::NextOfKin(create_test_next_of_kin()),
    ]
    .into_iter()
    .collect();
    let body: Value =
        serde_json::to_value(GuardRegistration::<NextOfKin>::aggregate(&data, ())).unwrap();

    assert_eq!(body["personal"]["fullName"], "Ali Raza");
    assert_eq!(body["nextOfKin"]["religionSect"], "Sunni");
}
