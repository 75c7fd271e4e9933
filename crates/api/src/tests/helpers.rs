// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use guardpost::{
    SubmissionReceipt, SubmissionRequest, SubmissionTransport, TransportError,
};
use guardpost_domain::{
    BankAccount, BiometricCapture, CompanyInformation, FinanceEntry, FinanceSheet, Finger,
    GuardRequisition, LocationInformation, NextOfKin, PersonalInformation, PrimaryContact,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

pub fn create_test_location() -> LocationInformation {
    LocationInformation {
        client_name: String::from("Acme"),
        date_time: String::from("2026-03-01T09:00"),
        location_id: String::new(),
        location_name: String::from("Acme Warehouse"),
        company_name: String::from("Acme Holdings"),
        address: String::from("Plot 12, SITE Area"),
        city: String::from("Karachi"),
        state: String::from("Sindh"),
        country: String::from("Pakistan"),
        gps: String::from("24.8607,67.0011"),
        location_type: String::from("Warehouse"),
        authorized_name: String::from("S. Khan"),
        authorized_number: String::from("03001234567"),
        authorized_designation: String::from("Site Manager"),
    }
}

pub fn create_test_guard(description: &str, number_of_persons: u32) -> GuardRequisition {
    GuardRequisition {
        description: String::from(description),
        number_of_persons,
        shift_type: String::from("Day"),
        days_per_month: 30,
        charges_per_month: 45_000.0,
        overtime_rate: 300.0,
        allowance: 1_500.0,
    }
}

pub fn create_test_finance(descriptions: &[&str]) -> FinanceSheet {
    let entries: BTreeMap<String, FinanceEntry> = descriptions
        .iter()
        .map(|description| {
            (
                (*description).to_string(),
                FinanceEntry {
                    salary_per_month: String::from("30000"),
                    overtime_hour: String::from("250"),
                    allowance: String::from("2000"),
                },
            )
        })
        .collect();
    FinanceSheet(entries)
}

pub fn create_test_company() -> CompanyInformation {
    CompanyInformation {
        msc_no: String::from("MSC-001"),
        company_name: String::from("Acme Holdings"),
        website: String::from("https://acme.example"),
        industry: String::from("Logistics"),
        address: String::from("Plot 12, SITE Area"),
        city: String::from("Karachi"),
        province: String::from("Sindh"),
        country: String::from("Pakistan"),
        current_address: String::from("Plot 12, SITE Area"),
        contact_no: String::from("02134567890"),
        email: String::from("info@acme.example"),
        recruitment_date: String::from("2026-03-01"),
    }
}

pub fn create_test_contact() -> PrimaryContact {
    PrimaryContact {
        poc_name: String::from("S. Khan"),
        poc_designation: String::from("Site Manager"),
        poc_email: String::from("khan@acme.example"),
        poc_contact: String::from("03001234567"),
        alternate_contact_person: String::new(),
        alternate_contact_no: String::new(),
    }
}

pub fn create_test_personal() -> PersonalInformation {
    PersonalInformation {
        msc_no: String::from("MSC-114"),
        recruitment_date: String::from("2026-03-01"),
        recruitment_time: String::from("09:00"),
        full_name: String::from("Ali Raza"),
        father_name: String::from("Raza Ahmed"),
        dob: String::from("1990-05-12"),
        cnic: String::from("42101-1234567-1"),
        cnic_issue_date: String::from("2020-01-01"),
        cnic_expiry_date: String::from("2030-01-01"),
        contact_no: String::from("03001234567"),
        current_address: String::from("Block 7, Gulshan"),
        permanent_address: String::from("Block 7, Gulshan"),
        religion: String::from("Islam"),
        blood_group: String::from("B+"),
        weight: String::from("72"),
        height: String::from("175"),
        ..PersonalInformation::default()
    }
}

pub fn create_test_next_of_kin() -> NextOfKin {
    NextOfKin {
        full_name: String::from("Sara Raza"),
        father_name: String::from("Raza Ahmed"),
        religion_sect: String::from("Sunni"),
        cnic: String::from("42101-7654321-2"),
    }
}

pub fn create_test_bank_account() -> BankAccount {
    BankAccount {
        bank_name: String::from("National Bank"),
        bank_code: String::from("NBP"),
        account_no: String::from("0011223344"),
        iban: String::from("PK36NBPA0011223344556677"),
        branch_code: String::from("0042"),
        branch: String::from("Saddar"),
    }
}

pub fn create_test_biometric() -> BiometricCapture {
    let mut capture: BiometricCapture = BiometricCapture::default();
    capture.record(Finger::RightThumb, String::from("dGVtcGxhdGU="));
    capture
}

/// Captures every submission as JSON and answers with a fixed result.
#[derive(Debug, Clone)]
pub struct CapturingTransport {
    submissions: Arc<Mutex<Vec<(String, Value)>>>,
    response: Result<SubmissionReceipt, TransportError>,
}

impl CapturingTransport {
    pub fn accepting() -> Self {
        Self {
            submissions: Arc::new(Mutex::new(Vec::new())),
            response: Ok(SubmissionReceipt {
                reference: Some(String::from("LOC-77")),
                message: None,
            }),
        }
    }

    pub fn failing(err: TransportError) -> Self {
        Self {
            submissions: Arc::new(Mutex::new(Vec::new())),
            response: Err(err),
        }
    }

    pub fn submissions(&self) -> Vec<(String, Value)> {
        self.submissions.lock().unwrap().clone()
    }
}

impl SubmissionTransport for CapturingTransport {
    fn submit<S>(
        &self,
        request: SubmissionRequest<'_, S>,
    ) -> impl Future<Output = Result<SubmissionReceipt, TransportError>> + Send
    where
        S: Serialize + Sync,
    {
        self.submissions.lock().unwrap().push((
            request.flow.to_string(),
            serde_json::to_value(request.payload).unwrap(),
        ));
        std::future::ready(self.response.clone())
    }
}
