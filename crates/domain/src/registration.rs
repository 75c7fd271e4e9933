// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payloads for registering an employee or a guard.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::validation::{Validate, require, require_numeric};

/// Identity, contact and medical details of the person being registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInformation {
    pub msc_no: String,
    pub recruitment_date: String,
    pub recruitment_time: String,
    pub full_name: String,
    pub father_name: String,
    pub dob: String,
    pub cnic: String,
    pub cnic_issue_date: String,
    pub cnic_expiry_date: String,
    pub contact_no: String,
    pub current_address: String,
    pub permanent_address: String,
    pub police_station_c: String,
    pub contact_no_c: String,
    pub area_police_p: String,
    pub police_contact_p: String,
    pub religion: String,
    pub weight: String,
    pub height: String,
    pub blood_pressure: String,
    pub eye_color: String,
    pub blood_group: String,
    pub heart_beat: String,
    pub disability: String,
    pub eobi_no: String,
    pub sessi_no: String,
}

impl Validate for PersonalInformation {
    fn validate(&self) -> Result<(), DomainError> {
        require("mscNo", &self.msc_no)?;
        require("recruitmentDate", &self.recruitment_date)?;
        require("recruitmentTime", &self.recruitment_time)?;
        require("fullName", &self.full_name)?;
        require("fatherName", &self.father_name)?;
        require("dob", &self.dob)?;
        require("cnic", &self.cnic)?;
        require("cnicIssueDate", &self.cnic_issue_date)?;
        require("cnicExpiryDate", &self.cnic_expiry_date)?;
        require("contactNo", &self.contact_no)?;
        require("currentAddress", &self.current_address)?;
        require("permanentAddress", &self.permanent_address)?;
        require("religion", &self.religion)?;
        require("bloodGroup", &self.blood_group)?;
        require_numeric("weight", Some(&self.weight))?;
        require_numeric("height", Some(&self.height))
    }
}

/// Emergency contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NextOfKin {
    pub full_name: String,
    pub father_name: String,
    pub religion_sect: String,
    pub cnic: String,
}

impl Validate for NextOfKin {
    fn validate(&self) -> Result<(), DomainError> {
        require("fullName", &self.full_name)?;
        require("fatherName", &self.father_name)?;
        require("religionSect", &self.religion_sect)?;
        require("cnic", &self.cnic)
    }
}

/// Education and driving license.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AcademicLicense {
    pub education: String,
    pub institute: String,
    pub driving_license: String,
    pub license_no: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub issuing_city: String,
}

impl Validate for AcademicLicense {
    fn validate(&self) -> Result<(), DomainError> {
        require("education", &self.education)?;
        require("institute", &self.institute)?;
        require("drivingLicense", &self.driving_license)?;
        require("licenseNo", &self.license_no)?;
        require("issueDate", &self.issue_date)?;
        require("expiryDate", &self.expiry_date)?;
        require("issuingCity", &self.issuing_city)
    }
}

/// Military and security service history.
///
/// Only `exServicemen` is required; the year and month counts are strings
/// that must parse as numbers when filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub ex_servicemen: String,
    pub army_no: Option<String>,
    pub rank_name: Option<String>,
    pub guard_category_id: Option<String>,
    pub unit: Option<String>,
    pub branch: Option<String>,
    pub service_years: Option<String>,
    pub service_months: Option<String>,
    pub discharge_book_no: Option<String>,
    pub recent_employment: Option<String>,
    pub place: Option<String>,
    pub security_years: Option<String>,
}

impl Validate for Experience {
    fn validate(&self) -> Result<(), DomainError> {
        require("exServicemen", &self.ex_servicemen)?;
        require_numeric("serviceYears", self.service_years.as_deref())?;
        require_numeric("serviceMonths", self.service_months.as_deref())?;
        require_numeric("securityYears", self.security_years.as_deref())
    }
}

/// A person vouching for the registrant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Guarantor {
    pub full_name: String,
    pub father_name: Option<String>,
    pub cnic: String,
    pub contact: Option<String>,
    pub relationship: Option<String>,
    pub permanent_address: Option<String>,
    pub current_address: Option<String>,
    /// Reference to an uploaded copy of the guarantor's identity card.
    pub ref_cnic_upload: Option<String>,
}

impl Guarantor {
    fn validate_as(&self, prefix: &str) -> Result<(), DomainError> {
        require(&format!("{prefix}.fullName"), &self.full_name)?;
        require(&format!("{prefix}.cnic"), &self.cnic)
    }
}

/// Two guarantors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct References {
    pub guarantor1: Guarantor,
    pub guarantor2: Guarantor,
}

impl Validate for References {
    fn validate(&self) -> Result<(), DomainError> {
        self.guarantor1.validate_as("guarantor1")?;
        self.guarantor2.validate_as("guarantor2")
    }
}

/// Salary account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankAccount {
    pub bank_name: String,
    pub bank_code: String,
    pub account_no: String,
    pub iban: String,
    pub branch_code: String,
    pub branch: String,
}

impl Validate for BankAccount {
    fn validate(&self) -> Result<(), DomainError> {
        require("bankName", &self.bank_name)?;
        require("bankCode", &self.bank_code)?;
        require("accountNo", &self.account_no)?;
        require("iban", &self.iban)?;
        require("branchCode", &self.branch_code)?;
        require("branch", &self.branch)
    }
}

/// References to documents uploaded out of band.
///
/// Each field holds whatever identifier the upload collaborator returned
/// (a file name, object key or URL).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadedDocuments {
    pub picture: String,
    pub cnic_front: String,
    pub cnic_back: String,
    pub license_front: String,
    pub license_back: String,
}

impl Validate for UploadedDocuments {
    fn validate(&self) -> Result<(), DomainError> {
        require("picture", &self.picture)?;
        require("cnicFront", &self.cnic_front)?;
        require("cnicBack", &self.cnic_back)?;
        require("licenseFront", &self.license_front)?;
        require("licenseBack", &self.license_back)
    }
}
