// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payloads for onboarding a client company.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::validation::{Validate, require};

/// The client company being onboarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInformation {
    pub msc_no: String,
    pub company_name: String,
    pub website: String,
    pub industry: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub current_address: String,
    pub contact_no: String,
    pub email: String,
    pub recruitment_date: String,
}

impl Validate for CompanyInformation {
    fn validate(&self) -> Result<(), DomainError> {
        require("mscNo", &self.msc_no)?;
        require("companyName", &self.company_name)?;
        require("website", &self.website)?;
        require("industry", &self.industry)?;
        require("address", &self.address)?;
        require("city", &self.city)?;
        require("province", &self.province)?;
        require("country", &self.country)?;
        require("currentAddress", &self.current_address)?;
        require("contactNo", &self.contact_no)?;
        require("email", &self.email)?;
        require("recruitmentDate", &self.recruitment_date)
    }
}

/// The client's point of contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrimaryContact {
    pub poc_name: String,
    pub poc_designation: String,
    pub poc_email: String,
    pub poc_contact: String,
    pub alternate_contact_person: String,
    pub alternate_contact_no: String,
}

impl Validate for PrimaryContact {
    fn validate(&self) -> Result<(), DomainError> {
        require("pocName", &self.poc_name)?;
        require("pocDesignation", &self.poc_designation)?;
        require("pocEmail", &self.poc_email)?;
        require("pocContact", &self.poc_contact)
    }
}
