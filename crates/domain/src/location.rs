// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payloads for onboarding a client location.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::DomainError;
use crate::validation::{Validate, require, require_amount, require_at_least};

/// Where guards will be posted and who authorizes the posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationInformation {
    pub client_name: String,
    pub date_time: String,
    /// Assigned by the backend; may be blank for a new location.
    pub location_id: String,
    pub location_name: String,
    pub company_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    /// GPS coordinates as entered, e.g. `"24.8607,67.0011"`.
    pub gps: String,
    pub location_type: String,
    pub authorized_name: String,
    pub authorized_number: String,
    pub authorized_designation: String,
}

impl Validate for LocationInformation {
    fn validate(&self) -> Result<(), DomainError> {
        require("clientName", &self.client_name)?;
        require("dateTime", &self.date_time)?;
        require("locationName", &self.location_name)?;
        require("companyName", &self.company_name)?;
        require("address", &self.address)?;
        require("city", &self.city)?;
        require("state", &self.state)?;
        require("country", &self.country)?;
        require("gps", &self.gps)?;
        require("locationType", &self.location_type)?;
        require("authorizedName", &self.authorized_name)?;
        require("authorizedNumber", &self.authorized_number)?;
        require("authorizedDesignation", &self.authorized_designation)
    }
}

/// One requested line of guards for a location.
///
/// This is the repeatable record edited through the draft store; its id is
/// assigned by the store, not carried here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardRequisition {
    /// Guard category, e.g. `"Un-Armed"` or `"Supervisor"`.
    pub description: String,
    pub number_of_persons: u32,
    #[serde(default)]
    pub shift_type: String,
    #[serde(default)]
    pub days_per_month: u32,
    #[serde(default)]
    pub charges_per_month: f64,
    #[serde(default)]
    pub overtime_rate: f64,
    #[serde(default)]
    pub allowance: f64,
}

impl Validate for GuardRequisition {
    fn validate(&self) -> Result<(), DomainError> {
        require("description", &self.description)?;
        require_at_least("numberOfPersons", self.number_of_persons, 1)?;
        require("shiftType", &self.shift_type)?;
        require_at_least("daysPerMonth", self.days_per_month, 1)?;
        require_amount("chargesPerMonth", self.charges_per_month, 1.0)?;
        require_amount("overtimeRate", self.overtime_rate, 0.0)?;
        require_amount("allowance", self.allowance, 0.0)
    }
}

/// Finance terms agreed for one guard category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinanceEntry {
    pub salary_per_month: String,
    pub overtime_hour: String,
    pub allowance: String,
}

impl FinanceEntry {
    fn validate_as(&self, description: &str) -> Result<(), DomainError> {
        require(&format!("{description}.salaryPerMonth"), &self.salary_per_month)?;
        require(&format!("{description}.overtimeHour"), &self.overtime_hour)?;
        require(&format!("{description}.allowance"), &self.allowance)
    }
}

/// Finance entries keyed by guard description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinanceSheet(pub BTreeMap<String, FinanceEntry>);

impl FinanceSheet {
    /// Returns the entry for a guard description, if any.
    #[must_use]
    pub fn entry(&self, description: &str) -> Option<&FinanceEntry> {
        self.0.get(description)
    }

    /// Checks that every requested guard has a complete finance entry.
    ///
    /// Entries for descriptions that are no longer requested are ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingFinanceEntry` for the first guard without
    /// an entry, or `DomainError::MissingField` for an incomplete entry.
    pub fn validate_against<'a, I>(&self, descriptions: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for description in descriptions {
            let entry = self
                .entry(description)
                .ok_or_else(|| DomainError::MissingFinanceEntry {
                    description: description.to_string(),
                })?;
            entry.validate_as(description)?;
        }
        Ok(())
    }
}

impl Validate for FinanceSheet {
    fn validate(&self) -> Result<(), DomainError> {
        for (description, entry) in &self.0 {
            entry.validate_as(description)?;
        }
        Ok(())
    }
}
