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

mod biometric;
mod client;
mod error;
mod location;
mod registration;
mod validation;

#[cfg(test)]
mod tests;

pub use biometric::{BiometricCapture, Finger, simulate_capture};
pub use client::{CompanyInformation, PrimaryContact};
pub use error::DomainError;
pub use location::{FinanceEntry, FinanceSheet, GuardRequisition, LocationInformation};
pub use registration::{
    AcademicLicense, BankAccount, Experience, Guarantor, NextOfKin, PersonalInformation,
    References, UploadedDocuments,
};
pub use validation::{Validate, require, require_amount, require_at_least, require_numeric};
