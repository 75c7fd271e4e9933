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
#![allow(clippy::multiple_crate_versions)]

//! The API boundary of Guardpost.
//!
//! This crate defines the concrete onboarding and registration flows, the
//! HTTP transport that forwards a finished wizard upstream, and the
//! operations the server exposes, each returning an [`ApiError`] that maps
//! onto one HTTP status.

mod error;
mod flows;
mod handlers;
mod request_response;
mod transport;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_domain_error, translate_transport_error, translate_wizard_error,
};
pub use flows::{
    CheckedFlow, ClientOnboarding, ClientPayload, ClientStep, ClientSubmission,
    EmployeeRegistration, EmployeeSubmission, GuardPayload, GuardRegistration, GuardSubmission,
    LocationOnboarding, LocationPayload, LocationStep, LocationSubmission, RegistrationPayload,
    RegistrationStep, StepSchema, parse_step,
};
pub use handlers::{
    add_draft, cancel, clear_token, complete_step, delete_draft, go_back, go_to_step,
    list_drafts, reset_drafts, set_editing, store_token, stored_payload, submit, update_draft,
    wizard_state,
};
pub use request_response::{
    DraftCreatedResponse, DraftListResponse, ErrorResponse, GoToStepRequest, SetEditingRequest,
    StepCompletedResponse, StepInfo, StoreTokenRequest, StoredPayloadResponse,
    SubmissionResponse, WizardStateResponse,
};
pub use transport::HttpTransport;
