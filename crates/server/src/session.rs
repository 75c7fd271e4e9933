// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The bearer token slot.
//!
//! Signing in stores the token the identity provider issued; signing out
//! removes it. Flows that require a credential read the same slot when
//! they submit, so a wizard started before sign-in picks up the token on
//! its next submission attempt.

use axum::{Json, extract::State, http::StatusCode};
use guardpost_api::StoreTokenRequest;
use tracing::debug;

use crate::{AppState, Credentials, HttpError};

/// Stores the bearer token.
///
/// # Errors
///
/// Returns HTTP 400 for a blank token and HTTP 500 if the slot cannot be
/// written.
pub async fn handle_store_token(
    State(app_state): State<AppState>,
    Json(request): Json<StoreTokenRequest>,
) -> Result<StatusCode, HttpError> {
    debug!("Handling store_token request");
    let mut credentials: Credentials = app_state.credentials.clone();
    guardpost_api::store_token(&mut credentials, request)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Removes the bearer token.
///
/// # Errors
///
/// Returns HTTP 500 if the slot cannot be written.
pub async fn handle_clear_token(
    State(app_state): State<AppState>,
) -> Result<StatusCode, HttpError> {
    debug!("Handling clear_token request");
    let mut credentials: Credentials = app_state.credentials.clone();
    guardpost_api::clear_token(&mut credentials)?;
    Ok(StatusCode::NO_CONTENT)
}
