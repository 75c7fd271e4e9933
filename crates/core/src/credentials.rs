// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tracing::debug;

use crate::error::StorageError;
use crate::storage::SlotStorage;
use crate::transport::BearerToken;

/// Slot the bearer credential is stored under.
pub const TOKEN_SLOT: &str = "token";

/// The answer to "may this submission proceed, and with which credential".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialLookup {
    /// The flow submits without a credential.
    NotRequired,
    Present(BearerToken),
    /// A credential is required and none is stored.
    Absent,
}

/// Where a wizard finds the credential its transport needs.
pub trait CredentialSource: Send {
    /// Looks the credential up at submission time.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn lookup(&mut self) -> Result<CredentialLookup, StorageError>;
}

/// For flows that submit anonymously.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialSource for NoCredentials {
    fn lookup(&mut self) -> Result<CredentialLookup, StorageError> {
        Ok(CredentialLookup::NotRequired)
    }
}

/// Reads a required bearer token from a storage slot.
///
/// A missing or blank slot is reported as [`CredentialLookup::Absent`].
#[derive(Debug, Clone)]
pub struct SlotCredentials<S> {
    storage: S,
    slot: String,
}

impl<S: SlotStorage> SlotCredentials<S> {
    pub fn new(storage: S) -> Self {
        Self::with_slot(storage, TOKEN_SLOT)
    }

    pub fn with_slot(storage: S, slot: impl Into<String>) -> Self {
        Self {
            storage,
            slot: slot.into(),
        }
    }

    /// Stores a token for later submissions.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    pub fn store(&mut self, token: &BearerToken) -> Result<(), StorageError> {
        self.storage.set(&self.slot, token.as_str())?;
        debug!(slot = %self.slot, "Credential stored");
        Ok(())
    }

    /// Forgets the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.remove(&self.slot)?;
        debug!(slot = %self.slot, "Credential cleared");
        Ok(())
    }
}

impl<S: SlotStorage> CredentialSource for SlotCredentials<S> {
    fn lookup(&mut self) -> Result<CredentialLookup, StorageError> {
        Ok(match self.storage.get(&self.slot)? {
            Some(token) if !token.trim().is_empty() => {
                CredentialLookup::Present(BearerToken::new(token))
            }
            _ => CredentialLookup::Absent,
        })
    }
}
