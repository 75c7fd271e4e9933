// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fingerprint capture.
//!
//! No scanner is attached; captures are simulated by encoding the finger
//! and the capture instant, which is enough to exercise the registration
//! flow end to end.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::OffsetDateTime;

use crate::error::DomainError;
use crate::validation::Validate;

/// A capture position on the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Finger {
    #[serde(rename = "Right Thumb")]
    RightThumb,
    #[serde(rename = "Right Fore Finger")]
    RightForeFinger,
    #[serde(rename = "Right Middle Finger")]
    RightMiddleFinger,
    #[serde(rename = "Right Ring Finger")]
    RightRingFinger,
    #[serde(rename = "Right Little Finger")]
    RightLittleFinger,
    #[serde(rename = "Right Four Fingers")]
    RightFourFingers,
    #[serde(rename = "Left Thumb")]
    LeftThumb,
    #[serde(rename = "Left Fore Finger")]
    LeftForeFinger,
    #[serde(rename = "Left Middle Finger")]
    LeftMiddleFinger,
    #[serde(rename = "Left Ring Finger")]
    LeftRingFinger,
    #[serde(rename = "Left Little Finger")]
    LeftLittleFinger,
    #[serde(rename = "Left Four Fingers")]
    LeftFourFingers,
}

impl Finger {
    /// All capture positions in scanner order.
    pub const ALL: [Self; 12] = [
        Self::RightThumb,
        Self::RightForeFinger,
        Self::RightMiddleFinger,
        Self::RightRingFinger,
        Self::RightLittleFinger,
        Self::RightFourFingers,
        Self::LeftThumb,
        Self::LeftForeFinger,
        Self::LeftMiddleFinger,
        Self::LeftRingFinger,
        Self::LeftLittleFinger,
        Self::LeftFourFingers,
    ];

    /// The human-readable label, also used as the wire key.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RightThumb => "Right Thumb",
            Self::RightForeFinger => "Right Fore Finger",
            Self::RightMiddleFinger => "Right Middle Finger",
            Self::RightRingFinger => "Right Ring Finger",
            Self::RightLittleFinger => "Right Little Finger",
            Self::RightFourFingers => "Right Four Fingers",
            Self::LeftThumb => "Left Thumb",
            Self::LeftForeFinger => "Left Fore Finger",
            Self::LeftMiddleFinger => "Left Middle Finger",
            Self::LeftRingFinger => "Left Ring Finger",
            Self::LeftLittleFinger => "Left Little Finger",
            Self::LeftFourFingers => "Left Four Fingers",
        }
    }
}

impl std::fmt::Display for Finger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Finger {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|finger| finger.label() == s)
            .ok_or_else(|| DomainError::UnknownFinger(s.to_string()))
    }
}

/// Produces a simulated fingerprint template for `finger` captured at `at`.
#[must_use]
pub fn simulate_capture(finger: Finger, at: OffsetDateTime) -> String {
    let millis: i128 = at.unix_timestamp_nanos() / 1_000_000;
    STANDARD.encode(format!("fingerprint-{}-{millis}", finger.label()))
}

/// Captured templates keyed by finger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BiometricCapture(pub BTreeMap<Finger, String>);

impl BiometricCapture {
    /// Stores a template, replacing any earlier capture of the same finger.
    pub fn record(&mut self, finger: Finger, template: String) {
        self.0.insert(finger, template);
    }

    /// Simulates a capture of `finger` now, stores it and returns the template.
    pub fn capture(&mut self, finger: Finger) -> String {
        let template: String = simulate_capture(finger, OffsetDateTime::now_utc());
        self.0.insert(finger, template.clone());
        template
    }

    #[must_use]
    pub fn is_captured(&self, finger: Finger) -> bool {
        self.0.contains_key(&finger)
    }

    /// Number of fingers captured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Validate for BiometricCapture {
    fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::EmptyBiometricCapture);
        }
        Ok(())
    }
}
