// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use crate::error::WizardError;
use crate::flow::{StepKey, StepPayload, WizardFlow};

/// Payloads stored so far, at most one per step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepData<S, P> {
    entries: BTreeMap<S, P>,
}

impl<S, P> Default for StepData<S, P> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<S, P> StepData<S, P>
where
    S: StepKey,
    P: StepPayload<Step = S>,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a payload under its own step. Returns the payload it replaced.
    pub fn insert(&mut self, payload: P) -> Option<P> {
        self.entries.insert(payload.step(), payload)
    }

    #[must_use]
    pub fn get(&self, step: S) -> Option<&P> {
        self.entries.get(&step)
    }

    #[must_use]
    pub fn contains(&self, step: S) -> bool {
        self.entries.contains_key(&step)
    }

    pub fn payloads(&self) -> impl Iterator<Item = &P> {
        self.entries.values()
    }

    pub fn steps(&self) -> impl Iterator<Item = S> + '_ {
        self.entries.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S, P> FromIterator<P> for StepData<S, P>
where
    S: StepKey,
    P: StepPayload<Step = S>,
{
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut data: Self = Self::new();
        for payload in iter {
            data.insert(payload);
        }
        data
    }
}

/// Where a wizard is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    /// Showing the step at this index.
    Editing(usize),
    Submitting,
    /// The submission succeeded. Passed through on the way back to
    /// `Editing(0)` once the session and submitted drafts are cleared.
    Submitted,
    /// The last submission failed; stored data is kept for a retry.
    Failed,
}

impl WizardPhase {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Editing(_) => "editing",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::Failed => "failed",
        }
    }
}

/// The navigation state and stored payloads of one wizard run.
pub struct WizardSession<F: WizardFlow> {
    current: usize,
    data: StepData<F::Step, F::Payload>,
}

impl<F: WizardFlow> std::fmt::Debug for WizardSession<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardSession")
            .field("flow", &F::NAME)
            .field("current", &self.current)
            .field("data", &self.data)
            .finish()
    }
}

impl<F: WizardFlow> Clone for WizardSession<F> {
    fn clone(&self) -> Self {
        Self {
            current: self.current,
            data: self.data.clone(),
        }
    }
}

impl<F: WizardFlow> Default for WizardSession<F> {
    fn default() -> Self {
        Self {
            current: 0,
            data: StepData::default(),
        }
    }
}

impl<F: WizardFlow> WizardSession<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session from payloads saved by an earlier one, at step 0.
    ///
    /// Payloads for steps the flow does not configure are dropped.
    #[must_use]
    pub fn restore(data: StepData<F::Step, F::Payload>) -> Self {
        let data: StepData<F::Step, F::Payload> = data
            .payloads()
            .filter(|payload| Self::position_of(payload.step()).is_some())
            .cloned()
            .collect();
        Self { current: 0, data }
    }

    #[must_use]
    pub fn step_count() -> usize {
        F::steps().len()
    }

    /// Index of `step` in the configured order.
    #[must_use]
    pub fn position_of(step: F::Step) -> Option<usize> {
        F::steps().iter().position(|candidate| *candidate == step)
    }

    #[must_use]
    pub fn is_terminal(index: usize) -> bool {
        index + 1 == Self::step_count()
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// The step at the current index.
    ///
    /// # Panics
    ///
    /// Panics if the flow configures no steps.
    #[must_use]
    pub fn current_step(&self) -> F::Step {
        F::steps()[self.current]
    }

    /// Stores a payload, replacing any earlier one for the same step.
    pub fn record(&mut self, payload: F::Payload) -> Option<F::Payload> {
        self.data.insert(payload)
    }

    /// Moves to `index` without touching stored data.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::StepOutOfRange`] if `index` is not a
    /// configured step.
    pub fn go_to(&mut self, index: usize) -> Result<(), WizardError> {
        let step_count: usize = Self::step_count();
        if index >= step_count {
            return Err(WizardError::StepOutOfRange { index, step_count });
        }
        self.current = index;
        Ok(())
    }

    /// Moves one step back, staying at 0. Returns the new index.
    pub const fn go_back(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    #[must_use]
    pub fn stored(&self, step: F::Step) -> Option<&F::Payload> {
        self.data.get(step)
    }

    #[must_use]
    pub const fn data(&self) -> &StepData<F::Step, F::Payload> {
        &self.data
    }

    /// Steps with stored data, in configured order.
    #[must_use]
    pub fn completed_steps(&self) -> Vec<F::Step> {
        F::steps()
            .iter()
            .copied()
            .filter(|step| self.data.contains(*step))
            .collect()
    }

    /// The first mandatory step, in configured order, with no stored data.
    ///
    /// `incoming` is treated as stored; it is the step whose payload is
    /// about to be recorded.
    #[must_use]
    pub fn first_missing_mandatory(&self, incoming: Option<F::Step>) -> Option<F::Step> {
        F::steps().iter().copied().find(|step| {
            F::is_mandatory(*step) && Some(*step) != incoming && !self.data.contains(*step)
        })
    }

    /// Clears stored data and returns to step 0.
    pub fn reset(&mut self) {
        self.current = 0;
        self.data = StepData::default();
    }
}
