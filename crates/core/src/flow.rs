// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static description of a multi-step wizard.
//!
//! A flow names its steps with a closed enum, carries each step's data in a
//! closed payload enum, and turns the collected payloads into one
//! submission. Because both enums are closed, aggregation is an exhaustive
//! match: a step the flow forgets to fold in is a compile error.

use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::session::StepData;

/// The key of one step.
pub trait StepKey: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {
    /// The stable wire name of the step.
    fn as_str(&self) -> &'static str;
}

/// The data collected by one step.
pub trait StepPayload: Clone + Debug + Send + Sync + 'static {
    type Step: StepKey;

    /// The step this payload belongs to.
    fn step(&self) -> Self::Step;
}

/// A wizard's steps, their requirements and how they aggregate.
pub trait WizardFlow: 'static {
    type Step: StepKey;
    type Payload: StepPayload<Step = Self::Step>;
    /// Records outside the wizard that aggregation folds in.
    type Snapshot;
    /// The single payload sent when the wizard completes.
    type Submission: Serialize + Send + Sync;

    /// Name used in logs and by transports to pick an endpoint.
    const NAME: &'static str;

    /// The configured steps, in display order. Never empty.
    fn steps() -> &'static [Self::Step];

    /// Whether submission is refused until `step` has been completed.
    fn is_mandatory(step: Self::Step) -> bool;

    /// Builds the submission. Steps without stored data contribute their
    /// default.
    fn aggregate(
        data: &StepData<Self::Step, Self::Payload>,
        snapshot: Self::Snapshot,
    ) -> Self::Submission;
}
