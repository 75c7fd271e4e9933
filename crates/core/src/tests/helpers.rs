// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::{
    Draft, StepData, StepKey, StepPayload, StorageError, SubmissionReceipt, SubmissionRequest,
    SubmissionTransport, SlotStorage, TransportError, WizardFlow,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SiteStep {
    Location,
    Guards,
    Finance,
}

impl StepKey for SiteStep {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Guards => "guards",
            Self::Finance => "finance",
        }
    }
}

impl std::fmt::Display for SiteStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SitePayload {
    Location(Value),
    Guards,
    Finance(Value),
}

impl StepPayload for SitePayload {
    type Step = SiteStep;

    fn step(&self) -> SiteStep {
        match self {
            Self::Location(_) => SiteStep::Location,
            Self::Guards => SiteStep::Guards,
            Self::Finance(_) => SiteStep::Finance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guard {
    pub description: String,
    pub number_of_persons: u32,
}

pub fn create_test_guard(description: &str, number_of_persons: u32) -> Guard {
    Guard {
        description: String::from(description),
        number_of_persons,
    }
}

fn fold_site_steps(data: &StepData<SiteStep, SitePayload>) -> (Value, Value) {
    let mut location: Value = json!({});
    let mut finance: Value = json!({});
    for payload in data.payloads() {
        match payload {
            SitePayload::Location(value) => location = value.clone(),
            SitePayload::Guards => {}
            SitePayload::Finance(value) => finance = value.clone(),
        }
    }
    (location, finance)
}

/// Location, guards and finance; only location is mandatory. Aggregation
/// folds in the guard drafts.
pub struct SiteFlow;

impl WizardFlow for SiteFlow {
    type Step = SiteStep;
    type Payload = SitePayload;
    type Snapshot = Vec<Draft<Guard>>;
    type Submission = Value;

    const NAME: &'static str = "site";

    fn steps() -> &'static [SiteStep] {
        &[SiteStep::Location, SiteStep::Guards, SiteStep::Finance]
    }

    fn is_mandatory(step: SiteStep) -> bool {
        step == SiteStep::Location
    }

    fn aggregate(data: &StepData<SiteStep, SitePayload>, snapshot: Vec<Draft<Guard>>) -> Value {
        let (location, finance) = fold_site_steps(data);
        json!({ "location": location, "guards": snapshot, "finance": finance })
    }
}

/// Location and finance only, with every step mandatory and no drafts.
pub struct ShortFlow;

impl WizardFlow for ShortFlow {
    type Step = SiteStep;
    type Payload = SitePayload;
    type Snapshot = ();
    type Submission = Value;

    const NAME: &'static str = "short";

    fn steps() -> &'static [SiteStep] {
        &[SiteStep::Location, SiteStep::Finance]
    }

    fn is_mandatory(_step: SiteStep) -> bool {
        true
    }

    fn aggregate(data: &StepData<SiteStep, SitePayload>, (): ()) -> Value {
        let (location, finance) = fold_site_steps(data);
        json!({ "location": location, "finance": finance })
    }
}

/// Every step carries its own data; nothing is mandatory and there are no
/// drafts.
#[derive(Debug, Clone, PartialEq)]
pub enum PlainPayload {
    Location(Value),
    Guards(Value),
    Finance(Value),
}

impl StepPayload for PlainPayload {
    type Step = SiteStep;

    fn step(&self) -> SiteStep {
        match self {
            Self::Location(_) => SiteStep::Location,
            Self::Guards(_) => SiteStep::Guards,
            Self::Finance(_) => SiteStep::Finance,
        }
    }
}

pub struct PlainFlow;

impl WizardFlow for PlainFlow {
    type Step = SiteStep;
    type Payload = PlainPayload;
    type Snapshot = ();
    type Submission = Value;

    const NAME: &'static str = "plain";

    fn steps() -> &'static [SiteStep] {
        &[SiteStep::Location, SiteStep::Guards, SiteStep::Finance]
    }

    fn is_mandatory(_step: SiteStep) -> bool {
        false
    }

    fn aggregate(data: &StepData<SiteStep, PlainPayload>, (): ()) -> Value {
        let mut location: Value = json!({});
        let mut guards: Value = json!({});
        let mut finance: Value = json!({});
        for payload in data.payloads() {
            match payload {
                PlainPayload::Location(value) => location = value.clone(),
                PlainPayload::Guards(value) => guards = value.clone(),
                PlainPayload::Finance(value) => finance = value.clone(),
            }
        }
        json!({ "location": location, "guards": guards, "finance": finance })
    }
}

pub fn location_payload() -> SitePayload {
    SitePayload::Location(json!({ "clientName": "Acme", "city": "Karachi" }))
}

pub fn finance_payload() -> SitePayload {
    SitePayload::Finance(json!({ "Night Guard": { "salaryPerMonth": "30000" } }))
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub flow: &'static str,
    pub payload: Value,
    pub credential: Option<String>,
}

/// Records every submission and answers with a configurable result.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    response: Arc<Mutex<Result<SubmissionReceipt, TransportError>>>,
}

impl RecordingTransport {
    pub fn accepting() -> Self {
        Self::answering(Ok(SubmissionReceipt {
            reference: Some(String::from("REF-1")),
            message: None,
        }))
    }

    pub fn rejecting(status: u16, message: &str) -> Self {
        Self::answering(Err(TransportError::Rejected {
            status,
            message: String::from(message),
        }))
    }

    pub fn answering(response: Result<SubmissionReceipt, TransportError>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response: Arc::new(Mutex::new(response)),
        }
    }

    pub fn answer_with(&self, response: Result<SubmissionReceipt, TransportError>) {
        *self.response.lock().unwrap() = response;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl SubmissionTransport for RecordingTransport {
    fn submit<S>(
        &self,
        request: SubmissionRequest<'_, S>,
    ) -> impl Future<Output = Result<SubmissionReceipt, TransportError>> + Send
    where
        S: Serialize + Sync,
    {
        self.calls.lock().unwrap().push(RecordedCall {
            flow: request.flow,
            payload: serde_json::to_value(request.payload).unwrap(),
            credential: request.credential.map(|token| token.as_str().to_string()),
        });
        std::future::ready(self.response.lock().unwrap().clone())
    }
}

/// Never answers.
#[derive(Debug, Clone, Copy)]
pub struct HangingTransport;

impl SubmissionTransport for HangingTransport {
    fn submit<S>(
        &self,
        _request: SubmissionRequest<'_, S>,
    ) -> impl Future<Output = Result<SubmissionReceipt, TransportError>> + Send
    where
        S: Serialize + Sync,
    {
        std::future::pending()
    }
}

/// Accepts every submission, but first edits the drafts the way a user
/// working in another tab would while the request is on the wire.
#[derive(Debug, Clone)]
pub struct MeddlingTransport {
    pub drafts: crate::SharedDraftStore<Guard, crate::MemoryStorage>,
    pub added: Guard,
}

impl SubmissionTransport for MeddlingTransport {
    fn submit<S>(
        &self,
        _request: SubmissionRequest<'_, S>,
    ) -> impl Future<Output = Result<SubmissionReceipt, TransportError>> + Send
    where
        S: Serialize + Sync,
    {
        self.drafts
            .with(|store| store.add(self.added.clone()))
            .unwrap();
        std::future::ready(Ok(SubmissionReceipt::default()))
    }
}

/// Reads succeed; writes fail while `failing` is set.
#[derive(Debug, Clone, Default)]
pub struct FlakyStorage {
    pub inner: crate::MemoryStorage,
    pub failing: Arc<Mutex<bool>>,
}

impl FlakyStorage {
    pub fn fail_writes(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    fn check(&self) -> Result<(), StorageError> {
        if *self.failing.lock().unwrap() {
            return Err(StorageError::Backend(String::from("disk full")));
        }
        Ok(())
    }
}

impl SlotStorage for FlakyStorage {
    fn get(&mut self, slot: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(slot)
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.set(slot, value)
    }

    fn remove(&mut self, slot: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.remove(slot)
    }
}
