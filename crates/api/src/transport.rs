// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Submission over HTTP.

use guardpost::{
    DEFAULT_SUBMISSION_TIMEOUT, SubmissionReceipt, SubmissionRequest, SubmissionTransport,
    TransportError,
};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Posts each submission as JSON to the upstream backend.
///
/// A flow named `onboarding` is posted to `<base>/api/onboarding` unless a
/// route overrides it.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    routes: HashMap<&'static str, String>,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport for `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, DEFAULT_SUBMISSION_TIMEOUT)
    }

    /// Creates a transport whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Network` if the HTTP client cannot be built.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client: reqwest::Client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to build HTTP client: {e}")))?;
        let base_url: String = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            routes: HashMap::new(),
            timeout,
        })
    }

    /// Sends `flow` to `path` (relative to the base URL) instead of
    /// `api/<flow>`.
    #[must_use]
    pub fn with_route(mut self, flow: &'static str, path: impl Into<String>) -> Self {
        self.routes.insert(flow, path.into());
        self
    }

    /// The URL a flow's submission is posted to.
    #[must_use]
    pub fn endpoint(&self, flow: &str) -> String {
        match self.routes.get(flow) {
            Some(path) => format!("{}/{}", self.base_url, path.trim_start_matches('/')),
            None => format!("{}/api/{flow}", self.base_url),
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl SubmissionTransport for HttpTransport {
    fn submit<S>(
        &self,
        request: SubmissionRequest<'_, S>,
    ) -> impl Future<Output = Result<SubmissionReceipt, TransportError>> + Send
    where
        S: Serialize + Sync,
    {
        let url: String = self.endpoint(request.flow);
        let mut builder: RequestBuilder = self.client.post(&url).json(request.payload);
        if let Some(token) = request.credential {
            builder = builder.bearer_auth(token.as_str());
        }
        let timeout: Duration = self.timeout;
        let flow: &'static str = request.flow;

        async move {
            debug!(flow, url = %url, "Posting submission");
            let response: Response = builder
                .send()
                .await
                .map_err(|e| classify_send_error(&e, timeout))?;
            let status: StatusCode = response.status();
            let body: Option<Value> = read_json_body(response).await;
            debug!(flow, status = status.as_u16(), "Upstream answered");

            if status.is_success() {
                Ok(receipt_from_body(body.as_ref()))
            } else {
                Err(TransportError::Rejected {
                    status: status.as_u16(),
                    message: rejection_message(status, body.as_ref()),
                })
            }
        }
    }
}

fn classify_send_error(err: &reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout { after: timeout }
    } else if err.is_builder() {
        TransportError::Encoding(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}

/// Bodies that are empty or not JSON read as `None`.
async fn read_json_body(response: Response) -> Option<Value> {
    let text: String = response.text().await.ok()?;
    serde_json::from_str(&text).ok()
}

fn string_field(body: Option<&Value>, pointer: &str) -> Option<String> {
    match body?.pointer(pointer)? {
        Value::String(value) if !value.trim().is_empty() => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

fn receipt_from_body(body: Option<&Value>) -> SubmissionReceipt {
    SubmissionReceipt {
        reference: string_field(body, "/id").or_else(|| string_field(body, "/data/id")),
        message: string_field(body, "/message"),
    }
}

fn rejection_message(status: StatusCode, body: Option<&Value>) -> String {
    string_field(body, "/message")
        .or_else(|| string_field(body, "/error"))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string()
        })
}
