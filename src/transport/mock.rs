//! Scripted transport for exercising resolution and invocation logic.

use crate::core::{Authentication, Error, Result};
use crate::job::JobId;
use crate::transport::client::AgentTransport;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory transport with scripted responses and per-method call counters.
#[derive(Default)]
pub(crate) struct MockTransport {
    ddo_by_did: Mutex<HashMap<String, String>>,
    ddo_by_url: Mutex<HashMap<String, String>>,
    invoke_responses: Mutex<VecDeque<String>>,
    job_statuses: Mutex<VecDeque<Option<String>>>,
    default_job_status: Mutex<Option<String>>,
    pub did_calls: AtomicUsize,
    pub url_calls: AtomicUsize,
    pub invoke_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a document for network DID resolution.
    pub fn with_did_ddo(self, did: &str, ddo_text: &str) -> Self {
        self.ddo_by_did
            .lock()
            .unwrap()
            .insert(did.to_string(), ddo_text.to_string());
        self
    }

    /// Script a document for URL resolution.
    pub fn with_url_ddo(self, url: &str, ddo_text: &str) -> Self {
        self.ddo_by_url
            .lock()
            .unwrap()
            .insert(url.to_string(), ddo_text.to_string());
        self
    }

    /// Queue a raw invoke response payload.
    pub fn push_invoke_response(&self, payload: &str) {
        self.invoke_responses
            .lock()
            .unwrap()
            .push_back(payload.to_string());
    }

    /// Queue one job-status observation (`None` = no record).
    pub fn push_job_status(&self, payload: Option<&str>) {
        self.job_statuses
            .lock()
            .unwrap()
            .push_back(payload.map(str::to_string));
    }

    /// Status returned once the scripted queue is drained.
    pub fn set_default_job_status(&self, payload: &str) {
        *self.default_job_status.lock().unwrap() = Some(payload.to_string());
    }

    pub fn did_call_count(&self) -> usize {
        self.did_calls.load(Ordering::SeqCst)
    }

    pub fn url_call_count(&self) -> usize {
        self.url_calls.load(Ordering::SeqCst)
    }

    pub fn status_call_count(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentTransport for MockTransport {
    async fn fetch_ddo_by_did(&self, did: &str) -> Result<Option<String>> {
        self.did_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.ddo_by_did.lock().unwrap().get(did).cloned())
    }

    async fn fetch_ddo_by_url(
        &self,
        url: &str,
        _auth: Option<&Authentication>,
    ) -> Result<Option<String>> {
        self.url_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.ddo_by_url.lock().unwrap().get(url).cloned())
    }

    async fn invoke_operation(
        &self,
        _endpoint: &str,
        operation: &str,
        _inputs: &Value,
        _auth: Option<&Authentication>,
        _is_async: bool,
    ) -> Result<String> {
        self.invoke_calls.fetch_add(1, Ordering::SeqCst);
        self.invoke_responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| {
                Error::TransportFailed(operation.to_string(), "no scripted response".into())
            })
    }

    async fn fetch_job_status(
        &self,
        _endpoint: &str,
        _job_id: &JobId,
        _auth: Option<&Authentication>,
    ) -> Result<Option<String>> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(scripted) = self.job_statuses.lock().unwrap().pop_front() {
            return Ok(scripted);
        }
        Ok(self.default_job_status.lock().unwrap().clone())
    }
}
