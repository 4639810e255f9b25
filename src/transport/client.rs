//! AgentTransport trait definition.
//!
//! Network access used by resolution, invocation and job polling.
//! Implementations return raw response text; parsing stays with the caller.

use crate::core::{Authentication, Result};
use crate::job::JobId;
use async_trait::async_trait;
use serde_json::Value;

/// Network operations required to resolve and invoke remote agents.
#[async_trait]
pub trait AgentTransport: Send + Sync {
    /// Resolve a DID to identity-document text via the network.
    ///
    /// Returns `None` when the network has no record for the DID.
    async fn fetch_ddo_by_did(&self, did: &str) -> Result<Option<String>>;

    /// Fetch identity-document text from an agent's own URL.
    ///
    /// Returns `None` when the agent publishes no document there.
    async fn fetch_ddo_by_url(
        &self,
        url: &str,
        auth: Option<&Authentication>,
    ) -> Result<Option<String>>;

    /// Submit an operation invocation to an agent's invoke endpoint.
    ///
    /// Returns the raw response payload text.
    async fn invoke_operation(
        &self,
        endpoint: &str,
        operation: &str,
        inputs: &Value,
        auth: Option<&Authentication>,
        is_async: bool,
    ) -> Result<String>;

    /// Fetch the raw status record for a job.
    ///
    /// Returns `None` when the agent has no record for the id.
    async fn fetch_job_status(
        &self,
        endpoint: &str,
        job_id: &JobId,
        auth: Option<&Authentication>,
    ) -> Result<Option<String>>;
}
