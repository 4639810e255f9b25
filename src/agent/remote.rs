//! Remote agent handle: invocation dispatch and job polling.

use crate::core::{Authentication, Error, Result};
use crate::ddo::{DDO, SERVICE_TYPE_INVOKE};
use crate::job::{Job, JobId};
use crate::transport::AgentTransport;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// How an invocation request should be dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvokeMode {
    /// Block until the agent returns the final payload.
    Sync,
    /// Return as soon as the agent acknowledges the submission.
    Async,
}

/// Outcome of an invocation request.
#[derive(Clone, Debug, PartialEq)]
pub enum InvokeResult {
    /// Final payload of a synchronous call.
    Completed {
        /// The operation's output payload.
        outputs: Value,
    },
    /// Accepted asynchronous submission; the operation continues remotely.
    Submitted {
        /// Id to poll the job under.
        job_id: JobId,
    },
}

impl InvokeResult {
    /// Output payload, for synchronous outcomes.
    pub fn outputs(&self) -> Option<&Value> {
        match self {
            InvokeResult::Completed { outputs } => Some(outputs),
            InvokeResult::Submitted { .. } => None,
        }
    }

    /// Job id, for asynchronous outcomes.
    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            InvokeResult::Completed { .. } => None,
            InvokeResult::Submitted { job_id } => Some(job_id),
        }
    }
}

/// A resolved, connection-ready handle to one remote agent.
///
/// Handles are immutable snapshots constructed by the registry on every
/// successful resolution; they hold no shared mutable state.
pub struct RemoteAgent {
    transport: Arc<dyn AgentTransport>,
    ddo: DDO,
    authentication: Option<Authentication>,
}

impl RemoteAgent {
    /// Create a handle from a resolved document.
    pub fn new(
        transport: Arc<dyn AgentTransport>,
        ddo: DDO,
        authentication: Option<Authentication>,
    ) -> Self {
        Self {
            transport,
            ddo,
            authentication,
        }
    }

    /// Create a handle by parsing raw identity-document text.
    pub fn from_json(
        transport: Arc<dyn AgentTransport>,
        ddo_text: &str,
        authentication: Option<Authentication>,
    ) -> Result<Self> {
        Ok(Self::new(
            transport,
            DDO::from_json(ddo_text)?,
            authentication,
        ))
    }

    /// DID of the agent this handle points at.
    pub fn did(&self) -> &str {
        &self.ddo.id
    }

    /// The agent's identity document.
    pub fn ddo(&self) -> &DDO {
        &self.ddo
    }

    /// Credentials used for the agent's services, if any.
    pub fn authentication(&self) -> Option<&Authentication> {
        self.authentication.as_ref()
    }

    fn invoke_endpoint(&self) -> Result<&str> {
        self.ddo
            .service_endpoint(SERVICE_TYPE_INVOKE)
            .ok_or_else(|| Error::ServiceNotAvailable(SERVICE_TYPE_INVOKE.to_string()))
    }

    /// Invoke an operation on the agent.
    ///
    /// Synchronous mode blocks until the agent returns a final payload;
    /// asynchronous mode blocks only until the agent acknowledges the
    /// submission and assigns a job id.
    pub async fn invoke(
        &self,
        operation: &str,
        inputs: &Value,
        mode: InvokeMode,
    ) -> Result<InvokeResult> {
        let endpoint = self.invoke_endpoint()?;
        let payload = self
            .transport
            .invoke_operation(
                endpoint,
                operation,
                inputs,
                self.authentication.as_ref(),
                mode == InvokeMode::Async,
            )
            .await?;
        let value: Value = serde_json::from_str(&payload).map_err(|e| {
            Error::OperationRejected(operation.to_string(), format!("unparseable response: {e}"))
        })?;
        if let Some(err) = value.get("error") {
            return Err(Error::OperationRejected(
                operation.to_string(),
                err.to_string(),
            ));
        }

        match mode {
            InvokeMode::Sync => {
                let outputs = value
                    .get("outputs")
                    .or_else(|| value.get("results"))
                    .cloned()
                    .ok_or_else(|| {
                        Error::OperationRejected(
                            operation.to_string(),
                            "response carries no outputs".to_string(),
                        )
                    })?;
                Ok(InvokeResult::Completed { outputs })
            }
            InvokeMode::Async => {
                let job_id = value
                    .get("job-id")
                    .ok_or_else(|| {
                        Error::OperationRejected(
                            operation.to_string(),
                            "response carries no job-id".to_string(),
                        )
                    })
                    .and_then(JobId::from_value)?;
                debug!(operation, %job_id, "asynchronous invocation accepted");
                Ok(InvokeResult::Submitted { job_id })
            }
        }
    }

    /// Fetch the current status snapshot for a job.
    ///
    /// Fails with a not-found error when the agent has no record for the
    /// id. Freshly created jobs can report an empty record for a brief
    /// window; [`RemoteAgent::wait_for_completion`] tolerates that.
    pub async fn get_job(&self, job_id: &JobId) -> Result<Job> {
        let endpoint = self.invoke_endpoint()?;
        let payload = self
            .transport
            .fetch_job_status(endpoint, job_id, self.authentication.as_ref())
            .await?;
        let record = match payload {
            Some(text) => Job::from_status_payload(job_id.clone(), &text)?,
            None => None,
        };
        record.ok_or_else(|| Error::JobNotFound(job_id.to_string()))
    }

    /// Poll a job until it reaches a terminal state.
    ///
    /// Status is re-fetched at `poll_interval` cadence until the job
    /// completes or `timeout` elapses, in which case the call fails with a
    /// timeout error carrying the last non-terminal snapshot. The delay
    /// between polls is a cancellable sleep: dropping the returned future
    /// (for example from a `select!` against a shutdown signal) aborts the
    /// loop promptly.
    pub async fn wait_for_completion(
        &self,
        job_id: &JobId,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<Job> {
        let deadline = tokio::time::Instant::now() + timeout;
        let mut last_job: Option<Job> = None;

        loop {
            match self.get_job(job_id).await {
                Ok(job) if job.is_done() => return Ok(job),
                Ok(job) => {
                    debug!(%job_id, status = %job.status, "job still in progress");
                    last_job = Some(job);
                }
                // Freshly created jobs can briefly have no record at all;
                // keep polling until the overall budget expires.
                Err(Error::JobNotFound(_)) => {
                    debug!(%job_id, "job record not available yet");
                }
                Err(e) => return Err(e),
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                return Err(Error::JobTimeout {
                    job_id: job_id.to_string(),
                    timeout,
                    last_job,
                });
            }
            let delay = std::cmp::min(poll_interval, deadline - now);
            tokio::time::sleep(delay).await;
        }
    }
}
