//! Job tracking for asynchronous remote operations.
//!
//! A [`Job`] is one status snapshot of an outstanding or completed
//! asynchronous invocation. Snapshots are immutable; progress is observed by
//! re-fetching status from the remote agent, which produces a fresh value.

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Agent-assigned job identifier.
///
/// Agents report ids as JSON strings or integers; both normalize to the
/// string form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(String);

impl JobId {
    /// Create a job id from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Normalize a wire value into a job id.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Ok(Self(s.clone())),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(Error::Serialization(format!("invalid job id: {other}"))),
        }
    }

    /// The id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Lifecycle status reported by a remote agent for a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Submitted, the agent has not started the operation.
    Pending,
    /// The operation is executing remotely.
    Running,
    /// Terminal success label used by some agent implementations.
    Succeeded,
    /// Terminal success label used by other agent implementations;
    /// treated identically to `Succeeded`.
    Completed,
    /// Terminal failure.
    Failed,
}

impl JobStatus {
    /// Parse a status label reported by an agent (case-insensitive).
    pub fn parse(label: &str) -> Result<Self> {
        match label.to_ascii_lowercase().as_str() {
            "pending" => Ok(JobStatus::Pending),
            "running" => Ok(JobStatus::Running),
            "succeeded" => Ok(JobStatus::Succeeded),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            other => Err(Error::UnknownJobStatus(other.to_string())),
        }
    }

    /// Whether the status never transitions further.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded | JobStatus::Completed | JobStatus::Failed
        )
    }

    /// Whether the status denotes terminal success.
    pub fn is_success(self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Completed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// One status snapshot of an asynchronous invocation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Job {
    /// Agent-assigned id, immutable for the lifetime of the job.
    pub id: JobId,
    /// Status at the time of the fetch.
    pub status: JobStatus,
    /// Result payload, present only once the job has reached terminal
    /// success.
    pub results: Option<Value>,
}

impl Job {
    /// Create a snapshot without results.
    pub fn new(id: JobId, status: JobStatus) -> Self {
        Self {
            id,
            status,
            results: None,
        }
    }

    /// Parse a job-status payload (`status` plus optional `results`).
    ///
    /// Returns `None` for an empty or incomplete record; some agents report
    /// one for a brief window right after job creation.
    pub fn from_status_payload(id: JobId, text: &str) -> Result<Option<Self>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(trimmed)?;
        Self::from_status_value(id, &value)
    }

    /// Parse a decoded job-status value. See [`Job::from_status_payload`].
    pub fn from_status_value(id: JobId, value: &Value) -> Result<Option<Self>> {
        if value.is_null() {
            return Ok(None);
        }
        let record = value
            .as_object()
            .ok_or_else(|| Error::Serialization(format!("invalid job record: {value}")))?;
        let label = match record.get("status").and_then(Value::as_str) {
            Some(label) => label,
            None => return Ok(None),
        };
        let status = JobStatus::parse(label)?;
        let results = if status.is_success() {
            record.get("results").cloned().filter(|v| !v.is_null())
        } else {
            None
        };
        Ok(Some(Self { id, status, results }))
    }

    /// Whether this snapshot is final.
    pub fn is_done(&self) -> bool {
        self.status.is_terminal()
    }
}

impl std::fmt::Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "job {} [{}]", self.id, self.status)
    }
}
