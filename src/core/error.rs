//! Error types for tethys.

use thiserror::Error;

use crate::job::Job;

/// Result type alias for tethys operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tethys operations.
#[derive(Error, Debug)]
pub enum Error {
    // Registration errors
    #[error("invalid registration for agent '{0}': a URL or DID must be provided")]
    InvalidRegistration(String),

    // Lookup errors
    #[error("agent '{0}' not found in the registry")]
    AgentNotFound(String),

    #[error("no job record for id {0}")]
    JobNotFound(String),

    // Identity document errors
    #[error("DDO parse failed: {0}")]
    DDOParseFailed(String),

    #[error("invalid DID: {0}")]
    InvalidDID(String),

    #[error("agent does not publish a '{0}' service")]
    ServiceNotAvailable(String),

    // Invocation errors
    #[error("operation '{0}' rejected by agent: {1}")]
    OperationRejected(String, String),

    #[error("transport failure during '{0}': {1}")]
    TransportFailed(String, String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Job errors
    #[error("unknown job status label: {0}")]
    UnknownJobStatus(String),

    #[error("job {job_id} did not reach a terminal state within {timeout:?}")]
    JobTimeout {
        /// Id of the job that was being polled.
        job_id: String,
        /// Overall polling budget that expired.
        timeout: std::time::Duration,
        /// Last non-terminal snapshot observed before expiry.
        last_job: Option<Job>,
    },

    // Account errors
    #[error("account is locked")]
    AccountLocked,

    #[error("a password is required to unlock the account")]
    PasswordRequired,

    #[error("invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("signature verification failed")]
    SignatureVerificationFailed,

    // Serialization errors
    #[error("serialization error: {0}")]
    Serialization(String),

    // Generic errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<ed25519_dalek::SignatureError> for Error {
    fn from(_: ed25519_dalek::SignatureError) -> Self {
        Error::SignatureVerificationFailed
    }
}
