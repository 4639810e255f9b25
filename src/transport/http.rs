//! HTTP transport implementation.
//!
//! Talks to agent services and a universal resolver over plain HTTP with
//! optional basic-auth credentials.

use crate::core::{Authentication, Error, Result};
use crate::job::JobId;
use crate::transport::client::AgentTransport;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP transport.
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Universal resolver endpoint used for network DID resolution.
    ///
    /// When unset, DID resolution reports no document and callers fall back
    /// to URL-based resolution.
    pub resolver_url: Option<String>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            resolver_url: None,
        }
    }
}

/// Reqwest-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
    config: HttpTransportConfig,
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn apply_auth(
    request: reqwest::RequestBuilder,
    auth: Option<&Authentication>,
) -> reqwest::RequestBuilder {
    match auth {
        Some(auth) => request.basic_auth(&auth.username, auth.password.as_deref()),
        None => request,
    }
}

impl HttpTransport {
    /// Create a transport with the given configuration.
    pub fn new(config: HttpTransportConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a transport with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpTransportConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    async fn get_text(
        &self,
        url: &str,
        auth: Option<&Authentication>,
    ) -> Result<Option<String>> {
        let response = apply_auth(self.client.get(url), auth).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status()?;
        Ok(Some(response.text().await?))
    }
}

#[async_trait]
impl AgentTransport for HttpTransport {
    async fn fetch_ddo_by_did(&self, did: &str) -> Result<Option<String>> {
        let Some(resolver_url) = &self.config.resolver_url else {
            debug!(did, "no resolver configured, skipping network DID resolution");
            return Ok(None);
        };
        self.get_text(&join_url(resolver_url, did), None).await
    }

    async fn fetch_ddo_by_url(
        &self,
        url: &str,
        auth: Option<&Authentication>,
    ) -> Result<Option<String>> {
        self.get_text(&join_url(url, "api/ddo"), auth).await
    }

    async fn invoke_operation(
        &self,
        endpoint: &str,
        operation: &str,
        inputs: &Value,
        auth: Option<&Authentication>,
        is_async: bool,
    ) -> Result<String> {
        let url = if is_async {
            join_url(endpoint, &format!("async/{operation}"))
        } else {
            join_url(endpoint, operation)
        };
        let request = apply_auth(self.client.post(&url), auth).json(inputs);
        let response = request
            .send()
            .await
            .map_err(|e| Error::TransportFailed(operation.to_string(), e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::TransportFailed(operation.to_string(), e.to_string()))?;
        if status.is_client_error() {
            return Err(Error::OperationRejected(
                operation.to_string(),
                format!("HTTP {status}: {body}"),
            ));
        }
        if !status.is_success() {
            return Err(Error::TransportFailed(
                operation.to_string(),
                format!("HTTP {status}"),
            ));
        }
        Ok(body)
    }

    async fn fetch_job_status(
        &self,
        endpoint: &str,
        job_id: &JobId,
        auth: Option<&Authentication>,
    ) -> Result<Option<String>> {
        self.get_text(&join_url(endpoint, &format!("jobs/{job_id}")), auth)
            .await
    }
}
