//! Registry entries for remote agents.

use crate::core::{Authentication, Error, Result};
use crate::ddo::DDO;
use crate::transport::AgentTransport;
use tokio::sync::Mutex;
use tracing::debug;

/// Address details supplied when registering a remote agent.
///
/// At least one of the URL and the DID must be present.
#[derive(Clone, Debug, Default)]
pub struct AgentAddress {
    /// URL the agent serves its identity document from.
    pub url: Option<String>,
    /// DID the agent is registered under on the network.
    pub did: Option<String>,
    /// Access credentials for the agent's services.
    pub authentication: Option<Authentication>,
}

impl AgentAddress {
    /// Address an agent by URL.
    pub fn url(url: &str) -> Self {
        Self::default().with_url(url)
    }

    /// Address an agent by DID.
    pub fn did(did: &str) -> Self {
        Self::default().with_did(did)
    }

    /// Set the URL.
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Set the DID.
    pub fn with_did(mut self, did: &str) -> Self {
        self.did = Some(did.to_string());
        self
    }

    /// Set the access credentials.
    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }
}

/// A resolved identity document held in an entry's cache.
#[derive(Clone, Debug)]
pub struct ResolvedDDO {
    /// Raw document text as fetched.
    pub text: String,
    /// Parsed form of the same text.
    pub ddo: DDO,
}

/// A named reference to a remote agent plus its resolution cache.
///
/// The cache is an entry-level critical section: concurrent resolutions of
/// the same entry serialize, resolutions of unrelated entries do not.
pub struct AgentEntry {
    name: String,
    url: Option<String>,
    did: Option<String>,
    authentication: Option<Authentication>,
    cache: Mutex<Option<ResolvedDDO>>,
}

impl AgentEntry {
    pub(crate) fn new(name: &str, address: AgentAddress) -> Result<Self> {
        if address.url.is_none() && address.did.is_none() {
            return Err(Error::InvalidRegistration(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            url: address.url,
            did: address.did,
            authentication: address.authentication,
            cache: Mutex::new(None),
        })
    }

    /// Name the entry is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered URL, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Registered DID, if any.
    pub fn did(&self) -> Option<&str> {
        self.did.as_deref()
    }

    /// Registered credentials, if any.
    pub fn authentication(&self) -> Option<&Authentication> {
        self.authentication.as_ref()
    }

    /// Snapshot of the resolution cache.
    pub async fn cached(&self) -> Option<ResolvedDDO> {
        self.cache.lock().await.clone()
    }

    /// DID of the cached document, if the entry has been resolved.
    pub async fn cached_did(&self) -> Option<String> {
        self.cache.lock().await.as_ref().map(|r| r.ddo.id.clone())
    }

    /// Drop the cached document so the next resolution re-fetches it.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    /// Resolve the entry to its identity document, caching on first success.
    ///
    /// Tries network DID resolution first, then the registered URL. When
    /// neither yields a document the cache stays empty and the next call
    /// re-attempts both steps. A document that fails to parse also leaves
    /// the cache untouched.
    pub(crate) async fn resolve(
        &self,
        transport: &dyn AgentTransport,
    ) -> Result<Option<ResolvedDDO>> {
        let mut cache = self.cache.lock().await;
        if let Some(resolved) = cache.as_ref() {
            return Ok(Some(resolved.clone()));
        }

        let mut text: Option<String> = None;
        if let Some(did) = &self.did {
            text = transport.fetch_ddo_by_did(did).await?;
            if text.is_some() {
                debug!(name = %self.name, did = %did, "resolved document from network");
            }
        }
        if text.is_none() {
            if let Some(url) = &self.url {
                text = transport
                    .fetch_ddo_by_url(url, self.authentication.as_ref())
                    .await?;
                if text.is_some() {
                    debug!(name = %self.name, url = %url, "resolved document from url");
                }
            }
        }

        let Some(text) = text else {
            return Ok(None);
        };
        let ddo = DDO::from_json(&text)?;
        let resolved = ResolvedDDO { text, ddo };
        *cache = Some(resolved.clone());
        Ok(Some(resolved))
    }
}
