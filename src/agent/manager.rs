//! Agent registry and resolution.
//!
//! The manager owns named references to remote agents and turns a name, an
//! agent DID or an asset-scoped DID into a connection-ready [`RemoteAgent`].
//! It is an explicitly constructed context object; compose one per
//! application and pass it where it is needed.

use crate::agent::entry::{AgentAddress, AgentEntry};
use crate::agent::remote::RemoteAgent;
use crate::core::{Error, Result};
use crate::ddo::DDO;
use crate::did;
use crate::transport::AgentTransport;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Registry of named remote agents with cached document resolution.
pub struct AgentManager {
    transport: Arc<dyn AgentTransport>,
    entries: RwLock<HashMap<String, Arc<AgentEntry>>>,
}

impl AgentManager {
    /// Create a registry using the given transport.
    pub fn new(transport: Arc<dyn AgentTransport>) -> Self {
        Self {
            transport,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register a remote agent under a name.
    ///
    /// The address must carry a URL or a DID. Registering an existing name
    /// replaces the previous entry, dropping its cache.
    pub fn register(&self, name: &str, address: AgentAddress) -> Result<()> {
        let entry = AgentEntry::new(name, address)?;
        self.entries
            .write()
            .unwrap()
            .insert(name.to_string(), Arc::new(entry));
        Ok(())
    }

    /// Remove a registered agent. Returns whether the name was present.
    pub fn unregister(&self, name: &str) -> bool {
        self.entries.write().unwrap().remove(name).is_some()
    }

    /// Whether a name is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.entries.read().unwrap().contains_key(name)
    }

    /// Get the entry registered under a name.
    pub fn entry(&self, name: &str) -> Option<Arc<AgentEntry>> {
        self.entries.read().unwrap().get(name).cloned()
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.entries.read().unwrap().keys().cloned().collect()
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    /// Resolve a registered agent to its raw identity-document text.
    ///
    /// The document is fetched once and cached on the entry; `Ok(None)`
    /// means neither DID nor URL resolution yielded a document this time,
    /// and a later call will re-attempt both.
    pub async fn resolve_ddo(&self, name: &str) -> Result<Option<String>> {
        let entry = self
            .entry(name)
            .ok_or_else(|| Error::AgentNotFound(name.to_string()))?;
        Ok(entry
            .resolve(self.transport.as_ref())
            .await?
            .map(|resolved| resolved.text))
    }

    /// Find the entry whose resolved document matches a DID.
    ///
    /// Only entries that have already been resolved are considered; the
    /// search never triggers network traffic.
    pub async fn find_entry_by_did(&self, find_did: &str) -> Option<Arc<AgentEntry>> {
        let entries: Vec<Arc<AgentEntry>> =
            self.entries.read().unwrap().values().cloned().collect();
        for entry in entries {
            if let Some(cached_did) = entry.cached_did().await {
                if cached_did == find_did {
                    return Some(entry);
                }
            }
        }
        None
    }

    /// Resolve a registered name, an agent DID or an asset-scoped DID into
    /// a remote agent handle.
    ///
    /// Resolution precedence, each step short-circuiting the next:
    /// 1. an exact registered-name match (always wins, even when the
    ///    argument also looks like a known DID);
    /// 2. the canonical agent DID, matched against already-resolved entries;
    /// 3. direct network resolution of the canonical agent DID.
    ///
    /// `Ok(None)` means the agent is unknown; that is a valid outcome, not
    /// a fault.
    pub async fn load_agent(&self, did_or_name: &str) -> Result<Option<RemoteAgent>> {
        let mut document: Option<DDO> = None;

        if let Some(entry) = self.entry(did_or_name) {
            debug!(name = did_or_name, "found in the list of registered agents");
            document = entry
                .resolve(self.transport.as_ref())
                .await?
                .map(|resolved| resolved.ddo);
        } else if let Ok(agent_did) = did::canonical_agent_did(did_or_name) {
            if let Some(entry) = self.find_entry_by_did(&agent_did).await {
                debug!(did = %agent_did, "found in the list of resolved entries");
                document = entry.cached().await.map(|resolved| resolved.ddo);
            } else if let Some(text) = self.transport.fetch_ddo_by_did(&agent_did).await? {
                debug!(did = %agent_did, "resolved from network");
                document = Some(DDO::from_json(&text)?);
            }
        } else {
            debug!(value = did_or_name, "neither a registered name nor a DID");
        }

        let Some(ddo) = document else {
            return Ok(None);
        };

        let authentication = self
            .find_entry_by_did(&ddo.id)
            .await
            .and_then(|entry| entry.authentication().cloned());
        Ok(Some(RemoteAgent::new(
            self.transport.clone(),
            ddo,
            authentication,
        )))
    }
}
