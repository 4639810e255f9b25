//! Identity document (DDO) value object.
//!
//! A DDO is the published record describing an agent's identifier and its
//! service endpoints. Documents are immutable once parsed; resolution code
//! treats them as snapshots.

use crate::core::{now, sha3_256, Error, Hash256, Result, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A service endpoint published in an identity document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// Service identifier within the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Service type tag.
    #[serde(rename = "type")]
    pub service_type: String,
    /// Endpoint URL.
    #[serde(rename = "serviceEndpoint")]
    pub endpoint: String,
    /// Service-specific attributes, carried through opaquely.
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Raw identity-document input, normalized once at the boundary.
#[derive(Clone, Debug)]
pub enum DDOSource {
    /// Raw JSON text fetched from the network.
    Json(String),
    /// Structured value already decoded from the wire.
    Value(serde_json::Value),
    /// An already-parsed document.
    Document(DDO),
}

impl From<&str> for DDOSource {
    fn from(text: &str) -> Self {
        DDOSource::Json(text.to_string())
    }
}

impl From<String> for DDOSource {
    fn from(text: String) -> Self {
        DDOSource::Json(text)
    }
}

impl From<serde_json::Value> for DDOSource {
    fn from(value: serde_json::Value) -> Self {
        DDOSource::Value(value)
    }
}

impl From<DDO> for DDOSource {
    fn from(ddo: DDO) -> Self {
        DDOSource::Document(ddo)
    }
}

/// An agent's identity document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DDO {
    /// The DID this document describes.
    pub id: String,
    /// Service endpoints, in publication order.
    #[serde(default)]
    pub service: Vec<ServiceEndpoint>,
    /// Document creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
}

impl DDO {
    /// Create a new empty document for a DID.
    pub fn new(did: &str) -> Self {
        Self {
            id: did.to_string(),
            service: Vec::new(),
            created: Some(now()),
        }
    }

    /// Parse a document from JSON text.
    ///
    /// A document without an identifier is rejected.
    pub fn from_json(text: &str) -> Result<Self> {
        let ddo: DDO =
            serde_json::from_str(text).map_err(|e| Error::DDOParseFailed(e.to_string()))?;
        ddo.validate()?;
        Ok(ddo)
    }

    /// Parse a document from a decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let ddo: DDO =
            serde_json::from_value(value).map_err(|e| Error::DDOParseFailed(e.to_string()))?;
        ddo.validate()?;
        Ok(ddo)
    }

    /// Normalize any supported document input into a parsed document.
    pub fn from_source(source: impl Into<DDOSource>) -> Result<Self> {
        match source.into() {
            DDOSource::Json(text) => Self::from_json(&text),
            DDOSource::Value(value) => Self::from_value(value),
            DDOSource::Document(ddo) => {
                ddo.validate()?;
                Ok(ddo)
            }
        }
    }

    /// Serialize to JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::DDOParseFailed("document has no identifier".into()));
        }
        Ok(())
    }

    /// Find a service endpoint by its type tag.
    pub fn find_service(&self, service_type: &str) -> Option<&ServiceEndpoint> {
        self.service.iter().find(|s| s.service_type == service_type)
    }

    /// Get the endpoint URL for a service type, if published.
    pub fn service_endpoint(&self, service_type: &str) -> Option<&str> {
        self.find_service(service_type).map(|s| s.endpoint.as_str())
    }

    /// Add a service endpoint.
    pub fn add_service(&mut self, service_type: &str, endpoint: &str) {
        self.service.push(ServiceEndpoint {
            id: Some(format!("{}#service-{}", self.id, Uuid::new_v4())),
            service_type: service_type.to_string(),
            endpoint: endpoint.to_string(),
            attributes: serde_json::Map::new(),
        });
    }

    /// Compute document hash for integrity checks.
    pub fn hash(&self) -> Result<Hash256> {
        let json = serde_json::to_vec(self)?;
        Ok(sha3_256(&json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddo::service::{SERVICE_TYPE_INVOKE, SERVICE_TYPE_META};

    fn sample_ddo() -> DDO {
        let mut ddo = DDO::new("did:tethys:abc123");
        ddo.add_service(SERVICE_TYPE_META, "http://localhost:8080/api/meta");
        ddo.add_service(SERVICE_TYPE_INVOKE, "http://localhost:8080/api/invoke");
        ddo
    }

    #[test]
    fn test_json_roundtrip() {
        let ddo = sample_ddo();
        let json = ddo.to_json().unwrap();
        let parsed = DDO::from_json(&json).unwrap();
        assert_eq!(parsed.id, ddo.id);
        assert_eq!(parsed.service, ddo.service);
    }

    #[test]
    fn test_missing_identifier_rejected() {
        let result = DDO::from_json(r#"{"service": []}"#);
        assert!(matches!(result, Err(Error::DDOParseFailed(_))));
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let result = DDO::from_json(r#"{"id": "", "service": []}"#);
        assert!(matches!(result, Err(Error::DDOParseFailed(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            DDO::from_json("not json"),
            Err(Error::DDOParseFailed(_))
        ));
    }

    #[test]
    fn test_find_service() {
        let ddo = sample_ddo();
        let service = ddo.find_service(SERVICE_TYPE_INVOKE).unwrap();
        assert_eq!(service.endpoint, "http://localhost:8080/api/invoke");
        assert!(ddo.find_service("Tethys.Unknown.v1").is_none());
    }

    #[test]
    fn test_service_order_preserved() {
        let ddo = sample_ddo();
        let json = ddo.to_json().unwrap();
        let parsed = DDO::from_json(&json).unwrap();
        assert_eq!(parsed.service[0].service_type, SERVICE_TYPE_META);
        assert_eq!(parsed.service[1].service_type, SERVICE_TYPE_INVOKE);
    }

    #[test]
    fn test_service_attributes_carried_through() {
        let json = r#"{
            "id": "did:tethys:abc123",
            "service": [{
                "type": "Tethys.Invoke.v1",
                "serviceEndpoint": "http://localhost:8080/api/invoke",
                "version": "1.2",
                "limits": {"max": 10}
            }]
        }"#;
        let ddo = DDO::from_json(json).unwrap();
        let service = ddo.find_service(SERVICE_TYPE_INVOKE).unwrap();
        assert_eq!(service.attributes["version"], "1.2");
        assert_eq!(service.attributes["limits"]["max"], 10);

        let reparsed = DDO::from_json(&ddo.to_json().unwrap()).unwrap();
        assert_eq!(reparsed.service, ddo.service);
    }

    #[test]
    fn test_from_source_normalization() {
        let ddo = sample_ddo();
        let text = ddo.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let from_text = DDO::from_source(text.as_str()).unwrap();
        let from_value = DDO::from_source(value).unwrap();
        let from_doc = DDO::from_source(ddo.clone()).unwrap();

        assert_eq!(from_text.id, ddo.id);
        assert_eq!(from_value.id, ddo.id);
        assert_eq!(from_doc, ddo);
    }

    #[test]
    fn test_document_hash_stable() {
        let ddo = sample_ddo();
        assert_eq!(ddo.hash().unwrap(), ddo.hash().unwrap());
    }
}
