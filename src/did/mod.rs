//! DID helpers for parsing, formatting and canonicalizing agent identifiers.
//!
//! An identifier may reference an agent (`did:<method>:<id>`) or an asset
//! published by that agent (`did:<method>:<id>/<asset_id>`). The canonical
//! form always denotes the agent.

use crate::core::{Error, Result};

/// DID method used for identifiers minted by this SDK.
pub const DID_METHOD: &str = "tethys";

struct DidParts<'a> {
    method: &'a str,
    id: &'a str,
    asset_id: Option<&'a str>,
}

fn parse_parts(did: &str) -> Result<DidParts<'_>> {
    let rest = did
        .strip_prefix("did:")
        .ok_or_else(|| Error::InvalidDID(format!("'{did}' does not start with 'did:'")))?;

    let (method, rest) = rest
        .split_once(':')
        .ok_or_else(|| Error::InvalidDID(format!("'{did}' has no method separator")))?;
    if method.is_empty() || !method.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
        return Err(Error::InvalidDID(format!("'{did}' has an invalid method")));
    }

    let (id, asset_id) = match rest.split_once('/') {
        Some((id, asset)) => (id, Some(asset)),
        None => (rest, None),
    };
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidDID(format!("'{did}' has an invalid id part")));
    }
    if let Some(asset) = asset_id {
        if asset.is_empty() {
            return Err(Error::InvalidDID(format!("'{did}' has an empty asset part")));
        }
    }

    Ok(DidParts { method, id, asset_id })
}

/// Check whether a string is a well-formed DID.
pub fn is_did(value: &str) -> bool {
    parse_parts(value).is_ok()
}

/// Extract the bare id from a DID, dropping the method and any asset part.
pub fn did_to_id(did: &str) -> Result<String> {
    Ok(parse_parts(did)?.id.to_string())
}

/// Format a bare id as a DID under this SDK's method.
pub fn id_to_did(id: &str) -> String {
    format!("did:{DID_METHOD}:{id}")
}

/// Strip any asset part from a DID, keeping its method.
///
/// The result names the publishing agent itself.
pub fn canonical_agent_did(did: &str) -> Result<String> {
    let parts = parse_parts(did)?;
    Ok(format!("did:{}:{}", parts.method, parts.id))
}

/// Extract the asset id from an asset-scoped DID, if one is present.
pub fn did_to_asset_id(did: &str) -> Result<Option<String>> {
    Ok(parse_parts(did)?.asset_id.map(str::to_string))
}

/// Build an asset-scoped DID under an agent DID.
pub fn asset_did(agent_did: &str, asset_id: &str) -> Result<String> {
    let canonical = canonical_agent_did(agent_did)?;
    Ok(format!("{canonical}/{asset_id}"))
}

/// Generate a random agent DID under this SDK's method.
pub fn random_did() -> String {
    id_to_did(&uuid::Uuid::new_v4().simple().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_did() {
        assert!(is_did("did:tethys:abc123"));
        assert!(is_did("did:op:abc123/asset99"));
        assert!(!is_did("abc123"));
        assert!(!is_did("did:tethys:"));
        assert!(!is_did("did:UPPER:abc123"));
        assert!(!is_did("market"));
    }

    #[test]
    fn test_did_to_id() {
        assert_eq!(did_to_id("did:op:abc123").unwrap(), "abc123");
        assert_eq!(did_to_id("did:op:abc123/asset99").unwrap(), "abc123");
        assert!(did_to_id("not-a-did").is_err());
    }

    #[test]
    fn test_id_to_did() {
        assert_eq!(id_to_did("abc123"), "did:tethys:abc123");
    }

    #[test]
    fn test_canonical_agent_did_strips_asset_part() {
        assert_eq!(
            canonical_agent_did("did:op:abc123/asset99").unwrap(),
            "did:op:abc123"
        );
    }

    #[test]
    fn test_canonical_agent_did_keeps_method() {
        assert_eq!(
            canonical_agent_did("did:op:abc123").unwrap(),
            "did:op:abc123"
        );
    }

    #[test]
    fn test_did_to_asset_id() {
        assert_eq!(
            did_to_asset_id("did:op:abc123/asset99").unwrap(),
            Some("asset99".to_string())
        );
        assert_eq!(did_to_asset_id("did:op:abc123").unwrap(), None);
    }

    #[test]
    fn test_asset_did() {
        assert_eq!(
            asset_did("did:op:abc123", "asset99").unwrap(),
            "did:op:abc123/asset99"
        );
        assert_eq!(
            asset_did("did:op:abc123/other", "asset99").unwrap(),
            "did:op:abc123/asset99"
        );
    }

    #[test]
    fn test_empty_asset_part_rejected() {
        assert!(did_to_asset_id("did:op:abc123/").is_err());
    }

    #[test]
    fn test_random_did() {
        let did = random_did();
        assert!(is_did(&did));
        assert!(did.starts_with("did:tethys:"));
        assert_ne!(random_did(), random_did());
    }
}
