//! Logical storage and public paths
//!
//! A path identifier resolves iff it is non-empty ASCII alphanumeric or
//! underscore. Anything else is malformed input, which is fatal to the
//! unit of work that tried to resolve it - there is no fallback path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical storage path identifier for the per-account manager resource.
pub const MANAGER_STORAGE_ID: &str = "workflowManager";

/// Canonical public path identifier for the manager capability.
pub const MANAGER_PUBLIC_ID: &str = "workflowManager";

/// Path resolution errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Unresolvable storage path identifier: {0:?}")]
    UnresolvableStorage(String),

    #[error("Invalid public path identifier: {0:?}")]
    InvalidPublic(String),
}

fn identifier_is_valid(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Address of an owned resource inside one account's store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoragePath(String);

impl StoragePath {
    /// Resolve a caller-supplied identifier into a storage path.
    pub fn parse(id: &str) -> Result<Self, PathError> {
        if identifier_is_valid(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(PathError::UnresolvableStorage(id.to_string()))
        }
    }

    /// The canonical manager path.
    pub fn manager() -> Self {
        Self(MANAGER_STORAGE_ID.to_string())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoragePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/storage/{}", self.0)
    }
}

/// Address of a published capability, visible to all callers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicPath(String);

impl PublicPath {
    pub fn parse(id: &str) -> Result<Self, PathError> {
        if identifier_is_valid(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(PathError::InvalidPublic(id.to_string()))
        }
    }

    /// The canonical public path for the manager capability.
    pub fn manager() -> Self {
        Self(MANAGER_PUBLIC_ID.to_string())
    }

    /// Derive the receiver capability path for an asset.
    ///
    /// Deterministic per asset name, so a re-run republishes at the same
    /// address instead of accumulating entries.
    pub fn receiver_for(asset: &str) -> Result<Self, PathError> {
        let id = format!("{}Receiver", asset.to_ascii_lowercase());
        if identifier_is_valid(&id) {
            Ok(Self(id))
        } else {
            Err(PathError::InvalidPublic(id))
        }
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PublicPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/public/{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_identifiers() {
        assert!(StoragePath::parse("flowTokenVault").is_ok());
        assert!(StoragePath::parse("vault_2").is_ok());
        assert!(PublicPath::parse("flowReceiver").is_ok());
    }

    #[test]
    fn rejects_malformed_identifiers() {
        assert_eq!(
            StoragePath::parse(""),
            Err(PathError::UnresolvableStorage(String::new()))
        );
        assert!(StoragePath::parse("has space").is_err());
        assert!(StoragePath::parse("slash/path").is_err());
        assert!(PublicPath::parse("émile").is_err());
    }

    #[test]
    fn receiver_path_is_deterministic() {
        let a = PublicPath::receiver_for("FLOW").unwrap();
        let b = PublicPath::receiver_for("FLOW").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id(), "flowReceiver");
    }

    #[test]
    fn receiver_path_rejects_bad_asset_names() {
        assert!(PublicPath::receiver_for("no good").is_err());
    }
}
