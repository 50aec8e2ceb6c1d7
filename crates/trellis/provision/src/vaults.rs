//! Vault provisioning
//!
//! The provisioner guarantees that every asset the workflow needs has a
//! vault in the account's store and a receiver capability published at
//! the path derived from the asset name. The check -> create-if-absent
//! -> re-check -> capability ordering tolerates partial prior runs: a
//! vault left behind by an earlier failed attempt is reused, and its
//! capability is republished rather than duplicated.

use crate::error::{DeployError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};
use trellis_store::{Capability, CapabilityAccess, CapabilityTarget, Resource, UnitOfWork, Vault};
use trellis_types::{PublicPath, StoragePath};

/// One entry of the caller-supplied vault mapping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VaultSetup {
    /// Asset name, e.g. `FLOW`
    pub asset: String,

    /// Storage path identifier the vault lives at
    pub storage_path_id: String,

    /// Asset type identifier, required for non-native assets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type_id: Option<String>,
}

impl VaultSetup {
    /// Setup entry for the native asset.
    pub fn native(asset: impl Into<String>, storage_path_id: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            storage_path_id: storage_path_id.into(),
            asset_type_id: None,
        }
    }

    /// Setup entry for a typed, non-native asset.
    pub fn typed(
        asset: impl Into<String>,
        storage_path_id: impl Into<String>,
        asset_type_id: impl Into<String>,
    ) -> Self {
        Self {
            asset: asset.into(),
            storage_path_id: storage_path_id.into(),
            asset_type_id: Some(asset_type_id.into()),
        }
    }
}

type VaultFactory = Box<dyn Fn() -> Vault + Send + Sync>;

/// Registered-factory table resolving asset type identifiers to vault
/// constructors.
///
/// Populated at startup; an identifier with no registered factory is an
/// explicit error, never a reflective lookup. The native asset is
/// special-cased with the dedicated empty-vault constructor and needs no
/// type identifier.
pub struct AssetCatalog {
    native: String,
    factories: HashMap<String, VaultFactory>,
}

impl AssetCatalog {
    pub fn new(native_asset: impl Into<String>) -> Self {
        Self {
            native: native_asset.into(),
            factories: HashMap::new(),
        }
    }

    pub fn native_asset(&self) -> &str {
        &self.native
    }

    /// Register a constructor for an asset type identifier.
    pub fn register(
        &mut self,
        type_id: impl Into<String>,
        factory: impl Fn() -> Vault + Send + Sync + 'static,
    ) {
        self.factories.insert(type_id.into(), Box::new(factory));
    }

    fn resolve(&self, type_id: &str) -> Option<&VaultFactory> {
        self.factories.get(type_id)
    }
}

/// Provisions vaults and their receiver capabilities.
pub struct VaultProvisioner<'a> {
    catalog: &'a AssetCatalog,
    access: CapabilityAccess,
}

impl<'a> VaultProvisioner<'a> {
    pub fn new(catalog: &'a AssetCatalog) -> Self {
        Self {
            catalog,
            access: CapabilityAccess::Public,
        }
    }

    pub fn with_access(catalog: &'a AssetCatalog, access: CapabilityAccess) -> Self {
        Self { catalog, access }
    }

    /// Provision every entry of the caller's vault mapping.
    pub fn ensure_all(&self, unit: &mut UnitOfWork, setups: &[VaultSetup]) -> Result<()> {
        for setup in setups {
            self.ensure(unit, setup)?;
        }
        Ok(())
    }

    /// Ensure one asset's vault exists and its capability is published.
    pub fn ensure(&self, unit: &mut UnitOfWork, setup: &VaultSetup) -> Result<()> {
        let path = StoragePath::parse(&setup.storage_path_id)?;

        if unit.resource_exists(&path) {
            info!(account = %unit.account(), asset = %setup.asset, %path, "vault already present");
        } else {
            let vault = self.construct(setup)?;
            unit.save_resource(path.clone(), Resource::Vault(vault))?;
            info!(account = %unit.account(), asset = %setup.asset, %path, "vault created");
        }

        // The vault must be visible now, whether this run created it or
        // an earlier one did.
        if !unit.resource_exists(&path) {
            return Err(DeployError::VaultMissing(path));
        }

        let public = PublicPath::receiver_for(&setup.asset)?;
        let capability = Capability::issue(path, CapabilityTarget::Vault, self.access);
        if unit.capability_at(&public).is_some() {
            unit.unpublish(&public)?;
            debug!(account = %unit.account(), asset = %setup.asset, %public, "stale capability unpublished");
        }
        unit.publish(public, capability)?;

        Ok(())
    }

    fn construct(&self, setup: &VaultSetup) -> Result<Vault> {
        if setup.asset == self.catalog.native_asset() {
            return Ok(Vault::empty(setup.asset.clone()));
        }
        let type_id = setup
            .asset_type_id
            .as_deref()
            .ok_or_else(|| DeployError::MissingAssetType(setup.asset.clone()))?;
        let factory = self
            .catalog
            .resolve(type_id)
            .ok_or_else(|| DeployError::UnknownAssetType(type_id.to_string()))?;
        Ok(factory())
    }
}
