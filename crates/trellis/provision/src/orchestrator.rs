//! Deployment orchestrator
//!
//! Sequences manager bootstrap, contract install, vault provisioning,
//! registration and optional schedule enrollment as one unit of work
//! against one account.

use crate::bootstrap;
use crate::error::{DeployError, Result};
use crate::installer;
use crate::vaults::{AssetCatalog, VaultProvisioner, VaultSetup};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use trellis_registry::WorkflowRegistry;
use trellis_scheduler::{ScheduleError, Scheduler};
use trellis_store::{AccountHandle, AccountStore, CapabilityAccess, ManagerRef};
use trellis_types::{ContractName, WorkflowAttributes, WorkflowId};

/// How the orchestrator treats manager bootstrap and duplicate installs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeployMode {
    /// Manager bootstrap is unconditional and idempotent; installing an
    /// already-taken contract name is fatal.
    #[default]
    Strict,

    /// Compatibility with the older transaction shape: manager bootstrap
    /// only happens when the request's `init_manager` flag is set, and a
    /// duplicate contract install is skipped with a warning instead of
    /// aborting.
    Legacy,
}

/// Orchestrator configuration.
#[derive(Clone, Copy, Debug)]
pub struct OrchestratorConfig {
    pub mode: DeployMode,

    /// Access level of the vault capabilities the run publishes.
    pub vault_access: CapabilityAccess,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            mode: DeployMode::Strict,
            vault_access: CapabilityAccess::Public,
        }
    }
}

/// Everything one deployment invocation needs, all caller-supplied.
#[derive(Clone, Debug)]
pub struct DeployRequest {
    /// Name to install the contract under
    pub contract_name: ContractName,

    /// Opaque executable payload
    pub contract_code: Vec<u8>,

    // Workflow descriptive fields
    pub name: String,
    pub category: String,
    pub description: String,
    pub content_ref: String,
    pub listed: bool,
    pub metadata: serde_json::Value,
    pub schedulable: bool,
    pub parent: Option<WorkflowId>,

    /// Vault mapping: one entry per asset the workflow needs
    pub vaults: Vec<VaultSetup>,

    /// Opaque capability set, passed through to the registry unmodified
    pub capabilities: HashMap<String, String>,

    /// Recurrence interval in seconds; enrollment happens iff this is
    /// supplied and the workflow is schedulable
    pub schedule_interval: Option<u64>,

    // Extended-variant fields
    pub price: Option<f64>,
    pub image_ref: Option<String>,
    pub default_config: Option<serde_json::Value>,

    /// Honored only in [`DeployMode::Legacy`]
    pub init_manager: bool,
}

impl DeployRequest {
    /// A minimal request; descriptive fields default to empty.
    pub fn new(contract_name: ContractName, contract_code: impl Into<Vec<u8>>) -> Self {
        Self {
            contract_name,
            contract_code: contract_code.into(),
            name: String::new(),
            category: String::new(),
            description: String::new(),
            content_ref: String::new(),
            listed: false,
            metadata: serde_json::Value::Null,
            schedulable: false,
            parent: None,
            vaults: Vec::new(),
            capabilities: HashMap::new(),
            schedule_interval: None,
            price: None,
            image_ref: None,
            default_config: None,
            init_manager: true,
        }
    }
}

/// Phases of one deployment run, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeployPhase {
    Start,
    ManagerReady,
    ContractInstalled,
    VaultsReady,
    Registered,
    Scheduled,
    Unscheduled,
    Done,
}

impl std::fmt::Display for DeployPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeployPhase::Start => "start",
            DeployPhase::ManagerReady => "manager-ready",
            DeployPhase::ContractInstalled => "contract-installed",
            DeployPhase::VaultsReady => "vaults-ready",
            DeployPhase::Registered => "registered",
            DeployPhase::Scheduled => "scheduled",
            DeployPhase::Unscheduled => "unscheduled",
            DeployPhase::Done => "done",
        };
        f.write_str(name)
    }
}

fn advance(from: DeployPhase, to: DeployPhase) -> DeployPhase {
    debug!(%from, %to, "deploy phase transition");
    to
}

/// Orchestrates per-account workflow deployment.
pub struct DeployOrchestrator {
    store: Arc<AccountStore>,
    registry: Arc<dyn WorkflowRegistry>,
    scheduler: Arc<dyn Scheduler>,
    catalog: AssetCatalog,
    config: OrchestratorConfig,
}

impl DeployOrchestrator {
    pub fn new(
        store: Arc<AccountStore>,
        registry: Arc<dyn WorkflowRegistry>,
        scheduler: Arc<dyn Scheduler>,
        catalog: AssetCatalog,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            store,
            registry,
            scheduler,
            catalog,
            config,
        }
    }

    /// Deploy a workflow onto an account.
    ///
    /// Runs the full phase ladder in one unit of work and returns the
    /// registry-assigned identifier, the only output callers should
    /// depend on. On any error the unit is discarded unapplied: post-run
    /// state equals pre-run state and the identical invocation may be
    /// retried.
    #[instrument(skip(self, request), fields(account = %account.address(), contract = %request.contract_name))]
    pub fn deploy(&self, account: &AccountHandle, request: DeployRequest) -> Result<WorkflowId> {
        // Scheduling inputs are validated before anything is staged so a
        // bad interval cannot surface after the unit has committed.
        let schedule = match (request.schedulable, request.schedule_interval) {
            (true, Some(0)) => return Err(DeployError::Schedule(ScheduleError::InvalidInterval)),
            (true, Some(secs)) => Some(secs),
            _ => None,
        };

        let phase = DeployPhase::Start;
        let mut unit = self.store.begin(account)?;

        // 1. Manager bootstrap
        let manager = match self.config.mode {
            DeployMode::Strict => bootstrap::ensure_manager(&mut unit)?,
            DeployMode::Legacy if request.init_manager => bootstrap::ensure_manager(&mut unit)?,
            DeployMode::Legacy => unit
                .manager_ref()
                .map_err(|_| DeployError::ManagerMissing(account.address().clone()))?,
        };
        let phase = advance(phase, DeployPhase::ManagerReady);

        // 2. Contract install
        let installed = match self.config.mode {
            DeployMode::Legacy if unit.contract_installed(&request.contract_name) => {
                warn!(contract = %request.contract_name, "contract already installed; skipping install");
                false
            }
            _ => {
                installer::install_contract(
                    &mut unit,
                    &request.contract_name,
                    &request.contract_code,
                )?;
                true
            }
        };
        debug!(installed, "contract install step finished");
        let phase = advance(phase, DeployPhase::ContractInstalled);

        // 3. Vault provisioning
        let provisioner = VaultProvisioner::with_access(&self.catalog, self.config.vault_access);
        provisioner.ensure_all(&mut unit, &request.vaults)?;
        let phase = advance(phase, DeployPhase::VaultsReady);

        // 4. Registration: reserve the identifier, record it in the
        //    manager, then publish the record. A failure anywhere before
        //    the commits burns the identifier and leaves no trace.
        let attrs = WorkflowAttributes {
            name: request.name,
            category: request.category,
            description: request.description,
            content_ref: request.content_ref,
            listed: request.listed,
            creator: account.address().clone(),
            contract_name: request.contract_name,
            metadata: request.metadata,
            schedulable: request.schedulable,
            parent: request.parent,
            capabilities: request.capabilities,
            price: request.price,
            image_ref: request.image_ref,
            default_config: request.default_config,
        };
        let reservation = self.registry.reserve(attrs)?;
        unit.record_workflow(reservation.id())?;
        let workflow = self.registry.commit(reservation)?;
        let phase = advance(phase, DeployPhase::Registered);

        unit.commit();

        // 5. Optional schedule enrollment; the no-op branch is explicit.
        let phase = if let Some(interval_secs) = schedule {
            self.schedule_workflow(&manager, workflow, interval_secs)?;
            advance(phase, DeployPhase::Scheduled)
        } else {
            info!(workflow = %workflow, "no schedule enrollment; workflow triggers manually");
            advance(phase, DeployPhase::Unscheduled)
        };

        let _ = advance(phase, DeployPhase::Done);
        info!(workflow = %workflow, "workflow deployment complete");
        Ok(workflow)
    }

    fn schedule_workflow(
        &self,
        manager: &ManagerRef,
        workflow: WorkflowId,
        interval_secs: u64,
    ) -> Result<()> {
        self.scheduler
            .enroll(workflow, interval_secs, manager.account())?;
        Ok(())
    }
}
