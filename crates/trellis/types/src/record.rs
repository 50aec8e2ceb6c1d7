//! Workflow registry records

use crate::ids::{AccountAddress, ContractName, WorkflowId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caller-supplied attributes for a workflow registration.
///
/// Everything the registry needs to mint a [`WorkflowRecord`]; the
/// identifier and timestamp are assigned by the registry itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowAttributes {
    /// Human-readable workflow name
    pub name: String,

    /// Category the workflow is listed under
    pub category: String,

    /// Free-form description
    pub description: String,

    /// Content-addressed pointer to the workflow source
    pub content_ref: String,

    /// Whether the workflow appears in public listings
    pub listed: bool,

    /// Account that owns the workflow
    pub creator: AccountAddress,

    /// Contract installed for this workflow on the creator account
    pub contract_name: ContractName,

    /// Opaque metadata payload, stored verbatim
    pub metadata: serde_json::Value,

    /// Whether the metadata declares the workflow schedulable
    pub schedulable: bool,

    /// Parent workflow for derivative/cloned workflows; None for originals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<WorkflowId>,

    /// Opaque capability set, passed through to the record unmodified
    pub capabilities: HashMap<String, String>,

    /// Optional listing price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Optional image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,

    /// Optional default configuration payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_config: Option<serde_json::Value>,
}

/// A registered workflow.
///
/// The single source of truth correlating an installed contract to
/// registry metadata. The identifier is unique and immutable once
/// assigned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowRecord {
    /// Registry-assigned identifier
    pub id: WorkflowId,

    pub name: String,
    pub category: String,
    pub description: String,
    pub content_ref: String,
    pub listed: bool,
    pub creator: AccountAddress,
    pub contract_name: ContractName,
    pub metadata: serde_json::Value,
    pub schedulable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<WorkflowId>,

    pub capabilities: HashMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_config: Option<serde_json::Value>,

    /// When the record was created
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl WorkflowRecord {
    /// Mint a record from caller attributes and a registry-assigned id.
    pub fn from_attributes(id: WorkflowId, attrs: WorkflowAttributes) -> Self {
        Self {
            id,
            name: attrs.name,
            category: attrs.category,
            description: attrs.description,
            content_ref: attrs.content_ref,
            listed: attrs.listed,
            creator: attrs.creator,
            contract_name: attrs.contract_name,
            metadata: attrs.metadata,
            schedulable: attrs.schedulable,
            parent: attrs.parent,
            capabilities: attrs.capabilities,
            price: attrs.price,
            image_ref: attrs.image_ref,
            default_config: attrs.default_config,
            created_at: chrono::Utc::now(),
        }
    }
}
