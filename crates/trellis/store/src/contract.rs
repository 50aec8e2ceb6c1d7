//! Installed contracts

use serde::{Deserialize, Serialize};
use trellis_types::ContractName;

/// An executable code unit installed into an account.
///
/// Keyed by `(account, name)`; once installed under a name, a second
/// install under the same name fails. There is no implicit upgrade path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstalledContract {
    pub name: ContractName,

    /// Opaque executable payload
    pub code: Vec<u8>,

    pub installed_at: chrono::DateTime<chrono::Utc>,
}

impl InstalledContract {
    pub fn new(name: ContractName, code: impl Into<Vec<u8>>) -> Self {
        Self {
            name,
            code: code.into(),
            installed_at: chrono::Utc::now(),
        }
    }
}
