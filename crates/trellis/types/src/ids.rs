//! Identifier newtypes shared across the Trellis crates

use serde::{Deserialize, Serialize};

/// Address of an account; the scope of one resource store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress(pub String);

impl AccountAddress {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry-assigned workflow identifier.
///
/// Monotonic and unique across all accounts; assigned only by the
/// registry, never by callers. Callers must not assume values are
/// sequential - aborted runs may burn identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkflowId(pub u64);

impl std::fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of an installed contract, unique per account.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractName(pub String);

impl ContractName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl std::fmt::Display for ContractName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips() {
        assert_eq!(AccountAddress::new("0xf8d6e0586b0a20c7").to_string(), "0xf8d6e0586b0a20c7");
        assert_eq!(WorkflowId(42).to_string(), "42");
        assert_eq!(ContractName::new("WF1").to_string(), "WF1");
    }
}
