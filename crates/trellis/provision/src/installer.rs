//! Contract installation

use crate::error::{DeployError, Result};
use tracing::info;
use trellis_store::{InstalledContract, StoreError, UnitOfWork};
use trellis_types::ContractName;

/// Install a contract into the account.
///
/// A name that is already taken on this account is a hard conflict; the
/// first installation stays untouched and the whole unit aborts.
pub fn install_contract(unit: &mut UnitOfWork, name: &ContractName, code: &[u8]) -> Result<()> {
    unit.install_contract(InstalledContract::new(name.clone(), code))
        .map_err(|err| match err {
            StoreError::ContractExists(name) => DeployError::ContractAlreadyInstalled {
                account: unit.account().clone(),
                name,
            },
            other => DeployError::Store(other),
        })?;
    info!(account = %unit.account(), contract = %name, "contract installed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_store::{AccountHandle, AccountStore};
    use trellis_types::AccountAddress;

    #[test]
    fn second_install_under_one_name_is_a_conflict() {
        let store = AccountStore::new();
        let handle = AccountHandle::owner(AccountAddress::new("0x01"));
        let name = ContractName::new("WF1");

        let mut unit = store.begin(&handle).unwrap();
        install_contract(&mut unit, &name, b"v1").unwrap();
        unit.commit();

        let mut unit = store.begin(&handle).unwrap();
        let err = install_contract(&mut unit, &name, b"v2").unwrap_err();
        assert!(matches!(err, DeployError::ContractAlreadyInstalled { .. }));
        drop(unit);

        assert_eq!(store.contract(handle.address(), &name).unwrap().code, b"v1");
    }

    #[test]
    fn installed_contract_is_queryable_later_in_the_same_unit() {
        let store = AccountStore::new();
        let handle = AccountHandle::owner(AccountAddress::new("0x01"));
        let name = ContractName::new("WF1");

        let mut unit = store.begin(&handle).unwrap();
        install_contract(&mut unit, &name, b"code").unwrap();
        assert!(unit.contract_installed(&name));
    }
}
