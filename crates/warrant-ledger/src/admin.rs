//! Administrator authority
//!
//! Gates who may install permissions. Exactly one administrator exists at a
//! time; authority moves with an explicit, immediate transfer and there is
//! no pending-acceptance step at this layer.

use parking_lot::RwLock;
use tracing::info;
use warrant_core::{Principal, Result, WarrantError};

/// Holds the current administrator identity and authorizes admin-only
/// calls.
///
/// The initial administrator is an explicit constructor argument, so a
/// consuming component can be registered as its own gatekeeper after it
/// exists: construct the ledger first, then transfer authority to the
/// component.
#[derive(Debug)]
pub struct AdminAuthority {
    current: RwLock<Principal>,
}

impl AdminAuthority {
    /// Create the authority with its initial administrator.
    pub fn new(initial_admin: Principal) -> Self {
        Self {
            current: RwLock::new(initial_admin),
        }
    }

    /// The current administrator.
    pub fn current(&self) -> Principal {
        self.current.read().clone()
    }

    /// True when `principal` holds administrative authority right now.
    pub fn is_admin(&self, principal: &Principal) -> bool {
        *self.current.read() == *principal
    }

    /// Transfer authority to `new_admin`.
    ///
    /// Only the current administrator may transfer; anyone else gets
    /// [`WarrantError::Unauthorized`] and the authority is unchanged. The
    /// change takes effect immediately.
    pub fn transfer(&self, by: &Principal, new_admin: Principal) -> Result<()> {
        let mut current = self.current.write();
        if *current != *by {
            return Err(WarrantError::unauthorized(by.clone()));
        }
        info!("admin authority transferred from {} to {}", *current, new_admin);
        *current = new_admin;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn initial_admin_is_current() {
        let authority = AdminAuthority::new(Principal::new("deployer"));
        assert_eq!(authority.current(), Principal::new("deployer"));
        assert!(authority.is_admin(&Principal::new("deployer")));
        assert!(!authority.is_admin(&Principal::new("client1")));
    }

    #[test]
    fn admin_can_transfer_and_loses_authority() {
        let deployer = Principal::new("deployer");
        let component = Principal::new("component");
        let authority = AdminAuthority::new(deployer.clone());

        authority.transfer(&deployer, component.clone()).unwrap();

        assert_eq!(authority.current(), component);
        assert!(!authority.is_admin(&deployer));
        // The old admin cannot take authority back.
        assert_matches!(
            authority.transfer(&deployer, deployer.clone()),
            Err(WarrantError::Unauthorized { .. })
        );
    }

    #[test]
    fn non_admin_transfer_is_rejected_without_state_change() {
        let deployer = Principal::new("deployer");
        let authority = AdminAuthority::new(deployer.clone());

        let result = authority.transfer(&Principal::new("client1"), Principal::new("client1"));

        assert_matches!(result, Err(WarrantError::Unauthorized { principal }) => {
            assert_eq!(principal, Principal::new("client1"));
        });
        assert_eq!(authority.current(), deployer);
    }
}
