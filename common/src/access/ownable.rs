// Single owner authority
// Exactly one non-zero owner exists at any time. Only the current owner
// can hand the authority over, and never to the zero principal.

use log::{debug, info, warn};
use serde::Serialize;

use crate::crypto::Principal;
use crate::event::ContractEvent;

use super::error::{AccessError, AccessResult};

/// Tracks the owner principal of a controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorityGuard {
    owner: Principal,
}

impl AuthorityGuard {
    /// Create the guard with its initial owner
    ///
    /// Fails with `InvalidArgument` for the zero principal.
    pub fn new(initial_owner: Principal) -> AccessResult<Self> {
        if initial_owner.is_zero() {
            warn!("Ownable: rejected zero principal as initial owner");
            return Err(AccessError::InvalidArgument(initial_owner));
        }

        Ok(Self {
            owner: initial_owner,
        })
    }

    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    pub fn is_owner(&self, caller: &Principal) -> bool {
        self.owner == *caller
    }

    /// Check that `caller` is the current owner, no side effect
    pub fn require_owner(&self, caller: &Principal) -> AccessResult<()> {
        if !self.is_owner(caller) {
            debug!("Ownable: unauthorized caller {}", caller);
            return Err(AccessError::Unauthorized(*caller));
        }
        Ok(())
    }

    /// Hand ownership over to `new_owner`
    ///
    /// Authorization is checked before the argument, so a non-owner always
    /// gets `Unauthorized` whatever it passes.
    ///
    /// # Returns
    /// - `Ok(ContractEvent::OwnershipTransferred)`: the event to publish
    /// - `Err(AccessError::Unauthorized)`: caller is not the owner
    /// - `Err(AccessError::InvalidArgument)`: `new_owner` is the zero principal
    pub fn transfer_ownership(
        &mut self,
        caller: &Principal,
        new_owner: Principal,
    ) -> AccessResult<ContractEvent> {
        self.require_owner(caller)?;

        if new_owner.is_zero() {
            warn!("Ownable: new owner cannot be the zero principal");
            return Err(AccessError::InvalidArgument(new_owner));
        }

        let previous_owner = std::mem::replace(&mut self.owner, new_owner);
        info!(
            "Ownable: ownership transferred from {} to {}",
            previous_owner, new_owner
        );

        Ok(ContractEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_owner() {
        let alice = Principal::from_seed("alice");
        let guard = AuthorityGuard::new(alice).unwrap();
        assert_eq!(guard.owner(), &alice);
        assert!(guard.is_owner(&alice));
        assert!(guard.require_owner(&alice).is_ok());
    }

    #[test]
    fn test_new_rejects_zero_owner() {
        let result = AuthorityGuard::new(Principal::zero());
        assert_eq!(result, Err(AccessError::InvalidArgument(Principal::zero())));
    }

    #[test]
    fn test_require_owner_reports_caller() {
        let alice = Principal::from_seed("alice");
        let bob = Principal::from_seed("bob");
        let guard = AuthorityGuard::new(alice).unwrap();

        assert_eq!(guard.require_owner(&bob), Err(AccessError::Unauthorized(bob)));
    }

    #[test]
    fn test_transfer_ownership() {
        let alice = Principal::from_seed("alice");
        let bob = Principal::from_seed("bob");
        let mut guard = AuthorityGuard::new(alice).unwrap();

        let event = guard.transfer_ownership(&alice, bob).unwrap();
        assert_eq!(
            event,
            ContractEvent::OwnershipTransferred {
                previous_owner: alice,
                new_owner: bob,
            }
        );
        assert_eq!(guard.owner(), &bob);

        // Old owner lost its authority
        assert_eq!(
            guard.transfer_ownership(&alice, alice),
            Err(AccessError::Unauthorized(alice))
        );
    }

    #[test]
    fn test_transfer_to_zero_fails() {
        let alice = Principal::from_seed("alice");
        let mut guard = AuthorityGuard::new(alice).unwrap();

        let result = guard.transfer_ownership(&alice, Principal::zero());
        assert_eq!(result, Err(AccessError::InvalidArgument(Principal::zero())));
        assert_eq!(guard.owner(), &alice);
    }

    #[test]
    fn test_non_owner_transfer_to_zero_is_unauthorized() {
        let alice = Principal::from_seed("alice");
        let bob = Principal::from_seed("bob");
        let mut guard = AuthorityGuard::new(alice).unwrap();

        let result = guard.transfer_ownership(&bob, Principal::zero());
        assert_eq!(result, Err(AccessError::Unauthorized(bob)));
    }
}
