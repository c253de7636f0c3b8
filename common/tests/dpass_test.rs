#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
// File: common/tests/dpass_test.rs
//
// Dpass (fungible) controller integration tests
//
// Covers the deployment and pausable behaviour of the Dpass contract:
// - Deployment sets the owner and starts unpaused
// - Pause / unpause restricted to the owner
// - Re-pause and re-unpause are rejected with their named errors
// - Mint is gated by the pause switch
// - Ownership transfer moves the pause authority

use dpass_common::{
    access::AccessError,
    controller::{ControllerError, Dpass},
    crypto::Principal,
    event::{AssetValue, ContractEvent},
};

const INITIAL_SUPPLY: u128 = 10;

struct Fixture {
    dpass: Dpass,
    owner: Principal,
    other_account: Principal,
}

fn deploy_dpass_fixture() -> Fixture {
    let owner = Principal::random();
    let other_account = Principal::random();
    let dpass = Dpass::deploy_fungible(owner, INITIAL_SUPPLY).unwrap();

    Fixture {
        dpass,
        owner,
        other_account,
    }
}

fn unauthorized(account: Principal) -> ControllerError {
    ControllerError::Access(AccessError::Unauthorized(account))
}

// ============================================================================
// Deployment
// ============================================================================

#[test]
fn test_should_set_the_right_owner() {
    let Fixture { dpass, owner, .. } = deploy_dpass_fixture();
    assert_eq!(dpass.owner(), &owner);
}

#[test]
fn test_should_be_initially_unpaused() {
    let Fixture { dpass, .. } = deploy_dpass_fixture();
    assert!(!dpass.paused());
}

#[test]
fn test_initial_supply_goes_to_owner() {
    let Fixture { dpass, owner, .. } = deploy_dpass_fixture();
    assert_eq!(dpass.balance_of(&owner), INITIAL_SUPPLY);
    assert_eq!(dpass.total_supply(), INITIAL_SUPPLY);
}

// ============================================================================
// Pausable
// ============================================================================

#[test]
fn test_should_be_paused_by_owner() {
    let Fixture {
        mut dpass, owner, ..
    } = deploy_dpass_fixture();

    dpass.pause(&owner).unwrap();
    assert!(dpass.paused());
    assert_eq!(
        dpass.events().last().unwrap().event,
        ContractEvent::Paused { account: owner }
    );
}

#[test]
fn test_should_be_paused_only_by_owner() {
    let Fixture {
        mut dpass,
        other_account,
        ..
    } = deploy_dpass_fixture();

    let err = dpass.pause(&other_account).unwrap_err();
    assert_eq!(err, unauthorized(other_account));
    assert_eq!(err.name(), "OwnableUnauthorizedAccount");
    assert!(!dpass.paused());
}

#[test]
fn test_should_be_unpaused_by_owner() {
    let Fixture {
        mut dpass, owner, ..
    } = deploy_dpass_fixture();

    dpass.pause(&owner).unwrap();
    dpass.unpause(&owner).unwrap();
    assert!(!dpass.paused());
    assert_eq!(
        dpass.events().last().unwrap().event,
        ContractEvent::Unpaused { account: owner }
    );
}

#[test]
fn test_should_be_unpaused_only_by_owner() {
    let Fixture {
        mut dpass,
        owner,
        other_account,
    } = deploy_dpass_fixture();

    dpass.pause(&owner).unwrap();
    let err = dpass.unpause(&other_account).unwrap_err();
    assert_eq!(err, unauthorized(other_account));
    assert!(dpass.paused());
}

#[test]
fn test_should_fail_when_re_pause() {
    let Fixture {
        mut dpass, owner, ..
    } = deploy_dpass_fixture();

    dpass.pause(&owner).unwrap();
    let events_before = dpass.events().len();

    let err = dpass.pause(&owner).unwrap_err();
    assert_eq!(err.name(), "EnforcedPause");
    assert!(dpass.paused());
    assert_eq!(dpass.events().len(), events_before);
}

#[test]
fn test_should_fail_when_re_unpaused() {
    let Fixture {
        mut dpass, owner, ..
    } = deploy_dpass_fixture();

    let err = dpass.unpause(&owner).unwrap_err();
    assert_eq!(err, ControllerError::Access(AccessError::ExpectedPause));
    assert_eq!(err.name(), "ExpectedPause");
    assert!(!dpass.paused());
}

#[test]
fn test_unpause_twice_fails_second_time() {
    let Fixture {
        mut dpass, owner, ..
    } = deploy_dpass_fixture();

    dpass.pause(&owner).unwrap();
    dpass.unpause(&owner).unwrap();
    assert_eq!(dpass.unpause(&owner).unwrap_err().name(), "ExpectedPause");
}

// ============================================================================
// Mint gate
// ============================================================================

#[test]
fn test_mint_should_fail_when_paused() {
    let Fixture {
        mut dpass,
        owner,
        other_account,
    } = deploy_dpass_fixture();

    dpass.pause(&owner).unwrap();
    let err = dpass.mint(&owner, &other_account, 5).unwrap_err();
    assert_eq!(err, ControllerError::Access(AccessError::EnforcedPause));
    assert_eq!(dpass.balance_of(&other_account), 0);
    assert_eq!(dpass.total_supply(), INITIAL_SUPPLY);
}

#[test]
fn test_mint_resumes_after_unpause() {
    let Fixture {
        mut dpass,
        owner,
        other_account,
    } = deploy_dpass_fixture();

    dpass.pause(&owner).unwrap();
    dpass.unpause(&owner).unwrap();
    dpass.mint(&owner, &other_account, 5).unwrap();

    assert_eq!(dpass.balance_of(&other_account), 5);
    assert_eq!(
        dpass.events().last().unwrap().event,
        ContractEvent::Transfer {
            from: Principal::zero(),
            to: other_account,
            value: AssetValue::Amount(5),
        }
    );
}

// ============================================================================
// Ownership
// ============================================================================

#[test]
fn test_transfer_ownership_moves_pause_authority() {
    let Fixture {
        mut dpass,
        owner,
        other_account,
    } = deploy_dpass_fixture();

    dpass.transfer_ownership(&owner, other_account).unwrap();
    assert_eq!(dpass.owner(), &other_account);
    assert_eq!(
        dpass.events().last().unwrap().event,
        ContractEvent::OwnershipTransferred {
            previous_owner: owner,
            new_owner: other_account,
        }
    );

    assert_eq!(dpass.pause(&owner).unwrap_err(), unauthorized(owner));
    dpass.pause(&other_account).unwrap();
    assert!(dpass.paused());
}

#[test]
fn test_transfer_ownership_only_by_owner() {
    let Fixture {
        mut dpass,
        owner,
        other_account,
    } = deploy_dpass_fixture();

    let err = dpass
        .transfer_ownership(&other_account, other_account)
        .unwrap_err();
    assert_eq!(err, unauthorized(other_account));
    assert_eq!(dpass.owner(), &owner);
}

#[test]
fn test_transfer_ownership_to_zero_fails() {
    let Fixture {
        mut dpass, owner, ..
    } = deploy_dpass_fixture();
    let events_before = dpass.events().len();

    let err = dpass.transfer_ownership(&owner, Principal::zero()).unwrap_err();
    assert_eq!(err.name(), "OwnableInvalidOwner");
    assert_eq!(dpass.owner(), &owner);
    assert_eq!(dpass.events().len(), events_before);
}

#[test]
fn test_ownership_transfer_allowed_while_paused() {
    let Fixture {
        mut dpass,
        owner,
        other_account,
    } = deploy_dpass_fixture();

    dpass.pause(&owner).unwrap();
    dpass.transfer_ownership(&owner, other_account).unwrap();
    dpass.unpause(&other_account).unwrap();
    assert!(!dpass.paused());
}
