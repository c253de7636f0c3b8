//! Asset controller
//!
//! Composes the ownership guard, the pause gate and an asset ledger into one
//! deployed contract instance. One controller exists per asset kind:
//! [`Dpass`] over a [`FungibleLedger`] and [`DpassNft`] over an [`NftLedger`].
//!
//! Every operation is all-or-nothing: guards run before any mutation, and
//! events are appended only once the operation has fully succeeded.

use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use crate::access::{AccessError, AuthorityGuard, PauseGate, PauseState};
use crate::asset::{AssetError, AssetKind, AssetPrimitive, FungibleLedger, NftLedger};
use crate::config::{DPASS_NAME, DPASS_NFT_NAME};
use crate::crypto::Principal;
use crate::event::{ContractEvent, EventLog, LoggedEvent};

/// Controller operation result type
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Error surfaced to callers of a controller
///
/// Access and asset failures pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

impl ControllerError {
    pub fn code(&self) -> u64 {
        match self {
            ControllerError::Access(e) => e.code(),
            ControllerError::Asset(e) => e.code(),
        }
    }

    /// External identifier, e.g. `EnforcedPause`
    pub fn name(&self) -> &'static str {
        match self {
            ControllerError::Access(e) => e.name(),
            ControllerError::Asset(e) => e.name(),
        }
    }
}

impl From<ControllerError> for u64 {
    fn from(err: ControllerError) -> u64 {
        err.code()
    }
}

/// A deployed asset contract
#[derive(Debug, Clone, Serialize)]
pub struct AssetController<P> {
    authority: AuthorityGuard,
    gate: PauseGate,
    primitive: P,
    events: EventLog,
}

/// Fungible Dpass contract
pub type Dpass = AssetController<FungibleLedger>;

/// Non-fungible DpassNFT contract
pub type DpassNft = AssetController<NftLedger>;

impl<P: AssetPrimitive> AssetController<P> {
    /// Deploy a controller owned by `initial_owner`, starting unpaused
    ///
    /// Emits `OwnershipTransferred` from the zero principal.
    /// Fails with `InvalidArgument` if `initial_owner` is the zero principal.
    pub fn deploy(initial_owner: Principal, primitive: P) -> ControllerResult<Self> {
        let authority = AuthorityGuard::new(initial_owner)?;

        let mut events = EventLog::new();
        events.push(ContractEvent::OwnershipTransferred {
            previous_owner: Principal::zero(),
            new_owner: initial_owner,
        });
        info!(
            "Deployed {} controller owned by {}",
            primitive.kind(),
            initial_owner
        );

        Ok(Self {
            authority,
            gate: PauseGate::new(),
            primitive,
            events,
        })
    }

    pub fn owner(&self) -> &Principal {
        self.authority.owner()
    }

    pub fn paused(&self) -> bool {
        self.gate.paused()
    }

    pub fn pause_state(&self) -> PauseState {
        self.gate.state()
    }

    pub fn kind(&self) -> AssetKind {
        self.primitive.kind()
    }

    /// Read access to the underlying ledger
    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    pub fn events(&self) -> &[LoggedEvent] {
        self.events.entries()
    }

    /// Hand the buffered events over to a subscriber
    pub fn take_events(&mut self) -> Vec<LoggedEvent> {
        self.events.drain()
    }

    /// Owner-only: Active -> Paused
    pub fn pause(&mut self, caller: &Principal) -> ControllerResult<()> {
        let event = self.gate.pause(&self.authority, caller)?;
        self.events.push(event);
        Ok(())
    }

    /// Owner-only: Paused -> Active
    pub fn unpause(&mut self, caller: &Principal) -> ControllerResult<()> {
        let event = self.gate.unpause(&self.authority, caller)?;
        self.events.push(event);
        Ok(())
    }

    /// Owner-only: hand the controller over to `new_owner`
    pub fn transfer_ownership(
        &mut self,
        caller: &Principal,
        new_owner: Principal,
    ) -> ControllerResult<()> {
        let event = self.authority.transfer_ownership(caller, new_owner)?;
        self.events.push(event);
        Ok(())
    }

    /// Mint through the ledger, gated by the pause switch
    ///
    /// The pause check runs first and its `EnforcedPause` is returned as is.
    /// Any other failure comes from the ledger.
    pub fn mint(
        &mut self,
        caller: &Principal,
        recipient: &Principal,
        args: P::MintArgs,
    ) -> ControllerResult<P::Receipt> {
        self.gate.require_not_paused()?;

        let (receipt, value) = self.primitive.mint(recipient, args)?;
        self.events.push(ContractEvent::Transfer {
            from: Principal::zero(),
            to: *recipient,
            value,
        });

        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "{} mint by {}: {} to {}",
                self.primitive.kind(),
                caller,
                value,
                recipient
            );
        }

        Ok(receipt)
    }
}

// ========================================
// Dpass (fungible)
// ========================================

impl AssetController<FungibleLedger> {
    /// Deploy a Dpass controller, minting `initial_supply` to the owner
    pub fn deploy_fungible(initial_owner: Principal, initial_supply: u128) -> ControllerResult<Self> {
        let mut controller = Self::deploy(initial_owner, FungibleLedger::new())?;
        if initial_supply > 0 {
            controller.mint(&initial_owner, &initial_owner, initial_supply)?;
        }
        debug!("{} initial supply: {}", DPASS_NAME, initial_supply);
        Ok(controller)
    }

    pub fn balance_of(&self, account: &Principal) -> u128 {
        self.primitive.balance_of(account)
    }

    pub fn total_supply(&self) -> u128 {
        self.primitive.total_supply()
    }
}

// ========================================
// DpassNFT (non-fungible)
// ========================================

impl AssetController<NftLedger> {
    /// Deploy a DpassNFT controller with an empty ledger
    pub fn deploy_nft(initial_owner: Principal) -> ControllerResult<Self> {
        let controller = Self::deploy(initial_owner, NftLedger::new())?;
        debug!("{} ready, next token id {}", DPASS_NFT_NAME, controller.primitive.next_token_id());
        Ok(controller)
    }

    /// Mint the next token to `to` and return its id
    pub fn safe_mint(&mut self, caller: &Principal, to: &Principal) -> ControllerResult<u64> {
        self.mint(caller, to, ())
    }

    pub fn owner_of(&self, token_id: u64) -> ControllerResult<Principal> {
        Ok(self.primitive.owner_of(token_id)?)
    }

    pub fn balance_of(&self, account: &Principal) -> u64 {
        self.primitive.balance_of(account)
    }

    pub fn total_supply(&self) -> u64 {
        self.primitive.total_supply()
    }
}
