// Pause gate
//
// Two states, Active and Paused, starting Active.
// Active -> Paused via pause, Paused -> Active via unpause, both owner-only.
// A same-state transition is an error, never a silent no-op:
// - pause while Paused fails with EnforcedPause
// - unpause while Active fails with ExpectedPause

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::crypto::Principal;
use crate::event::ContractEvent;

use super::error::{AccessError, AccessResult};
use super::ownable::AuthorityGuard;

/// State of the pause gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseState {
    #[default]
    Active,
    Paused,
}

/// Global pause switch gating mutating operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PauseGate {
    state: PauseState,
}

impl PauseGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PauseState {
        self.state
    }

    pub fn paused(&self) -> bool {
        self.state == PauseState::Paused
    }

    /// Guard used by mutating operations
    pub fn require_not_paused(&self) -> AccessResult<()> {
        if self.paused() {
            debug!("Pausable: contract is paused");
            return Err(AccessError::EnforcedPause);
        }
        Ok(())
    }

    /// Guard used by operations only valid while paused
    pub fn require_paused(&self) -> AccessResult<()> {
        if !self.paused() {
            debug!("Pausable: expected contract to be paused");
            return Err(AccessError::ExpectedPause);
        }
        Ok(())
    }

    /// Move from Active to Paused
    ///
    /// Requires `caller` to be the owner (checked first) and the gate to be
    /// Active. Returns the `Paused` event to publish.
    pub fn pause(
        &mut self,
        authority: &AuthorityGuard,
        caller: &Principal,
    ) -> AccessResult<ContractEvent> {
        authority.require_owner(caller)?;
        self.require_not_paused()?;

        self.state = PauseState::Paused;
        info!("Pausable: contract paused by {}", caller);

        Ok(ContractEvent::Paused { account: *caller })
    }

    /// Move from Paused to Active
    ///
    /// Requires `caller` to be the owner (checked first) and the gate to be
    /// Paused. Returns the `Unpaused` event to publish.
    pub fn unpause(
        &mut self,
        authority: &AuthorityGuard,
        caller: &Principal,
    ) -> AccessResult<ContractEvent> {
        authority.require_owner(caller)?;
        self.require_paused()?;

        self.state = PauseState::Active;
        info!("Pausable: contract unpaused by {}", caller);

        Ok(ContractEvent::Unpaused { account: *caller })
    }
}
