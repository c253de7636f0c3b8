// Asset primitives
// This module contains the ledgers the controllers delegate to.
//
// The controllers only need one mutating capability from a ledger (mint)
// plus its read accessors. The ledger is injected through the
// `AssetPrimitive` trait so both asset kinds share one controller.

mod error;
mod fungible;
mod nft;

pub use error::*;
pub use fungible::*;
pub use nft::*;

use serde::Serialize;
use std::fmt;

use crate::crypto::Principal;
use crate::event::AssetValue;

/// Kind of asset held by a ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Fungible,
    NonFungible,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Fungible => write!(f, "fungible"),
            AssetKind::NonFungible => write!(f, "non-fungible"),
        }
    }
}

// ========================================
// Asset Primitive Trait
// ========================================

/// Ledger interface used by the asset controller
pub trait AssetPrimitive {
    /// Asset specific arguments of a mint
    type MintArgs;
    /// What a successful mint hands back to the caller
    type Receipt: Copy + fmt::Debug;

    fn kind(&self) -> AssetKind;

    /// Create new assets for `recipient`
    ///
    /// Implementations validate everything before touching their state:
    /// an `Err` leaves the ledger exactly as it was.
    ///
    /// # Returns
    /// - `Ok((receipt, value))`: receipt for the caller and the minted value
    /// - `Err(AssetError)`: the ledger rejected the mint
    fn mint(
        &mut self,
        recipient: &Principal,
        args: Self::MintArgs,
    ) -> AssetResult<(Self::Receipt, AssetValue)>;
}

/// Reject the zero principal as a mint recipient
pub(crate) fn validate_recipient(kind: AssetKind, recipient: &Principal) -> AssetResult<()> {
    if recipient.is_zero() {
        return Err(AssetError::InvalidReceiver {
            kind,
            receiver: *recipient,
        });
    }
    Ok(())
}
