// Asset primitive error codes
//
// Range: 0x0200 - 0x02FF
// These failures belong to the ledger behind a controller, not to the
// access control layer. They surface unchanged through the controller.

use thiserror::Error;

use crate::config::ASSET_ERROR_RANGE_START;
use crate::crypto::Principal;

use super::AssetKind;

pub const ASSET_ERROR_INVALID_RECEIVER: u64 = ASSET_ERROR_RANGE_START;
pub const ASSET_ERROR_NONEXISTENT_TOKEN: u64 = ASSET_ERROR_RANGE_START + 0x01;
pub const ASSET_ERROR_OVERFLOW: u64 = ASSET_ERROR_RANGE_START + 0x02;

/// Asset operation result type
pub type AssetResult<T> = Result<T, AssetError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("invalid {kind} receiver {receiver}")]
    InvalidReceiver { kind: AssetKind, receiver: Principal },

    #[error("token {0} does not exist")]
    NonexistentToken(u64),

    #[error("{0} ledger overflow")]
    Overflow(AssetKind),
}

impl AssetError {
    pub fn code(&self) -> u64 {
        match self {
            AssetError::InvalidReceiver { .. } => ASSET_ERROR_INVALID_RECEIVER,
            AssetError::NonexistentToken(_) => ASSET_ERROR_NONEXISTENT_TOKEN,
            AssetError::Overflow(_) => ASSET_ERROR_OVERFLOW,
        }
    }

    /// External identifier of the error
    pub fn name(&self) -> &'static str {
        match self {
            AssetError::InvalidReceiver {
                kind: AssetKind::Fungible,
                ..
            } => "ERC20InvalidReceiver",
            AssetError::InvalidReceiver {
                kind: AssetKind::NonFungible,
                ..
            } => "ERC721InvalidReceiver",
            AssetError::NonexistentToken(_) => "ERC721NonexistentToken",
            AssetError::Overflow(_) => "AssetOverflow",
        }
    }
}

impl From<AssetError> for u64 {
    fn from(err: AssetError) -> u64 {
        err.code()
    }
}
