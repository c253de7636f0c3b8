// Non-fungible ledger backing the DpassNFT controller
// Token ids are allocated sequentially, starting from FIRST_TOKEN_ID.

use indexmap::IndexMap;
use log::trace;
use serde::Serialize;

use crate::config::FIRST_TOKEN_ID;
use crate::crypto::Principal;
use crate::event::AssetValue;

use super::{validate_recipient, AssetError, AssetKind, AssetPrimitive, AssetResult};

/// Token ownership of a non-fungible asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NftLedger {
    next_token_id: u64,
    owners: IndexMap<u64, Principal>,
    balances: IndexMap<Principal, u64>,
}

impl Default for NftLedger {
    fn default() -> Self {
        Self::starting_at(FIRST_TOKEN_ID)
    }
}

impl NftLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty ledger whose first minted token gets `token_id`
    pub fn starting_at(token_id: u64) -> Self {
        Self {
            next_token_id: token_id,
            owners: IndexMap::new(),
            balances: IndexMap::new(),
        }
    }

    pub fn next_token_id(&self) -> u64 {
        self.next_token_id
    }

    pub fn total_supply(&self) -> u64 {
        self.owners.len() as u64
    }

    pub fn owner_of(&self, token_id: u64) -> AssetResult<Principal> {
        self.owners
            .get(&token_id)
            .copied()
            .ok_or(AssetError::NonexistentToken(token_id))
    }

    pub fn exists(&self, token_id: u64) -> bool {
        self.owners.contains_key(&token_id)
    }

    pub fn balance_of(&self, account: &Principal) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }
}

impl AssetPrimitive for NftLedger {
    type MintArgs = ();
    type Receipt = u64;

    fn kind(&self) -> AssetKind {
        AssetKind::NonFungible
    }

    fn mint(&mut self, recipient: &Principal, _: ()) -> AssetResult<(u64, AssetValue)> {
        validate_recipient(AssetKind::NonFungible, recipient)?;

        let token_id = self.next_token_id;
        let next_token_id = token_id
            .checked_add(1)
            .ok_or(AssetError::Overflow(AssetKind::NonFungible))?;
        let balance = self
            .balance_of(recipient)
            .checked_add(1)
            .ok_or(AssetError::Overflow(AssetKind::NonFungible))?;

        self.next_token_id = next_token_id;
        self.owners.insert(token_id, *recipient);
        self.balances.insert(*recipient, balance);
        trace!("minted token #{} to {}", token_id, recipient);

        Ok((token_id, AssetValue::Token(token_id)))
    }
}
