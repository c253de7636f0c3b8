// Fungible ledger backing the Dpass controller

use indexmap::IndexMap;
use log::trace;
use serde::Serialize;

use crate::crypto::Principal;
use crate::event::AssetValue;

use super::{validate_recipient, AssetError, AssetKind, AssetPrimitive, AssetResult};

/// Balances and total supply of a fungible asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FungibleLedger {
    total_supply: u128,
    balances: IndexMap<Principal, u128>,
}

impl FungibleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn balance_of(&self, account: &Principal) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Number of accounts that ever received a balance
    pub fn holders(&self) -> usize {
        self.balances.len()
    }
}

impl AssetPrimitive for FungibleLedger {
    type MintArgs = u128;
    type Receipt = u128;

    fn kind(&self) -> AssetKind {
        AssetKind::Fungible
    }

    fn mint(&mut self, recipient: &Principal, amount: u128) -> AssetResult<(u128, AssetValue)> {
        validate_recipient(AssetKind::Fungible, recipient)?;

        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(AssetError::Overflow(AssetKind::Fungible))?;
        // Cannot overflow once the supply did not, kept checked anyway
        let balance = self
            .balance_of(recipient)
            .checked_add(amount)
            .ok_or(AssetError::Overflow(AssetKind::Fungible))?;

        self.total_supply = total_supply;
        self.balances.insert(*recipient, balance);
        trace!("minted {} to {}, supply is now {}", amount, recipient, total_supply);

        Ok((amount, AssetValue::Amount(amount)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_updates_balance_and_supply() {
        let carol = Principal::from_seed("carol");
        let mut ledger = FungibleLedger::new();

        let (receipt, value) = ledger.mint(&carol, 10).unwrap();
        assert_eq!(receipt, 10);
        assert_eq!(value, AssetValue::Amount(10));

        ledger.mint(&carol, 5).unwrap();
        assert_eq!(ledger.balance_of(&carol), 15);
        assert_eq!(ledger.total_supply(), 15);
        assert_eq!(ledger.holders(), 1);
    }

    #[test]
    fn test_mint_to_zero_fails() {
        let mut ledger = FungibleLedger::new();
        let err = ledger.mint(&Principal::zero(), 1).unwrap_err();
        assert_eq!(err.name(), "ERC20InvalidReceiver");
        assert_eq!(ledger, FungibleLedger::new());
    }

    #[test]
    fn test_overflow_leaves_ledger_untouched() {
        let carol = Principal::from_seed("carol");
        let dave = Principal::from_seed("dave");
        let mut ledger = FungibleLedger::new();
        ledger.mint(&carol, u128::MAX).unwrap();

        let before = ledger.clone();
        let err = ledger.mint(&dave, 1).unwrap_err();
        assert_eq!(err, AssetError::Overflow(AssetKind::Fungible));
        assert_eq!(ledger, before);
        assert_eq!(ledger.balance_of(&dave), 0);
    }

    #[test]
    fn test_zero_amount_is_accepted() {
        let carol = Principal::from_seed("carol");
        let mut ledger = FungibleLedger::new();
        ledger.mint(&carol, 0).unwrap();
        assert_eq!(ledger.total_supply(), 0);
    }
}
