//! # Ledger Registry
//!
//! Routes calls to the [`TokenLedger`] registered under each [`AssetId`].
//! Checkpoints are full clones of the ledger map, which is cheap at the
//! handful of assets a custody deployment deals with.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::token::{self, TokenInfo, TokenLedger};
use super::{LedgerError, LedgerHost};
use crate::types::{Address, Amount, AssetId};

/// A set of independent token ledgers keyed by asset id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRegistry {
    ledgers: BTreeMap<AssetId, TokenLedger>,
}

impl LedgerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the well-known ORBS and USDC ledgers.
    pub fn with_well_known() -> Self {
        let mut registry = Self::new();
        for info in [token::orbs(), token::usdc()] {
            registry
                .ledgers
                .insert(info.address, TokenLedger::new(info));
        }
        registry
    }

    /// Registers an empty ledger for `info.address`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateAsset`] if the address is taken.
    pub fn register(&mut self, info: TokenInfo) -> Result<(), LedgerError> {
        if self.ledgers.contains_key(&info.address) {
            return Err(LedgerError::DuplicateAsset(info.address));
        }
        tracing::debug!(asset = %info.address, symbol = %info.symbol, "ledger registered");
        self.ledgers.insert(info.address, TokenLedger::new(info));
        Ok(())
    }

    /// The ledger for `asset`, if registered.
    pub fn ledger(&self, asset: &AssetId) -> Option<&TokenLedger> {
        self.ledgers.get(asset)
    }

    /// Iterates over registered ledgers in address order.
    pub fn ledgers(&self) -> impl Iterator<Item = &TokenLedger> {
        self.ledgers.values()
    }

    /// Resolves a symbol (case-insensitive) or a hex address to an asset id.
    pub fn resolve(&self, symbol_or_address: &str) -> Option<AssetId> {
        if let Ok(address) = Address::from_hex(symbol_or_address) {
            return self.ledgers.contains_key(&address).then_some(address);
        }
        self.ledgers
            .values()
            .find(|l| l.info().symbol.eq_ignore_ascii_case(symbol_or_address))
            .map(|l| l.info().address)
    }

    /// Mints `amount` of `asset` to `to`.
    pub fn mint(&mut self, asset: &AssetId, to: &Address, amount: Amount) -> Result<(), LedgerError> {
        self.ledger_mut(asset)?.mint(to, amount)
    }

    fn ledger_mut(&mut self, asset: &AssetId) -> Result<&mut TokenLedger, LedgerError> {
        self.ledgers
            .get_mut(asset)
            .ok_or(LedgerError::UnknownAsset(*asset))
    }
}

impl LedgerHost for LedgerRegistry {
    type Checkpoint = BTreeMap<AssetId, TokenLedger>;

    fn balance_of(&self, asset: &AssetId, holder: &Address) -> Result<Amount, LedgerError> {
        self.ledgers
            .get(asset)
            .map(|l| l.balance_of(holder))
            .ok_or(LedgerError::UnknownAsset(*asset))
    }

    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.ledger_mut(asset)?.transfer(from, to, amount)
    }

    fn checkpoint(&self) -> Self::Checkpoint {
        self.ledgers.clone()
    }

    fn revert(&mut self, checkpoint: Self::Checkpoint) {
        self.ledgers = checkpoint;
    }
}
