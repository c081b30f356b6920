//! # In-Memory Fungible Token
//!
//! A [`TokenLedger`] is the reference implementation of a standard
//! fungible-token ledger: per-holder balances, a total supply, and a
//! `transfer` that refuses to overdraw. It exists so the custody module can
//! be exercised without a chain. Only the harness calls [`TokenLedger::mint`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::LedgerError;
use crate::config::{ORBS_DECIMALS, ORBS_TOKEN, USDC_DECIMALS, USDC_TOKEN};
use crate::types::{units, Address, Amount, AssetId};

// ---------------------------------------------------------------------------
// TokenInfo
// ---------------------------------------------------------------------------

/// Static metadata of a token ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Address of the ledger; doubles as the asset id.
    pub address: AssetId,
    /// Human-readable name.
    pub name: String,
    /// Ticker symbol, stored upper-case.
    pub symbol: String,
    /// Display precision. Never used in arithmetic.
    pub decimals: u8,
}

impl TokenInfo {
    /// Creates metadata; the symbol is normalized to upper-case.
    pub fn new(address: AssetId, name: &str, symbol: &str, decimals: u8) -> Self {
        Self {
            address,
            name: name.to_string(),
            symbol: symbol.to_uppercase(),
            decimals,
        }
    }

    /// `whole` tokens in base units, or `None` on overflow.
    pub fn units(&self, whole: u128) -> Option<Amount> {
        units(whole, self.decimals)
    }
}

/// The ORBS token, the default primary reserve asset.
pub fn orbs() -> TokenInfo {
    TokenInfo::new(
        ORBS_TOKEN,
        "Orbs",
        "ORBS",
        ORBS_DECIMALS,
    )
}

/// USD Coin.
pub fn usdc() -> TokenInfo {
    TokenInfo::new(
        USDC_TOKEN,
        "USD Coin",
        "USDC",
        USDC_DECIMALS,
    )
}

// ---------------------------------------------------------------------------
// TokenLedger
// ---------------------------------------------------------------------------

/// Balances and supply of a single fungible token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLedger {
    info: TokenInfo,
    total_supply: Amount,
    balances: BTreeMap<Address, Amount>,
}

impl TokenLedger {
    /// Creates an empty ledger with zero supply.
    pub fn new(info: TokenInfo) -> Self {
        Self {
            info,
            total_supply: 0,
            balances: BTreeMap::new(),
        }
    }

    /// Ledger metadata.
    pub fn info(&self) -> &TokenInfo {
        &self.info
    }

    /// Current total supply.
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Balance of `holder`, zero if it never held the token.
    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    /// Every non-zero balance, ordered by holder address.
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter().filter(|(_, amount)| **amount > 0)
    }

    /// Creates `amount` new tokens in `to`'s balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransferToZeroAddress`] for the zero address and
    /// [`LedgerError::Overflow`] if supply or balance would overflow.
    pub fn mint(&mut self, to: &Address, amount: Amount) -> Result<(), LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::TransferToZeroAddress);
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.total_supply = new_supply;
        self.balances.insert(*to, new_balance);
        Ok(())
    }

    /// Moves `amount` from `from` to `to`.
    ///
    /// A zero amount succeeds without touching balances. Nothing is written
    /// unless every check passes.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::TransferToZeroAddress`] if `to` is the zero address.
    /// - [`LedgerError::InsufficientBalance`] if `from` holds less than `amount`.
    /// - [`LedgerError::Overflow`] if the recipient balance would overflow.
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::TransferToZeroAddress);
        }

        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                holder: *from,
                available,
                requested: amount,
            });
        }
        if amount == 0 || from == to {
            return Ok(());
        }

        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.balances.insert(*from, available - amount);
        self.balances.insert(*to, credited);
        Ok(())
    }
}
