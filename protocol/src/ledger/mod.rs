//! # Token Ledger Collaborators
//!
//! The custody module owns no balances of its own. Every amount it reads or
//! moves lives on an external fungible-token ledger, reached through the
//! [`LedgerHost`] trait. The host is the execution environment: it routes a
//! call to the ledger named by an [`AssetId`] and provides the
//! all-or-nothing checkpoint facility a batch operation needs.
//!
//! ```text
//! mod.rs       LedgerHost trait and LedgerError
//! token.rs     TokenLedger: a single in-memory fungible token
//! registry.rs  LedgerRegistry: AssetId -> TokenLedger, implements LedgerHost
//! ```

pub mod registry;
pub mod token;

pub use registry::LedgerRegistry;
pub use token::{TokenInfo, TokenLedger};

use thiserror::Error;

use crate::types::{Address, Amount, AssetId};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures reported by a token ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No ledger is registered under this asset id.
    #[error("unknown asset: {0}")]
    UnknownAsset(AssetId),

    /// A ledger is already registered under this asset id.
    #[error("asset already registered: {0}")]
    DuplicateAsset(AssetId),

    /// The sender holds less than the requested amount.
    #[error("insufficient balance: {holder} has {available}, requested {requested}")]
    InsufficientBalance {
        /// The account being debited.
        holder: Address,
        /// Its current balance.
        available: Amount,
        /// The amount the transfer asked for.
        requested: Amount,
    },

    /// Transfers to the zero address are refused.
    #[error("transfer to the zero address")]
    TransferToZeroAddress,

    /// A credit would overflow the recipient balance or total supply.
    #[error("arithmetic overflow in ledger balance")]
    Overflow,

    /// The ledger refused the transfer for a reason of its own.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

// ---------------------------------------------------------------------------
// LedgerHost
// ---------------------------------------------------------------------------

/// The environment a custody module calls into.
///
/// `transfer` moves `amount` from `from` to `to` on the ledger for `asset`.
/// It must fail rather than silently no-op when `from` holds too little.
/// A zero-amount transfer is valid and changes nothing.
///
/// `checkpoint`/`revert` give callers all-or-nothing semantics across
/// several transfers: everything applied after a checkpoint is undone by
/// reverting to it.
pub trait LedgerHost {
    /// Opaque snapshot of every ledger the host routes to.
    type Checkpoint;

    /// Balance of `holder` on the ledger for `asset`.
    fn balance_of(&self, asset: &AssetId, holder: &Address) -> Result<Amount, LedgerError>;

    /// Moves `amount` of `asset` from `from` to `to`.
    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Captures the current state of every ledger.
    fn checkpoint(&self) -> Self::Checkpoint;

    /// Restores the state captured by `checkpoint`.
    fn revert(&mut self, checkpoint: Self::Checkpoint);
}
