//! # Custody Contract
//!
//! Holds fungible-token balances under its own custody address on behalf of
//! a single owner. The contract keeps no ledger of its own. Balances are
//! read from, and moved through, the [`LedgerHost`] supplied with each call.
//!
//! ## Operations
//!
//! - [`transfer_primary_reserve`](Custody::transfer_primary_reserve):
//!   withdraw the primary reserve asset.
//! - [`transfer_asset`](Custody::transfer_asset): withdraw any asset.
//! - [`rescue_assets`](Custody::rescue_assets): sweep a list of assets in
//!   one all-or-nothing call.
//! - [`transfer_ownership`](Custody::transfer_ownership): hand authority to
//!   a new owner.
//!
//! ## Security Model
//!
//! - **Owner gating**: every operation checks the caller against the owner
//!   before touching any ledger. A rejected call has no side effects.
//! - **Fixed destination**: funds only ever move to the owner at the time of
//!   the call. No operation takes a destination argument.
//! - **Sweep sentinel**: an amount of `0` means "everything the custody
//!   address holds of this asset", resolved by a balance query right before
//!   the transfer.
//! - **Batch atomicity**: `rescue_assets` checkpoints the host before the
//!   first sweep and reverts it, along with the event log, if any sweep
//!   fails.

use nexus_protocol::config::CustodyConfig;
use nexus_protocol::ledger::LedgerHost;
use nexus_protocol::{Address, Amount, AssetId};
use serde::{Deserialize, Serialize};

use crate::errors::CustodyError;
use crate::events::{AssetWithdrawn, AssetsRescued, CustodyEvent, OwnershipTransferred};
use crate::ownable::Ownable;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One completed outbound transfer of a batch rescue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sweep {
    /// The asset that was swept.
    pub asset: AssetId,
    /// Amount moved to the owner, in base units.
    pub amount: Amount,
}

/// The custody contract.
///
/// Persistent state is the owner plus the immutable deployment parameters.
/// The event log is append-only, and a failed operation leaves it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Custody {
    ownable: Ownable,
    custody_address: Address,
    primary_reserve: AssetId,
    events: Vec<CustodyEvent>,
}

impl Custody {
    /// Deploys with the default custody address and ORBS as primary reserve.
    ///
    /// # Errors
    ///
    /// - [`CustodyError::InvalidOwner`] if `owner` is the zero address.
    /// - [`CustodyError::CustodyAsOwner`] if `owner` is the default custody
    ///   address.
    pub fn new(owner: Address) -> Result<Self, CustodyError> {
        Self::deploy(&CustodyConfig::default(), owner)
    }

    /// Deploys with explicit parameters.
    ///
    /// Emits `OwnershipTransferred` from the zero address to `owner`.
    ///
    /// # Errors
    ///
    /// - [`CustodyError::InvalidOwner`] if `owner` is the zero address.
    /// - [`CustodyError::CustodyAsOwner`] if `owner` is
    ///   `config.custody_address`.
    pub fn deploy(config: &CustodyConfig, owner: Address) -> Result<Self, CustodyError> {
        let ownable = Ownable::new(owner)?;
        if owner == config.custody_address {
            return Err(CustodyError::CustodyAsOwner);
        }
        tracing::info!(
            owner = %owner,
            custody = %config.custody_address,
            primary_reserve = %config.primary_reserve,
            "custody deployed"
        );
        Ok(Self {
            ownable,
            custody_address: config.custody_address,
            primary_reserve: config.primary_reserve,
            events: vec![CustodyEvent::OwnershipTransferred(OwnershipTransferred {
                previous_owner: Address::ZERO,
                new_owner: owner,
            })],
        })
    }

    /// The current owner.
    pub fn owner(&self) -> Address {
        self.ownable.owner()
    }

    /// Fails with [`CustodyError::Unauthorized`] unless `caller` is the
    /// owner. Lets a front end authorize before validating its own input.
    pub fn check_owner(&self, caller: &Address) -> Result<(), CustodyError> {
        self.ownable.check_owner(caller)
    }

    /// The address this contract holds balances under.
    pub fn custody_address(&self) -> Address {
        self.custody_address
    }

    /// The asset targeted by [`transfer_primary_reserve`](Self::transfer_primary_reserve).
    pub fn primary_reserve(&self) -> AssetId {
        self.primary_reserve
    }

    /// Current custody balance of `asset`.
    pub fn custody_balance<H: LedgerHost>(
        &self,
        host: &H,
        asset: &AssetId,
    ) -> Result<Amount, CustodyError> {
        host.balance_of(asset, &self.custody_address)
            .map_err(CustodyError::transfer_failed(*asset))
    }

    // ───────────────────────── Withdrawals ─────────────────────────

    /// Sends `amount` of the primary reserve asset to the owner, or the
    /// whole custody balance when `amount` is `0`.
    ///
    /// Returns the amount actually transferred.
    ///
    /// # Errors
    ///
    /// - [`CustodyError::Unauthorized`] if `caller` is not the owner.
    /// - [`CustodyError::TransferFailed`] if the ledger rejects the balance
    ///   query or the transfer, including `amount` above the custody balance.
    pub fn transfer_primary_reserve<H: LedgerHost>(
        &mut self,
        host: &mut H,
        caller: &Address,
        amount: Amount,
    ) -> Result<Amount, CustodyError> {
        let asset = self.primary_reserve;
        self.transfer_asset(host, caller, &asset, amount)
    }

    /// Sends `amount` of `asset` to the owner, or the whole custody balance
    /// when `amount` is `0`.
    ///
    /// Returns the amount actually transferred.
    ///
    /// # Errors
    ///
    /// Same as [`transfer_primary_reserve`](Self::transfer_primary_reserve).
    pub fn transfer_asset<H: LedgerHost>(
        &mut self,
        host: &mut H,
        caller: &Address,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<Amount, CustodyError> {
        self.ownable.check_owner(caller)?;
        self.withdraw(host, asset, amount)
    }

    /// Sweeps the whole custody balance of each asset in `assets`, in order,
    /// to the owner.
    ///
    /// Authorization is checked once, before the first sweep. Each sweep
    /// reads its balance at the moment it runs, so a duplicate entry sweeps
    /// `0` the second time. An empty list succeeds with no transfers.
    ///
    /// # Errors
    ///
    /// - [`CustodyError::Unauthorized`] if `caller` is not the owner; no
    ///   ledger is touched.
    /// - [`CustodyError::TransferFailed`] from the first failing sweep. Every
    ///   earlier sweep of the batch is reverted and no events are kept.
    pub fn rescue_assets<H: LedgerHost>(
        &mut self,
        host: &mut H,
        caller: &Address,
        assets: &[AssetId],
    ) -> Result<Vec<Sweep>, CustodyError> {
        self.ownable.check_owner(caller)?;

        let checkpoint = host.checkpoint();
        let events_mark = self.events.len();

        let mut sweeps = Vec::with_capacity(assets.len());
        for asset in assets {
            match self.withdraw(host, asset, 0) {
                Ok(amount) => sweeps.push(Sweep {
                    asset: *asset,
                    amount,
                }),
                Err(err) => {
                    host.revert(checkpoint);
                    self.events.truncate(events_mark);
                    tracing::warn!(
                        asset = %asset,
                        completed = sweeps.len(),
                        error = %err,
                        "rescue aborted, batch reverted"
                    );
                    return Err(err);
                }
            }
        }

        self.events
            .push(CustodyEvent::AssetsRescued(AssetsRescued {
                assets: assets.to_vec(),
                total_transfers: sweeps.len(),
            }));
        tracing::info!(
            owner = %self.owner(),
            assets = sweeps.len(),
            "assets rescued"
        );
        Ok(sweeps)
    }

    // ───────────────────────── Ownership ─────────────────────────

    /// Replaces the owner. Effective from the next call. The previous owner
    /// keeps no authority.
    ///
    /// # Errors
    ///
    /// - [`CustodyError::Unauthorized`] if `caller` is not the owner.
    /// - [`CustodyError::InvalidOwner`] if `new_owner` is the zero address.
    /// - [`CustodyError::CustodyAsOwner`] if `new_owner` is the custody
    ///   address.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<(), CustodyError> {
        self.ownable.check_owner(caller)?;
        if new_owner == self.custody_address {
            tracing::warn!(new_owner = %new_owner, "refused to hand ownership to the custody address");
            return Err(CustodyError::CustodyAsOwner);
        }
        let event = self.ownable.transfer_ownership(caller, new_owner)?;
        tracing::info!(
            previous_owner = %event.previous_owner,
            new_owner = %event.new_owner,
            "ownership transferred"
        );
        self.events.push(CustodyEvent::OwnershipTransferred(event));
        Ok(())
    }

    // ───────────────────────── Events ─────────────────────────

    /// All events since deployment (or the last drain).
    pub fn events(&self) -> &[CustodyEvent] {
        &self.events
    }

    /// Takes and clears the event log.
    pub fn drain_events(&mut self) -> Vec<CustodyEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal ─────────────────────────

    /// Unchecked withdrawal to the current owner. Callers authorize first.
    fn withdraw<H: LedgerHost>(
        &mut self,
        host: &mut H,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<Amount, CustodyError> {
        let effective = if amount == 0 {
            let balance = self.custody_balance(host, asset)?;
            tracing::debug!(asset = %asset, balance, "sweep resolved to full custody balance");
            balance
        } else {
            amount
        };

        let to = self.owner();
        host.transfer(asset, &self.custody_address, &to, effective)
            .map_err(CustodyError::transfer_failed(*asset))?;

        tracing::info!(asset = %asset, to = %to, amount = effective, "asset withdrawn");
        self.events.push(CustodyEvent::AssetWithdrawn(AssetWithdrawn {
            asset: *asset,
            to,
            amount: effective,
        }));
        Ok(effective)
    }
}
