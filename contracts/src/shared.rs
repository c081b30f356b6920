//! Thread-safe custody handle.
//!
//! [`SharedCustody`] puts the contract and its ledger host behind one lock.
//! The owner check, the transfers it authorizes, and any batch revert all
//! happen under a single acquisition, so no caller can act on an owner value
//! that another thread is in the middle of replacing.

use std::sync::Arc;

use nexus_protocol::ledger::LedgerHost;
use nexus_protocol::{Address, Amount, AssetId};
use parking_lot::Mutex;

use crate::custody::{Custody, Sweep};
use crate::errors::CustodyError;

struct Inner<H> {
    custody: Custody,
    host: H,
}

/// Cloneable handle to a custody contract and the ledgers it moves funds on.
pub struct SharedCustody<H> {
    inner: Arc<Mutex<Inner<H>>>,
}

impl<H> Clone for SharedCustody<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: LedgerHost> SharedCustody<H> {
    /// Wraps a deployed contract and its host.
    pub fn new(custody: Custody, host: H) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { custody, host })),
        }
    }

    /// The owner at the moment of the call.
    pub fn owner(&self) -> Address {
        self.inner.lock().custody.owner()
    }

    /// See [`Custody::transfer_primary_reserve`].
    pub fn transfer_primary_reserve(
        &self,
        caller: &Address,
        amount: Amount,
    ) -> Result<Amount, CustodyError> {
        let mut guard = self.inner.lock();
        let Inner { custody, host } = &mut *guard;
        custody.transfer_primary_reserve(host, caller, amount)
    }

    /// See [`Custody::transfer_asset`].
    pub fn transfer_asset(
        &self,
        caller: &Address,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<Amount, CustodyError> {
        let mut guard = self.inner.lock();
        let Inner { custody, host } = &mut *guard;
        custody.transfer_asset(host, caller, asset, amount)
    }

    /// See [`Custody::rescue_assets`].
    pub fn rescue_assets(
        &self,
        caller: &Address,
        assets: &[AssetId],
    ) -> Result<Vec<Sweep>, CustodyError> {
        let mut guard = self.inner.lock();
        let Inner { custody, host } = &mut *guard;
        custody.rescue_assets(host, caller, assets)
    }

    /// See [`Custody::transfer_ownership`].
    pub fn transfer_ownership(
        &self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<(), CustodyError> {
        self.inner.lock().custody.transfer_ownership(caller, new_owner)
    }

    /// Runs `f` against the contract and host under the lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&Custody, &H) -> R) -> R {
        let guard = self.inner.lock();
        f(&guard.custody, &guard.host)
    }
}
