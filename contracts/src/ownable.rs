//! # Single-Owner Access Control
//!
//! One identity, the owner, holds exclusive authority. Every privileged
//! custody call starts with [`Ownable::check_owner`]. Ownership moves in a
//! single step. The previous owner loses authority the moment
//! [`Ownable::transfer_ownership`] returns.
//!
//! There is deliberately no renounce operation: the module must always have
//! an owner able to move funds out.

use nexus_protocol::Address;
use serde::{Deserialize, Serialize};

use crate::errors::CustodyError;
use crate::events::OwnershipTransferred;

/// The owner field of a custody module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownable {
    owner: Address,
}

impl Ownable {
    /// Creates the guard with its initial owner.
    ///
    /// # Errors
    ///
    /// Returns [`CustodyError::InvalidOwner`] for the zero address.
    pub fn new(owner: Address) -> Result<Self, CustodyError> {
        if owner.is_zero() {
            return Err(CustodyError::InvalidOwner);
        }
        Ok(Self { owner })
    }

    /// The current owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Returns `true` if `caller` is the current owner.
    pub fn is_owner(&self, caller: &Address) -> bool {
        *caller == self.owner
    }

    /// Fails with [`CustodyError::Unauthorized`] unless `caller` is the owner.
    pub fn check_owner(&self, caller: &Address) -> Result<(), CustodyError> {
        if !self.is_owner(caller) {
            tracing::warn!(caller = %caller, owner = %self.owner, "rejected call from non-owner");
            return Err(CustodyError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    /// Replaces the owner with `new_owner`.
    ///
    /// # Errors
    ///
    /// - [`CustodyError::Unauthorized`] if `caller` is not the owner.
    /// - [`CustodyError::InvalidOwner`] if `new_owner` is the zero address.
    ///
    /// On error the owner is unchanged.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<OwnershipTransferred, CustodyError> {
        self.check_owner(caller)?;
        if new_owner.is_zero() {
            return Err(CustodyError::InvalidOwner);
        }
        let previous_owner = std::mem::replace(&mut self.owner, new_owner);
        Ok(OwnershipTransferred {
            previous_owner,
            new_owner,
        })
    }
}
