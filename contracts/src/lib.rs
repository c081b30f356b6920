//! # Liquidity Nexus Custody Contracts
//!
//! Owner-gated custody of fungible-token reserves. The custody contract
//! holds balances under its own address on external token ledgers and lets
//! exactly one identity, the owner, pull them out:
//!
//! - **Custody**: single-asset withdrawals (with a sweep-everything
//!   sentinel), all-or-nothing batch rescue, and ownership handover.
//! - **Ownable**: the single-owner access check every operation starts with.
//! - **SharedCustody**: a lock-protected handle for multi-threaded hosts.
//!
//! ## Design Principles
//!
//! 1. Authorization happens before any ledger is touched. A rejected call
//!    has no observable effect.
//! 2. Funds only ever flow to the current owner. No operation takes a
//!    destination.
//! 3. Ledger failures are never swallowed. They abort the whole operation,
//!    including every earlier step of a batch.
//! 4. Every public type is serializable (serde) so contract state can be
//!    persisted between calls.

pub mod custody;
pub mod errors;
pub mod events;
pub mod ownable;
pub mod shared;

pub use custody::{Custody, Sweep};
pub use errors::CustodyError;
pub use events::CustodyEvent;
pub use shared::SharedCustody;
