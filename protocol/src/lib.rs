// Copyright (c) 2026 Liquidity Nexus Contributors. MIT License.
// See LICENSE for details.

//! # Liquidity Nexus Core Library
//!
//! Shared building blocks for the custody contracts: account identities,
//! amounts, deployment configuration, and the token-ledger collaborators
//! the custody module moves funds through.
//!
//! - **types**: 20-byte addresses, `u128` amounts, unit scaling.
//! - **config**: well-known addresses, defaults, and `CustodyConfig`.
//! - **ledger**: the `LedgerHost` trait and an in-memory reference ledger.
//!
//! Nothing here decides *who* may move funds. That is the contracts crate's
//! job; this crate only answers "how much is there" and "move it".

pub mod config;
pub mod ledger;
pub mod types;

pub use types::{Address, Amount, AssetId};
