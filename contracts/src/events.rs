//! Custody events
//!
//! Immutable records appended by successful custody operations. A failed
//! operation appends nothing.

use nexus_protocol::{Address, Amount, AssetId};
use serde::{Deserialize, Serialize};

/// Emitted at deployment (from the zero address) and on every ownership
/// transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

/// One outbound transfer from custody to the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetWithdrawn {
    pub asset: AssetId,
    pub to: Address,
    pub amount: Amount,
}

/// A batch rescue completed. Preceded by one `AssetWithdrawn` per entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsRescued {
    pub assets: Vec<AssetId>,
    pub total_transfers: usize,
}

/// Enum wrapper for all custody events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustodyEvent {
    OwnershipTransferred(OwnershipTransferred),
    AssetWithdrawn(AssetWithdrawn),
    AssetsRescued(AssetsRescued),
}
