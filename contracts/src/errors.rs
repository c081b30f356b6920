//! Custody error taxonomy.

use nexus_protocol::ledger::LedgerError;
use nexus_protocol::{Address, AssetId};
use thiserror::Error;

/// Errors returned by custody operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustodyError {
    /// The caller is not the current owner. Raised before any transfer.
    #[error("Ownable: caller is not the owner")]
    Unauthorized {
        /// Identity that attempted the call.
        caller: Address,
    },

    /// The zero address cannot own the module.
    #[error("Ownable: new owner is the zero address")]
    InvalidOwner,

    /// The module cannot own itself. Every withdrawal would be a
    /// self-transfer and no balance could ever leave custody.
    #[error("Ownable: new owner is the custody address")]
    CustodyAsOwner,

    /// A ledger refused a balance query or transfer. The whole operation is
    /// aborted with no partial effect.
    #[error("transfer of {asset} failed: {source}")]
    TransferFailed {
        /// Asset whose ledger failed.
        asset: AssetId,
        /// The ledger's own error.
        #[source]
        source: LedgerError,
    },
}

impl CustodyError {
    pub(crate) fn transfer_failed(asset: AssetId) -> impl FnOnce(LedgerError) -> Self {
        move |source| CustodyError::TransferFailed { asset, source }
    }
}
