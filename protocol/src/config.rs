//! # Custody Configuration & Constants
//!
//! Every well-known address and default lives here. Deployment parameters
//! that can differ between environments are grouped in [`CustodyConfig`],
//! which loads from a JSON file and falls back to these constants.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Address;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Byte length of every account and asset address.
pub const ADDRESS_LENGTH: usize = 20;

/// ORBS token on Ethereum mainnet. The default primary reserve asset.
pub const ORBS_ADDRESS: &str = "0xff56Cc6b1E6dEd347aA0B7676C85AB0B3D08B0FA";

/// [`ORBS_ADDRESS`], parsed at compile time.
pub const ORBS_TOKEN: Address = Address::from_hex_const(ORBS_ADDRESS);

/// ORBS display precision.
pub const ORBS_DECIMALS: u8 = 18;

/// USDC token on Ethereum mainnet.
pub const USDC_ADDRESS: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

/// [`USDC_ADDRESS`], parsed at compile time.
pub const USDC_TOKEN: Address = Address::from_hex_const(USDC_ADDRESS);

/// USDC display precision.
pub const USDC_DECIMALS: u8 = 6;

/// Address the custody module holds balances under when none is configured.
pub const DEFAULT_CUSTODY_ADDRESS: &str = "0x00000000000000000000000000000000000c0de1";

/// [`DEFAULT_CUSTODY_ADDRESS`], parsed at compile time.
pub const DEFAULT_CUSTODY: Address = Address::from_hex_const(DEFAULT_CUSTODY_ADDRESS);

// ---------------------------------------------------------------------------
// Host defaults
// ---------------------------------------------------------------------------

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "nexus_cli=info,nexus_contracts=info,nexus_protocol=warn";

/// File name of the persisted custody state.
pub const DEFAULT_STATE_FILE: &str = "nexus-state.json";

// ---------------------------------------------------------------------------
// CustodyConfig
// ---------------------------------------------------------------------------

/// Errors raised while loading or validating a [`CustodyConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The values parsed but violate a deployment rule.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Deployment parameters of a custody module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustodyConfig {
    /// Address the module holds balances under on every ledger.
    pub custody_address: Address,
    /// The distinguished asset targeted by `transfer_primary_reserve`.
    pub primary_reserve: Address,
}

impl CustodyConfig {
    /// Reads a config from a JSON file and validates it. Missing fields take
    /// their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: CustodyConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        tracing::debug!(
            path = %path.as_ref().display(),
            custody = %config.custody_address,
            primary_reserve = %config.primary_reserve,
            "custody config loaded"
        );
        Ok(config)
    }

    /// Rejects zero addresses and a reserve that aliases the custody address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.custody_address.is_zero() {
            return Err(ConfigError::Invalid(
                "custody_address must not be the zero address".into(),
            ));
        }
        if self.primary_reserve.is_zero() {
            return Err(ConfigError::Invalid(
                "primary_reserve must not be the zero address".into(),
            ));
        }
        if self.primary_reserve == self.custody_address {
            return Err(ConfigError::Invalid(
                "primary_reserve must differ from custody_address".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CustodyConfig {
    fn default() -> Self {
        Self {
            custody_address: DEFAULT_CUSTODY,
            primary_reserve: ORBS_TOKEN,
        }
    }
}
