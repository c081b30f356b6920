//! # CLI Interface
//!
//! Command-line structure for `nexus-custody`, built with `clap` derive.
//! Every command operates on a JSON state file holding the token ledgers
//! and the deployed custody contract.

use clap::{Parser, Subcommand};
use nexus_protocol::config::DEFAULT_STATE_FILE;
use nexus_protocol::Address;
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Liquidity Nexus custody operator.
///
/// Deploys a custody contract against local token ledgers and drives its
/// owner-gated withdrawal, rescue, and ownership operations.
#[derive(Parser, Debug)]
#[command(
    name = "nexus-custody",
    about = "Liquidity Nexus custody operator",
    version,
    propagate_version = true
)]
pub struct NexusCli {
    /// Path to the custody state file.
    #[arg(long, short = 's', global = true, env = "NEXUS_STATE", default_value = DEFAULT_STATE_FILE)]
    pub state: PathBuf,

    /// Log output format.
    #[arg(long, global = true, env = "NEXUS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy a custody contract and register the well-known token ledgers.
    Init(InitArgs),
    /// Mint tokens straight into the custody address (local harness only).
    Fund(FundArgs),
    /// Withdraw the primary reserve asset to the owner. 0 sweeps everything.
    TransferReserve(TransferReserveArgs),
    /// Withdraw any asset to the owner. 0 sweeps everything.
    TransferAsset(TransferAssetArgs),
    /// Sweep every listed asset to the owner in one all-or-nothing call.
    Rescue(RescueArgs),
    /// Hand ownership to a new address.
    TransferOwnership(TransferOwnershipArgs),
    /// Print owner, custody address, and custody balances as JSON.
    Status,
    /// Print version information and exit.
    Version,
}

/// Arguments for `init`.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Initial owner address.
    #[arg(long)]
    pub owner: Address,

    /// Deployment config (JSON). Defaults apply when omitted.
    #[arg(long, short = 'c', env = "NEXUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overwrite an existing state file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `fund`.
#[derive(Parser, Debug)]
pub struct FundArgs {
    /// Asset symbol (e.g. ORBS) or ledger address.
    #[arg(long)]
    pub asset: String,

    /// Whole tokens to mint into custody.
    #[arg(long)]
    pub amount: u128,
}

/// Arguments for `transfer-reserve`.
#[derive(Parser, Debug)]
pub struct TransferReserveArgs {
    /// Identity making the call.
    #[arg(long)]
    pub caller: Address,

    /// Whole tokens to withdraw; 0 withdraws the full custody balance.
    #[arg(long)]
    pub amount: u128,
}

/// Arguments for `transfer-asset`.
#[derive(Parser, Debug)]
pub struct TransferAssetArgs {
    /// Identity making the call.
    #[arg(long)]
    pub caller: Address,

    /// Asset symbol or ledger address.
    #[arg(long)]
    pub asset: String,

    /// Whole tokens to withdraw; 0 withdraws the full custody balance.
    #[arg(long)]
    pub amount: u128,
}

/// Arguments for `rescue`.
#[derive(Parser, Debug)]
pub struct RescueArgs {
    /// Identity making the call.
    #[arg(long)]
    pub caller: Address,

    /// Assets to sweep, in order. Repeat the flag for each asset.
    #[arg(long = "asset")]
    pub assets: Vec<String>,
}

/// Arguments for `transfer-ownership`.
#[derive(Parser, Debug)]
pub struct TransferOwnershipArgs {
    /// Identity making the call.
    #[arg(long)]
    pub caller: Address,

    /// Address that becomes the owner.
    #[arg(long)]
    pub new_owner: Address,
}
