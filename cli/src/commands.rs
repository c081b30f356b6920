//! # Command Handlers
//!
//! One handler per subcommand. Each loads the state file, applies a single
//! operation, and saves the result only if the operation succeeded, so a
//! rejected call leaves the file byte-for-byte unchanged.
//!
//! Amounts on the command line are whole tokens and are scaled by the
//! asset's decimals. `0` keeps its sweep meaning. Owner-gated commands
//! authorize the caller before resolving assets or scaling amounts, so a
//! non-owner always sees the owner check fail first.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use nexus_contracts::{CustodyEvent, Sweep};
use nexus_protocol::config::CustodyConfig;
use nexus_protocol::ledger::{LedgerHost, TokenInfo};
use nexus_protocol::{Address, Amount, AssetId};
use serde::Serialize;

use crate::cli::{
    FundArgs, InitArgs, RescueArgs, TransferAssetArgs, TransferOwnershipArgs,
    TransferReserveArgs,
};
use crate::state::ChainState;

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct InitReport {
    pub state_file: String,
    pub owner: Address,
    pub custody_address: Address,
    pub primary_reserve: AssetId,
    pub assets: Vec<TokenInfo>,
}

#[derive(Debug, Serialize)]
pub struct FundReport {
    pub asset: AssetId,
    pub symbol: String,
    pub minted: Amount,
    pub custody_balance: Amount,
}

/// Outcome of a single-asset withdrawal.
#[derive(Debug, Serialize)]
pub struct WithdrawalReport {
    pub asset: AssetId,
    pub symbol: String,
    pub to: Address,
    pub amount: Amount,
    pub events: Vec<CustodyEvent>,
}

#[derive(Debug, Serialize)]
pub struct RescueReport {
    pub to: Address,
    pub sweeps: Vec<Sweep>,
    pub events: Vec<CustodyEvent>,
}

#[derive(Debug, Serialize)]
pub struct OwnershipReport {
    pub previous_owner: Address,
    pub new_owner: Address,
    pub events: Vec<CustodyEvent>,
}

#[derive(Debug, Serialize)]
pub struct BalanceLine {
    pub asset: AssetId,
    pub symbol: String,
    pub decimals: u8,
    pub custody: Amount,
    pub owner: Amount,
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub owner: Address,
    pub custody_address: Address,
    pub primary_reserve: AssetId,
    pub balances: Vec<BalanceLine>,
    pub event_count: usize,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Loads state, runs `op`, and persists only when `op` succeeds.
fn with_state<T>(path: &Path, op: impl FnOnce(&mut ChainState) -> Result<T>) -> Result<T> {
    let mut state = ChainState::load(path)?;
    let out = op(&mut state)?;
    state.save(path)?;
    Ok(out)
}

fn token_info(state: &ChainState, asset: &AssetId) -> Result<TokenInfo> {
    state
        .ledgers
        .ledger(asset)
        .map(|ledger| ledger.info().clone())
        .with_context(|| format!("no ledger registered for {asset}"))
}

fn resolve(state: &ChainState, symbol_or_address: &str) -> Result<AssetId> {
    state
        .ledgers
        .resolve(symbol_or_address)
        .with_context(|| format!("unknown asset '{symbol_or_address}'"))
}

fn base_units(info: &TokenInfo, whole: u128) -> Result<Amount> {
    info.units(whole).with_context(|| {
        format!(
            "{whole} {} does not fit in base units ({} decimals)",
            info.symbol, info.decimals
        )
    })
}

fn events_since(state: &ChainState, mark: usize) -> Vec<CustodyEvent> {
    state.custody.events()[mark..].to_vec()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub fn init(state_path: &Path, args: &InitArgs) -> Result<InitReport> {
    if state_path.exists() && !args.force {
        bail!(
            "state file {} already exists (pass --force to overwrite)",
            state_path.display()
        );
    }

    let config = match &args.config {
        Some(path) => CustodyConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CustodyConfig::default(),
    };

    let mut state = ChainState::deploy(&config, args.owner)?;
    state.save(state_path)?;
    tracing::info!(state = %state_path.display(), owner = %args.owner, "state initialized");

    Ok(InitReport {
        state_file: state_path.display().to_string(),
        owner: state.custody.owner(),
        custody_address: state.custody.custody_address(),
        primary_reserve: state.custody.primary_reserve(),
        assets: state.ledgers.ledgers().map(|l| l.info().clone()).collect(),
    })
}

pub fn fund(state_path: &Path, args: &FundArgs) -> Result<FundReport> {
    with_state(state_path, |state| {
        let asset = resolve(state, &args.asset)?;
        let info = token_info(state, &asset)?;
        let minted = base_units(&info, args.amount)?;
        let custody = state.custody.custody_address();

        state.ledgers.mint(&asset, &custody, minted)?;
        let custody_balance = state.ledgers.balance_of(&asset, &custody)?;
        tracing::info!(asset = %info.symbol, minted, "custody funded");

        Ok(FundReport {
            asset,
            symbol: info.symbol,
            minted,
            custody_balance,
        })
    })
}

pub fn transfer_reserve(state_path: &Path, args: &TransferReserveArgs) -> Result<WithdrawalReport> {
    with_state(state_path, |state| {
        state.custody.check_owner(&args.caller)?;
        let asset = state.custody.primary_reserve();
        let info = token_info(state, &asset)?;
        let requested = base_units(&info, args.amount)?;
        let mark = state.custody.events().len();

        let amount = state
            .custody
            .transfer_primary_reserve(&mut state.ledgers, &args.caller, requested)?;

        Ok(WithdrawalReport {
            asset,
            symbol: info.symbol,
            to: state.custody.owner(),
            amount,
            events: events_since(state, mark),
        })
    })
}

pub fn transfer_asset(state_path: &Path, args: &TransferAssetArgs) -> Result<WithdrawalReport> {
    with_state(state_path, |state| {
        state.custody.check_owner(&args.caller)?;
        let asset = resolve(state, &args.asset)?;
        let info = token_info(state, &asset)?;
        let requested = base_units(&info, args.amount)?;
        let mark = state.custody.events().len();

        let amount = state
            .custody
            .transfer_asset(&mut state.ledgers, &args.caller, &asset, requested)?;

        Ok(WithdrawalReport {
            asset,
            symbol: info.symbol,
            to: state.custody.owner(),
            amount,
            events: events_since(state, mark),
        })
    })
}

/// Unknown symbols fail before the contract is called. A well-formed
/// address with no ledger is passed through and fails inside the batch.
pub fn rescue(state_path: &Path, args: &RescueArgs) -> Result<RescueReport> {
    with_state(state_path, |state| {
        state.custody.check_owner(&args.caller)?;
        let assets = args
            .assets
            .iter()
            .map(|a| resolve(state, a).or_else(|_| a.parse::<Address>().map_err(Into::into)))
            .collect::<Result<Vec<_>>>()?;
        let mark = state.custody.events().len();

        let sweeps = state
            .custody
            .rescue_assets(&mut state.ledgers, &args.caller, &assets)?;

        Ok(RescueReport {
            to: state.custody.owner(),
            sweeps,
            events: events_since(state, mark),
        })
    })
}

pub fn transfer_ownership(
    state_path: &Path,
    args: &TransferOwnershipArgs,
) -> Result<OwnershipReport> {
    with_state(state_path, |state| {
        let previous_owner = state.custody.owner();
        let mark = state.custody.events().len();

        state
            .custody
            .transfer_ownership(&args.caller, args.new_owner)?;

        Ok(OwnershipReport {
            previous_owner,
            new_owner: state.custody.owner(),
            events: events_since(state, mark),
        })
    })
}

pub fn status(state_path: &Path) -> Result<StatusReport> {
    let state = ChainState::load(state_path)?;
    let owner = state.custody.owner();
    let custody = state.custody.custody_address();

    let balances = state
        .ledgers
        .ledgers()
        .map(|ledger| {
            let info = ledger.info();
            BalanceLine {
                asset: info.address,
                symbol: info.symbol.clone(),
                decimals: info.decimals,
                custody: ledger.balance_of(&custody),
                owner: ledger.balance_of(&owner),
            }
        })
        .collect();

    Ok(StatusReport {
        owner,
        custody_address: custody,
        primary_reserve: state.custody.primary_reserve(),
        balances,
        event_count: state.custody.events().len(),
        updated_at: state.updated_at,
    })
}
