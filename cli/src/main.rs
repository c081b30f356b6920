// Copyright (c) 2026 Liquidity Nexus Contributors. MIT License.
// See LICENSE for details.

//! # Nexus Custody Operator
//!
//! Entry point for the `nexus-custody` binary. Parses CLI arguments,
//! initializes logging, and runs one custody command against the state file.
//!
//! Reports are printed to stdout as pretty JSON. Logs go to stderr.

mod cli;
mod commands;
mod logging;
mod state;

use anyhow::Result;
use clap::Parser;
use nexus_protocol::config::DEFAULT_LOG_FILTER;
use serde::Serialize;

use cli::{Commands, NexusCli};

fn main() -> Result<()> {
    let cli = NexusCli::parse();
    logging::init_logging(DEFAULT_LOG_FILTER, cli.log_format);

    let state = cli.state.as_path();
    match &cli.command {
        Commands::Init(args) => print_report(&commands::init(state, args)?),
        Commands::Fund(args) => print_report(&commands::fund(state, args)?),
        Commands::TransferReserve(args) => {
            print_report(&commands::transfer_reserve(state, args)?)
        }
        Commands::TransferAsset(args) => print_report(&commands::transfer_asset(state, args)?),
        Commands::Rescue(args) => print_report(&commands::rescue(state, args)?),
        Commands::TransferOwnership(args) => {
            print_report(&commands::transfer_ownership(state, args)?)
        }
        Commands::Status => print_report(&commands::status(state)?),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

fn print_report<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn print_version() {
    println!("nexus-custody {}", env!("CARGO_PKG_VERSION"));
    println!("rustc         {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
