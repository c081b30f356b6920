//! Persisted custody state.
//!
//! The ledgers and the contract are stored together in one JSON document so
//! that a command either commits both or neither. Writes go to a temp file
//! in the same directory and are renamed over the target.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use nexus_contracts::Custody;
use nexus_protocol::config::CustodyConfig;
use nexus_protocol::ledger::LedgerRegistry;
use nexus_protocol::Address;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// Everything a custody command reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainState {
    pub ledgers: LedgerRegistry,
    pub custody: Custody,
    pub updated_at: DateTime<Utc>,
}

impl ChainState {
    /// Fresh ledgers for the well-known tokens and a newly deployed contract.
    pub fn deploy(config: &CustodyConfig, owner: Address) -> Result<Self> {
        let custody = Custody::deploy(config, owner).context("failed to deploy custody")?;
        Ok(Self {
            ledgers: LedgerRegistry::with_well_known(),
            custody,
            updated_at: Utc::now(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read state file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse state file {}", path.display()))
    }

    /// Stamps `updated_at` and atomically replaces `path`.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.updated_at = Utc::now();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut tmp, self).context("failed to serialize state")?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)
            .with_context(|| format!("failed to write state file {}", path.display()))?;

        tracing::debug!(path = %path.display(), "state saved");
        Ok(())
    }
}
