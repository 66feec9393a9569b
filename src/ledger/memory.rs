// CLASSIFICATION: COMMUNITY
// Filename: memory.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! In-memory ledger used by tests and offline runs.

use std::collections::HashMap;
use std::sync::RwLock;

use num_bigint::BigUint;

use super::address::Address;
use super::client::{LedgerClient, ProposalRecord};
use crate::error::{DashboardError, DashboardResult};

#[derive(Debug, Default)]
struct LedgerState {
    proposals: Vec<ProposalRecord>,
    minimum_quorum: u64,
    current_block: u64,
    steward: Address,
    balances: HashMap<Address, BigUint>,
    fail_index: Option<u64>,
    offline: bool,
}

/// Ledger held in memory. Interior state can be changed between reads to
/// simulate block advance or approvals arriving.
#[derive(Debug, Default)]
pub struct StaticLedger {
    state: RwLock<LedgerState>,
}

impl StaticLedger {
    pub fn new(minimum_quorum: u64, current_block: u64) -> Self {
        Self {
            state: RwLock::new(LedgerState {
                minimum_quorum,
                current_block,
                ..LedgerState::default()
            }),
        }
    }

    pub fn with_proposal(self, record: ProposalRecord) -> Self {
        self.write(|s| s.proposals.push(record));
        self
    }

    pub fn with_steward(self, steward: Address) -> Self {
        self.write(|s| s.steward = steward);
        self
    }

    pub fn with_balance(self, address: Address, minor: BigUint) -> Self {
        self.write(|s| {
            s.balances.insert(address, minor);
        });
        self
    }

    pub fn set_current_block(&self, block: u64) {
        self.write(|s| s.current_block = block);
    }

    pub fn approve(&self, index: usize) {
        self.write(|s| {
            if let Some(p) = s.proposals.get_mut(index) {
                p.approvals += 1;
            }
        });
    }

    /// Make `proposal(index)` fail until cleared.
    pub fn fail_proposal(&self, index: Option<u64>) {
        self.write(|s| s.fail_index = index);
    }

    /// Make every call fail as if the node were down.
    pub fn set_offline(&self, offline: bool) {
        self.write(|s| s.offline = offline);
    }

    fn write(&self, f: impl FnOnce(&mut LedgerState)) {
        let mut guard = self.state.write().unwrap_or_else(|p| p.into_inner());
        f(&mut guard);
    }

    fn read<T>(&self, f: impl FnOnce(&LedgerState) -> DashboardResult<T>) -> DashboardResult<T> {
        let guard = self.state.read().unwrap_or_else(|p| p.into_inner());
        if guard.offline {
            return Err(DashboardError::LedgerUnreachable("static ledger offline".into()));
        }
        f(&guard)
    }
}

impl LedgerClient for StaticLedger {
    fn proposal_count(&self) -> DashboardResult<u64> {
        self.read(|s| Ok(s.proposals.len() as u64))
    }

    fn proposal(&self, index: u64) -> DashboardResult<ProposalRecord> {
        self.read(|s| {
            if s.fail_index == Some(index) {
                return Err(DashboardError::call_failure(
                    "proposals",
                    format!("index {index} failed"),
                ));
            }
            usize::try_from(index)
                .ok()
                .and_then(|i| s.proposals.get(i))
                .cloned()
                .ok_or_else(|| {
                    DashboardError::call_failure("proposals", format!("no proposal {index}"))
                })
        })
    }

    fn minimum_quorum(&self) -> DashboardResult<u64> {
        self.read(|s| Ok(s.minimum_quorum))
    }

    fn current_block(&self) -> DashboardResult<u64> {
        self.read(|s| Ok(s.current_block))
    }

    fn balance(&self, address: &Address) -> DashboardResult<BigUint> {
        self.read(|s| Ok(s.balances.get(address).cloned().unwrap_or_default()))
    }

    fn steward(&self) -> DashboardResult<Address> {
        self.read(|s| Ok(s.steward))
    }
}
