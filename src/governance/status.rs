// CLASSIFICATION: COMMUNITY
// Filename: status.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Proposal lifecycle status, derived from block height and approvals.

use std::fmt;

use serde::{Serialize, Serializer};

/// Lifecycle of a proposal. Nothing here is stored on the ledger; `Expired`
/// and `ReadyForExecution` change purely because the chain advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProposalStatus {
    Executed,
    Expired,
    Live,
    ReadyForExecution,
}

impl ProposalStatus {
    /// First match wins: executed, then expired, then quorum.
    pub fn derive(
        executed: bool,
        approvals: u64,
        expiration_block: u64,
        current_block: u64,
        minimum_quorum: u64,
    ) -> Self {
        if executed {
            ProposalStatus::Executed
        } else if current_block > expiration_block {
            ProposalStatus::Expired
        } else if approvals < minimum_quorum {
            ProposalStatus::Live
        } else {
            ProposalStatus::ReadyForExecution
        }
    }

    /// Counted towards the active offerings.
    pub fn is_active(self) -> bool {
        matches!(self, ProposalStatus::Live | ProposalStatus::ReadyForExecution)
    }

    pub fn label(self) -> &'static str {
        match self {
            ProposalStatus::Executed => "Executed",
            ProposalStatus::Expired => "Expired",
            ProposalStatus::Live => "Live",
            ProposalStatus::ReadyForExecution => "Ready for Execution",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ProposalStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::ProposalStatus::*;
    use super::*;

    #[test]
    fn executed_wins_over_everything() {
        assert_eq!(ProposalStatus::derive(true, 0, 5, 100, 3), Executed);
        assert_eq!(ProposalStatus::derive(true, 9, 500, 100, 3), Executed);
    }

    #[test]
    fn expired_one_block_past_even_with_quorum() {
        assert_eq!(ProposalStatus::derive(false, 5, 100, 101, 3), Expired);
        assert_eq!(ProposalStatus::derive(false, 5, 100, 100, 3), ReadyForExecution);
    }

    #[test]
    fn quorum_splits_live_and_ready() {
        assert_eq!(ProposalStatus::derive(false, 2, 100, 50, 3), Live);
        assert_eq!(ProposalStatus::derive(false, 3, 100, 50, 3), ReadyForExecution);
        assert_eq!(ProposalStatus::derive(false, 0, 100, 50, 0), ReadyForExecution);
    }

    #[test]
    fn only_live_and_ready_are_active() {
        assert!(Live.is_active());
        assert!(ReadyForExecution.is_active());
        assert!(!Executed.is_active());
        assert!(!Expired.is_active());
    }
}
