// CLASSIFICATION: COMMUNITY
// Filename: resolver.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Derives proposal views and governance counters from a ledger client.
//!
//! Every operation does a full scan of the ledger and recomputes everything;
//! a failing call anywhere aborts the whole operation so callers never see a
//! partial tally.

use log::{debug, info};
use num_bigint::BigUint;
use serde::{Serialize, Serializer};

use super::status::ProposalStatus;
use super::tone::{ToneTag, ToneTally};
use super::units::format_units;
use crate::error::DashboardResult;
use crate::ledger::{Address, LedgerClient, ProposalRecord};

fn decimal<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

/// A proposal with its derived lifecycle and tone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedProposalView {
    pub id: u64,
    pub purpose: String,
    pub purpose_toneform: String,
    pub recipient: Address,
    #[serde(rename = "amount")]
    pub amount_in_major_unit: String,
    #[serde(serialize_with = "decimal")]
    pub amount_minor: BigUint,
    pub approvals: u64,
    pub creation_block: u64,
    pub expiration_block: u64,
    pub executed: bool,
    pub is_expired: bool,
    pub status: ProposalStatus,
    pub tone_tag: ToneTag,
}

impl DerivedProposalView {
    pub fn derive(
        id: u64,
        record: ProposalRecord,
        current_block: u64,
        minimum_quorum: u64,
        decimals: u32,
    ) -> Self {
        let status = ProposalStatus::derive(
            record.executed,
            record.approvals,
            record.expiration_block,
            current_block,
            minimum_quorum,
        );
        Self {
            id,
            tone_tag: ToneTag::classify(&record.purpose_toneform),
            amount_in_major_unit: format_units(&record.amount, decimals),
            is_expired: current_block > record.expiration_block,
            status,
            purpose: record.purpose,
            purpose_toneform: record.purpose_toneform,
            recipient: record.recipient,
            amount_minor: record.amount,
            approvals: record.approvals,
            creation_block: record.creation_block,
            expiration_block: record.expiration_block,
            executed: record.executed,
        }
    }
}

/// Contract-level facts for the dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSummary {
    pub address: Address,
    #[serde(rename = "balanceEth")]
    pub balance: String,
    #[serde(serialize_with = "decimal")]
    pub balance_minor: BigUint,
    pub steward: Address,
    pub minimum_quorum: u64,
    pub total_proposals: u64,
}

/// Counters over the currently active offerings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractState {
    pub active_offerings_count: u64,
    pub total_proposals: u64,
    pub toneform_tags: ToneTally,
}

/// A proposal that lapsed without being executed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpiredOffering {
    pub id: u64,
    pub purpose: String,
    pub toneform: String,
    pub expired_at_block: u64,
    pub executed: bool,
}

/// Point-in-time derivation over a [`LedgerClient`].
pub struct ProposalStatusResolver<L> {
    ledger: L,
    contract: Address,
    decimals: u32,
}

impl<L: LedgerClient> ProposalStatusResolver<L> {
    pub fn new(ledger: L, contract: Address, decimals: u32) -> Self {
        Self {
            ledger,
            contract,
            decimals,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    /// All proposals `0..count`, one ledger read per index.
    ///
    /// The result is a snapshot; proposals may change between the individual reads.
    pub fn list_proposals(&self) -> DashboardResult<Vec<DerivedProposalView>> {
        let count = self.ledger.proposal_count()?;
        let current_block = self.ledger.current_block()?;
        let quorum = self.ledger.minimum_quorum()?;
        info!(
            "scanning {} proposals at block {} (quorum {})",
            count, current_block, quorum
        );
        (0..count)
            .map(|id| {
                let record = self.ledger.proposal(id)?;
                let view =
                    DerivedProposalView::derive(id, record, current_block, quorum, self.decimals);
                debug!("proposal {} -> {} / {}", id, view.status, view.tone_tag);
                Ok(view)
            })
            .collect()
    }

    /// Tone counts over proposals that are neither executed nor expired.
    pub fn tone_tally(&self) -> DashboardResult<ToneTally> {
        Ok(active_tally(&self.list_proposals()?))
    }

    pub fn contract_state(&self) -> DashboardResult<ContractState> {
        let proposals = self.list_proposals()?;
        let toneform_tags = active_tally(&proposals);
        Ok(ContractState {
            active_offerings_count: toneform_tags.total(),
            total_proposals: proposals.len() as u64,
            toneform_tags,
        })
    }

    pub fn expired_offerings(&self) -> DashboardResult<Vec<ExpiredOffering>> {
        Ok(self
            .list_proposals()?
            .into_iter()
            .filter(|p| p.status == ProposalStatus::Expired)
            .map(|p| ExpiredOffering {
                id: p.id,
                purpose: p.purpose,
                toneform: p.purpose_toneform,
                expired_at_block: p.expiration_block,
                executed: p.executed,
            })
            .collect())
    }

    pub fn contract_summary(&self) -> DashboardResult<ContractSummary> {
        let balance_minor = self.ledger.balance(&self.contract)?;
        Ok(ContractSummary {
            address: self.contract,
            balance: format_units(&balance_minor, self.decimals),
            balance_minor,
            steward: self.ledger.steward()?,
            minimum_quorum: self.ledger.minimum_quorum()?,
            total_proposals: self.ledger.proposal_count()?,
        })
    }

    pub fn current_block(&self) -> DashboardResult<u64> {
        self.ledger.current_block()
    }
}

fn active_tally(proposals: &[DerivedProposalView]) -> ToneTally {
    proposals
        .iter()
        .filter(|p| p.status.is_active())
        .map(|p| p.tone_tag)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::governance::units::DEFAULT_DECIMALS;
    use crate::ledger::StaticLedger;

    fn offering(
        toneform: &str,
        approvals: u64,
        expiration_block: u64,
        executed: bool,
    ) -> ProposalRecord {
        ProposalRecord {
            purpose: format!("offering {toneform}"),
            purpose_toneform: toneform.into(),
            recipient: Address::ZERO,
            amount: BigUint::from(10u8).pow(18u32),
            approvals,
            creation_block: 1,
            expiration_block,
            executed,
        }
    }

    fn resolver(ledger: StaticLedger) -> ProposalStatusResolver<StaticLedger> {
        ProposalStatusResolver::new(ledger, Address([0x11; 20]), DEFAULT_DECIMALS)
    }

    #[test]
    fn statuses_follow_precedence() {
        let ledger = StaticLedger::new(2, 100)
            .with_proposal(offering("tone-gentle-joy", 0, 50, true))
            .with_proposal(offering("tone-practical-care", 5, 99, false))
            .with_proposal(offering("tone-climate-mourning", 1, 200, false))
            .with_proposal(offering("quiet", 2, 100, false));
        let views = resolver(ledger).list_proposals().unwrap();
        let statuses: Vec<_> = views.iter().map(|v| v.status).collect();
        assert_eq!(
            statuses,
            vec![
                ProposalStatus::Executed,
                ProposalStatus::Expired,
                ProposalStatus::Live,
                ProposalStatus::ReadyForExecution
            ]
        );
        assert_eq!(views[0].amount_in_major_unit, "1");
        assert!(views[1].is_expired);
        assert!(!views[3].is_expired);
        assert_eq!(views.iter().map(|v| v.id).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn tally_counts_only_active() {
        let ledger = StaticLedger::new(1, 100)
            .with_proposal(offering("joy", 0, 50, false))
            .with_proposal(offering("joy", 3, 500, true))
            .with_proposal(offering("care", 0, 150, false))
            .with_proposal(offering("mourning", 1, 150, false));
        let r = resolver(ledger);
        let state = r.contract_state().unwrap();
        assert_eq!(state.active_offerings_count, 2);
        assert_eq!(state.total_proposals, 4);
        assert_eq!(state.toneform_tags.get(ToneTag::GentleJoy), 0);
        assert_eq!(state.toneform_tags.get(ToneTag::PracticalCare), 1);
        assert_eq!(state.toneform_tags.get(ToneTag::ClimateMourning), 1);
        assert_eq!(r.tone_tally().unwrap(), state.toneform_tags);
    }

    #[test]
    fn block_advance_flips_status_without_caching() {
        let ledger = StaticLedger::new(1, 10).with_proposal(offering("joy", 1, 10, false));
        let r = resolver(ledger);
        assert_eq!(r.list_proposals().unwrap()[0].status, ProposalStatus::ReadyForExecution);
        r.ledger().set_current_block(11);
        assert_eq!(r.list_proposals().unwrap()[0].status, ProposalStatus::Expired);
        assert_eq!(r.tone_tally().unwrap().total(), 0);
    }

    #[test]
    fn one_failed_read_fails_the_whole_listing() {
        let ledger = StaticLedger::new(1, 10)
            .with_proposal(offering("joy", 0, 20, false))
            .with_proposal(offering("care", 0, 20, false));
        ledger.fail_proposal(Some(1));
        let r = resolver(ledger);
        assert!(matches!(
            r.list_proposals(),
            Err(DashboardError::LedgerCallFailure { .. })
        ));
        assert!(r.tone_tally().is_err());
        assert!(r.contract_state().is_err());
    }

    #[test]
    fn expired_offerings_skip_executed() {
        let ledger = StaticLedger::new(1, 100)
            .with_proposal(offering("joy", 0, 50, true))
            .with_proposal(offering("care", 0, 60, false));
        let expired = resolver(ledger).expired_offerings().unwrap();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id, 1);
        assert_eq!(expired[0].toneform, "care");
        assert_eq!(expired[0].expired_at_block, 60);
    }

    #[test]
    fn summary_reads_contract_balance() {
        let contract = Address([0x11; 20]);
        let steward: Address = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".parse().unwrap();
        let ledger = StaticLedger::new(3, 1)
            .with_steward(steward)
            .with_balance(contract, BigUint::from(1_500_000_000_000_000_000u64))
            .with_proposal(offering("joy", 0, 20, false));
        let summary = resolver(ledger).contract_summary().unwrap();
        assert_eq!(summary.balance, "1.5");
        assert_eq!(summary.steward, steward);
        assert_eq!(summary.minimum_quorum, 3);
        assert_eq!(summary.total_proposals, 1);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["balanceEth"], "1.5");
        assert_eq!(json["balanceMinor"], "1500000000000000000");
        assert_eq!(json["steward"], "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    }
}
