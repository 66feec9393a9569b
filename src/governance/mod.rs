// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Proposal lifecycle, tone classification and governance counters.

pub mod resolver;
pub mod status;
pub mod tone;
pub mod units;

pub use resolver::{
    ContractState, ContractSummary, DerivedProposalView, ExpiredOffering, ProposalStatusResolver,
};
pub use status::ProposalStatus;
pub use tone::{ToneTag, ToneTally};
pub use units::{format_units, DEFAULT_DECIMALS};
