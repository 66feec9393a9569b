// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Access to the cooperative contract's proposal ledger.

pub mod abi;
pub mod address;
pub mod client;
pub mod memory;
pub mod rpc;

pub use address::Address;
pub use client::{LedgerClient, ProposalRecord};
pub use memory::StaticLedger;
pub use rpc::RpcLedger;
