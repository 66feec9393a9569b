// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v1.1
// Date Modified: 2026-10-18
// Author: Lukas Bower

//! Read-path aggregation for the breathline dashboard: the ambient sensor's
//! telemetry log and the cooperative's on-chain proposal ledger.

/// Error taxonomy shared by both read paths
pub mod error;

/// Configuration loading and environment overrides
pub mod config;

/// Telemetry log parsing and windowing
pub mod telemetry;

/// Ledger client interface, JSON-RPC client and ABI codec
pub mod ledger;

/// Proposal status, tone classification and counters
pub mod governance;

/// Facade and JSON/HTTP surface for the presentation layer
pub mod dashboard;

/// CLI interface for the breathline binary
pub mod cli;

pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{DashboardError, DashboardResult};
