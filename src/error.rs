// CLASSIFICATION: COMMUNITY
// Filename: error.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Error taxonomy shared by the telemetry and governance read paths.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the dashboard core.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Telemetry log does not exist yet. Readers turn this into "no data".
    #[error("telemetry source {} not found", .0.display())]
    SourceUnavailable(PathBuf),
    /// Telemetry log exists but could not be read.
    #[error("telemetry source {} unreadable: {source}", .path.display())]
    SourceReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The ledger node could not be reached, or no contract is configured.
    #[error("ledger unreachable: {0}")]
    LedgerUnreachable(String),
    /// A single ledger call failed or returned malformed data.
    #[error("ledger call {call} failed: {reason}")]
    LedgerCallFailure { call: String, reason: String },
    #[error("configuration error: {0}")]
    Config(String),
    /// The HTTP listener could not be opened.
    #[error("cannot listen on {addr}: {reason}")]
    Listen { addr: String, reason: String },
}

impl DashboardError {
    pub(crate) fn call_failure(call: impl Into<String>, reason: impl ToString) -> Self {
        DashboardError::LedgerCallFailure {
            call: call.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors that mean the governance side is down rather than wrong.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, DashboardError::LedgerUnreachable(_))
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
