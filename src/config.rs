// CLASSIFICATION: COMMUNITY
// Filename: config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Dashboard configuration: TOML file, environment overrides, and the
//! deployment's `contract_info.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::governance::DEFAULT_DECIMALS;
use crate::ledger::Address;

/// Largest decimal scale a `uint256` amount can meaningfully carry.
const MAX_DECIMALS: u32 = 77;

/// Everything the dashboard needs at construction. Nothing is read from
/// globals after this is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub telemetry_path: PathBuf,
    pub recent_window: usize,
    pub rpc_url: String,
    pub rpc_timeout_ms: u64,
    pub contract_address: Option<Address>,
    pub contract_info_path: PathBuf,
    pub decimals: u32,
    pub listen: String,
    pub http_workers: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            telemetry_path: PathBuf::from("/var/log/jetson_breathline.jsonl"),
            recent_window: 120,
            rpc_url: "http://127.0.0.1:8545".into(),
            rpc_timeout_ms: 5000,
            contract_address: None,
            contract_info_path: PathBuf::from("contract_info.json"),
            decimals: DEFAULT_DECIMALS,
            listen: "0.0.0.0:5000".into(),
            http_workers: 4,
        }
    }
}

#[derive(Deserialize)]
struct ContractInfo {
    address: Option<String>,
}

impl DashboardConfig {
    /// Load from `path`, else `BREATHLINE_CONFIG`, else defaults; then apply
    /// environment overrides and fill the contract address from
    /// `contract_info.json` when it is still unset.
    pub fn load(path: Option<&Path>) -> DashboardResult<Self> {
        let env_path = std::env::var("BREATHLINE_CONFIG").ok().map(PathBuf::from);
        let mut cfg = match path.map(Path::to_path_buf).or(env_path) {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        cfg.apply_env()?;
        cfg.resolve_contract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> DashboardResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| DashboardError::Config(format!("read {}: {e}", path.display())))?;
        toml::from_str(&text)
            .map_err(|e| DashboardError::Config(format!("parse {}: {e}", path.display())))
    }

    fn apply_env(&mut self) -> DashboardResult<()> {
        if let Ok(p) = std::env::var("BREATHLINE_LOG_PATH") {
            self.telemetry_path = PathBuf::from(p);
        }
        if let Ok(url) = std::env::var("WEB3_PROVIDER_URL") {
            self.rpc_url = url;
        }
        if let Ok(addr) = std::env::var("CONTRACT_ADDRESS") {
            let parsed = addr
                .parse()
                .map_err(|e| DashboardError::Config(format!("CONTRACT_ADDRESS: {e}")))?;
            self.contract_address = Some(parsed);
        }
        if let Ok(listen) = std::env::var("BREATHLINE_LISTEN") {
            self.listen = listen;
        }
        Ok(())
    }

    fn resolve_contract(&mut self) -> DashboardResult<()> {
        if self.contract_address.is_some() {
            return Ok(());
        }
        let text = match fs::read_to_string(&self.contract_info_path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "{} not found, governance views disabled",
                    self.contract_info_path.display()
                );
                return Ok(());
            }
            Err(e) => {
                return Err(DashboardError::Config(format!(
                    "read {}: {e}",
                    self.contract_info_path.display()
                )))
            }
        };
        let info: ContractInfo = serde_json::from_str(&text).map_err(|e| {
            DashboardError::Config(format!("{}: {e}", self.contract_info_path.display()))
        })?;
        match info.address {
            Some(addr) => {
                let parsed = addr.parse().map_err(|e| {
                    DashboardError::Config(format!("{}: {e}", self.contract_info_path.display()))
                })?;
                self.contract_address = Some(parsed);
            }
            None => warn!(
                "{} has no address field",
                self.contract_info_path.display()
            ),
        }
        Ok(())
    }

    fn validate(&self) -> DashboardResult<()> {
        if self.http_workers == 0 {
            return Err(DashboardError::Config("http_workers must be at least 1".into()));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(DashboardError::Config(format!(
                "decimals {} exceeds {MAX_DECIMALS}",
                self.decimals
            )));
        }
        Ok(())
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }
}
