// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Presentation-facing facade over the telemetry and governance read paths.

pub mod api;
pub mod server;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use log::info;
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::governance::{
    ContractState, ContractSummary, DerivedProposalView, ExpiredOffering, ProposalStatusResolver,
    ToneTally,
};
use crate::ledger::{Address, LedgerClient, RpcLedger};
use crate::telemetry::{
    FileSource, TelemetryReader, TelemetryRecord, TelemetrySource, KNOWN_CHANNELS,
};

pub type SharedSource = Arc<dyn TelemetrySource>;
pub type SharedLedger = Arc<dyn LedgerClient>;

/// Both read paths behind one handle. Safe to share across request threads.
pub struct Dashboard {
    telemetry: TelemetryReader<SharedSource>,
    governance: Option<ProposalStatusResolver<SharedLedger>>,
    recent_window: usize,
}

impl Dashboard {
    pub fn new(
        source: SharedSource,
        ledger: Option<(SharedLedger, Address)>,
        decimals: u32,
        recent_window: usize,
    ) -> Self {
        Self {
            telemetry: TelemetryReader::new(source),
            governance: ledger
                .map(|(client, contract)| ProposalStatusResolver::new(client, contract, decimals)),
            recent_window,
        }
    }

    pub fn from_config(cfg: &DashboardConfig) -> Self {
        let source: SharedSource = Arc::new(FileSource::new(cfg.telemetry_path.clone()));
        let ledger = cfg.contract_address.map(|contract| {
            info!("governance via {} contract {}", cfg.rpc_url, contract);
            let client: SharedLedger =
                Arc::new(RpcLedger::new(cfg.rpc_url.clone(), contract, cfg.rpc_timeout()));
            (client, contract)
        });
        Self::new(source, ledger, cfg.decimals, cfg.recent_window)
    }

    pub fn default_window(&self) -> usize {
        self.recent_window
    }

    pub fn latest_telemetry(&self) -> DashboardResult<Option<TelemetryRecord>> {
        self.telemetry.latest()
    }

    pub fn recent_telemetry(&self, window: usize) -> DashboardResult<Vec<TelemetryRecord>> {
        self.telemetry.recent(window)
    }

    /// One channel over the recent window, oldest first. Gaps stay `null`.
    pub fn telemetry_series(
        &self,
        channel: &str,
        window: usize,
    ) -> DashboardResult<Vec<SeriesPoint>> {
        Ok(self
            .telemetry
            .channel_series(channel, window)?
            .into_iter()
            .map(|(timestamp, value)| SeriesPoint { timestamp, value })
            .collect())
    }

    pub fn status_hush(&self) -> DashboardResult<StatusHush> {
        Ok(StatusHush::from_latest(self.latest_telemetry()?.as_ref()))
    }

    fn governance(&self) -> DashboardResult<&ProposalStatusResolver<SharedLedger>> {
        self.governance.as_ref().ok_or_else(|| {
            DashboardError::LedgerUnreachable("no contract address configured".into())
        })
    }

    pub fn list_proposals(&self) -> DashboardResult<Vec<DerivedProposalView>> {
        self.governance()?.list_proposals()
    }

    pub fn contract_summary(&self) -> DashboardResult<ContractSummary> {
        self.governance()?.contract_summary()
    }

    pub fn tone_tally(&self) -> DashboardResult<ToneTally> {
        self.governance()?.tone_tally()
    }

    pub fn contract_state(&self) -> DashboardResult<ContractState> {
        self.governance()?.contract_state()
    }

    pub fn expired_offerings(&self) -> DashboardResult<Vec<ExpiredOffering>> {
        self.governance()?.expired_offerings()
    }

    pub fn current_block(&self) -> DashboardResult<u64> {
        self.governance()?.current_block()
    }
}

/// One charting sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<FixedOffset>,
    pub value: Option<f64>,
}

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HushValue {
    Reading(f64),
    Placeholder(&'static str),
}

/// Display snapshot of the newest reading, with explicit placeholders when
/// there is nothing to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusHush {
    pub timestamp: String,
    #[serde(flatten)]
    pub readings: BTreeMap<String, HushValue>,
    pub sensor_error: Option<String>,
}

impl StatusHush {
    pub fn from_latest(latest: Option<&TelemetryRecord>) -> Self {
        let Some(record) = latest else {
            return Self {
                timestamp: "No data yet".into(),
                readings: KNOWN_CHANNELS
                    .iter()
                    .map(|c| (c.to_string(), HushValue::Placeholder(NOT_AVAILABLE)))
                    .collect(),
                sensor_error: Some("Waiting for first breath...".into()),
            };
        };
        let mut readings: BTreeMap<String, HushValue> = KNOWN_CHANNELS
            .iter()
            .map(|c| (c.to_string(), HushValue::Placeholder(NOT_AVAILABLE)))
            .collect();
        for (name, value) in &record.channels {
            let shown = value.map_or(HushValue::Placeholder(NOT_AVAILABLE), HushValue::Reading);
            readings.insert(name.clone(), shown);
        }
        Self {
            timestamp: record.timestamp.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
            readings,
            sensor_error: record.sensor_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::MemorySource;

    #[test]
    fn hush_without_data_uses_placeholders() {
        let hush = StatusHush::from_latest(None);
        assert_eq!(hush.timestamp, "No data yet");
        assert_eq!(hush.readings.len(), KNOWN_CHANNELS.len());
        let json = serde_json::to_value(&hush).unwrap();
        assert_eq!(json["humidity"], "N/A");
        assert_eq!(json["sensor_error"], "Waiting for first breath...");
    }

    #[test]
    fn hush_renders_latest_reading() {
        let rec = TelemetryRecord::parse_line(
            r#"{"timestamp":"2025-06-01T12:00:00+02:00","humidity":44.1,"voc_level":"bad"}"#,
        )
        .unwrap();
        let hush = StatusHush::from_latest(Some(&rec));
        assert_eq!(hush.timestamp, "2025-06-01 12:00:00 +02:00");
        assert_eq!(hush.readings["humidity"], HushValue::Reading(44.1));
        assert_eq!(hush.readings["voc_level"], HushValue::Placeholder("N/A"));
        assert_eq!(hush.readings["cpu_temp"], HushValue::Placeholder("N/A"));
        assert_eq!(hush.sensor_error, None);
    }

    #[test]
    fn series_follows_recent_window() {
        let log = concat!(
            r#"{"timestamp":"2025-06-01T12:00:00Z","humidity":40.0}"#,
            "\n",
            r#"{"timestamp":"2025-06-01T12:01:00Z","humidity":"N/A"}"#,
            "\n",
            r#"{"timestamp":"2025-06-01T12:02:00Z","humidity":42.5}"#,
        );
        let d = Dashboard::new(Arc::new(MemorySource::new(log)), None, 18, 10);
        let values: Vec<_> = d
            .telemetry_series("humidity", 2)
            .unwrap()
            .into_iter()
            .map(|p| p.value)
            .collect();
        assert_eq!(values, vec![None, Some(42.5)]);
        let json = serde_json::to_value(d.telemetry_series("cpu_temp", 1).unwrap()).unwrap();
        assert_eq!(json[0]["value"], serde_json::Value::Null);
    }

    #[test]
    fn governance_without_contract_is_unreachable() {
        let d = Dashboard::new(Arc::new(MemorySource::missing()), None, 18, 10);
        assert!(d.list_proposals().unwrap_err().is_unreachable());
        assert!(d.tone_tally().unwrap_err().is_unreachable());
        assert_eq!(d.latest_telemetry().unwrap(), None);
    }
}
