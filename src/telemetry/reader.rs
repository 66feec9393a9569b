// CLASSIFICATION: COMMUNITY
// Filename: reader.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Latest-reading and recent-window views over a telemetry source.
//!
//! Every call re-reads the source from scratch. Nothing is cached and no read
//! offset is kept between calls, so results always reflect the log as it is
//! at call time.

use chrono::{DateTime, FixedOffset};
use log::debug;

use super::record::TelemetryRecord;
use super::source::TelemetrySource;
use crate::error::{DashboardError, DashboardResult};

/// Parses a telemetry source into dashboard views.
#[derive(Debug, Clone)]
pub struct TelemetryReader<S> {
    source: S,
}

impl<S: TelemetrySource> TelemetryReader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Most recent valid record, or `None` when there is no data yet.
    ///
    /// Ties on timestamp resolve to the later line, which keeps this equal to
    /// the last element of [`recent`](Self::recent) for a large enough window.
    pub fn latest(&self) -> DashboardResult<Option<TelemetryRecord>> {
        let Some(bytes) = self.load()? else {
            return Ok(None);
        };
        let mut newest: Option<TelemetryRecord> = None;
        for record in lines(&bytes).filter_map(parse) {
            match &newest {
                Some(seen) if record.timestamp < seen.timestamp => {}
                _ => newest = Some(record),
            }
        }
        Ok(newest)
    }

    /// Up to `window` most recent valid records, oldest first.
    pub fn recent(&self, window: usize) -> DashboardResult<Vec<TelemetryRecord>> {
        if window == 0 {
            return Ok(Vec::new());
        }
        let Some(bytes) = self.load()? else {
            return Ok(Vec::new());
        };
        let mut records: Vec<TelemetryRecord> = lines_rev(&bytes)
            .filter_map(parse)
            .take(window)
            .collect();
        records.reverse();
        records.sort_by_key(|r| r.timestamp);
        Ok(records)
    }

    /// Every valid record, oldest first.
    pub fn all(&self) -> DashboardResult<Vec<TelemetryRecord>> {
        self.recent(usize::MAX)
    }

    /// One channel over the recent window, for charting. Missing readings stay `None`.
    pub fn channel_series(
        &self,
        channel: &str,
        window: usize,
    ) -> DashboardResult<Vec<(DateTime<FixedOffset>, Option<f64>)>> {
        Ok(self
            .recent(window)?
            .into_iter()
            .map(|r| (r.timestamp, r.channel(channel)))
            .collect())
    }

    fn load(&self) -> DashboardResult<Option<Vec<u8>>> {
        match self.source.read_all() {
            Ok(bytes) => Ok(Some(bytes)),
            Err(DashboardError::SourceUnavailable(path)) => {
                debug!("telemetry source {} absent, no data yet", path.display());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    bytes.split(|b| *b == b'\n')
}

fn lines_rev(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    bytes.rsplit(|b| *b == b'\n')
}

fn parse(line: &[u8]) -> Option<TelemetryRecord> {
    let Ok(text) = std::str::from_utf8(line) else {
        debug!("dropping telemetry line: invalid utf-8");
        return None;
    };
    if text.trim().is_empty() {
        return None;
    }
    match TelemetryRecord::parse_line(text) {
        Ok(record) => Some(record),
        Err(reason) => {
            debug!("dropping telemetry line: {:?}", reason);
            None
        }
    }
}
