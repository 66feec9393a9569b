// CLASSIFICATION: COMMUNITY
// Filename: record.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Breathline telemetry record and its lenient line parser.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Channels the breathline sensor writes today. Other keys are kept as extra channels.
pub const KNOWN_CHANNELS: [&str; 7] = [
    "cpu_temp",
    "cpu_load",
    "ambient_temp",
    "humidity",
    "pressure",
    "voc_level",
    "light_level",
];

const TIMESTAMP_KEY: &str = "timestamp";
const SENSOR_ERROR_KEY: &str = "sensor_error";

/// One timestamped sensor sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryRecord {
    pub timestamp: DateTime<FixedOffset>,
    #[serde(flatten)]
    pub channels: BTreeMap<String, Option<f64>>,
    pub sensor_error: Option<String>,
}

/// Why a line was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRejection {
    Empty,
    NotJson,
    NotObject,
    MissingTimestamp,
    BadTimestamp(String),
}

impl TelemetryRecord {
    /// Parse one log line. Only structural problems reject the line; bad channel
    /// values are kept as missing readings.
    pub fn parse_line(line: &str) -> Result<Self, LineRejection> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(LineRejection::Empty);
        }
        let value: Value = serde_json::from_str(trimmed).map_err(|_| LineRejection::NotJson)?;
        match value {
            Value::Object(map) => Self::from_object(map),
            _ => Err(LineRejection::NotObject),
        }
    }

    fn from_object(map: Map<String, Value>) -> Result<Self, LineRejection> {
        let timestamp = match map.get(TIMESTAMP_KEY) {
            Some(Value::String(raw)) => {
                parse_timestamp(raw).ok_or_else(|| LineRejection::BadTimestamp(raw.clone()))?
            }
            Some(Value::Null) | None => return Err(LineRejection::MissingTimestamp),
            Some(other) => return Err(LineRejection::BadTimestamp(other.to_string())),
        };
        let mut channels = BTreeMap::new();
        let mut sensor_error = None;
        for (key, value) in map {
            match key.as_str() {
                TIMESTAMP_KEY => {}
                SENSOR_ERROR_KEY => sensor_error = error_text(&value),
                _ => {
                    channels.insert(key, coerce_numeric(&value));
                }
            }
        }
        Ok(Self {
            timestamp,
            channels,
            sensor_error,
        })
    }

    /// Reading for `name`, `None` when absent or not numeric.
    pub fn channel(&self, name: &str) -> Option<f64> {
        self.channels.get(name).copied().flatten()
    }
}

/// Numbers and numeric strings become readings, everything else is missing.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn error_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Accepts RFC 3339, ISO-8601 without offset and `YYYY-MM-DD HH:MM:SS`.
/// Offset-less stamps are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive).fixed_offset());
        }
    }
    None
}
