// CLASSIFICATION: COMMUNITY
// Filename: telemetry_reader.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

use std::fs;
use std::io::Write;

use breathline::telemetry::{FileSource, TelemetryReader};
use breathline::DashboardError;
use tempfile::tempdir;

fn record(minute: u32, temp: f64) -> String {
    serde_json::json!({
        "timestamp": format!("2025-06-01T12:{minute:02}:00+00:00"),
        "cpu_temp": 41.5,
        "ambient_temp": temp,
        "sensor_error": null,
    })
    .to_string()
}

fn temps(records: &[breathline::telemetry::TelemetryRecord]) -> Vec<f64> {
    records
        .iter()
        .map(|r| r.channel("ambient_temp").unwrap())
        .collect()
}

#[test]
fn missing_log_means_no_data_yet() {
    let dir = tempdir().unwrap();
    let reader = TelemetryReader::new(FileSource::new(dir.path().join("breathline.jsonl")));
    assert_eq!(reader.latest().unwrap(), None);
    assert!(reader.recent(120).unwrap().is_empty());
}

#[test]
fn unreadable_log_is_an_error_not_empty() {
    let dir = tempdir().unwrap();
    // A directory at the log path exists but cannot be read as a file.
    let path = dir.path().join("breathline.jsonl");
    fs::create_dir_all(&path).unwrap();
    let reader = TelemetryReader::new(FileSource::new(&path));
    assert!(matches!(
        reader.latest(),
        Err(DashboardError::SourceReadFailure { .. })
    ));
    assert!(matches!(
        reader.recent(3),
        Err(DashboardError::SourceReadFailure { .. })
    ));
}

#[test]
fn three_good_lines_and_a_corrupt_tail() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("breathline.jsonl");
    let mut f = fs::File::create(&path).unwrap();
    for (m, t) in [(0, 20.0), (1, 21.0), (2, 22.0)] {
        writeln!(f, "{}", record(m, t)).unwrap();
    }
    writeln!(f, "{{\"timestamp\":\"2025-06-01T12:03").unwrap();
    drop(f);

    let reader = TelemetryReader::new(FileSource::new(&path));
    let recent = reader.recent(10).unwrap();
    assert_eq!(temps(&recent), vec![20.0, 21.0, 22.0]);
    assert_eq!(reader.latest().unwrap().as_ref(), recent.last());
}

#[test]
fn window_bounds_and_ordering_hold_for_every_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("breathline.jsonl");
    let lines = [
        record(5, 5.0),
        "garbage".to_string(),
        record(1, 1.0),
        String::new(),
        record(3, 3.0),
        "[]".to_string(),
        record(4, 4.0),
        record(2, 2.0),
    ];
    fs::write(&path, lines.join("\n")).unwrap();
    let reader = TelemetryReader::new(FileSource::new(&path));
    let valid = 5;
    for w in 0..=valid + 2 {
        let recent = reader.recent(w).unwrap();
        assert!(recent.len() <= w);
        assert_eq!(recent.len(), w.min(valid));
        assert!(recent.windows(2).all(|p| p[0].timestamp <= p[1].timestamp));
    }
    assert_eq!(
        reader.latest().unwrap().as_ref(),
        reader.recent(valid).unwrap().last()
    );
}

#[test]
fn corrupting_one_line_drops_only_that_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("breathline.jsonl");
    let mut lines: Vec<String> = (0..6).map(|m| record(m, m as f64)).collect();
    fs::write(&path, lines.join("\n")).unwrap();
    let reader = TelemetryReader::new(FileSource::new(&path));
    assert_eq!(reader.recent(6).unwrap().len(), 6);

    lines[3] = lines[3].replace('{', "<");
    fs::write(&path, lines.join("\n")).unwrap();
    let recent = reader.recent(6).unwrap();
    assert_eq!(temps(&recent), vec![0.0, 1.0, 2.0, 4.0, 5.0]);
}

#[test]
fn bad_channel_values_are_missing_not_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("breathline.jsonl");
    fs::write(
        &path,
        concat!(
            r#"{"timestamp":"2025-06-01 12:00:00","humidity":"N/A","pressure":"1011.8","#,
            r#""light_level":true,"sensor_error":"bme680 not found"}"#,
            "\n",
        ),
    )
    .unwrap();
    let latest = TelemetryReader::new(FileSource::new(&path))
        .latest()
        .unwrap()
        .unwrap();
    assert_eq!(latest.channel("humidity"), None);
    assert_eq!(latest.channel("pressure"), Some(1011.8));
    assert_eq!(latest.channel("light_level"), None);
    assert_eq!(latest.sensor_error.as_deref(), Some("bme680 not found"));
}

#[test]
fn every_call_sees_the_current_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("breathline.jsonl");
    let reader = TelemetryReader::new(FileSource::new(&path));
    assert_eq!(reader.latest().unwrap(), None);
    fs::write(&path, format!("{}\n", record(0, 19.5))).unwrap();
    assert_eq!(reader.latest().unwrap().unwrap().channel("ambient_temp"), Some(19.5));
    let mut f = fs::OpenOptions::new().append(true).open(&path).unwrap();
    writeln!(f, "{}", record(1, 19.75)).unwrap();
    assert_eq!(reader.latest().unwrap().unwrap().channel("ambient_temp"), Some(19.75));
    assert_eq!(reader.all().unwrap().len(), 2);
}
