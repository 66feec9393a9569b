// CLASSIFICATION: COMMUNITY
// Filename: http_server.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

use breathline::dashboard::server::DashboardServer;
use breathline::telemetry::MemorySource;
use breathline::{Dashboard, DashboardError};
use serde_json::Value;

#[test]
fn serves_json_routes_over_http() {
    // skip test if we can't bind to a local port
    if TcpListener::bind("127.0.0.1:0").is_err() {
        eprintln!("skipping test: cannot bind local port");
        return;
    }
    let log = concat!(
        r#"{"timestamp":"2025-06-01T12:00:00Z","cpu_temp":51.0}"#,
        "\n",
        r#"{"timestamp":"2025-06-01T12:00:05Z","cpu_temp":52.5,"sensor_error":"i2c timeout"}"#,
        "\n"
    );
    let dashboard = Arc::new(Dashboard::new(
        Arc::new(MemorySource::new(log)),
        None,
        18,
        120,
    ));
    let server = DashboardServer::bind("127.0.0.1:0").unwrap();
    let port = server.port().unwrap();
    thread::spawn(move || server.run(dashboard, 2));

    let base = format!("http://127.0.0.1:{port}");
    let resp = ureq::get(&format!("{base}/api/latest_breath")).call().unwrap();
    assert_eq!(resp.header("Content-Type"), Some("application/json"));
    let latest: Value = resp.into_json().unwrap();
    assert_eq!(latest["cpu_temp"], 52.5);
    assert_eq!(latest["sensor_error"], "i2c timeout");

    let recent: Value = ureq::get(&format!("{base}/api/recent_breath?window=1"))
        .call()
        .unwrap()
        .into_json()
        .unwrap();
    assert_eq!(recent.as_array().unwrap().len(), 1);

    match ureq::get(&format!("{base}/api/proposals")).call() {
        Err(ureq::Error::Status(code, resp)) => {
            assert_eq!(code, 503);
            let body: Value = resp.into_json().unwrap();
            assert!(body["error"].as_str().unwrap().contains("contract unavailable"));
        }
        other => panic!("expected 503, got {:?}", other.map(|r| r.status())),
    }
}

#[test]
fn occupied_port_is_a_listen_error() {
    let Ok(held) = TcpListener::bind("127.0.0.1:0") else {
        eprintln!("skipping test: cannot bind local port");
        return;
    };
    let addr = held.local_addr().unwrap().to_string();
    match DashboardServer::bind(&addr) {
        Err(DashboardError::Listen { addr: reported, .. }) => assert_eq!(reported, addr),
        Err(other) => panic!("expected listen error, got {other}"),
        Ok(_) => panic!("second bind on {addr} succeeded"),
    }
}
