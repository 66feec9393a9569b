// CLASSIFICATION: COMMUNITY
// Filename: api.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! JSON routes. Routing is a pure function of method and URL so it can be
//! exercised without opening a socket.

use log::warn;
use serde::Serialize;
use serde_json::{json, Value};

use super::Dashboard;
use crate::error::{DashboardError, DashboardResult};

/// Status code and JSON body for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::error(500, format!("serialization failed: {e}")),
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    fn from_result<T: Serialize>(route: &str, result: DashboardResult<T>) -> Self {
        match result {
            Ok(v) => Self::ok(&v),
            Err(e) => {
                warn!("{} failed: {}", route, e);
                let status = match &e {
                    DashboardError::SourceUnavailable(_) => 404,
                    DashboardError::LedgerUnreachable(_) => 503,
                    DashboardError::LedgerCallFailure { .. } => 502,
                    DashboardError::SourceReadFailure { .. }
                    | DashboardError::Config(_)
                    | DashboardError::Listen { .. } => 500,
                };
                let message = match &e {
                    DashboardError::LedgerUnreachable(_) => format!("contract unavailable: {e}"),
                    _ => e.to_string(),
                };
                Self::error(status, message)
            }
        }
    }
}

pub fn route(dashboard: &Dashboard, method: &str, url: &str) -> ApiResponse {
    if !method.eq_ignore_ascii_case("GET") {
        return ApiResponse::error(405, format!("method {method} not allowed"));
    }
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    match path.trim_end_matches('/') {
        "/api/latest_breath" => match dashboard.latest_telemetry() {
            Ok(Some(record)) => ApiResponse::ok(&record),
            Ok(None) => ApiResponse::error(404, "No data found"),
            Err(e) => ApiResponse::from_result::<()>(path, Err(e)),
        },
        "/api/recent_breath" => match window(dashboard, query) {
            Ok(w) => ApiResponse::from_result(path, dashboard.recent_telemetry(w)),
            Err(resp) => resp,
        },
        "/api/breath_series" => {
            let Some(channel) = query_param(query, "channel").filter(|c| !c.is_empty()) else {
                return ApiResponse::error(400, "missing channel");
            };
            match window(dashboard, query) {
                Ok(w) => ApiResponse::from_result(path, dashboard.telemetry_series(channel, w)),
                Err(resp) => resp,
            }
        }
        "/api/status_hush" => ApiResponse::from_result(path, dashboard.status_hush()),
        "/api/proposals" => ApiResponse::from_result(path, dashboard.list_proposals()),
        "/api/contract_info" => ApiResponse::from_result(path, dashboard.contract_summary()),
        "/api/contract_state" => ApiResponse::from_result(path, dashboard.contract_state()),
        "/api/tone_tally" => ApiResponse::from_result(path, dashboard.tone_tally()),
        "/api/current_block" => ApiResponse::from_result(
            path,
            dashboard
                .current_block()
                .map(|b| json!({ "currentBlock": b })),
        ),
        "/api/expired_proposals_toneforms" => {
            ApiResponse::from_result(path, dashboard.expired_offerings())
        }
        _ => ApiResponse::error(404, format!("no route for {path}")),
    }
}

fn window(dashboard: &Dashboard, query: &str) -> Result<usize, ApiResponse> {
    match query_param(query, "window") {
        None => Ok(dashboard.default_window()),
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| ApiResponse::error(400, format!("invalid window {raw:?}"))),
    }
}

fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}
