// CLASSIFICATION: COMMUNITY
// Filename: server.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Blocking HTTP front end serving the JSON routes from a fixed worker pool.

use std::sync::Arc;
use std::thread;

use log::{debug, info, warn};
use tiny_http::{Header, Request, Response, Server};

use super::api::{route, ApiResponse};
use super::Dashboard;
use crate::error::{DashboardError, DashboardResult};

pub struct DashboardServer {
    server: Arc<Server>,
}

impl DashboardServer {
    pub fn bind(listen: &str) -> DashboardResult<Self> {
        let server = Server::http(listen).map_err(|e| DashboardError::Listen {
            addr: listen.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            server: Arc::new(server),
        })
    }

    /// Bound TCP port, useful when listening on port 0.
    pub fn port(&self) -> Option<u16> {
        self.server.server_addr().to_ip().map(|a| a.port())
    }

    /// Serve until the listener fails. Each worker pulls requests off the
    /// shared listener and answers them synchronously.
    pub fn run(self, dashboard: Arc<Dashboard>, workers: usize) {
        info!(
            "dashboard listening on {} with {} workers",
            self.server.server_addr(),
            workers
        );
        let handles: Vec<_> = (0..workers.max(1))
            .map(|n| {
                let server = Arc::clone(&self.server);
                let dashboard = Arc::clone(&dashboard);
                thread::spawn(move || worker(n, &server, &dashboard))
            })
            .collect();
        for h in handles {
            if h.join().is_err() {
                warn!("dashboard worker panicked");
            }
        }
    }
}

fn worker(n: usize, server: &Server, dashboard: &Dashboard) {
    loop {
        match server.recv() {
            Ok(request) => respond(dashboard, request),
            Err(e) => {
                warn!("worker {} stopping: {}", n, e);
                return;
            }
        }
    }
}

fn respond(dashboard: &Dashboard, request: Request) {
    let method = request.method().as_str().to_owned();
    let url = request.url().to_owned();
    let ApiResponse { status, body } = route(dashboard, &method, &url);
    debug!("{} {} -> {}", method, url, status);
    // from_data carries no default text/plain content type
    let mut response = Response::from_data(body.to_string().into_bytes()).with_status_code(status);
    if let Ok(header) = "Content-Type: application/json".parse::<Header>() {
        response = response.with_header(header);
    }
    if let Err(e) = request.respond(response) {
        warn!("failed to answer {} {}: {}", method, url, e);
    }
}
