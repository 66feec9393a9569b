// CLASSIFICATION: COMMUNITY
// Filename: source.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Telemetry sources: where the raw JSONL bytes come from.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{DashboardError, DashboardResult};

/// Read access to an append-only JSONL log.
pub trait TelemetrySource: Send + Sync {
    /// Full current contents. A missing log is `SourceUnavailable`.
    fn read_all(&self) -> DashboardResult<Vec<u8>>;
}

impl<T: TelemetrySource + ?Sized> TelemetrySource for std::sync::Arc<T> {
    fn read_all(&self) -> DashboardResult<Vec<u8>> {
        (**self).read_all()
    }
}

/// Log file on local disk, re-read on every call.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TelemetrySource for FileSource {
    fn read_all(&self) -> DashboardResult<Vec<u8>> {
        fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DashboardError::SourceUnavailable(self.path.clone()),
            _ => DashboardError::SourceReadFailure {
                path: self.path.clone(),
                source: e,
            },
        })
    }
}

/// Fixed contents held in memory; `None` behaves like a missing file.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    contents: Option<Vec<u8>>,
}

impl MemorySource {
    pub fn new(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    pub fn missing() -> Self {
        Self { contents: None }
    }
}

impl TelemetrySource for MemorySource {
    fn read_all(&self) -> DashboardResult<Vec<u8>> {
        self.contents
            .clone()
            .ok_or_else(|| DashboardError::SourceUnavailable(PathBuf::from("<memory>")))
    }
}
